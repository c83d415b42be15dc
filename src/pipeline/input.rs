//! Input resolution: validate the user-supplied path and read the Markdown.
//!
//! The checks run in a fixed order so the caller gets the most specific
//! error: a missing path is reported as not-found before anything is
//! opened, a directory is rejected before we try to read it, and only then
//! is the file read and decoded as UTF-8.

use crate::error::Md2PdfError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A Markdown source read from disk.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path the document was read from.
    pub path: PathBuf,
    /// Full text of the document, without a leading byte-order mark.
    pub text: String,
}

impl SourceDocument {
    /// Directory containing the source, used to resolve relative assets.
    ///
    /// Returns `None` for bare file names; callers treat that as the current
    /// directory.
    pub fn base_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

/// Check that `path` names an existing regular file.
pub fn validate_input(path: &Path) -> Result<(), Md2PdfError> {
    if !path.exists() {
        return Err(Md2PdfError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(Md2PdfError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Read `path` as UTF-8 text.
///
/// Expects a path that already passed [`validate_input`]. A file that
/// vanished or turned into a directory in between is still reported with
/// the same errors.
pub fn read_source(path: &Path) -> Result<SourceDocument, Md2PdfError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Md2PdfError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::IsADirectory => Md2PdfError::NotAFile {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => Md2PdfError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Md2PdfError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let text = match text.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => text,
    };

    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(SourceDocument {
        path: path.to_path_buf(),
        text,
    })
}
