//! Output path resolution and PDF writing.
//!
//! By default the PDF is written atomically: bytes go to a temporary file in
//! the destination directory, which is then renamed over the target. Readers
//! of the target path see either the previous file or the complete new one,
//! and a failed write leaves no partial PDF behind. The destination
//! directory itself is never created.

use crate::error::Md2PdfError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve where the PDF for `input` goes.
///
/// An explicit `output` always wins. Otherwise the input's final extension
/// is replaced by `.pdf` (`notes.md` → `notes.pdf`,
/// `archive.tar.md` → `archive.tar.pdf`, `README` → `README.pdf`).
pub fn resolve_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("pdf"),
    }
}

/// Write `bytes` to `path`, overwriting any existing file.
pub fn write_pdf(path: &Path, bytes: &[u8], atomic: bool) -> Result<(), Md2PdfError> {
    let result = if atomic {
        write_atomic(path, bytes)
    } else {
        std::fs::write(path, bytes)
    };
    result.map_err(|source| Md2PdfError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // An overwritten PDF keeps its mode; a new one gets 0666 minus the umask.
    let existing = std::fs::metadata(path).ok().map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".md2pdf-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    if let Some(perms) = existing {
        tmp.as_file().set_permissions(perms)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_output_replaces_extension() {
        assert_eq!(
            resolve_output_path(Path::new("notes.md"), None),
            PathBuf::from("notes.pdf")
        );
        assert_eq!(
            resolve_output_path(Path::new("archive.tar.md"), None),
            PathBuf::from("archive.tar.pdf")
        );
        assert_eq!(
            resolve_output_path(Path::new("docs/README"), None),
            PathBuf::from("docs/README.pdf")
        );
    }

    #[test]
    fn explicit_output_wins() {
        assert_eq!(
            resolve_output_path(Path::new("notes.md"), Some(Path::new("out/final.pdf"))),
            PathBuf::from("out/final.pdf")
        );
    }

    #[test]
    fn atomic_write_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("doc.pdf");
        fs::write(&target, b"old").unwrap();

        write_pdf(&target, b"%PDF-new", true).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"%PDF-new");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    }

    #[cfg(unix)]
    #[test]
    fn atomic_overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("private.pdf");
        fs::write(&target, b"old").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o600)).unwrap();

        write_pdf(&target, b"%PDF-new", true).unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "mode after overwrite: {mode:o}");
        assert_eq!(fs::read(&target).unwrap(), b"%PDF-new");
    }

    #[cfg(unix)]
    #[test]
    fn atomic_new_file_honours_umask() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("fresh.pdf");
        let direct = dir.path().join("direct.pdf");

        write_pdf(&target, b"%PDF", true).unwrap();
        write_pdf(&direct, b"%PDF", false).unwrap();

        // Both paths honour the umask the same way a plain create does.
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&target), mode(&direct));
    }

    #[test]
    fn direct_write() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("doc.pdf");
        write_pdf(&target, b"%PDF-direct", false).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"%PDF-direct");
    }

    #[test]
    fn missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no/such/dir/doc.pdf");
        for atomic in [true, false] {
            let err = write_pdf(&target, b"%PDF", atomic).unwrap_err();
            assert!(
                matches!(err, Md2PdfError::OutputWriteFailed { .. }),
                "got: {err:?}"
            );
        }
        assert!(!dir.path().join("no").exists());
    }
}
