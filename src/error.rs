//! Error types for the md2pdf library.
//!
//! Every fallible operation returns [`Md2PdfError`]. The variants mirror the
//! stages of the pipeline (input, rendering, output) so callers can tell
//! *where* a conversion stopped without parsing messages.
//!
//! [`ErrorCategory`] collapses the variants into the handful of buckets the
//! command-line front end reports on:
//!
//! * [`ErrorCategory::NotFound`]: the input path does not exist.
//! * [`ErrorCategory::Io`]: reading, rendering or writing failed.
//! * [`ErrorCategory::Config`]: the [`crate::ConversionConfig`] is invalid.
//! * [`ErrorCategory::Unexpected`]: the PDF engine misbehaved in a way the
//!   pipeline does not anticipate (e.g. a zero exit status without a PDF).

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the md2pdf library.
#[derive(Debug, Error)]
pub enum Md2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The input path exists but is a directory or another non-regular file.
    #[error("Input path is not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    /// The file could not be read, or is not valid UTF-8.
    #[error("Error reading markdown file: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Rendering errors ──────────────────────────────────────────────────
    /// The HTML-to-PDF engine executable could not be started.
    #[error(
        "Error generating PDF: PDF engine '{}' was not found.\n\
Install WeasyPrint (https://weasyprint.org) or point --pdf-engine at an existing copy.",
        program.display()
    )]
    EngineNotFound { program: PathBuf },

    /// The HTML-to-PDF engine reported a failure.
    #[error("Error generating PDF: {detail}")]
    RenderFailed { detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{}': {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// The rendering collaborator behaved in a way the pipeline cannot
    /// classify.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of an [`Md2PdfError`], used to pick the message
/// prefix at the command-line boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The input file does not exist.
    NotFound,
    /// Reading the input, running the engine, or writing the output failed.
    Io,
    /// The conversion configuration was rejected.
    Config,
    /// Anything the pipeline did not anticipate.
    Unexpected,
}

impl Md2PdfError {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Md2PdfError::FileNotFound { .. } => ErrorCategory::NotFound,
            Md2PdfError::NotAFile { .. }
            | Md2PdfError::PermissionDenied { .. }
            | Md2PdfError::ReadFailed { .. }
            | Md2PdfError::EngineNotFound { .. }
            | Md2PdfError::RenderFailed { .. }
            | Md2PdfError::OutputWriteFailed { .. } => ErrorCategory::Io,
            Md2PdfError::InvalidConfig(_) => ErrorCategory::Config,
            Md2PdfError::Internal(_) => ErrorCategory::Unexpected,
        }
    }
}
