//! HTML + CSS → PDF bytes.
//!
//! Layout and pagination are delegated to an external engine behind the
//! [`PdfRenderer`] trait. The default engine, [`WeasyPrint`], runs the
//! `weasyprint` executable: the document and stylesheet are written into a
//! scratch [`tempfile::TempDir`] (removed on drop, even on error) and the
//! PDF is read back from the engine's stdout.
//!
//! Renderers are `Send + Sync` and hold no per-call state, so one instance
//! can serve any number of conversions.

use crate::error::Md2PdfError;
use crate::pipeline::document::HtmlDocument;
use crate::style::Stylesheet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Number of trailing stderr lines kept in a [`Md2PdfError::RenderFailed`].
const STDERR_TAIL_LINES: usize = 6;

/// Lays out an HTML document with a stylesheet and returns PDF bytes.
pub trait PdfRenderer: Send + Sync {
    /// Render `document` styled by `stylesheet`.
    fn render(&self, document: &HtmlDocument, stylesheet: &Stylesheet)
        -> Result<Vec<u8>, Md2PdfError>;
}

/// Renderer backed by the WeasyPrint command-line tool.
#[derive(Debug, Clone)]
pub struct WeasyPrint {
    program: PathBuf,
}

impl Default for WeasyPrint {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl WeasyPrint {
    /// Program looked up on `PATH` when none is configured.
    pub const DEFAULT_PROGRAM: &'static str = "weasyprint";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, html: &Path, css: &Path, base_dir: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--encoding").arg("utf-8");
        cmd.arg("--stylesheet").arg(css);
        if let Some(dir) = base_dir {
            let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
            cmd.arg("--base-url").arg(dir);
        }
        cmd.arg(html).arg("-");
        cmd
    }
}

impl PdfRenderer for WeasyPrint {
    fn render(
        &self,
        document: &HtmlDocument,
        stylesheet: &Stylesheet,
    ) -> Result<Vec<u8>, Md2PdfError> {
        let scratch = tempfile::Builder::new()
            .prefix("md2pdf-")
            .tempdir()
            .map_err(|e| Md2PdfError::RenderFailed {
                detail: format!("cannot create scratch directory: {e}"),
            })?;

        let html_path = scratch.path().join("document.html");
        let css_path = scratch.path().join("styles.css");
        for (path, contents) in [(&html_path, document.as_str()), (&css_path, stylesheet.css())] {
            std::fs::write(path, contents).map_err(|e| Md2PdfError::RenderFailed {
                detail: format!("cannot write {}: {e}", path.display()),
            })?;
        }

        let mut cmd = self.command(&html_path, &css_path, document.base_dir());
        debug!("Running PDF engine: {:?}", cmd);

        let output = cmd.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => Md2PdfError::EngineNotFound {
                program: self.program.clone(),
            },
            _ => Md2PdfError::RenderFailed {
                detail: format!("failed to run '{}': {e}", self.program.display()),
            },
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Md2PdfError::RenderFailed {
                detail: format!(
                    "'{}' exited with {}: {}",
                    self.program.display(),
                    output.status,
                    stderr_tail(&stderr)
                ),
            });
        }

        let pdf = check_pdf(output.stdout)?;
        info!("PDF engine produced {} bytes", pdf.len());
        Ok(pdf)
    }
}

/// Reject engine output that is not a PDF.
///
/// An engine that exits cleanly without producing a PDF is outside every
/// failure mode the pipeline knows about, hence [`Md2PdfError::Internal`].
pub fn check_pdf(bytes: Vec<u8>) -> Result<Vec<u8>, Md2PdfError> {
    if bytes.is_empty() {
        return Err(Md2PdfError::Internal("PDF engine produced no output".into()));
    }
    if !bytes.starts_with(b"%PDF") {
        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(16)]).into_owned();
        return Err(Md2PdfError::Internal(format!(
            "PDF engine output is not a PDF (starts with {head:?})"
        )));
    }
    Ok(bytes)
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return "no diagnostic output".to_string();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_pdf_accepts_pdf_header() {
        let bytes = b"%PDF-1.7\n%fake\n".to_vec();
        assert_eq!(check_pdf(bytes.clone()).unwrap(), bytes);
    }

    #[test]
    fn check_pdf_rejects_empty_and_garbage() {
        let err = check_pdf(Vec::new()).unwrap_err();
        assert!(matches!(err, Md2PdfError::Internal(_)));

        let err = check_pdf(b"<html>oops".to_vec()).unwrap_err();
        assert!(err.to_string().contains("not a PDF"), "got: {err}");
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let stderr = (1..=10).map(|i| format!("line {i}\n")).collect::<String>();
        let tail = stderr_tail(&stderr);
        assert!(tail.starts_with("line 5"), "got: {tail}");
        assert!(tail.ends_with("line 10"));
        assert_eq!(stderr_tail("  \n"), "no diagnostic output");
    }

    #[test]
    fn default_program_is_looked_up_on_path() {
        assert_eq!(WeasyPrint::default().program(), Path::new("weasyprint"));
        let engine = WeasyPrint::new("/opt/wp/bin/weasyprint");
        assert_eq!(engine.program(), Path::new("/opt/wp/bin/weasyprint"));
    }

    #[test]
    fn command_line_shape() {
        let engine = WeasyPrint::new("/usr/bin/weasyprint");
        let cmd = engine.command(Path::new("doc.html"), Path::new("s.css"), None);
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(cmd.get_program(), "/usr/bin/weasyprint");
        assert_eq!(
            args,
            ["--encoding", "utf-8", "--stylesheet", "s.css", "doc.html", "-"]
        );
    }

    #[test]
    fn missing_engine_is_engine_not_found() {
        let engine = WeasyPrint::new("md2pdf-test-no-such-engine");
        let doc = HtmlDocument::wrap("<p>x</p>");
        let err = engine.render(&doc, &Stylesheet::bundled()).unwrap_err();
        assert!(matches!(err, Md2PdfError::EngineNotFound { .. }), "got: {err:?}");
    }
}
