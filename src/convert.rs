//! Conversion entry points.
//!
//! [`convert`] is the file-to-file pipeline used by the CLI;
//! [`convert_to_bytes`] and [`markdown_to_html`] expose the same stages for
//! callers that keep documents in memory.
//!
//! Every call builds its own [`MarkdownRenderer`] and shares nothing mutable
//! with other calls, so conversions may run concurrently from several
//! threads.

use crate::config::ConversionConfig;
use crate::error::Md2PdfError;
use crate::pipeline::document::HtmlDocument;
use crate::pipeline::markdown::MarkdownRenderer;
use crate::pipeline::{input, output};
use crate::style::Stylesheet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Convert a Markdown file to PDF.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_path` : Markdown file to read
/// * `output_path`: where to write the PDF; defaults to `input_path` with
///   its extension replaced by `.pdf`
/// * `config`     : conversion configuration
///
/// # Returns
/// The path the PDF was written to. An existing file there is overwritten.
///
/// # Errors
/// - [`Md2PdfError::FileNotFound`] if `input_path` does not exist
/// - [`Md2PdfError::NotAFile`] if it is a directory or other non-file
/// - [`Md2PdfError::ReadFailed`] / [`Md2PdfError::PermissionDenied`] if it
///   cannot be read as UTF-8
/// - [`Md2PdfError::EngineNotFound`] / [`Md2PdfError::RenderFailed`] /
///   [`Md2PdfError::Internal`] if the PDF engine fails
/// - [`Md2PdfError::OutputWriteFailed`] if the PDF cannot be written
pub fn convert(
    input_path: impl AsRef<Path>,
    output_path: Option<&Path>,
    config: &ConversionConfig,
) -> Result<PathBuf, Md2PdfError> {
    let total_start = Instant::now();
    let input_path = input_path.as_ref();
    info!("Starting conversion: {}", input_path.display());

    // ── Step 1: Validate input ───────────────────────────────────────────
    input::validate_input(input_path)?;

    // ── Step 2: Resolve output path ──────────────────────────────────────
    let output_path = output::resolve_output_path(input_path, output_path);
    debug!("Output path: {}", output_path.display());

    // ── Step 3: Read source ──────────────────────────────────────────────
    let source = input::read_source(input_path)?;

    // ── Step 4: Markdown → fragment ──────────────────────────────────────
    let fragment = MarkdownRenderer::new().render(&source.text);
    debug!("Rendered {} bytes of HTML", fragment.len());

    // ── Step 5: Wrap in document shell ───────────────────────────────────
    let mut document = HtmlDocument::wrap(&fragment);
    if config.resolve_relative_assets {
        document = document.with_base_dir(source.base_dir().unwrap_or(Path::new(".")));
    }

    // ── Step 6: Render PDF ───────────────────────────────────────────────
    let render_start = Instant::now();
    let pdf = config
        .resolve_renderer()
        .render(&document, &Stylesheet::bundled())?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    // ── Step 7: Write output ─────────────────────────────────────────────
    output::write_pdf(&output_path, &pdf, config.atomic_write)?;

    info!(
        "Conversion complete: {} → {} ({} bytes, render {}ms, total {}ms)",
        input_path.display(),
        output_path.display(),
        pdf.len(),
        render_duration_ms,
        total_start.elapsed().as_millis()
    );
    Ok(output_path)
}

/// Render Markdown text to PDF bytes without touching the output filesystem.
///
/// Relative URLs are not resolved: there is no source file to anchor them.
pub fn convert_to_bytes(
    markdown: &str,
    config: &ConversionConfig,
) -> Result<Vec<u8>, Md2PdfError> {
    let document = HtmlDocument::wrap(&MarkdownRenderer::new().render(markdown));
    config
        .resolve_renderer()
        .render(&document, &Stylesheet::bundled())
}

/// Convert Markdown text to a complete HTML document (shell included).
pub fn markdown_to_html(markdown: &str) -> String {
    HtmlDocument::wrap(&MarkdownRenderer::new().render(markdown)).into_string()
}
