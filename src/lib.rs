//! # md2pdf
//!
//! Convert Markdown documents to classy, print-ready PDF files.
//!
//! Markdown is parsed with a fixed extension set (tables, footnotes,
//! definition lists, abbreviations, fenced code with syntax highlighting,
//! newline-to-break), wrapped in a minimal HTML document, and laid out by an
//! HTML/CSS-to-PDF engine together with a bundled stylesheet. The default
//! engine is [WeasyPrint](https://weasyprint.org), run as an external
//! program.
//!
//! ## Pipeline Overview
//!
//! ```text
//! notes.md
//!  │
//!  ├─ 1. Input     validate the path, read UTF-8
//!  ├─ 2. Markdown  pulldown-cmark + syntect → HTML fragment
//!  ├─ 3. Document  wrap in the fixed <html> shell
//!  ├─ 4. Render    HTML + bundled CSS → PDF bytes (weasyprint)
//!  └─ 5. Output    atomic write to notes.pdf
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2pdf::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), md2pdf::Md2PdfError> {
//!     let config = ConversionConfig::default();
//!     let written = convert("notes.md", None, &config)?;
//!     println!("wrote {}", written.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pdf` binary (clap + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! md2pdf = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod pipeline;
pub mod style;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_to_bytes, markdown_to_html};
pub use error::{ErrorCategory, Md2PdfError};
pub use pipeline::document::HtmlDocument;
pub use pipeline::markdown::MarkdownRenderer;
pub use pipeline::output::resolve_output_path;
pub use pipeline::render::{PdfRenderer, WeasyPrint};
pub use style::Stylesheet;
