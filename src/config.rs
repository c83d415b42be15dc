//! Configuration types for Markdown-to-PDF conversion.
//!
//! [`ConversionConfig`] carries the few knobs that concern *how* a PDF gets
//! produced: which engine renders it and how the file is written. What the
//! PDF *looks like* is not configurable: the Markdown extension set and the
//! bundled stylesheet are the same for every conversion.

use crate::error::Md2PdfError;
use crate::pipeline::render::{PdfRenderer, WeasyPrint};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for a Markdown-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2pdf::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .pdf_engine("/opt/weasyprint/bin/weasyprint")
///     .atomic_write(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Executable used by the default [`WeasyPrint`] renderer. Default: `weasyprint`
    /// (looked up on `PATH`).
    pub pdf_engine: PathBuf,

    /// Pre-constructed renderer. Takes precedence over `pdf_engine`.
    pub renderer: Option<Arc<dyn PdfRenderer>>,

    /// Write the PDF through a temporary file and rename it into place. Default: true.
    ///
    /// With this off, a failure halfway through writing can leave a
    /// truncated PDF at the output path.
    pub atomic_write: bool,

    /// Resolve relative image and link URLs against the Markdown file's
    /// directory. Default: true.
    pub resolve_relative_assets: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            pdf_engine: PathBuf::from(WeasyPrint::DEFAULT_PROGRAM),
            renderer: None,
            atomic_write: true,
            resolve_relative_assets: true,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("pdf_engine", &self.pdf_engine)
            .field("renderer", &self.renderer.as_ref().map(|_| "<dyn PdfRenderer>"))
            .field("atomic_write", &self.atomic_write)
            .field("resolve_relative_assets", &self.resolve_relative_assets)
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The renderer this config selects: the injected one, or WeasyPrint
    /// at `pdf_engine`.
    pub(crate) fn resolve_renderer(&self) -> Arc<dyn PdfRenderer> {
        match self.renderer {
            Some(ref renderer) => Arc::clone(renderer),
            None => Arc::new(WeasyPrint::new(self.pdf_engine.clone())),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn pdf_engine(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.pdf_engine = program.into();
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn PdfRenderer>) -> Self {
        self.config.renderer = Some(renderer);
        self
    }

    pub fn atomic_write(mut self, v: bool) -> Self {
        self.config.atomic_write = v;
        self
    }

    pub fn resolve_relative_assets(mut self, v: bool) -> Self {
        self.config.resolve_relative_assets = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2PdfError> {
        let c = &self.config;
        if c.renderer.is_none() && c.pdf_engine.as_os_str().is_empty() {
            return Err(Md2PdfError::InvalidConfig(
                "PDF engine path must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::document::HtmlDocument;
    use crate::style::Stylesheet;

    struct Fixed;

    impl PdfRenderer for Fixed {
        fn render(&self, _: &HtmlDocument, _: &Stylesheet) -> Result<Vec<u8>, Md2PdfError> {
            Ok(b"%PDF-fixed".to_vec())
        }
    }

    #[test]
    fn defaults() {
        let c = ConversionConfig::default();
        assert_eq!(c.pdf_engine, PathBuf::from("weasyprint"));
        assert!(c.atomic_write);
        assert!(c.resolve_relative_assets);
        assert!(c.renderer.is_none());
    }

    #[test]
    fn empty_engine_rejected() {
        let err = ConversionConfig::builder().pdf_engine("").build().unwrap_err();
        assert!(matches!(err, Md2PdfError::InvalidConfig(_)));
    }

    #[test]
    fn injected_renderer_wins() {
        let config = ConversionConfig::builder()
            .pdf_engine("")
            .renderer(Arc::new(Fixed))
            .build()
            .unwrap();
        let pdf = config
            .resolve_renderer()
            .render(&HtmlDocument::wrap(""), &Stylesheet::bundled())
            .unwrap();
        assert_eq!(pdf, b"%PDF-fixed");
    }

    #[test]
    fn debug_hides_renderer() {
        let config = ConversionConfig::builder()
            .renderer(Arc::new(Fixed))
            .build()
            .unwrap();
        assert!(format!("{config:?}").contains("<dyn PdfRenderer>"));
    }
}
