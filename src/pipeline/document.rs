//! The fixed HTML document shell around a rendered fragment.

use std::path::{Path, PathBuf};

const SHELL_HEAD: &str = "<!DOCTYPE html><html><head><meta charset=\"UTF-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\"></head>\n\
<body>";

const SHELL_TAIL: &str = "</body></html>\n";

/// A complete HTML document ready for the PDF engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    html: String,
    base_dir: Option<PathBuf>,
}

impl HtmlDocument {
    /// Wrap an HTML fragment in the document shell.
    pub fn wrap(fragment: &str) -> Self {
        let mut html = String::with_capacity(SHELL_HEAD.len() + fragment.len() + SHELL_TAIL.len());
        html.push_str(SHELL_HEAD);
        html.push_str(fragment);
        html.push_str(SHELL_TAIL);
        Self {
            html,
            base_dir: None,
        }
    }

    /// Resolve relative URLs in the document against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// The full document markup.
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Directory relative URLs resolve against, if any.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn into_string(self) -> String {
        self.html
    }
}
