//! The bundled stylesheet applied to every conversion.
//!
//! The CSS is compiled into the binary, so there is no resource file to
//! locate at runtime and every conversion sees byte-identical styling.

/// Raw text of `assets/styles.css`.
pub const BUNDLED_CSS: &str = include_str!("../assets/styles.css");

/// A read-only stylesheet handed to the PDF engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stylesheet {
    css: &'static str,
}

impl Stylesheet {
    /// The one stylesheet md2pdf ships with.
    pub const fn bundled() -> Self {
        Self { css: BUNDLED_CSS }
    }

    pub fn css(&self) -> &'static str {
        self.css
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::bundled()
    }
}
