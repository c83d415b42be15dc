//! Pipeline stages for Markdown-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ markdown ──▶ document ──▶ render ──▶ output
//! (read)    (fragment)   (shell)      (engine)   (write)
//! ```
//!
//! 1. [`input`]   : validate the source path and read it as UTF-8
//! 2. [`markdown`]: parse Markdown into an HTML fragment; code blocks are
//!    handed to [`highlight`]
//! 3. [`document`]: wrap the fragment in the fixed HTML shell
//! 4. [`render`]  : lay out HTML + the bundled stylesheet into PDF bytes
//!    via the external engine
//! 5. [`output`]  : resolve the destination and write the PDF

pub mod document;
pub mod highlight;
pub mod input;
pub mod markdown;
pub mod output;
pub mod render;
