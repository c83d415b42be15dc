//! Syntax highlighting for code blocks.
//!
//! Code is tokenised with `syntect` and emitted as class-annotated `<span>`s
//! rather than inline colours, so the look is owned entirely by the bundled
//! stylesheet (`.highlight .keyword`, `.highlight .string`, …). Line numbers
//! are never emitted.
//!
//! The default syntax definitions take a few milliseconds to deserialise, so
//! they are loaded once per process and shared read-only afterwards.

use once_cell::sync::Lazy;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::{debug, warn};

/// CSS class on the wrapper `<div>` of every highlighted block.
pub const HIGHLIGHT_CLASS: &str = "highlight";

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Render one code block as highlighted HTML.
///
/// `lang` is the raw fenced-code info string (may be empty). When it names
/// no known syntax the first line is used as a hint (shebangs, modelines);
/// failing that the block is emitted as escaped plain text inside the same
/// wrapper.
pub fn highlight_block(code: &str, lang: Option<&str>) -> String {
    let token = lang.and_then(language_token);
    let syntax = find_syntax(token.as_deref(), code);

    let mut body = String::with_capacity(code.len() * 2);
    match syntax {
        Some(syntax) => match classed_html(code, syntax) {
            Ok(html) => body.push_str(&html),
            Err(e) => {
                warn!("Highlighting as {} failed, falling back to plain text: {e}", syntax.name);
                body.push_str(&escape_html(code));
            }
        },
        None => body.push_str(&escape_html(code)),
    }

    let mut out = String::with_capacity(body.len() + 96);
    out.push_str("<div class=\"");
    out.push_str(HIGHLIGHT_CLASS);
    out.push_str("\"><pre><code");
    if let Some(token) = token {
        out.push_str(" class=\"language-");
        out.push_str(&escape_html(&token));
        out.push('"');
    }
    out.push('>');
    out.push_str(&body);
    out.push_str("</code></pre></div>\n");
    out
}

/// Extract the language name from a fenced-code info string.
///
/// Accepts `python`, `.python`, `{.python}` and `python title="x"`.
fn language_token(info: &str) -> Option<String> {
    let first = info.split_whitespace().next()?;
    let token = first
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim_start_matches('.');
    if token.is_empty() {
        None
    } else {
        Some(token.to_lowercase())
    }
}

fn find_syntax(token: Option<&str>, code: &str) -> Option<&'static SyntaxReference> {
    let ss: &'static SyntaxSet = &SYNTAX_SET;
    if let Some(token) = token {
        if let Some(syntax) = ss.find_syntax_by_token(token) {
            return Some(syntax);
        }
        debug!("No syntax for language '{token}'");
    }
    let first_line = code.lines().next().unwrap_or("");
    ss.find_syntax_by_first_line(first_line)
}

fn classed_html(code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

/// Escape text for use in HTML content and double-quoted attributes.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
