//! Markdown → HTML fragment.
//!
//! The extension set is fixed: tables, footnotes, definition lists,
//! abbreviations, strikethrough and heading attributes, fenced code blocks
//! with syntax highlighting, and newline-to-`<br />` conversion inside
//! paragraphs. Nothing about it is configurable at runtime.
//!
//! [`MarkdownRenderer`] holds only the parser options. All per-document
//! state (abbreviation table, open code block) lives on the stack of
//! [`MarkdownRenderer::render`], so one renderer can be reused for any
//! number of documents, or shared between threads, and the output is always
//! a pure function of the input text.

use crate::pipeline::highlight::{escape_html, highlight_block};
use once_cell::sync::Lazy;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream,
};
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

/// Converts Markdown text into an HTML fragment (no `<html>`/`<body>`).
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a renderer with the fixed extension set.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_DEFINITION_LIST);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        Self { options }
    }

    /// Render `text` to an HTML fragment.
    ///
    /// Never fails: syntax the parser does not recognise is emitted as
    /// literal text.
    pub fn render(&self, text: &str) -> String {
        let (source, abbreviations) = extract_abbreviations(text);
        let parser = TextMergeStream::new(Parser::new_ext(&source, self.options));

        let mut events: Vec<Event<'_>> = Vec::new();
        // (info string, accumulated text) of the code block being read
        let mut code: Option<(Option<String>, String)> = None;
        let mut image_depth = 0usize;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let info = match kind {
                        CodeBlockKind::Fenced(info) => Some(info.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code = Some((info, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((info, body)) = code.take() {
                        let html = highlight_block(&body, info.as_deref());
                        events.push(Event::Html(html.into()));
                    }
                }
                Event::Text(t) if code.is_some() => {
                    if let Some((_, body)) = code.as_mut() {
                        body.push_str(&t);
                    }
                }
                Event::SoftBreak => events.push(Event::HardBreak),
                Event::Start(Tag::Image { .. }) => {
                    image_depth += 1;
                    events.push(event);
                }
                Event::End(TagEnd::Image) => {
                    image_depth = image_depth.saturating_sub(1);
                    events.push(event);
                }
                Event::Text(t) if image_depth == 0 => match &abbreviations {
                    Some(abbr) => abbr.expand(t, &mut events),
                    None => events.push(Event::Text(t)),
                },
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

// ── Abbreviations ────────────────────────────────────────────────────────────

static RE_ABBR_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ ]{0,3}\*\[([^\]]+)\][ ]?:[ \t]*(.*?)[ \t]*$").unwrap());

static RE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ ]{0,3}(`{3,}|~{3,})").unwrap());

/// Abbreviations defined by a document, ready to be expanded in text.
#[derive(Debug)]
struct Abbreviations {
    titles: BTreeMap<String, String>,
    pattern: Regex,
}

impl Abbreviations {
    fn new(titles: BTreeMap<String, String>) -> Option<Self> {
        if titles.is_empty() {
            return None;
        }
        // Longest first so "HTML5" wins over "HTML".
        let mut keys: Vec<&String> = titles.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\b(?:{alternation})\b")).ok()?;
        Some(Self { titles, pattern })
    }

    fn expand<'a>(&self, text: CowStr<'a>, events: &mut Vec<Event<'a>>) {
        let mut last = 0;
        let mut matched = false;
        for m in self.pattern.find_iter(&text) {
            let Some(title) = self.titles.get(m.as_str()) else {
                continue;
            };
            matched = true;
            if m.start() > last {
                events.push(Event::Text(text[last..m.start()].to_string().into()));
            }
            events.push(Event::InlineHtml(
                format!(
                    "<abbr title=\"{}\">{}</abbr>",
                    escape_html(title),
                    escape_html(m.as_str())
                )
                .into(),
            ));
            last = m.end();
        }
        if !matched {
            events.push(Event::Text(text));
        } else if last < text.len() {
            events.push(Event::Text(text[last..].to_string().into()));
        }
    }
}

/// Strip `*[ABBR]: Title` lines (outside fenced code) and collect them.
///
/// Definition lines are replaced by blank lines so the surrounding block
/// structure is unchanged. A definition with an empty title removes an
/// earlier one.
fn extract_abbreviations(text: &str) -> (String, Option<Abbreviations>) {
    if !text.contains("*[") {
        return (text.to_string(), None);
    }

    let mut titles = BTreeMap::new();
    let mut out = String::with_capacity(text.len());
    let mut fence: Option<String> = None;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);

        if let Some(caps) = RE_FENCE.captures(content) {
            let marker = &caps[1];
            // A closing fence carries no info string.
            let bare = content[caps[0].len()..].trim().is_empty();
            let closes = bare
                && fence.as_deref().is_some_and(|open| {
                    marker.starts_with(&open[..1]) && marker.len() >= open.len()
                });
            if fence.is_none() {
                fence = Some(marker.to_string());
            } else if closes {
                fence = None;
            }
        } else if fence.is_none() {
            if let Some(caps) = RE_ABBR_DEF.captures(content) {
                let abbr = caps[1].to_string();
                let title = caps[2].to_string();
                if title.is_empty() {
                    titles.remove(&abbr);
                } else {
                    titles.insert(abbr, title);
                }
                out.push_str(&line[content.len()..]);
                continue;
            }
        }
        out.push_str(line);
    }

    if !titles.is_empty() {
        debug!("Found {} abbreviation definitions", titles.len());
    }
    (out, Abbreviations::new(titles))
}
