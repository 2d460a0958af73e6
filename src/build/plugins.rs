//! Markdown plugins.
//!
//! Plugins layer knowledge-garden behavior on top of the base renderer:
//!
//! - `wiki-links`: `[[Target]]` / `[[Target|Label]]` references resolved
//!   against the document set
//! - `lazy-images`: images load lazily and decode off the critical path
//! - `link-preview`: internal links get a class hook for the client-side
//!   preview script
//! - `math`: math events render as MathJax-compatible spans
//!
//! The source-text plugins live here in full; the event-level plugins
//! expose their HTML builders here and are wired into the event loop in
//! `markdown`.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::util::{escape_attr, escape_html};

use super::document::Document;

#[derive(thiserror::Error, Debug)]
pub enum PluginError {
    #[error("unknown markdown plugin: {0}")]
    UnknownPlugin(String),
}

/// Which plugins are enabled, parsed from `markdown.plugins` in config.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginSet {
    pub wiki_links: bool,
    pub lazy_images: bool,
    pub link_preview: bool,
    pub math: bool,
}

impl PluginSet {
    /// Parse a plugin list from config. Unknown names are errors.
    pub fn from_names(names: &[String]) -> Result<Self, PluginError> {
        let mut set = Self::default();
        for name in names {
            match name.as_str() {
                "wiki-links" => set.wiki_links = true,
                "lazy-images" => set.lazy_images = true,
                "link-preview" => set.link_preview = true,
                "math" => set.math = true,
                other => return Err(PluginError::UnknownPlugin(other.to_string())),
            }
        }
        Ok(set)
    }
}

// =============================================================================
// Wiki links
// =============================================================================

static WIKI_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\[\]|]+?)(?:\|([^\[\]]+?))?\]\]").unwrap()
});

/// Lookup for resolving `[[wiki links]]` against the document set.
///
/// Documents are reachable by their path stem ("editors" for
/// "notes/editors.md") and by their title, both case-insensitive. When two
/// documents share a key, the first one discovered wins.
#[derive(Debug, Default)]
pub struct WikiLinkIndex {
    targets: HashMap<String, String>,
}

impl WikiLinkIndex {
    pub fn from_documents<'a>(docs: impl Iterator<Item = &'a Document>) -> Self {
        let mut index = Self::default();
        for doc in docs {
            if let Some(stem) = doc.source_path.file_stem().and_then(|s| s.to_str()) {
                index.insert(stem, &doc.url_path);
            }
            index.insert(&doc.title(), &doc.url_path);
        }
        index
    }

    fn insert(&mut self, key: &str, url: &str) {
        let key = key.trim().to_lowercase();
        self.targets.entry(key).or_insert_with(|| url.to_string());
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.targets
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }
}

/// Replace `[[Target]]` and `[[Target|Label]]` references with markdown
/// links resolved against the index.
///
/// Unresolved references degrade to their label text. Fenced code blocks
/// and inline code spans are left untouched.
pub fn apply_wiki_links(source: &str, index: &WikiLinkIndex) -> String {
    let mut out = String::with_capacity(source.len());
    let mut in_fence: Option<char> = None;

    for (i, line) in source.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }

        let trimmed = line.trim_start();
        let fence_char = if trimmed.starts_with("```") {
            Some('`')
        } else if trimmed.starts_with("~~~") {
            Some('~')
        } else {
            None
        };

        match (in_fence, fence_char) {
            (None, Some(c)) => {
                in_fence = Some(c);
                out.push_str(line);
                continue;
            }
            (Some(open), Some(c)) if open == c => {
                in_fence = None;
                out.push_str(line);
                continue;
            }
            (Some(_), _) => {
                out.push_str(line);
                continue;
            }
            (None, None) => {}
        }

        replace_outside_code_spans(line, index, &mut out);
    }

    out
}

/// Rewrite wiki links in a single line, skipping inline code spans.
fn replace_outside_code_spans(line: &str, index: &WikiLinkIndex, out: &mut String) {
    let mut rest = line;
    while let Some(tick) = rest.find('`') {
        // Text before the span
        replace_wiki_links(&rest[..tick], index, out);

        // An inline code span closes with a backtick run of the same length
        let after = &rest[tick..];
        let run_len = after.chars().take_while(|&c| c == '`').count();
        let open_run = &after[..run_len];
        match after[run_len..].find(open_run) {
            Some(close) => {
                let span_end = run_len + close + run_len;
                out.push_str(&after[..span_end]);
                rest = &after[span_end..];
            }
            None => {
                // Unclosed span; emit the rest verbatim
                out.push_str(after);
                return;
            }
        }
    }
    replace_wiki_links(rest, index, out);
}

fn replace_wiki_links(text: &str, index: &WikiLinkIndex, out: &mut String) {
    let mut last = 0;
    for caps in WIKI_LINK.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        out.push_str(&text[last..whole.start()]);

        let target = caps.get(1).unwrap().as_str();
        let label = caps.get(2).map(|m| m.as_str()).unwrap_or(target).trim();

        match index.resolve(target) {
            Some(url) => {
                out.push('[');
                out.push_str(label);
                out.push_str("](");
                out.push_str(url);
                out.push(')');
            }
            None => out.push_str(label),
        }

        last = whole.end();
    }
    out.push_str(&text[last..]);
}

// =============================================================================
// Event-level plugin HTML builders
// =============================================================================

/// Build a lazily-loading `<img>` tag.
pub fn lazy_image_html(dest: &str, alt: &str, title: &str) -> String {
    let mut html = format!(
        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\" decoding=\"async\"",
        escape_attr(dest),
        escape_attr(alt)
    );
    if !title.is_empty() {
        html.push_str(&format!(" title=\"{}\"", escape_attr(title)));
    }
    html.push_str(" />");
    html
}

/// Whether a link destination points inside the site.
///
/// Anchors and anything with a scheme are external to the preview script.
pub fn is_internal_link(dest: &str) -> bool {
    (dest.starts_with('/') || dest.starts_with("./") || dest.starts_with("../"))
        && !dest.starts_with("//")
}

/// Build the opening tag for an internal link carrying the preview hook.
pub fn internal_link_open(dest: &str, title: &str) -> String {
    let mut html = format!("<a class=\"internal-link\" href=\"{}\"", escape_attr(dest));
    if !title.is_empty() {
        html.push_str(&format!(" title=\"{}\"", escape_attr(title)));
    }
    html.push('>');
    html
}

/// Wrap math source in a MathJax-compatible span.
pub fn math_span(source: &str, display: bool) -> String {
    if display {
        format!(
            "<span class=\"math display\">\\[{}\\]</span>",
            escape_html(source)
        )
    } else {
        format!(
            "<span class=\"math inline\">\\({}\\)</span>",
            escape_html(source)
        )
    }
}
