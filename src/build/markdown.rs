//! Markdown rendering with syntax highlighting, heading anchors, TOC
//! extraction, and plugin hooks.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

use crate::config::MarkdownConfig;
use crate::util::slugify;

use super::highlight::SyntaxHighlighter;
use super::plugins::{PluginSet, internal_link_open, is_internal_link, lazy_image_html, math_span};
use super::render::TocEntry;

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// Result of rendering markdown, containing both HTML and table of contents.
pub struct MarkdownOutput {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Render markdown to HTML using pulldown-cmark.
///
/// Wiki links are a source-text transform and must be applied by the
/// caller before this point (see `plugins::apply_wiki_links`).
pub fn render_markdown(
    markdown: &str,
    highlighter: &SyntaxHighlighter,
    markdown_config: &MarkdownConfig,
    plugins: &PluginSet,
) -> Result<MarkdownOutput, MarkdownError> {
    let mut options = Options::empty();
    for extension in &markdown_config.extensions {
        match extension.as_str() {
            "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
            "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
            "gfm" => options.insert(Options::ENABLE_GFM),
            "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            "math" => options.insert(Options::ENABLE_MATH),
            "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
            "tables" => options.insert(Options::ENABLE_TABLES),
            "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
            other => return Err(MarkdownError::InvalidExtension(other.to_string())),
        }
    }

    let parser = Parser::new_ext(markdown, options);

    // Process events, intercepting code blocks for syntax highlighting
    let mut in_code_block = false;
    let mut code_language = String::new();
    let mut code_content = String::new();

    // Intercept headings to add id attributes for permalinks
    struct HeadingState {
        level: pulldown_cmark::HeadingLevel,
        classes: Vec<String>,
        attrs: Vec<(String, Option<String>)>,
    }
    let mut in_heading: Option<HeadingState> = None;
    let mut used_heading_ids: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut heading_text = String::new();
    let mut toc_entries: Vec<TocEntry> = Vec::new();

    // Intercept images for the lazy-images plugin
    struct ImageState {
        dest: String,
        title: String,
        alt: String,
    }
    let mut in_image: Option<ImageState> = None;

    // Track whether we replaced the current link's open tag
    let mut in_internal_link = false;

    let events: Vec<Event> = parser
        .flat_map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                ref id,
                ref classes,
                ref attrs,
            }) => {
                // If heading already has an id, just pass it through
                if let Some(existing_id) = id {
                    used_heading_ids.insert(existing_id.to_string());
                    return vec![event];
                }
                in_heading = Some(HeadingState {
                    level,
                    classes: classes.iter().map(|c| c.to_string()).collect(),
                    attrs: attrs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.as_ref().map(|v| v.to_string())))
                        .collect(),
                });
                heading_text.clear();
                vec![]
            }
            Event::End(TagEnd::Heading(_)) if in_heading.is_some() => {
                let state = in_heading.take().unwrap();

                // Generate a unique id from the heading text
                let base_id = slugify(&heading_text);
                let mut id = base_id.clone();
                let mut suffix = 1;
                while used_heading_ids.contains(&id) {
                    id = format!("{}-{}", base_id, suffix);
                    suffix += 1;
                }
                used_heading_ids.insert(id.clone());

                toc_entries.push(TocEntry {
                    text: heading_text.clone(),
                    id: id.clone(),
                    level: state.level as u8,
                });

                let class_attr = if state.classes.is_empty() {
                    String::new()
                } else {
                    format!(" class=\"{}\"", state.classes.join(" "))
                };

                let extra_attrs = state
                    .attrs
                    .iter()
                    .map(|(k, v)| match v {
                        Some(val) => format!(" {}=\"{}\"", k, val),
                        None => format!(" {}", k),
                    })
                    .collect::<String>();

                let permalink = format!(
                    "<a class=\"header-anchor\" href=\"#{}\" aria-label=\"Link to this heading\">#</a>",
                    id
                );
                vec![Event::Html(
                    format!(
                        "<h{} id=\"{}\"{}{}>{} {}</h{}>",
                        state.level as usize,
                        id,
                        class_attr,
                        extra_attrs,
                        heading_text,
                        permalink,
                        state.level as usize,
                    )
                    .into(),
                )]
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                code_language = match kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code_content.clear();
                vec![] // Don't emit the start tag yet
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                let highlighted = highlighter.highlight(&code_content, &code_language);
                vec![Event::Html(highlighted.into())]
            }
            Event::Start(Tag::Image {
                ref dest_url,
                ref title,
                ..
            }) if plugins.lazy_images => {
                in_image = Some(ImageState {
                    dest: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                });
                vec![]
            }
            Event::End(TagEnd::Image) if in_image.is_some() => {
                let state = in_image.take().unwrap();
                vec![Event::Html(
                    lazy_image_html(&state.dest, &state.alt, &state.title).into(),
                )]
            }
            Event::Start(Tag::Link {
                ref dest_url,
                ref title,
                ..
            }) if plugins.link_preview && is_internal_link(dest_url) => {
                in_internal_link = true;
                vec![Event::Html(internal_link_open(dest_url, title).into())]
            }
            Event::End(TagEnd::Link) if in_internal_link => {
                in_internal_link = false;
                vec![Event::Html("</a>".into())]
            }
            Event::InlineMath(source) => {
                if plugins.math {
                    vec![Event::Html(math_span(&source, false).into())]
                } else {
                    vec![Event::Text(source)]
                }
            }
            Event::DisplayMath(source) => {
                if plugins.math {
                    vec![Event::Html(math_span(&source, true).into())]
                } else {
                    vec![Event::Text(source)]
                }
            }
            Event::Text(text) if in_code_block => {
                code_content.push_str(&text);
                vec![]
            }
            Event::Text(text) if in_heading.is_some() => {
                heading_text.push_str(&text);
                vec![]
            }
            Event::Text(text) if in_image.is_some() => {
                if let Some(state) = in_image.as_mut() {
                    state.alt.push_str(&text);
                }
                vec![]
            }
            _ => vec![event],
        })
        .collect();

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    Ok(MarkdownOutput {
        html: html_output,
        toc: toc_entries,
    })
}
