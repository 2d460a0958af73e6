use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::util::title_case;

// =============================================================================
// Content items (documents and static files)
// =============================================================================

/// A content item discovered in the content directory.
/// Can be either a document (markdown) or a static file (images, etc.).
#[derive(Debug, Clone)]
pub enum ContentItem {
    /// A markdown document that will be rendered to HTML
    Document(Document),
    /// A static file that will be copied as-is
    Static(StaticFile),
}

/// A static file (image, CSS, JS, etc.) that gets copied to output.
#[derive(Debug, Clone)]
pub struct StaticFile {
    /// Path relative to the content root (e.g., "images/screenshot.png")
    pub source_path: PathBuf,
    /// The output path this file will be written to (e.g., "/images/screenshot.png")
    pub output_path: String,
}

// =============================================================================
// Documents
// =============================================================================

/// A markdown document flowing through the build.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path relative to the content root (e.g., "notes/editors.md")
    pub source_path: PathBuf,
    /// The URL path this document will be served at (e.g., "/notes/editors")
    pub url_path: String,
    /// Front matter metadata
    pub front_matter: FrontMatter,
    /// The markdown body with the front matter block removed
    pub content: String,
}

impl Document {
    /// Get the document title, falling back to the filename if not in
    /// front matter.
    pub fn title(&self) -> String {
        self.front_matter.title.clone().unwrap_or_else(|| {
            self.source_path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(title_case)
                .unwrap_or_else(|| "Untitled".to_string())
        })
    }
}

/// Front matter metadata parsed from the document.
///
/// The `search`, `tags`, and `title` fields are deliberately lenient:
/// a value of the wrong shape behaves as if the field were absent, so a
/// stray `tags: "oops"` never fails a build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Page title (overrides the filename-derived title)
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Page description for SEO/previews
    pub description: Option<String>,
    /// Hide from the sidebar
    #[serde(default)]
    pub hidden: bool,
    /// Search index opt-out; only the literal boolean `false` excludes
    #[serde(default)]
    search: serde_yaml::Value,
    /// Topic tags, surfaced in search results
    #[serde(default)]
    tags: serde_yaml::Value,
    /// Additional arbitrary metadata (available in templates at top level,
    /// e.g., `page.author`)
    #[serde(flatten)]
    pub extra: std::collections::HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Whether this document opted out of the search index.
    ///
    /// Only `search: false` excludes; strings, numbers, and other shapes
    /// count as absent.
    pub fn search_excluded(&self) -> bool {
        matches!(self.search, serde_yaml::Value::Bool(false))
    }

    /// The document's tags as strings.
    ///
    /// Non-sequence values behave as absent. Scalar items are stringified,
    /// non-scalar items are skipped.
    pub fn tags(&self) -> Vec<String> {
        match &self.tags {
            serde_yaml::Value::Sequence(items) => {
                items.iter().filter_map(scalar_to_string).collect()
            }
            _ => Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = serde_yaml::Value::Sequence(
            tags.iter()
                .map(|t| serde_yaml::Value::String(t.to_string()))
                .collect(),
        );
        self
    }

    #[cfg(test)]
    pub fn with_search(mut self, search: serde_yaml::Value) -> Self {
        self.search = search;
        self
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accept any YAML value, keeping it only if it is a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Result of parsing front matter from markdown content.
#[derive(Debug)]
pub struct ParsedContent {
    /// The parsed front matter (empty if none found)
    pub front_matter: FrontMatter,
    /// The markdown content without the front matter block
    pub content: String,
}

/// Parse front matter from markdown content.
///
/// Front matter is a YAML block delimited by `---` at the start of the file.
/// Malformed front matter degrades to defaults with a warning, never a
/// failure.
pub fn parse_front_matter(content: &str) -> ParsedContent {
    let content = content.trim_start();

    let Some(after_opening) = content.strip_prefix("---") else {
        return ParsedContent {
            front_matter: FrontMatter::default(),
            content: content.to_string(),
        };
    };

    let Some(closing_pos) = after_opening.find("\n---") else {
        // No closing delimiter, treat the entire content as markdown
        return ParsedContent {
            front_matter: FrontMatter::default(),
            content: content.to_string(),
        };
    };

    let yaml_block = after_opening[..closing_pos].trim_start_matches('\n');

    // Skip past "\n---" and the newline that follows it
    let body = after_opening[closing_pos + 4..]
        .trim_start_matches('\n')
        .to_string();

    let front_matter = match serde_yaml::from_str(yaml_block) {
        Ok(fm) => fm,
        Err(e) => {
            eprintln!("Warning: failed to parse front matter: {}", e);
            FrontMatter::default()
        }
    };

    ParsedContent {
        front_matter,
        content: body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_title_fallback() {
        let doc = Document {
            source_path: PathBuf::from("notes/text-editors.md"),
            url_path: "/notes/text-editors".to_string(),
            front_matter: FrontMatter::default(),
            content: String::new(),
        };
        assert_eq!(doc.title(), "Text Editors");
    }

    #[test]
    fn test_document_title_from_front_matter() {
        let mut doc = Document {
            source_path: PathBuf::from("intro.md"),
            url_path: "/intro".to_string(),
            front_matter: FrontMatter::default(),
            content: String::new(),
        };
        doc.front_matter.title = Some("Welcome to the garden".to_string());
        assert_eq!(doc.title(), "Welcome to the garden");
    }

    #[test]
    fn test_parse_front_matter_basic() {
        let content = "---\ntitle: My Note\ndescription: A test note\n---\n\n# Hello\n";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter.title, Some("My Note".to_string()));
        assert_eq!(
            parsed.front_matter.description,
            Some("A test note".to_string())
        );
        assert_eq!(parsed.content.trim(), "# Hello");
    }

    #[test]
    fn test_parse_front_matter_tags_and_search() {
        let content = "---\ntags:\n  - rust\n  - tools\nsearch: false\n---\n\nBody\n";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter.tags(), vec!["rust", "tools"]);
        assert!(parsed.front_matter.search_excluded());
    }

    #[test]
    fn test_search_leniency() {
        // Only the literal boolean false excludes
        let cases = [
            ("search: false", true),
            ("search: true", false),
            ("search: \"false\"", false),
            ("search: 0", false),
            ("title: no search field", false),
        ];
        for (yaml, excluded) in cases {
            let fm: FrontMatter = serde_yaml::from_str(yaml).unwrap();
            assert_eq!(fm.search_excluded(), excluded, "yaml: {yaml}");
        }
    }

    #[test]
    fn test_tags_leniency() {
        // Non-sequence shapes behave as absent
        let fm: FrontMatter = serde_yaml::from_str("tags: oops").unwrap();
        assert!(fm.tags().is_empty());

        // Scalar items are stringified, non-scalar items are skipped
        let fm: FrontMatter =
            serde_yaml::from_str("tags: [rust, 42, true, {bad: shape}]").unwrap();
        assert_eq!(fm.tags(), vec!["rust", "42", "true"]);
    }

    #[test]
    fn test_title_leniency() {
        let fm: FrontMatter = serde_yaml::from_str("title: [not, a, string]").unwrap();
        assert_eq!(fm.title, None);
    }

    #[test]
    fn test_parse_front_matter_with_custom_fields() {
        let content = "---\ntitle: Custom\nauthor: Jane Doe\n---\n\nContent here\n";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter.title, Some("Custom".to_string()));
        assert!(parsed.front_matter.extra.contains_key("author"));
    }

    #[test]
    fn test_parse_front_matter_no_front_matter() {
        let content = "# Just Markdown\n\nNo front matter here.";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter.title, None);
        assert!(parsed.content.starts_with("# Just Markdown"));
    }

    #[test]
    fn test_parse_front_matter_unclosed() {
        let content = "---\ntitle: Oops\n\nNo closing delimiter";
        let parsed = parse_front_matter(content);
        assert_eq!(parsed.front_matter.title, None);
        assert!(parsed.content.starts_with("---"));
    }

    #[test]
    fn test_parse_front_matter_malformed_degrades() {
        let content = "---\nhidden: [this, is, not, a, bool]\n---\n\n# Content";
        let parsed = parse_front_matter(content);
        assert!(!parsed.front_matter.hidden);
        assert!(parsed.content.starts_with("# Content"));
    }
}
