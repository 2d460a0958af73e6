//! Client-side search index.
//!
//! Each document contributes one entry to `search.json`. The HTML stored
//! for a document is not its normal page render: the source is recomposed
//! so the result always leads with a level-1 heading and surfaces the
//! document's tags, then rendered once, independently of the page path.

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::document::{Document, FrontMatter};
use super::markdown::MarkdownError;

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("markdown error: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("failed to serialize search index: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write search index: {0}")]
    Io(#[from] std::io::Error),
}

/// One record in `search.json`.
#[derive(Debug, Serialize)]
pub struct SearchRecord {
    pub url: String,
    pub title: String,
    pub html: String,
    pub tags: Vec<String>,
}

/// A line that is a level-1 heading: line start, exactly one `#`, a space.
/// A `#` mid-line does not match.
static LEVEL_1_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# .*").unwrap());

/// Produce the HTML stored in the search index for one document.
///
/// Returns the empty string without invoking the renderer when the front
/// matter's `search` field is the literal boolean `false`.
///
/// Otherwise the source is split at the end of its first level-1 heading
/// line (or a heading is synthesized from the front matter title), a tags
/// line is computed, and the non-empty parts are joined with blank lines
/// in the order heading, tags, content. The renderer is called exactly
/// once, with the composed string.
pub fn search_content<E>(
    source: &str,
    front_matter: &FrontMatter,
    render: impl FnOnce(&str) -> Result<String, E>,
) -> Result<String, E> {
    if front_matter.search_excluded() {
        return Ok(String::new());
    }

    render(&compose_search_markdown(source, front_matter))
}

/// The composed markdown fed to the renderer, before rendering.
///
/// Split out of `search_content` so the composition is testable without a
/// renderer.
fn compose_search_markdown(source: &str, front_matter: &FrontMatter) -> String {
    // The first level-1 heading wins, even when several exist. The split is
    // character-exact: everything up to and including the matched line is
    // the heading part, the untrimmed remainder is the content part.
    let (heading_part, content_part): (Cow<'_, str>, &str) =
        match LEVEL_1_HEADING.find(source) {
            Some(m) => (Cow::Borrowed(&source[..m.end()]), &source[m.end()..]),
            None => (
                Cow::Owned(format!("# {}", front_matter.title.as_deref().unwrap_or(""))),
                source,
            ),
        };

    let tags = front_matter.tags();
    let tags_part = if tags.is_empty() {
        String::new()
    } else {
        format!("Tags: #{}", tags.join(", #"))
    };

    [heading_part.as_ref(), tags_part.as_str(), content_part]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build `search.json` in the output directory.
///
/// Documents whose transformed content is empty are not stored. Returns
/// the number of indexed documents.
pub fn build_search_index<F>(
    documents: &[&Document],
    mut render: F,
    output_dir: &Path,
) -> Result<usize, SearchError>
where
    F: FnMut(&str) -> Result<String, MarkdownError>,
{
    let mut records: Vec<SearchRecord> = Vec::new();

    for doc in documents {
        let html = search_content(&doc.content, &doc.front_matter, &mut render)?;
        if html.is_empty() {
            continue;
        }

        records.push(SearchRecord {
            url: doc.url_path.clone(),
            title: doc.title(),
            html,
            tags: doc.front_matter.tags(),
        });
    }

    let json = serde_json::to_string(&records)?;
    std::fs::write(output_dir.join("search.json"), json)?;

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::path::PathBuf;

    fn fm(yaml: &str) -> FrontMatter {
        serde_yaml::from_str(yaml).unwrap()
    }

    /// A deterministic stand-in renderer that lets tests inspect the
    /// composed markdown.
    fn echo(src: &str) -> Result<String, Infallible> {
        Ok(src.to_string())
    }

    #[test]
    fn test_search_false_returns_empty_without_rendering() {
        let mut rendered = false;
        let out = search_content("# Anything\n\nbody", &fm("search: false"), |_| {
            rendered = true;
            Ok::<_, Infallible>(String::new())
        })
        .unwrap();

        assert_eq!(out, "");
        assert!(!rendered);
    }

    #[test]
    fn test_split_at_first_heading_is_character_exact() {
        let source = "intro text\n# Title\nbody here";
        let out = search_content(source, &FrontMatter::default().with_tags(&["x", "y"]), echo)
            .unwrap();

        // Heading part runs from the start of the source through the end of
        // the matched line; the content part keeps its leading newline.
        assert_eq!(out, "intro text\n# Title\n\nTags: #x, #y\n\n\nbody here");
    }

    #[test]
    fn test_first_of_multiple_headings_wins() {
        let source = "# First\nmiddle\n# Second\nend";
        let out = search_content(source, &FrontMatter::default(), echo).unwrap();
        assert_eq!(out, "# First\n\n\nmiddle\n# Second\nend");
    }

    #[test]
    fn test_hash_mid_line_does_not_match() {
        let source = "a # not-a-heading\nplain";
        let out = search_content(source, &fm("title: Fallback"), echo).unwrap();
        assert_eq!(out, "# Fallback\n\na # not-a-heading\nplain");
    }

    #[test]
    fn test_level_2_heading_does_not_match() {
        let source = "## Second level\nbody";
        let out = search_content(source, &fm("title: Fallback"), echo).unwrap();
        assert!(out.starts_with("# Fallback\n\n## Second level"));
    }

    #[test]
    fn test_no_heading_synthesizes_from_title() {
        let out = search_content("no heading here", &fm("title: Fallback\nsearch: true"), echo)
            .unwrap();
        assert_eq!(out, "# Fallback\n\nno heading here");
    }

    #[test]
    fn test_no_heading_no_title_synthesizes_empty_heading() {
        let out = search_content("just text", &FrontMatter::default(), echo).unwrap();
        assert_eq!(out, "# \n\njust text");
    }

    #[test]
    fn test_empty_source_is_valid() {
        let out = search_content("", &fm("title: T\ntags: [a]"), echo).unwrap();
        assert_eq!(out, "# T\n\nTags: #a");
    }

    #[test]
    fn test_tags_line_format() {
        let out = search_content(
            "# T\nbody",
            &FrontMatter::default().with_tags(&["a", "b", "c"]),
            echo,
        )
        .unwrap();
        assert!(out.contains("Tags: #a, #b, #c"));
    }

    #[test]
    fn test_no_tags_no_tags_line() {
        let out = search_content("# T\nbody", &FrontMatter::default(), echo).unwrap();
        assert!(!out.contains("Tags:"));
        assert_eq!(out, "# T\n\n\nbody");
    }

    #[test]
    fn test_malformed_tags_treated_as_absent() {
        let out = search_content("# T\nbody", &fm("tags: not-a-list"), echo).unwrap();
        assert!(!out.contains("Tags:"));
    }

    #[test]
    fn test_non_boolean_search_does_not_exclude() {
        let out = search_content("# T", &fm("search: \"false\""), echo).unwrap();
        assert_eq!(out, "# T");
    }

    #[test]
    fn test_source_ending_at_heading_has_no_content_part() {
        let out = search_content("# Only heading", &FrontMatter::default(), echo).unwrap();
        assert_eq!(out, "# Only heading");
    }

    #[test]
    fn test_idempotence() {
        let source = "intro\n# T\nbody";
        let front_matter = FrontMatter::default().with_tags(&["x"]);
        let first = search_content(source, &front_matter, echo).unwrap();
        let second = search_content(source, &front_matter, echo).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let source = "# T\nbody".to_string();
        let front_matter = fm("tags: [x]");
        let _ = search_content(&source, &front_matter, echo).unwrap();
        assert_eq!(source, "# T\nbody");
        assert_eq!(front_matter.tags(), vec!["x"]);
    }

    fn make_doc(url: &str, yaml_fm: &str, content: &str) -> Document {
        Document {
            source_path: PathBuf::from(format!("{}.md", url.trim_matches('/'))),
            url_path: url.to_string(),
            front_matter: fm(yaml_fm),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_build_search_index() {
        let tmp = tempfile::tempdir().unwrap();
        let docs = vec![
            make_doc("/first", "title: First\ntags: [a]", "# First\nbody"),
            make_doc("/second", "title: Second\nsearch: false", "# Second\nbody"),
            make_doc("/third", "title: Third", "plain body"),
        ];
        let doc_refs: Vec<&Document> = docs.iter().collect();

        let count = build_search_index(
            &doc_refs,
            |src| Ok(format!("<html>{}</html>", src)),
            tmp.path(),
        )
        .unwrap();

        // The search-excluded document is not stored
        assert_eq!(count, 2);

        let json = std::fs::read_to_string(tmp.path().join("search.json")).unwrap();
        let records: serde_json::Value = serde_json::from_str(&json).unwrap();
        let records = records.as_array().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["url"], "/first");
        assert_eq!(records[0]["title"], "First");
        assert_eq!(records[0]["tags"][0], "a");
        assert!(records[0]["html"]
            .as_str()
            .unwrap()
            .contains("Tags: #a"));
        assert_eq!(records[1]["url"], "/third");
        // Synthesized heading from the title
        assert!(records[1]["html"].as_str().unwrap().contains("# Third"));
    }
}
