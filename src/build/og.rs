//! Per-page Open Graph image generation.
//!
//! When enabled, each document gets an SVG social preview rendered from
//! the theme's `og_image.svg` template: the site title, a category line
//! derived from the page's URL path, and the page title wrapped to at
//! most three lines. Images land under `og/` in the output tree,
//! mirroring the page URL, and the page's `og:image` head tag points at
//! the generated file.

use std::path::Path;

use crate::config::OgImagesConfig;
use crate::util::{title_case, wrap_text};

use super::document::Document;
use super::render::{RenderError, Renderer};

/// Longest line in the image title block; beyond three lines the title is
/// truncated with an ellipsis.
const TITLE_LINE_CHARS: usize = 28;
const TITLE_MAX_LINES: usize = 3;

#[derive(thiserror::Error, Debug)]
pub enum OgImageError {
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The URL at which a page's generated image is served.
///
/// `/notes/first` maps to `/og/notes/first.svg`, the root page to
/// `/og/index.svg`.
pub fn og_image_url(url_path: &str) -> String {
    let trimmed = url_path.trim_matches('/');
    if trimmed.is_empty() {
        "/og/index.svg".to_string()
    } else {
        format!("/og/{}.svg", trimmed)
    }
}

/// The category line for a page, taken from the URL path segment at
/// `category_level` (1-based) and title-cased.
///
/// Absent for pages too shallow to have a directory at that level.
pub fn category_for_url(url_path: &str, category_level: usize) -> Option<String> {
    let segments: Vec<&str> = url_path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    // The segment must name a directory above the page, not the page itself
    if category_level == 0 || segments.len() <= category_level {
        return None;
    }

    segments.get(category_level - 1).map(|s| title_case(s))
}

/// Generate one SVG per document into `output_dir/og/`.
///
/// Returns the number of images written.
pub fn generate_og_images(
    documents: &[&Document],
    renderer: &Renderer,
    site_title: &str,
    config: &OgImagesConfig,
    output_dir: &Path,
) -> Result<usize, OgImageError> {
    let mut written = 0;

    for doc in documents {
        let category = category_for_url(&doc.url_path, config.category_level);
        let title_lines = wrap_text(&doc.title(), TITLE_LINE_CHARS, TITLE_MAX_LINES);

        let svg = renderer.render_og_image(site_title, category.as_deref(), &title_lines)?;

        let image_path = output_dir.join(og_image_url(&doc.url_path).trim_start_matches('/'));
        if let Some(parent) = image_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&image_path, svg)?;
        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::document::FrontMatter;
    use std::path::PathBuf;

    #[test]
    fn test_og_image_url() {
        assert_eq!(og_image_url("/notes/first"), "/og/notes/first.svg");
        assert_eq!(og_image_url("/"), "/og/index.svg");
    }

    #[test]
    fn test_category_for_url() {
        assert_eq!(
            category_for_url("/notes/tech/editors", 2),
            Some("Tech".to_string())
        );
        // The segment at the level is the page itself, not a directory
        assert_eq!(category_for_url("/notes/editors", 2), None);
        assert_eq!(category_for_url("/", 2), None);
        assert_eq!(
            category_for_url("/notes/editors", 1),
            Some("Notes".to_string())
        );
        assert_eq!(category_for_url("/anything", 0), None);
    }

    #[test]
    fn test_generate_og_images() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = Renderer::new(&PathBuf::from("/nonexistent/theme")).unwrap();

        let docs = vec![Document {
            source_path: PathBuf::from("notes/tech/editors.md"),
            url_path: "/notes/tech/editors".to_string(),
            front_matter: FrontMatter::default(),
            content: String::new(),
        }];
        let doc_refs: Vec<&Document> = docs.iter().collect();

        let count = generate_og_images(
            &doc_refs,
            &renderer,
            "My Garden",
            &OgImagesConfig {
                enable: true,
                category_level: 2,
            },
            tmp.path(),
        )
        .unwrap();

        assert_eq!(count, 1);
        let svg =
            std::fs::read_to_string(tmp.path().join("og/notes/tech/editors.svg")).unwrap();
        assert!(svg.contains("My Garden"));
        assert!(svg.contains("Tech"));
        assert!(svg.contains("Editors"));
    }
}
