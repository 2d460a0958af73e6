//! Content discovery.
//!
//! Walks the content directory and splits what it finds into markdown
//! documents and static files. Documents are read eagerly so front matter
//! is available to the sidebar and search index before rendering starts.

use std::path::{Path, PathBuf};

use super::document::{ContentItem, Document, StaticFile, parse_front_matter};
use super::paths::{source_path_to_url, static_path_to_url};

#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("content directory does not exist: {0}")]
    DirNotFound(PathBuf),

    #[error("content path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Discover all content under `content_dir`.
///
/// Hidden files and common non-content directories are skipped.
pub fn discover_content(content_dir: &Path) -> Result<Vec<ContentItem>, ContentError> {
    if !content_dir.exists() {
        return Err(ContentError::DirNotFound(content_dir.to_path_buf()));
    }
    if !content_dir.is_dir() {
        return Err(ContentError::NotADirectory(content_dir.to_path_buf()));
    }

    let mut items = Vec::new();
    walk_directory(content_dir, &PathBuf::new(), &mut items)?;
    Ok(items)
}

fn walk_directory(
    dir: &Path,
    relative_path: &Path,
    items: &mut Vec<ContentItem>,
) -> Result<(), ContentError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ContentError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ContentError::ReadEntry {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        let file_name = entry.file_name();
        let file_name_str = file_name.to_string_lossy();

        // Skip hidden files and directories
        if file_name_str.starts_with('.') {
            continue;
        }

        // Skip common non-content directories
        if path.is_dir()
            && matches!(
                file_name_str.as_ref(),
                "node_modules" | "__pycache__" | "target"
            )
        {
            continue;
        }

        let item_relative_path = relative_path.join(&file_name);

        if path.is_dir() {
            walk_directory(&path, &item_relative_path, items)?;
        } else if path.is_file() {
            items.push(classify_file(&path, &item_relative_path)?);
        }
    }

    Ok(())
}

/// Classify a file as either a Document or StaticFile.
fn classify_file(full_path: &Path, relative_path: &Path) -> Result<ContentItem, ContentError> {
    let extension = relative_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("md" | "markdown") => {
            let raw = std::fs::read_to_string(full_path).map_err(|e| ContentError::ReadFile {
                path: full_path.to_path_buf(),
                source: e,
            })?;
            let parsed = parse_front_matter(&raw);

            Ok(ContentItem::Document(Document {
                source_path: relative_path.to_path_buf(),
                url_path: source_path_to_url(relative_path),
                front_matter: parsed.front_matter,
                content: parsed.content,
            }))
        }
        _ => Ok(ContentItem::Static(StaticFile {
            source_path: relative_path.to_path_buf(),
            output_path: static_path_to_url(relative_path),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discover_content() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "index.md", "---\ntitle: Home\n---\n\n# Home\n");
        write(tmp.path(), "notes/first.md", "# First note\n");
        write(tmp.path(), "images/pic.png", "not really a png");
        write(tmp.path(), ".hidden.md", "ignored");

        let mut items = discover_content(tmp.path()).unwrap();
        items.sort_by_key(|item| match item {
            ContentItem::Document(d) => d.source_path.clone(),
            ContentItem::Static(s) => s.source_path.clone(),
        });

        assert_eq!(items.len(), 3);

        let ContentItem::Static(pic) = &items[0] else {
            panic!("expected static file");
        };
        assert_eq!(pic.output_path, "/images/pic.png");

        let ContentItem::Document(home) = &items[1] else {
            panic!("expected document");
        };
        assert_eq!(home.url_path, "/");
        assert_eq!(home.front_matter.title, Some("Home".to_string()));
        assert!(home.content.starts_with("# Home"));

        let ContentItem::Document(note) = &items[2] else {
            panic!("expected document");
        };
        assert_eq!(note.url_path, "/notes/first");
    }

    #[test]
    fn test_discover_content_missing_dir() {
        let result = discover_content(Path::new("/nonexistent/notegarden-content"));
        assert!(matches!(result, Err(ContentError::DirNotFound(_))));
    }
}
