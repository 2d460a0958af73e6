//! Path and URL conversion utilities.
//!
//! This module handles conversions between:
//! - Content file paths (relative paths within the content directory)
//! - URL paths (the URL at which content will be served)
//! - Output file paths (where files are written in the output directory)

use std::path::{Path, PathBuf};

/// Convert a markdown file path to a URL path.
///
/// # Examples
/// ```ignore
/// source_path_to_url("editors.md") => "/editors"
/// source_path_to_url("notes/gardening.md") => "/notes/gardening"
/// source_path_to_url("index.md") => "/"
/// source_path_to_url("notes/index.md") => "/notes"
/// ```
pub fn source_path_to_url(path: &Path) -> String {
    let path_str = path.with_extension("").to_string_lossy().replace('\\', "/");

    // Index files become the directory URL
    let path_str = if path_str == "index" {
        String::new()
    } else if let Some(dir) = path_str.strip_suffix("/index") {
        dir.to_string()
    } else {
        path_str
    };

    if path_str.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", path_str)
    }
}

/// Convert a static file path to a URL path.
///
/// Unlike markdown files, static files keep their extension.
///
/// # Examples
/// ```ignore
/// static_path_to_url("images/screenshot.png") => "/images/screenshot.png"
/// ```
pub fn static_path_to_url(path: &Path) -> String {
    format!("/{}", path.to_string_lossy().replace('\\', "/"))
}

/// Convert a URL path to an output file path.
///
/// Documents (no extension) become `path/index.html`.
/// Static files (with extension) keep their path.
///
/// # Examples
/// ```ignore
/// url_to_output_path("/notes/gardening", output_dir) => output_dir/notes/gardening/index.html
/// url_to_output_path("/", output_dir) => output_dir/index.html
/// url_to_output_path("/style.css", output_dir) => output_dir/style.css
/// ```
pub fn url_to_output_path(url_path: &str, output_dir: &Path) -> PathBuf {
    let url_path = url_path.trim_start_matches('/');

    if url_path.is_empty() {
        output_dir.join("index.html")
    } else if url_path.contains('.') {
        output_dir.join(url_path)
    } else {
        output_dir.join(url_path).join("index.html")
    }
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_path_to_url_simple() {
        assert_eq!(source_path_to_url(Path::new("editors.md")), "/editors");
    }

    #[test]
    fn test_source_path_to_url_nested() {
        assert_eq!(
            source_path_to_url(Path::new("notes/gardening.md")),
            "/notes/gardening"
        );
    }

    #[test]
    fn test_source_path_to_url_index() {
        assert_eq!(source_path_to_url(Path::new("index.md")), "/");
        assert_eq!(source_path_to_url(Path::new("notes/index.md")), "/notes");
    }

    #[test]
    fn test_static_path_to_url() {
        assert_eq!(
            static_path_to_url(Path::new("images/screenshot.png")),
            "/images/screenshot.png"
        );
        assert_eq!(static_path_to_url(Path::new("style.css")), "/style.css");
    }

    #[test]
    fn test_url_to_output_path_document() {
        let output = Path::new("/site");
        assert_eq!(
            url_to_output_path("/notes/gardening", output),
            PathBuf::from("/site/notes/gardening/index.html")
        );
    }

    #[test]
    fn test_url_to_output_path_root() {
        let output = Path::new("/site");
        assert_eq!(
            url_to_output_path("/", output),
            PathBuf::from("/site/index.html")
        );
    }

    #[test]
    fn test_url_to_output_path_static() {
        let output = Path::new("/site");
        assert_eq!(
            url_to_output_path("/style.css", output),
            PathBuf::from("/site/style.css")
        );
    }

    #[test]
    fn test_base_path_from_config() {
        assert_eq!(
            base_path_from_config(Path::new("/garden/notegarden.yaml")),
            PathBuf::from("/garden")
        );
    }
}
