//! Configuration loading and types for notegarden.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files (`load`)

mod load;
mod types;

use serde::{Deserialize, Serialize};

// Re-export all types for convenient access
pub use types::{
    CodeConfig, DevConfig, EditLinkConfig, FooterConfig, HeadTag, MarkdownConfig, NavEntry,
    OgImagesConfig, OutlineConfig, SearchConfig, SidebarItem, SiteConfig, SocialLink, ThemeConfig,
    WatchConfig,
};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("{0}")]
    Validation(String),
}

// =============================================================================
// Top-level config
// =============================================================================

/// The full notegarden site configuration, loaded from `notegarden.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site identity, output locations, and `<head>` tags
    pub site: SiteConfig,

    /// Top navigation bar entries
    #[serde(default)]
    pub nav: Vec<NavEntry>,

    /// Explicit sidebar structure; auto-generated from the content
    /// directory when omitted
    pub sidebar: Option<Vec<SidebarItem>>,

    /// Social links rendered in the header
    #[serde(default)]
    pub social_links: Vec<SocialLink>,

    /// Footer message and copyright
    #[serde(default)]
    pub footer: FooterConfig,

    /// "Edit this page" link configuration
    pub edit_link: Option<EditLinkConfig>,

    /// "On this page" outline panel
    #[serde(default)]
    pub outline: OutlineConfig,

    /// Theme selection and pass-through settings
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Markdown extensions, plugins, and code themes
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Client-side search index and UI text
    #[serde(default)]
    pub search: SearchConfig,

    /// Per-page Open Graph image generation
    #[serde(default)]
    pub og_images: OgImagesConfig,

    /// Development server behavior
    #[serde(default)]
    pub dev: DevConfig,
}

/// Format a config deserialization error with helpful context.
fn format_config_error(msg: &str) -> String {
    // Check for common issues and provide specific guidance
    if msg.contains("missing field `site`") {
        return "invalid config: 'site' section is required\n\nExample:\n  site:\n    title: My Garden".to_string();
    }
    if msg.contains("missing field `title`") {
        return "invalid config: 'site.title' is required".to_string();
    }
    if msg.contains("missing field `pattern`") {
        return "invalid config: 'edit_link' requires a 'pattern' containing ':path'\n\nExample:\n  edit_link:\n    pattern: https://github.com/me/garden/edit/main/:path".to_string();
    }
    if msg.contains("untagged enum SidebarItem") {
        return "invalid config: each sidebar entry must be a path, a '{ Title: path }' mapping, or a '{ section: ..., items: [...] }' group".to_string();
    }

    format!("invalid config: {msg}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let yaml = "site:\n  title: My Garden\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.site.title, "My Garden");
        assert_eq!(config.site.lang, "en");
        assert_eq!(config.site.output, std::path::PathBuf::from("_site"));
        assert_eq!(config.site.content, std::path::PathBuf::from("content"));
        assert!(config.nav.is_empty());
        assert!(config.sidebar.is_none());
        assert!(config.search.enable);
        assert!(!config.og_images.enable);
        assert!(config.dev.live_reload);
    }

    #[test]
    fn test_full_config() {
        let yaml = r##"
site:
  title: My Garden
  description: Notes and essays
  lang: zh-CN
  url: https://garden.example.com
  og_image: /og.png
  head:
    - ["meta", { name: theme-color, content: "#ffffff" }]
    - ["link", { rel: icon, href: /logo.svg, type: image/svg+xml }]
nav:
  - { text: Home, link: / }
  - { text: Notes, link: /notes/ }
sidebar:
  - index.md
  - Welcome: intro.md
  - section: Notes
    items:
      - notes/first.md
social_links:
  - { icon: github, link: https://github.com/me/garden }
footer:
  message: Grown with care
  copyright: CC BY-SA 4.0
edit_link:
  pattern: https://github.com/me/garden/edit/main/:path
  text: Edit this note
outline:
  label: Contents
  depth: 3
markdown:
  plugins: [wiki-links, math]
  code:
    light: github_light
    dark: dracula
search:
  placeholder: Search notes
og_images:
  enable: true
  category_level: 2
"##;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.nav.len(), 2);
        assert_eq!(config.sidebar.as_ref().unwrap().len(), 3);
        assert_eq!(config.social_links[0].icon, "github");
        assert_eq!(config.outline.depth, 3);
        assert_eq!(config.markdown.plugins, vec!["wiki-links", "math"]);
        assert_eq!(config.markdown.code.dark, "dracula");
        assert_eq!(config.search.placeholder, "Search notes");
        assert!(config.og_images.enable);
        assert_eq!(config.site.head.len(), 2);
        assert_eq!(config.site.head[0].0, "meta");
    }

    #[test]
    fn test_format_config_error_missing_site() {
        let msg = format_config_error("missing field `site`");
        assert!(msg.contains("'site' section is required"));
    }

    #[test]
    fn test_format_config_error_passthrough() {
        let msg = format_config_error("unknown variant `bogus`");
        assert!(msg.starts_with("invalid config:"));
        assert!(msg.contains("bogus"));
    }
}
