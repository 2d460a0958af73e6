//! Configuration type definitions.
//!
//! This module contains all the data structures used in notegarden
//! configuration files. These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title, shown in the header and in page `<title>` tags
    pub title: String,
    /// Site-wide description for SEO/previews
    #[serde(default)]
    pub description: String,
    /// Language code for the `<html lang>` attribute
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Canonical site URL, used to absolutize Open Graph image links
    pub url: Option<String>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Directory containing the Markdown content (relative to config file)
    #[serde(default = "default_content")]
    pub content: PathBuf,
    /// Site-wide fallback Open Graph image (URL path or absolute URL)
    pub og_image: Option<String>,
    /// Extra tags injected into every page's `<head>`
    #[serde(default)]
    pub head: Vec<HeadTag>,
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("_site")
}

fn default_content() -> PathBuf {
    PathBuf::from("content")
}

/// A single `<head>` tag: a tag name plus its attributes.
///
/// YAML format mirrors the two-element form used by most doc generators:
///
/// ```yaml
/// head:
///   - ["link", { rel: icon, href: /favicon.ico }]
///   - ["meta", { name: author, content: Jane }]
/// ```
///
/// The attribute map is kept as a YAML mapping so attribute order in the
/// config survives into the generated HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadTag(pub String, pub serde_yaml::Mapping);

// =============================================================================
// Navigation and chrome
// =============================================================================

/// A top-bar navigation entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavEntry {
    pub text: String,
    pub link: String,
}

/// A social link rendered in the header (icon name + URL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub icon: String,
    pub link: String,
}

/// Footer content. Both fields accept inline HTML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FooterConfig {
    pub message: Option<String>,
    pub copyright: Option<String>,
}

/// "Edit this page" link configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditLinkConfig {
    /// URL pattern; `:path` is replaced with the page's source path
    pub pattern: String,
    #[serde(default = "default_edit_link_text")]
    pub text: String,
}

fn default_edit_link_text() -> String {
    "Edit this page".to_string()
}

/// Outline ("on this page") panel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineConfig {
    #[serde(default = "default_outline_label")]
    pub label: String,
    /// Deepest heading level included in the outline (2..=depth)
    #[serde(default = "default_outline_depth")]
    pub depth: u8,
}

fn default_outline_label() -> String {
    "On this page".to_string()
}

fn default_outline_depth() -> u8 {
    6
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            label: default_outline_label(),
            depth: default_outline_depth(),
        }
    }
}

/// Sidebar structure for the content tree.
///
/// Supports multiple formats in YAML:
/// ```yaml
/// sidebar:
///   - index.md                         # Simple path, title from front matter
///   - Getting Started: getting-started.md  # Explicit title
///   - section: Notes                   # Section with nested items
///     items:
///       - notes/first.md
///       - Second: notes/second.md
/// ```
///
/// When `sidebar` is omitted entirely, the sidebar is generated from the
/// content directory structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// A section with nested items (no link, just a heading)
    /// Must come first so serde tries it before the map variant
    Section {
        section: String,
        items: Vec<SidebarItem>,
    },
    /// A titled page: { "Display Title": "path/to/file.md" }
    Titled(std::collections::HashMap<String, String>),
    /// A simple path: "file.md"
    Path(String),
}

// =============================================================================
// Theme configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme directory name under `themes/` (falls back to the built-in
    /// theme when the directory doesn't exist)
    #[serde(default = "default_theme_name")]
    pub name: String,
    /// Accessible label for the color scheme toggle
    #[serde(default = "default_dark_mode_label")]
    pub dark_mode_label: String,
    /// Arbitrary settings passed to templates as `theme.*`
    #[serde(default)]
    pub settings: serde_json::Value,
}

fn default_theme_name() -> String {
    "default".to_string()
}

fn default_dark_mode_label() -> String {
    "Toggle color scheme".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            dark_mode_label: default_dark_mode_label(),
            settings: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
    /// Plugins applied on top of the base renderer
    #[serde(default = "default_markdown_plugins")]
    pub plugins: Vec<String>,
    /// Syntax highlighting themes
    #[serde(default)]
    pub code: CodeConfig,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "definition_lists".to_string(),
        "footnotes".to_string(),
        "gfm".to_string(),
        "heading_attributes".to_string(),
        "math".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
        "tasklists".to_string(),
    ]
}

fn default_markdown_plugins() -> Vec<String> {
    vec![
        "wiki-links".to_string(),
        "lazy-images".to_string(),
        "link-preview".to_string(),
        "math".to_string(),
    ]
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
            plugins: default_markdown_plugins(),
            code: CodeConfig::default(),
        }
    }
}

/// Syntax highlighting theme pair (light and dark color schemes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeConfig {
    #[serde(default = "default_code_light")]
    pub light: String,
    #[serde(default = "default_code_dark")]
    pub dark: String,
}

fn default_code_light() -> String {
    "github_light".to_string()
}

fn default_code_dark() -> String {
    "onedark".to_string()
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            light: default_code_light(),
            dark: default_code_dark(),
        }
    }
}

// =============================================================================
// Search configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Build the client-side search index (default: true)
    #[serde(default = "default_search_enable")]
    pub enable: bool,
    /// Placeholder text for the search input
    #[serde(default = "default_search_placeholder")]
    pub placeholder: String,
    /// Message shown when a query matches nothing
    #[serde(default = "default_search_no_results")]
    pub no_results: String,
    /// Accessible label for the reset button
    #[serde(default = "default_search_reset_label")]
    pub reset_label: String,
}

fn default_search_enable() -> bool {
    true
}

fn default_search_placeholder() -> String {
    "Search".to_string()
}

fn default_search_no_results() -> String {
    "No results found".to_string()
}

fn default_search_reset_label() -> String {
    "Clear query".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable: default_search_enable(),
            placeholder: default_search_placeholder(),
            no_results: default_search_no_results(),
            reset_label: default_search_reset_label(),
        }
    }
}

// =============================================================================
// Open Graph image configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OgImagesConfig {
    /// Generate a social preview image per page (default: false)
    #[serde(default)]
    pub enable: bool,
    /// Which path level supplies the category label on the image.
    /// With `category_level: 2`, `/notes/tech/editors` is labeled "Tech".
    #[serde(default = "default_category_level")]
    pub category_level: usize,
}

fn default_category_level() -> usize {
    2
}

impl Default for OgImagesConfig {
    fn default() -> Self {
        Self {
            enable: false,
            category_level: default_category_level(),
        }
    }
}

// =============================================================================
// Development configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// File watching configuration
    #[serde(default)]
    pub watch: WatchConfig,
    /// Enable live reload in the browser when files change (default: true)
    #[serde(default = "default_live_reload")]
    pub live_reload: bool,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            watch: WatchConfig::default(),
            live_reload: true,
        }
    }
}

fn default_live_reload() -> bool {
    true
}

/// Configuration for file watching during development.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Use polling-based watcher instead of native file system events.
    /// Useful for network filesystems, Docker volumes, or other situations
    /// where native events are unreliable.
    #[serde(default)]
    pub poll: bool,
    /// Poll interval in milliseconds (only used if poll=true).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Debounce timeout in milliseconds.
    /// Changes within this window are batched together.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_debounce_ms() -> u64 {
    100
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll: false,
            poll_interval_ms: default_poll_interval_ms(),
            debounce_ms: default_debounce_ms(),
        }
    }
}
