use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{FooterConfig, NavEntry, OutlineConfig, SearchConfig, SocialLink};
use crate::theme;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// The template renderer, wrapping Tera.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Create a new renderer loading templates from the given theme
    /// directory. Falls back to the built-in default theme when the
    /// directory doesn't exist on disk.
    pub fn new(theme_path: &Path) -> Result<Self, RenderError> {
        let templates_path = theme_path.join("templates");

        if !templates_path.exists() {
            let mut tera = Tera::default();
            tera.add_raw_templates(theme::EMBEDDED_TEMPLATES.to_vec())?;
            return Ok(Self { tera });
        }

        let glob = templates_path.join("**/*.html");
        let glob_str = glob.to_string_lossy();
        let mut tera = Tera::new(&glob_str)?;

        // The Open Graph image template is SVG and isn't picked up by the
        // HTML glob
        let og_template = templates_path.join("og_image.svg");
        if og_template.exists() {
            tera.add_template_file(&og_template, Some("og_image.svg"))?;
        } else {
            tera.add_raw_template("og_image.svg", theme::DEFAULT_OG_IMAGE_TEMPLATE)?;
        }

        Ok(Self { tera })
    }

    /// Render a page with the given context.
    pub fn render_page(&self, context: &PageContext) -> Result<String, RenderError> {
        let mut tera_context = Context::new();
        tera_context.insert("site", &context.site);
        tera_context.insert("page", &context.page);
        tera_context.insert("content", &context.content);
        tera_context.insert("head", &context.head);
        tera_context.insert("nav", &context.nav);
        tera_context.insert("sidebar", &context.sidebar);
        tera_context.insert("toc", &context.toc);
        tera_context.insert("outline", &context.outline);
        tera_context.insert("social_links", &context.social_links);
        tera_context.insert("footer", &context.footer);
        tera_context.insert("edit_link", &context.edit_link);
        tera_context.insert("search", &context.search);
        tera_context.insert("theme", &context.theme);
        tera_context.insert("dark_mode_label", &context.dark_mode_label);
        tera_context.insert("live_reload", &context.live_reload);

        Ok(self.tera.render("page.html", &tera_context)?)
    }

    /// Render raw content (markdown) through Tera before markdown
    /// processing. This allows documents to use Tera syntax like macros,
    /// loops, and variables.
    pub fn render_content(
        &mut self,
        content: &str,
        context: &ContentRenderContext,
    ) -> Result<String, RenderError> {
        let mut tera_context = Context::new();
        tera_context.insert("site", &context.site);
        tera_context.insert("page", &context.page);
        tera_context.insert("theme", &context.theme);

        // Prepend import for macros so content can use them as
        // `macros::name(...)`
        let content_with_imports =
            format!("{{% import \"macros.html\" as macros %}}\n{}", content);

        // Add the content as a temporary template so it has access to
        // macros defined in other template files
        const TEMP_TEMPLATE_NAME: &str = "__content_render__";
        self.tera
            .add_raw_template(TEMP_TEMPLATE_NAME, &content_with_imports)?;

        let result = self.tera.render(TEMP_TEMPLATE_NAME, &tera_context);

        self.tera.templates.remove(TEMP_TEMPLATE_NAME);

        Ok(result?)
    }

    /// Render the Open Graph image template to SVG.
    pub fn render_og_image(
        &self,
        site_title: &str,
        category: Option<&str>,
        title_lines: &[String],
    ) -> Result<String, RenderError> {
        let mut tera_context = Context::new();
        tera_context.insert("site_title", site_title);
        tera_context.insert("category", &category);
        tera_context.insert("title_lines", title_lines);

        Ok(self.tera.render("og_image.svg", &tera_context)?)
    }
}

/// Context available during content (markdown) rendering.
/// This is a subset of PageContext since sidebar/toc aren't available yet.
#[derive(Debug, Serialize)]
pub struct ContentRenderContext {
    pub site: SiteContext,
    pub page: PageInfo,
    pub theme: serde_json::Value,
}

/// Context passed to page templates.
#[derive(Debug, Serialize)]
pub struct PageContext {
    pub site: SiteContext,
    pub page: PageInfo,
    /// Rendered HTML of the document body
    pub content: String,
    /// Rendered `<head>` tags (user entries plus Open Graph defaults)
    pub head: String,
    /// Top navigation entries from config
    pub nav: Vec<NavEntry>,
    pub sidebar: Vec<SidebarNode>,
    /// Table of contents for the current page, pre-filtered to the
    /// configured outline depth
    pub toc: Vec<TocEntry>,
    pub outline: OutlineConfig,
    pub social_links: Vec<SocialLink>,
    pub footer: FooterConfig,
    /// Per-page "edit this page" link
    pub edit_link: Option<EditLink>,
    /// Search UI text; `None` when search is disabled
    pub search: Option<SearchConfig>,
    /// Theme settings from config, accessible as `theme.*` in templates
    pub theme: serde_json::Value,
    pub dark_mode_label: String,
    /// Whether to inject the live-reload listener
    pub live_reload: bool,
}

/// Site-level information.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub title: String,
    pub description: String,
    pub lang: String,
    pub url: Option<String>,
}

/// Information about the current page.
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    /// Custom front matter fields (flattened to top level, e.g.,
    /// `page.author`)
    #[serde(flatten)]
    pub extra: std::collections::HashMap<String, serde_yaml::Value>,
}

/// The per-page "edit this page" link.
#[derive(Debug, Clone, Serialize)]
pub struct EditLink {
    pub url: String,
    pub text: String,
}

/// A sidebar entry: either a section heading with nested items, or a link.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SidebarNode {
    Section {
        section: String,
        items: Vec<SidebarNode>,
    },
    Link(SidebarLink),
}

/// A single sidebar link, possibly with nested children.
#[derive(Debug, Clone, Serialize)]
pub struct SidebarLink {
    pub title: String,
    pub url: String,
    pub children: Vec<SidebarNode>,
}

/// A table of contents entry for the current page.
#[derive(Debug, Clone, Serialize)]
pub struct TocEntry {
    /// The heading text
    pub text: String,
    /// The heading id (for anchor links)
    pub id: String,
    /// The heading level (1-6)
    pub level: u8,
}
