use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::theme;

use super::content::{ContentError, discover_content};
use super::document::{ContentItem, Document, StaticFile};
use super::head::assemble_head;
use super::highlight::SyntaxHighlighter;
use super::markdown::{MarkdownError, render_markdown};
use super::nav::build_sidebar;
use super::og::{OgImageError, generate_og_images, og_image_url};
use super::paths::url_to_output_path;
use super::plugins::{PluginError, PluginSet, WikiLinkIndex, apply_wiki_links};
use super::render::{
    ContentRenderContext, EditLink, PageContext, PageInfo, RenderError, Renderer, SiteContext,
};
use super::search::{SearchError, build_search_index};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("markdown error: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("search index error: {0}")]
    Search(#[from] SearchError),

    #[error("og image error: {0}")]
    OgImage(#[from] OgImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct BuildResult {
    pub output_dir: PathBuf,
    pub theme_path: PathBuf,
    pub documents: usize,
    pub static_files: usize,
    /// Pages stored in the search index (0 when search is disabled)
    pub indexed_pages: usize,
}

pub struct Builder {
    config: Config,
    /// Base path for resolving relative paths (typically the config file's directory)
    base_path: PathBuf,
    /// Inject the live-reload listener into rendered pages
    live_reload: bool,
}

impl Builder {
    pub fn new(config: Config, base_path: PathBuf) -> Self {
        Self {
            config,
            base_path,
            live_reload: false,
        }
    }

    /// Enable the live-reload script in rendered pages (used by `serve`).
    pub fn with_live_reload(mut self, live_reload: bool) -> Self {
        self.live_reload = live_reload;
        self
    }

    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Discover content -> ContentItem[]
        // 2. Load renderer (templates) and syntax highlighter
        // 3. Build sidebar and wiki link index
        // 4. Render and write each document
        // 5. Copy static files and theme assets
        // 6. Generate OG images and the search index

        // Step 1: Discover content
        let content_dir = self.content_dir();
        let items = discover_content(&content_dir)?;

        let documents: Vec<&Document> = items
            .iter()
            .filter_map(|item| match item {
                ContentItem::Document(doc) => Some(doc),
                _ => None,
            })
            .collect();
        let static_files: Vec<&StaticFile> = items
            .iter()
            .filter_map(|item| match item {
                ContentItem::Static(file) => Some(file),
                _ => None,
            })
            .collect();
        println!(
            "Found {} document(s) and {} static file(s) in {}",
            documents.len(),
            static_files.len(),
            content_dir.display()
        );

        // Step 2: Load renderer and highlighter
        let theme_path = self.theme_path();
        let mut renderer = Renderer::new(&theme_path)?;
        let highlighter = SyntaxHighlighter::new(&self.config.markdown.code);
        let plugins = PluginSet::from_names(&self.config.markdown.plugins)?;

        // Step 3: Sidebar and wiki link index from the full document set
        let sidebar = build_sidebar(self.config.sidebar.as_deref(), &documents);
        let wiki_index = WikiLinkIndex::from_documents(documents.iter().copied());

        let output_dir = self.output_dir();
        std::fs::create_dir_all(&output_dir)?;

        let site_context = SiteContext {
            title: self.config.site.title.clone(),
            description: self.config.site.description.clone(),
            lang: self.config.site.lang.clone(),
            url: self.config.site.url.clone(),
        };
        let theme_settings = self.config.theme.settings.clone();

        // Step 4: Render and write each document
        for doc in &documents {
            let page = PageInfo {
                title: doc.title(),
                url: doc.url_path.clone(),
                description: doc.front_matter.description.clone(),
                extra: doc.front_matter.extra.clone(),
            };

            // Documents pass through Tera first so they can use template
            // syntax, then wiki links, then markdown
            let expanded = renderer.render_content(
                &doc.content,
                &ContentRenderContext {
                    site: site_context.clone(),
                    page: page.clone(),
                    theme: theme_settings.clone(),
                },
            )?;
            let source = if plugins.wiki_links {
                apply_wiki_links(&expanded, &wiki_index)
            } else {
                expanded
            };
            let output = render_markdown(&source, &highlighter, &self.config.markdown, &plugins)?;

            let toc: Vec<_> = output
                .toc
                .into_iter()
                .filter(|entry| entry.level >= 2 && entry.level <= self.config.outline.depth)
                .collect();

            let page_og_image = self
                .config
                .og_images
                .enable
                .then(|| og_image_url(&doc.url_path));
            let head = assemble_head(&self.config.site, page_og_image.as_deref());

            let edit_link = self.config.edit_link.as_ref().map(|cfg| EditLink {
                url: cfg
                    .pattern
                    .replace(":path", &doc.source_path.to_string_lossy()),
                text: cfg.text.clone(),
            });

            let context = PageContext {
                site: site_context.clone(),
                page,
                content: output.html,
                head,
                nav: self.config.nav.clone(),
                sidebar: sidebar.clone(),
                toc,
                outline: self.config.outline.clone(),
                social_links: self.config.social_links.clone(),
                footer: self.config.footer.clone(),
                edit_link,
                search: self.config.search.enable.then(|| self.config.search.clone()),
                theme: theme_settings.clone(),
                dark_mode_label: self.config.theme.dark_mode_label.clone(),
                live_reload: self.live_reload,
            };
            let html = renderer.render_page(&context)?;

            let output_path = url_to_output_path(&doc.url_path, &output_dir);
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output_path, html)?;
        }

        // Step 5: Copy static files and theme assets
        for file in &static_files {
            let input_path = content_dir.join(&file.source_path);
            let output_path = url_to_output_path(&file.output_path, &output_dir);
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&input_path, &output_path)?;
        }
        self.write_assets(&theme_path, &highlighter, &output_dir)?;

        // Step 6: OG images and the search index
        if self.config.og_images.enable {
            let count = generate_og_images(
                &documents,
                &renderer,
                &self.config.site.title,
                &self.config.og_images,
                &output_dir,
            )?;
            println!("Generated {} OG image(s)", count);
        }

        let indexed_pages = if self.config.search.enable {
            let count = build_search_index(
                &documents,
                |markdown| {
                    let source = if plugins.wiki_links {
                        apply_wiki_links(markdown, &wiki_index)
                    } else {
                        markdown.to_string()
                    };
                    render_markdown(&source, &highlighter, &self.config.markdown, &plugins)
                        .map(|output| output.html)
                },
                &output_dir,
            )?;
            println!("Indexed {} page(s) for search", count);
            count
        } else {
            0
        };

        let display_output = output_dir.canonicalize().unwrap_or(output_dir.clone());
        println!(
            "Wrote {} page(s) to {}",
            documents.len(),
            display_output.display()
        );

        Ok(BuildResult {
            output_dir,
            theme_path,
            documents: documents.len(),
            static_files: static_files.len(),
            indexed_pages,
        })
    }

    /// Write theme assets and the generated highlight stylesheet into
    /// `assets/` in the output directory.
    fn write_assets(
        &self,
        theme_path: &Path,
        highlighter: &SyntaxHighlighter,
        output_dir: &Path,
    ) -> Result<(), BuildError> {
        let assets_out = output_dir.join("assets");
        std::fs::create_dir_all(&assets_out)?;

        let theme_assets = theme_path.join("assets");
        if theme_assets.exists() {
            copy_dir_recursive(&theme_assets, &assets_out)?;
        } else {
            for (name, content) in theme::EMBEDDED_ASSETS {
                std::fs::write(assets_out.join(name), content)?;
            }
        }

        if let Some(css) = highlighter.generate_css() {
            std::fs::write(assets_out.join("highlight.css"), css)?;
        } else {
            eprintln!(
                "Warning: unknown code theme '{}' or '{}', skipping highlight.css",
                self.config.markdown.code.light, self.config.markdown.code.dark
            );
        }

        Ok(())
    }

    /// Get the content directory, resolved against base_path.
    fn content_dir(&self) -> PathBuf {
        self.resolve(&self.config.site.content)
    }

    /// Get the output directory path, resolved against base_path.
    fn output_dir(&self) -> PathBuf {
        self.resolve(&self.config.site.output)
    }

    /// Get the theme directory for the configured theme name. The renderer
    /// falls back to the embedded default theme when it doesn't exist.
    pub fn theme_path(&self) -> PathBuf {
        theme::theme_dir(&self.base_path, &self.config.theme.name)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.base_path.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

fn copy_dir_recursive(from: &Path, to: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(to)?;
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
