//! The built-in default theme.
//!
//! A theme directory provides `templates/page.html`, `templates/macros.html`,
//! `templates/og_image.svg`, and an `assets/` directory. The default theme
//! is embedded in the binary so `notegarden init` and freshly-cloned gardens
//! work without any theme files on disk.

use std::path::{Path, PathBuf};

pub const DEFAULT_PAGE_TEMPLATE: &str = include_str!("../themes/default/templates/page.html");
pub const DEFAULT_MACROS_TEMPLATE: &str = include_str!("../themes/default/templates/macros.html");
pub const DEFAULT_OG_IMAGE_TEMPLATE: &str =
    include_str!("../themes/default/templates/og_image.svg");

pub const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    ("page.html", DEFAULT_PAGE_TEMPLATE),
    ("macros.html", DEFAULT_MACROS_TEMPLATE),
    ("og_image.svg", DEFAULT_OG_IMAGE_TEMPLATE),
];

/// Theme assets copied into `assets/` in the output directory.
pub const EMBEDDED_ASSETS: &[(&str, &str)] = &[
    ("style.css", include_str!("../themes/default/assets/style.css")),
    ("search.js", include_str!("../themes/default/assets/search.js")),
];

/// Resolve the theme directory for a theme name.
pub fn theme_dir(base_path: &Path, name: &str) -> PathBuf {
    base_path.join("themes").join(name)
}

/// Write the default theme files into a theme directory (used by `init`).
pub fn write_default_theme(theme_path: &Path) -> std::io::Result<()> {
    let templates = theme_path.join("templates");
    std::fs::create_dir_all(&templates)?;
    for (name, content) in EMBEDDED_TEMPLATES {
        std::fs::write(templates.join(name), content)?;
    }

    let assets = theme_path.join("assets");
    std::fs::create_dir_all(&assets)?;
    for (name, content) in EMBEDDED_ASSETS {
        std::fs::write(assets.join(name), content)?;
    }

    Ok(())
}
