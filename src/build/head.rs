//! `<head>` tag assembly.
//!
//! User-declared head entries from config render verbatim, followed by
//! Open Graph defaults derived from the site config. A per-page generated
//! image replaces the site-wide `og:image` on that page.

use crate::config::{HeadTag, SiteConfig};
use crate::util::escape_attr;

/// Tags with no closing counterpart.
const VOID_TAGS: &[&str] = &["meta", "link", "base"];

/// Render the full head block for one page.
pub fn assemble_head(site: &SiteConfig, page_og_image: Option<&str>) -> String {
    let mut html = String::new();

    for tag in &site.head {
        html.push_str(&render_head_tag(tag));
        html.push('\n');
    }

    for tag in og_default_tags(site, page_og_image) {
        html.push_str(&render_head_tag(&tag));
        html.push('\n');
    }

    html
}

/// Open Graph defaults assembled from site config.
fn og_default_tags(site: &SiteConfig, page_og_image: Option<&str>) -> Vec<HeadTag> {
    let image = page_og_image
        .map(str::to_string)
        .or_else(|| site.og_image.clone())
        .unwrap_or_else(|| "/og.png".to_string());

    let mut tags = vec![
        og_meta("og:title", &site.title),
        og_meta("og:image", &absolutize(&image, site.url.as_deref())),
    ];
    if !site.description.is_empty() {
        tags.push(og_meta("og:description", &site.description));
    }
    tags.push(og_meta("og:site_name", &site.title));
    tags
}

fn og_meta(property: &str, content: &str) -> HeadTag {
    let mut attrs = serde_yaml::Mapping::new();
    attrs.insert("property".into(), property.into());
    attrs.insert("content".into(), content.into());
    HeadTag("meta".to_string(), attrs)
}

/// Resolve a site-relative image path against the canonical site URL.
/// Without a configured URL the path stays relative.
fn absolutize(path: &str, site_url: Option<&str>) -> String {
    if path.contains("://") {
        return path.to_string();
    }
    match site_url {
        Some(url) => format!("{}{}", url.trim_end_matches('/'), path),
        None => path.to_string(),
    }
}

/// Render a single head tag; attribute order in the config survives into
/// the HTML.
fn render_head_tag(tag: &HeadTag) -> String {
    let HeadTag(name, attrs) = tag;

    let mut html = format!("<{}", name);
    for (key, value) in attrs {
        let key = yaml_scalar_to_string(key);
        let value = yaml_scalar_to_string(value);
        html.push_str(&format!(" {}=\"{}\"", key, escape_attr(&value)));
    }
    html.push('>');

    if !VOID_TAGS.contains(&name.as_str()) {
        html.push_str(&format!("</{}>", name));
    }

    html
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn site() -> SiteConfig {
        SiteConfig {
            title: "My Garden".to_string(),
            description: "Notes and essays".to_string(),
            lang: "en".to_string(),
            url: Some("https://garden.example.com".to_string()),
            output: PathBuf::from("_site"),
            content: PathBuf::from("content"),
            og_image: None,
            head: vec![],
        }
    }

    #[test]
    fn test_render_head_tag_meta() {
        let tag: HeadTag =
            serde_yaml::from_str(r##"["meta", { name: theme-color, content: "#ffffff" }]"##)
                .unwrap();
        assert_eq!(
            render_head_tag(&tag),
            "<meta name=\"theme-color\" content=\"#ffffff\">"
        );
    }

    #[test]
    fn test_render_head_tag_script_closes() {
        let tag: HeadTag = serde_yaml::from_str(
            r#"["script", { defer: "true", src: /assets/analytics.js }]"#,
        )
        .unwrap();
        let html = render_head_tag(&tag);
        assert!(html.starts_with("<script"));
        assert!(html.ends_with("</script>"));
    }

    #[test]
    fn test_render_head_tag_preserves_attr_order() {
        let tag: HeadTag = serde_yaml::from_str(
            r#"["link", { rel: alternate icon, href: /favicon.ico, type: image/png, sizes: 16x16 }]"#,
        )
        .unwrap();
        assert_eq!(
            render_head_tag(&tag),
            "<link rel=\"alternate icon\" href=\"/favicon.ico\" type=\"image/png\" sizes=\"16x16\">"
        );
    }

    #[test]
    fn test_og_defaults() {
        let html = assemble_head(&site(), None);
        assert!(html.contains("property=\"og:title\" content=\"My Garden\""));
        assert!(html.contains(
            "property=\"og:image\" content=\"https://garden.example.com/og.png\""
        ));
        assert!(html.contains("property=\"og:description\" content=\"Notes and essays\""));
        assert!(html.contains("property=\"og:site_name\" content=\"My Garden\""));
    }

    #[test]
    fn test_page_og_image_overrides_site_default() {
        let mut site = site();
        site.og_image = Some("/custom-og.png".to_string());

        let html = assemble_head(&site, Some("/og/notes/first.svg"));
        assert!(html.contains(
            "content=\"https://garden.example.com/og/notes/first.svg\""
        ));
        assert!(!html.contains("custom-og.png"));
    }

    #[test]
    fn test_og_image_relative_without_site_url() {
        let mut site = site();
        site.url = None;
        let html = assemble_head(&site, None);
        assert!(html.contains("property=\"og:image\" content=\"/og.png\""));
    }

    #[test]
    fn test_user_head_entries_come_first() {
        let mut site = site();
        site.head = vec![serde_yaml::from_str(r#"["link", { rel: icon, href: /logo.svg }]"#).unwrap()];

        let html = assemble_head(&site, None);
        let icon_pos = html.find("rel=\"icon\"").unwrap();
        let og_pos = html.find("og:title").unwrap();
        assert!(icon_pos < og_pos);
    }
}
