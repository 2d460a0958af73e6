//! Sidebar building.
//!
//! The sidebar comes from the `sidebar` config section when present, and
//! is otherwise auto-generated from the content directory structure.

use std::collections::HashMap;

use crate::config::SidebarItem;
use crate::util::title_case;

use super::document::Document;
use super::render::{SidebarLink, SidebarNode};

/// Build the sidebar for the whole site.
///
/// With an explicit config, entries resolve against the document set and
/// entries pointing at unknown paths are dropped. Without one, documents
/// are organized by directory structure; documents with `hidden: true`
/// front matter stay out.
pub fn build_sidebar(configured: Option<&[SidebarItem]>, docs: &[&Document]) -> Vec<SidebarNode> {
    match configured {
        Some(items) => {
            let path_to_doc: HashMap<String, &Document> = docs
                .iter()
                .map(|doc| (doc.source_path.to_string_lossy().replace('\\', "/"), *doc))
                .collect();
            convert_configured(items, &path_to_doc)
        }
        None => auto_generate(docs),
    }
}

fn convert_configured(
    items: &[SidebarItem],
    path_to_doc: &HashMap<String, &Document>,
) -> Vec<SidebarNode> {
    items
        .iter()
        .filter_map(|item| convert_item(item, path_to_doc))
        .collect()
}

fn convert_item(
    item: &SidebarItem,
    path_to_doc: &HashMap<String, &Document>,
) -> Option<SidebarNode> {
    match item {
        SidebarItem::Section { section, items } => {
            let converted = convert_configured(items, path_to_doc);
            if converted.is_empty() {
                None
            } else {
                Some(SidebarNode::Section {
                    section: section.clone(),
                    items: converted,
                })
            }
        }
        SidebarItem::Titled(map) => {
            let (title, path) = map.iter().next()?;
            let doc = path_to_doc.get(path.as_str())?;
            Some(SidebarNode::Link(SidebarLink {
                title: title.clone(),
                url: doc.url_path.clone(),
                children: vec![],
            }))
        }
        SidebarItem::Path(path) => {
            let doc = path_to_doc.get(path.as_str())?;
            Some(SidebarNode::Link(SidebarLink {
                title: doc.title(),
                url: doc.url_path.clone(),
                children: vec![],
            }))
        }
    }
}

// =============================================================================
// Auto-generation
// =============================================================================

/// A tree node mirroring the content directory structure.
#[derive(Default)]
struct SidebarTree {
    /// Links at this level: (is_index, link)
    links: Vec<(bool, SidebarLink)>,
    /// Subdirectories by name
    children: HashMap<String, SidebarTree>,
}

impl SidebarTree {
    fn insert(&mut self, path_parts: &[&str], is_index: bool, link: SidebarLink) {
        match path_parts {
            [] => {}
            [_] => self.links.push((is_index, link)),
            [dir, rest @ ..] => self
                .children
                .entry(dir.to_string())
                .or_default()
                .insert(rest, is_index, link),
        }
    }

    /// Flatten the tree into sidebar nodes.
    ///
    /// Index files sort first, then links alphabetically by title. When a
    /// link's URL stem matches a child directory name, the directory
    /// contents become the link's children instead of a separate section.
    fn into_nodes(mut self) -> Vec<SidebarNode> {
        self.links.sort_by(|a, b| match (a.0, b.0) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.1.title.cmp(&b.1.title),
        });

        let mut nodes = Vec::new();

        for (_, mut link) in self.links {
            let stem = link
                .url
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .map(|s| s.to_lowercase());

            if let Some(stem) = stem
                && let Some(subtree) = self.children.remove(&stem)
            {
                link.children = subtree.into_nodes();
            }

            nodes.push(SidebarNode::Link(link));
        }

        let mut remaining: Vec<_> = self.children.into_iter().collect();
        remaining.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, subtree) in remaining {
            let items = subtree.into_nodes();
            if !items.is_empty() {
                nodes.push(SidebarNode::Section {
                    section: title_case(&name),
                    items,
                });
            }
        }

        nodes
    }
}

fn auto_generate(docs: &[&Document]) -> Vec<SidebarNode> {
    let mut docs: Vec<&Document> = docs
        .iter()
        .filter(|doc| !doc.front_matter.hidden)
        .copied()
        .collect();
    docs.sort_by(|a, b| a.source_path.cmp(&b.source_path));

    let mut root = SidebarTree::default();

    for doc in docs {
        let is_index = doc.source_path.file_stem().is_some_and(|s| s == "index");
        let link = SidebarLink {
            title: doc.title(),
            url: doc.url_path.clone(),
            children: vec![],
        };

        let path_str = doc.source_path.to_string_lossy().replace('\\', "/");
        let path_parts: Vec<&str> = path_str.split('/').collect();

        root.insert(&path_parts, is_index, link);
    }

    root.into_nodes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::document::FrontMatter;
    use std::path::PathBuf;

    fn make_doc(source_path: &str, url_path: &str) -> Document {
        Document {
            source_path: PathBuf::from(source_path),
            url_path: url_path.to_string(),
            front_matter: FrontMatter::default(),
            content: String::new(),
        }
    }

    #[test]
    fn test_auto_generate_simple() {
        let docs = vec![
            make_doc("index.md", "/"),
            make_doc("gardening.md", "/gardening"),
            make_doc("editors.md", "/editors"),
        ];
        let doc_refs: Vec<&Document> = docs.iter().collect();

        let sidebar = build_sidebar(None, &doc_refs);

        assert_eq!(sidebar.len(), 3);
        // Index sorts first
        let SidebarNode::Link(link) = &sidebar[0] else {
            panic!("expected link");
        };
        assert_eq!(link.url, "/");
    }

    #[test]
    fn test_auto_generate_sections() {
        let docs = vec![
            make_doc("index.md", "/"),
            make_doc("notes/first.md", "/notes/first"),
            make_doc("notes/second.md", "/notes/second"),
        ];
        let doc_refs: Vec<&Document> = docs.iter().collect();

        let sidebar = build_sidebar(None, &doc_refs);

        assert_eq!(sidebar.len(), 2);
        let SidebarNode::Section { section, items } = &sidebar[1] else {
            panic!("expected section");
        };
        assert_eq!(section, "Notes");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_auto_generate_merges_stem_matching_directory() {
        let docs = vec![
            make_doc("tools.md", "/tools"),
            make_doc("tools/editors.md", "/tools/editors"),
        ];
        let doc_refs: Vec<&Document> = docs.iter().collect();

        let sidebar = build_sidebar(None, &doc_refs);

        assert_eq!(sidebar.len(), 1);
        let SidebarNode::Link(link) = &sidebar[0] else {
            panic!("expected link");
        };
        assert_eq!(link.url, "/tools");
        assert_eq!(link.children.len(), 1);
    }

    #[test]
    fn test_auto_generate_excludes_hidden() {
        let mut hidden = make_doc("secret.md", "/secret");
        hidden.front_matter.hidden = true;
        let docs = vec![make_doc("index.md", "/"), hidden];
        let doc_refs: Vec<&Document> = docs.iter().collect();

        let sidebar = build_sidebar(None, &doc_refs);

        assert_eq!(sidebar.len(), 1);
    }

    #[test]
    fn test_configured_sidebar() {
        let docs = vec![
            make_doc("index.md", "/"),
            make_doc("notes/first.md", "/notes/first"),
        ];
        let doc_refs: Vec<&Document> = docs.iter().collect();

        let configured: Vec<SidebarItem> = serde_yaml::from_str(
            "- index.md\n- Welcome: notes/first.md\n- section: Extra\n  items:\n    - notes/first.md\n",
        )
        .unwrap();

        let sidebar = build_sidebar(Some(&configured), &doc_refs);

        assert_eq!(sidebar.len(), 3);
        let SidebarNode::Link(link) = &sidebar[1] else {
            panic!("expected link");
        };
        assert_eq!(link.title, "Welcome");
        assert_eq!(link.url, "/notes/first");
        assert!(matches!(&sidebar[2], SidebarNode::Section { section, .. } if section == "Extra"));
    }

    #[test]
    fn test_configured_sidebar_drops_unknown_paths() {
        let docs = vec![make_doc("index.md", "/")];
        let doc_refs: Vec<&Document> = docs.iter().collect();

        let configured: Vec<SidebarItem> =
            serde_yaml::from_str("- index.md\n- missing.md\n").unwrap();

        let sidebar = build_sidebar(Some(&configured), &doc_refs);
        assert_eq!(sidebar.len(), 1);
    }
}
