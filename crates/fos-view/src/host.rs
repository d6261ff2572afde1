//! DOM host seam
//!
//! The view never touches a tree directly. Everything it needs from the
//! document goes through [`DomHost`]; [`Document`] is the stock host.

use fos_css::SelectorQuery;
use fos_dom::{Dataset, Document, NodeId};

use crate::error::Result;

/// New content for the replacement helpers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Markup, parsed as body content
    Html(String),
    /// A single text node
    Text(String),
    /// Existing nodes, moved into place
    Nodes(Vec<NodeId>),
}

impl From<&str> for Content {
    fn from(html: &str) -> Self {
        Self::Html(html.to_string())
    }
}

impl From<String> for Content {
    fn from(html: String) -> Self {
        Self::Html(html)
    }
}

impl From<NodeId> for Content {
    fn from(node: NodeId) -> Self {
        Self::Nodes(vec![node])
    }
}

impl From<Vec<NodeId>> for Content {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::Nodes(nodes)
    }
}

/// DOM operations a view is built on
pub trait DomHost {
    /// Descendants of `root` matching `selector`, in document order
    fn query_descendants(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>>;

    /// Typed `data-*` attributes of a node; empty for non-elements
    fn data_attributes(&self, node: NodeId) -> Dataset;

    /// True when the node carries every class of the space-separated list
    fn has_class(&self, node: NodeId, classes: &str) -> bool;

    fn add_class(&mut self, node: NodeId, classes: &str);

    fn remove_class(&mut self, node: NodeId, classes: &str);

    fn toggle_class(&mut self, node: NodeId, classes: &str, force: Option<bool>);

    /// Element holding keyboard focus
    fn active_element(&self) -> Option<NodeId>;

    /// Strict containment
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Closest inclusive ancestor matching `selector`
    fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>>;

    /// Returns false when the node cannot take focus
    fn focus(&mut self, node: NodeId) -> bool;

    /// Turn content into detached nodes. With `copy`, given nodes are
    /// deep-cloned instead of moved.
    fn materialize(&mut self, content: &Content, copy: bool) -> Result<Vec<NodeId>>;

    /// Put `replacement` where `node` is and detach `node`.
    /// Detached targets are left alone.
    fn replace_node(&mut self, node: NodeId, replacement: &[NodeId]) -> Result<()>;

    /// Replace every child of `node` with `children`
    fn set_children(&mut self, node: NodeId, children: &[NodeId]) -> Result<()>;
}

impl DomHost for Document {
    fn query_descendants(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        Ok(self.tree().query_selector_all(root, selector)?)
    }

    fn data_attributes(&self, node: NodeId) -> Dataset {
        self.tree()
            .element(node)
            .map(|element| Dataset::from_string_map(&element.dataset()))
            .unwrap_or_default()
    }

    fn has_class(&self, node: NodeId, classes: &str) -> bool {
        let Some(element) = self.tree().element(node) else {
            return false;
        };
        let mut tokens = classes.split_ascii_whitespace().peekable();
        tokens.peek().is_some() && tokens.all(|class| element.has_class(class))
    }

    fn add_class(&mut self, node: NodeId, classes: &str) {
        if let Some(element) = self.tree_mut().element_mut(node) {
            for class in classes.split_ascii_whitespace() {
                element.add_class(class);
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, classes: &str) {
        if let Some(element) = self.tree_mut().element_mut(node) {
            for class in classes.split_ascii_whitespace() {
                element.remove_class(class);
            }
        }
    }

    fn toggle_class(&mut self, node: NodeId, classes: &str, force: Option<bool>) {
        if let Some(element) = self.tree_mut().element_mut(node) {
            for class in classes.split_ascii_whitespace() {
                element.toggle_class(class, force);
            }
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        Document::active_element(self)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree().contains(ancestor, node)
    }

    fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.tree().closest(node, selector)?)
    }

    fn focus(&mut self, node: NodeId) -> bool {
        Document::focus(self, node)
    }

    fn materialize(&mut self, content: &Content, copy: bool) -> Result<Vec<NodeId>> {
        let tree = self.tree_mut();
        let nodes = match content {
            Content::Html(html) => fos_html::parse_fragment(html, tree)?,
            Content::Text(text) => vec![tree.create_text(text)],
            Content::Nodes(nodes) if copy => nodes
                .iter()
                .map(|&node| tree.clone_node(node, true))
                .collect::<std::result::Result<Vec<_>, _>>()?,
            Content::Nodes(nodes) => nodes.clone(),
        };
        Ok(nodes)
    }

    fn replace_node(&mut self, node: NodeId, replacement: &[NodeId]) -> Result<()> {
        let tree = self.tree_mut();
        let Some(parent) = tree.parent(node) else {
            return Ok(());
        };
        for &new_node in replacement.iter().filter(|&&n| n != node) {
            tree.insert_before(parent, new_node, Some(node))?;
        }
        if !replacement.contains(&node) {
            tree.remove_child(parent, node)?;
        }
        Ok(())
    }

    fn set_children(&mut self, node: NodeId, children: &[NodeId]) -> Result<()> {
        let tree = self.tree_mut();
        tree.clear_children(node)?;
        for &child in children {
            tree.append_child(node, child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> (Document, NodeId) {
        let mut doc = Document::default();
        let body = doc.body();
        let list = doc.tree_mut().create_element("ul");
        doc.tree_mut().append_child(body, list).unwrap();
        (doc, list)
    }

    #[test]
    fn test_class_lists() {
        let (mut doc, list) = document();
        doc.add_class(list, "a b");
        assert!(doc.has_class(list, "b a"));
        assert!(!doc.has_class(list, "a c"));
        assert!(!doc.has_class(list, "  "));

        doc.toggle_class(list, "a", None);
        assert!(!doc.has_class(list, "a"));
        doc.toggle_class(list, "b", Some(true));
        assert!(doc.has_class(list, "b"));
        doc.remove_class(list, "b");
        assert_eq!(doc.tree().get_attribute(list, "class"), Some(""));
    }

    #[test]
    fn test_replace_node_keeps_position() {
        let (mut doc, list) = document();
        let body = doc.body();
        let after = doc.tree_mut().create_element("p");
        doc.tree_mut().append_child(body, after).unwrap();

        let nodes = doc.materialize(&Content::from("<ol></ol><hr>"), false).unwrap();
        doc.replace_node(list, &nodes).unwrap();

        let children = doc.tree().element_children(body);
        assert_eq!(children, vec![nodes[0], nodes[1], after]);
        assert_eq!(doc.tree().parent(list), None);
    }

    #[test]
    fn test_replace_detached_is_noop() {
        let (mut doc, _) = document();
        let loose = doc.tree_mut().create_element("div");
        let text = doc.materialize(&Content::Text("x".into()), false).unwrap();
        doc.replace_node(loose, &text).unwrap();
        assert_eq!(doc.tree().parent(text[0]), None);
    }

    #[test]
    fn test_materialize_copy() {
        let (mut doc, list) = document();
        let copies = doc.materialize(&Content::from(list), true).unwrap();
        assert_ne!(copies[0], list);
        assert_eq!(doc.tree().element(copies[0]).unwrap().tag_name(), "ul");
        assert_eq!(doc.tree().parent(copies[0]), None);
    }

    #[test]
    fn test_set_children() {
        let (mut doc, list) = document();
        let old = doc.tree_mut().create_element("li");
        doc.tree_mut().append_child(list, old).unwrap();

        let new = doc.materialize(&Content::from("<li>1</li><li>2</li>"), false).unwrap();
        doc.set_children(list, &new).unwrap();
        assert_eq!(doc.tree().child_ids(list), new);
        assert_eq!(doc.tree().text_content(list), "12");
    }

    #[test]
    fn test_data_attributes() {
        let (mut doc, list) = document();
        doc.tree_mut().set_attribute(list, "data-count", "3").unwrap();
        doc.tree_mut().set_attribute(list, "data-label", "items").unwrap();

        let data = doc.data_attributes(list);
        assert_eq!(data.get("count"), Some(&serde_json::json!(3)));
        assert_eq!(data.get("label"), Some(&serde_json::json!("items")));
        assert!(doc.data_attributes(NodeId::ROOT).is_empty());
    }
}
