//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Element holding keyboard focus
    focused: NodeId,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh detached nodes under the document node cannot violate the hierarchy.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            focused: NodeId::NONE,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            focused: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree was filled by a parser
    pub fn finalize(&mut self) {
        self.html_element = self.find_child_element(self.tree.root(), "html");
        if self.html_element.is_valid() {
            self.head_element = self.find_child_element(self.html_element, "head");
            self.body_element = self.find_child_element(self.html_element, "body");
        }
    }

    fn find_child_element(&self, parent: NodeId, tag: &str) -> NodeId {
        self.tree
            .children(parent)
            .find(|(_, node)| node.as_element().is_some_and(|e| e.tag_name() == tag))
            .map_or(NodeId::NONE, |(id, _)| id)
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        let title = self.find_child_element(self.head_element, "title");
        if title.is_valid() {
            self.tree.text_content(title)
        } else {
            String::new()
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node| self.tree.element(node).and_then(|e| e.id()) == Some(id))
    }

    /// Move keyboard focus to an element; detached nodes and non-elements are refused
    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.tree.element(id).is_none() || !self.tree.is_connected(id) {
            return false;
        }
        tracing::trace!("Focus moved to {:?}", id);
        self.focused = id;
        true
    }

    /// Drop keyboard focus
    pub fn blur(&mut self) {
        self.focused = NodeId::NONE;
    }

    /// Focused element; falls back to <body> once the focused node left the document
    pub fn active_element(&self) -> Option<NodeId> {
        if self.focused.is_valid() && self.tree.is_connected(self.focused) {
            Some(self.focused)
        } else if self.body_element.is_valid() {
            Some(self.body_element)
        } else {
            None
        }
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new("about:blank");
        assert!(doc.body().is_valid());
        assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
        assert_eq!(doc.active_element(), Some(doc.body()));
    }

    #[test]
    fn test_focus_falls_back_to_body() {
        let mut doc = Document::default();
        let body = doc.body();
        let button = doc.tree_mut().create_element("button");

        assert!(!doc.focus(button), "detached nodes cannot take focus");

        doc.tree_mut().append_child(body, button).unwrap();
        assert!(doc.focus(button));
        assert_eq!(doc.active_element(), Some(button));

        doc.tree_mut().remove_child(body, button).unwrap();
        assert_eq!(doc.active_element(), Some(body));
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::default();
        let body = doc.body();
        let div = doc.tree_mut().create_element("div");
        doc.tree_mut().set_attribute(div, "id", "main").unwrap();
        doc.tree_mut().append_child(body, div).unwrap();

        assert_eq!(doc.get_element_by_id("main"), Some(div));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }
}
