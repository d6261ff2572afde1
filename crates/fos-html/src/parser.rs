//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the fOS arena tree.

use fos_dom::{Document, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::HtmlError;

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, HtmlError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, HtmlError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = self.read(html)?;
        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_children(&dom.document, document.tree_mut(), root)?;
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Parse a fragment as `<body>` content into detached nodes of `tree`.
    ///
    /// The returned top-level nodes are in source order and have no parent.
    pub fn parse_fragment(&self, html: &str, tree: &mut DomTree) -> Result<Vec<NodeId>, HtmlError> {
        let dom = self.read(html)?;
        let Some(body) = find_element(&dom.document, "body") else {
            return Ok(Vec::new());
        };

        let mut nodes = Vec::new();
        for child in body.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, tree)? {
                nodes.push(id);
            }
        }
        tracing::trace!("Parsed fragment into {} top-level nodes", nodes.len());
        Ok(nodes)
    }

    fn read(&self, html: &str) -> Result<RcDom, HtmlError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;
        Ok(dom)
    }

    fn convert_children(
        &self,
        handle: &Handle,
        tree: &mut DomTree,
        parent: NodeId,
    ) -> Result<(), HtmlError> {
        for child in handle.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, tree)? {
                tree.append_child(parent, id)?;
            }
        }
        Ok(())
    }

    /// Convert an RcDom node (and its subtree) into a detached node.
    /// Whitespace-only text, doctypes and processing instructions are skipped.
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree) -> Result<Option<NodeId>, HtmlError> {
        let id = match &handle.data {
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if text.trim().is_empty() {
                    return Ok(None);
                }
                tree.create_text(&text)
            }
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                self.convert_children(handle, tree, id)?;
                id
            }
            RcNodeData::Document
            | RcNodeData::Doctype { .. }
            | RcNodeData::ProcessingInstruction { .. } => return Ok(None),
        };
        Ok(Some(id))
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let RcNodeData::Element { name, .. } = &child.data {
            if &*name.local == tag {
                return Some(child.clone());
            }
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        assert_eq!(doc.title(), "Test");
        assert!(doc.body().is_valid());
        assert_eq!(doc.tree().element_children(doc.body()).len(), 1);
    }

    #[test]
    fn test_parse_attributes() {
        let html = r#"<div id="main" class="a b" data-value="1"></div>"#;
        let doc = HtmlParser::new().parse(html).unwrap();

        let div = doc.get_element_by_id("main").unwrap();
        let elem = doc.tree().element(div).unwrap();
        assert!(elem.has_class("a"));
        assert!(elem.has_class("b"));
        assert_eq!(elem.get_attr("data-value"), Some("1"));
    }

    #[test]
    fn test_parse_fragment_detached() {
        let mut doc = Document::default();
        let nodes = HtmlParser::new()
            .parse_fragment("<b>one</b> text <i>two</i>", doc.tree_mut())
            .unwrap();

        assert_eq!(nodes.len(), 3);
        for &node in &nodes {
            assert_eq!(doc.tree().parent(node), None);
        }
        assert_eq!(doc.tree().text_content(nodes[0]), "one");
        assert_eq!(doc.tree().get(nodes[1]).and_then(|n| n.as_text()), Some(" text "));
    }
}
