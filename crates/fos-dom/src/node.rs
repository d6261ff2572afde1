//! DOM Node
//!
//! Nodes live in the tree arena and link to each other through `NodeId`s
//! instead of pointers, so a detached subtree stays addressable until it is
//! re-inserted or dropped with the tree.

use crate::{DOMTokenList, DOMStringMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(TextData { content: content.to_string() }))
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self::with_data(NodeData::Comment(content.to_string()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// The `class` attribute is mirrored by `class_list`; every mutation goes
/// through methods that keep both in agreement.
#[derive(Debug, Clone)]
pub struct ElementData {
    tag: String,
    attrs: Vec<Attribute>,
    class_list: DOMTokenList,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            class_list: DOMTokenList::new(),
        }
    }

    /// Lowercased tag name
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check attribute presence
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            self.class_list.set_value(value);
        }
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attrs.push(Attribute { name, value: value.to_string() }),
        }
    }

    /// Remove an attribute, returning whether it existed
    pub fn remove_attr(&mut self, name: &str) -> bool {
        if name.eq_ignore_ascii_case("class") {
            self.class_list = DOMTokenList::new();
        }
        let before = self.attrs.len();
        self.attrs.retain(|a| !a.name.eq_ignore_ascii_case(name));
        before != self.attrs.len()
    }

    /// Iterate attributes in insertion order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|a| (a.name.as_str(), a.value.as_str()))
    }

    /// Class list
    pub fn class_list(&self) -> &DOMTokenList {
        &self.class_list
    }

    /// Check class membership
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.contains(class)
    }

    /// Add a class
    pub fn add_class(&mut self, class: &str) {
        self.class_list.add(&[class]);
        self.sync_class_attr();
    }

    /// Remove a class
    pub fn remove_class(&mut self, class: &str) {
        self.class_list.remove(&[class]);
        self.sync_class_attr();
    }

    /// Toggle a class, returns whether it is present afterwards
    pub fn toggle_class(&mut self, class: &str, force: Option<bool>) -> bool {
        let present = self.class_list.toggle(class, force);
        self.sync_class_attr();
        present
    }

    /// Raw `data-*` attributes
    pub fn dataset(&self) -> DOMStringMap {
        DOMStringMap::from_attributes(self.attrs())
    }

    fn sync_class_attr(&mut self) {
        let value = self.class_list.value();
        match self.attrs.iter_mut().find(|a| a.name == "class") {
            Some(attr) => attr.value = value,
            None if !value.is_empty() => self.attrs.push(Attribute {
                name: "class".to_string(),
                value,
            }),
            None => {}
        }
    }
}

/// Text node data
#[derive(Debug, Clone)]
pub struct TextData {
    pub content: String,
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}
