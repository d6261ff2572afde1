//! DOM Tree (arena-based allocation)
//!
//! Node 0 is always the document node. Removed nodes are only unlinked;
//! they keep their slot in the arena and can be inserted again.

use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree for memory efficiency
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data of a node, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Mutable element data of a node, if it is an element
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)
            .ok_or(DomError::InvalidNodeType(id))?
            .set_attr(name, value);
        Ok(())
    }

    /// Get an attribute of an element
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    /// Append `child` as last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `new_child` before `ref_child` (or at the end when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insertion(parent, new_child)?;
        if let Some(reference) = ref_child {
            if reference == new_child {
                return Ok(new_child);
            }
            if self.node(reference)?.parent != parent {
                return Err(DomError::NotAChild { parent, child: reference });
            }
        }

        self.detach(new_child)?;

        let (prev, next) = match ref_child {
            Some(reference) => (self.node(reference)?.prev_sibling, reference),
            None => (self.node(parent)?.last_child, NodeId::NONE),
        };

        {
            let node = self.node_mut(new_child)?;
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = new_child;
        } else {
            self.node_mut(parent)?.first_child = new_child;
        }
        if next.is_valid() {
            self.node_mut(next)?.prev_sibling = new_child;
        } else {
            self.node_mut(parent)?.last_child = new_child;
        }

        Ok(new_child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.node(child)?.parent != parent {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child)?;
        Ok(child)
    }

    /// Replace `old_child` of `parent` with `new_child`
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId> {
        if new_child == old_child {
            return Ok(old_child);
        }
        self.insert_before(parent, new_child, Some(old_child))?;
        self.remove_child(parent, old_child)
    }

    /// Unlink a node from its parent; no-op for detached nodes
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let (parent, prev, next) = {
            let node = self.node(id)?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = next;
        } else {
            self.node_mut(parent)?.first_child = next;
        }
        if next.is_valid() {
            self.node_mut(next)?.prev_sibling = prev;
        } else {
            self.node_mut(parent)?.last_child = prev;
        }

        let node = self.node_mut(id)?;
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(())
    }

    /// Remove every child of a node
    pub fn clear_children(&mut self, id: NodeId) -> DomResult<Vec<NodeId>> {
        let children = self.child_ids(id);
        for &child in &children {
            self.detach(child)?;
        }
        Ok(children)
    }

    /// Copy a node (and its subtree when `deep`) into new detached nodes
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> DomResult<NodeId> {
        let data = self.node(id)?.data.clone();
        let copy = self.push(Node {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        });
        if deep {
            for child in self.child_ids(id) {
                let child_copy = self.clone_node(child, true)?;
                self.append_child(copy, child_copy)?;
            }
        }
        Ok(copy)
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        let mut current = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        std::iter::from_fn(move || {
            let node = self.get(current)?;
            let id = current;
            current = node.next_sibling;
            Some((id, node))
        })
    }

    /// Direct children IDs
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Element children only
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
            .collect()
    }

    /// All descendants in document order (the node itself excluded)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_ids(id).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.child_ids(next).into_iter().rev());
        }
        out
    }

    /// Ancestors from parent up to the document node
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.get(id).map_or(NodeId::NONE, |n| n.parent);
        std::iter::from_fn(move || {
            let node = self.get(current)?;
            let id = current;
            current = node.parent;
            Some(id)
        })
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Strict containment: `node` is a descendant of `ancestor`
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Attached to the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.contains(NodeId::ROOT, id)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.node(parent)?;
        self.node(child)?;
        let hierarchy_error = DomError::HierarchyRequest { parent, child };
        if child == NodeId::ROOT || child == parent || self.contains(child, parent) {
            return Err(hierarchy_error);
        }
        if matches!(parent_node.data, NodeData::Text(_) | NodeData::Comment(_)) {
            return Err(hierarchy_error);
        }
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
