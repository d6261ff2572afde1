//! Cache keys and element sets

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use fos_dom::NodeId;

use crate::placeholder::Placeholders;

/// An element name plus the values for its template placeholders.
///
/// Two lookups share a cache entry exactly when their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameKey {
    name: String,
    args: Placeholders,
}

impl NameKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Placeholders::None,
        }
    }

    pub fn with_args(name: impl Into<String>, args: impl Into<Placeholders>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &Placeholders {
        &self.args
    }

    pub fn has_args(&self) -> bool {
        !self.args.is_none()
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.args)
    }
}

impl From<&str> for NameKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NameKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&NameKey> for NameKey {
    fn from(key: &NameKey) -> Self {
        key.clone()
    }
}

impl<A: Into<Placeholders>> From<(&str, A)> for NameKey {
    fn from((name, args): (&str, A)) -> Self {
        Self::with_args(name, args)
    }
}

/// Ordered, shared set of elements.
///
/// Clones share storage, so a cached set handed out twice is observably
/// the same set (see [`ElementSet::same_set`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSet {
    nodes: Rc<[NodeId]>,
}

impl ElementSet {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes: nodes.into() }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn single(node: NodeId) -> Self {
        Self::new(vec![node])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Identity, not content: true when both handles come from one lookup
    pub fn same_set(&self, other: &ElementSet) -> bool {
        Rc::ptr_eq(&self.nodes, &other.nodes)
    }
}

impl Default for ElementSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<NodeId> for ElementSet {
    fn from(node: NodeId) -> Self {
        Self::single(node)
    }
}

impl From<Vec<NodeId>> for ElementSet {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::new(nodes)
    }
}

impl FromIterator<NodeId> for ElementSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Memoized element lookups of one root binding
#[derive(Debug, Default)]
pub(crate) struct ElementCache {
    entries: HashMap<NameKey, ElementSet>,
}

impl ElementCache {
    pub fn get(&self, key: &NameKey) -> Option<ElementSet> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: NameKey, set: ElementSet) {
        self.entries.insert(key, set);
    }

    /// Drop the entry stored under exactly `key`
    pub fn remove(&mut self, key: &NameKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
