//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree used as the host document for fOS views.

mod node;
mod tree;
mod document;
mod classlist;
mod dataset;
mod operations;

pub use node::{Node, NodeData, ElementData, TextData, Attribute};
pub use tree::DomTree;
pub use document::Document;
pub use classlist::DOMTokenList;
pub use dataset::{DOMStringMap, Dataset, parse_data_value};
pub use operations::{DomError, DomResult};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
