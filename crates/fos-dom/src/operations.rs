//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found in the arena
    #[error("Node {0:?} not found")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error: cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Operation needs an element
    #[error("Node {0:?} is not an element")]
    InvalidNodeType(NodeId),
    /// Node is not a child of the given parent
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}
