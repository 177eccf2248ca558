use thiserror::Error;

use crate::record::NodeId;

/// Reasons a move cannot be applied to the record list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// No sibling exists at the source position.
    #[error("no node at index {index} under parent {parent_id}")]
    SourceNotFound { parent_id: NodeId, index: usize },

    /// The destination parent is the moved node or one of its descendants.
    #[error("moving node {node} under {parent_id} would create a cycle")]
    WouldCreateCycle { node: NodeId, parent_id: NodeId },

    /// The destination parent is neither the root nor a known record.
    #[error("unknown destination parent {0}")]
    UnknownParent(NodeId),
}

/// Violation of the dense 1-based sibling order invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("parent {parent_id}: expected order {expected}, found {found}")]
    Gap {
        parent_id: NodeId,
        expected: u32,
        found: u32,
    },

    #[error("parent {parent_id}: order {order} used more than once")]
    Duplicate { parent_id: NodeId, order: u32 },
}
