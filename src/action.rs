use crate::locator::Locator;
use crate::record::NodeId;

/// Actions the presentation layer forwards to a [`crate::TreeSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeAction {
    /// A finished drag gesture; `destination` is `None` when the drop was cancelled.
    Move {
        source: Locator,
        destination: Option<Locator>,
    },
    /// Expand one node.
    Expand(NodeId),
    /// Collapse one node.
    Collapse(NodeId),
    /// Toggle expansion of one node.
    Toggle(NodeId),
    /// Expand all nodes in the tree.
    ExpandAll,
    /// Collapse all nodes in the tree.
    CollapseAll,
}

/// Result of handling an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeEvent {
    /// Records changed and the hierarchy was rebuilt.
    Moved { id: NodeId },
    /// Only presentation flags changed.
    Handled,
    /// Nothing to do (cancelled drop, unknown id).
    Unhandled,
}
