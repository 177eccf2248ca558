use std::hash::Hash;

/// Read-only tree contract consumed by the row flattening in [`crate::visible_rows`].
///
/// A proper tree is expected (not a DAG):
/// - each node has exactly one parent;
/// - identifiers are stable between rebuilds (for expansion state).
pub trait TreeModel {
    /// Node identifier type.
    type Id: Copy + Eq + Hash;

    /// Returns the root node (or `None` if the tree is empty).
    fn root(&self) -> Option<Self::Id>;
    /// Returns the node's children in display order.
    fn children(&self, id: Self::Id) -> &[Self::Id];
    /// Returns `true` if the node exists in the model.
    fn contains(&self, id: Self::Id) -> bool;
    /// Returns the per-level lower-siblings trail of the node.
    fn lower_siblings(&self, id: Self::Id) -> &[usize];
    /// Returns whether the node's children should be shown.
    fn is_expanded(&self, _id: Self::Id) -> bool {
        true
    }
    /// Returns an approximate size hint (not required to be exact).
    fn size_hint(&self) -> usize {
        0
    }
}
