use rustc_hash::{FxBuildHasher, FxHashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hierarchy::Hierarchy;
use crate::record::NodeId;

/// Expand/collapse flags kept apart from the records.
///
/// Nodes are expanded by default, so only collapsed ids are stored. The set is
/// keyed by node id alone, which keeps a node's state across reparenting.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionState {
    collapsed: FxHashSet<NodeId>,
}

impl ExpansionState {
    /// Creates an empty state (everything expanded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            collapsed: FxHashSet::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Captures the flags currently set on a hierarchy.
    pub fn capture(hierarchy: &Hierarchy) -> Self {
        Self {
            collapsed: hierarchy
                .nodes()
                .filter(|node| !node.is_expanded)
                .map(|node| node.id)
                .collect(),
        }
    }

    #[inline]
    pub fn is_expanded(&self, id: NodeId) -> bool {
        !self.collapsed.contains(&id)
    }

    pub fn set_expanded(&mut self, id: NodeId, expand: bool) {
        if expand {
            self.collapsed.remove(&id);
        } else {
            self.collapsed.insert(id);
        }
    }

    /// Flips the flag and returns the new expanded state.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.collapsed.remove(&id) {
            true
        } else {
            self.collapsed.insert(id);
            false
        }
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Collapses every node of the hierarchy that has children.
    pub fn collapse_all(&mut self, hierarchy: &Hierarchy) {
        self.collapsed.extend(
            hierarchy
                .nodes()
                .filter(|node| node.has_children && node.id != hierarchy.root_id())
                .map(|node| node.id),
        );
    }

    /// Writes the stored flags into a freshly built hierarchy.
    pub fn apply_to(&self, hierarchy: &mut Hierarchy) {
        for &id in &self.collapsed {
            hierarchy.set_expanded(id, false);
        }
    }

    /// Drops flags for nodes that no longer exist.
    pub fn prune(&mut self, hierarchy: &Hierarchy) {
        self.collapsed.retain(|id| hierarchy.contains(*id));
    }

    /// Collapsed ids in ascending order.
    pub fn collapsed(&self) -> Vec<NodeId> {
        let mut ids: Vec<_> = self.collapsed.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<NodeId> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            collapsed: iter.into_iter().collect(),
        }
    }
}
