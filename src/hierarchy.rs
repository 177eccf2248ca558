//! Derived hierarchy built from the flat record list.
//!
//! Nodes live in an arena keyed by id and only reference each other by id, so a
//! [`Hierarchy`] is cheap to discard and rebuild after every structural change.

use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::expansion::ExpansionState;
use crate::locator::Locator;
use crate::model::TreeModel;
use crate::record::{FlatNode, NodeId, ROOT_ID, partition_by_parent};

/// Per-level lower-siblings counts, root level first.
pub type SiblingTrail = SmallVec<[usize; 8]>;

/// A node of the derived hierarchy.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyNode {
    /// Mirrors [`FlatNode::id`], or [`ROOT_ID`] for the synthetic root.
    pub id: NodeId,
    /// Child ids by ascending `order`.
    pub children: Vec<NodeId>,
    pub has_children: bool,
    /// Presentation flag; the only state not derived from the records.
    pub is_expanded: bool,
    /// Entry `i` counts the siblings below this node's ancestor at level `i`
    /// (the last entry belongs to the node itself). Empty for the root and for
    /// nodes unreachable from it.
    pub lower_siblings_count: SiblingTrail,
}

impl HierarchyNode {
    fn new(id: NodeId, children: Vec<NodeId>) -> Self {
        Self {
            id,
            has_children: !children.is_empty(),
            children,
            is_expanded: true,
            lower_siblings_count: SiblingTrail::new(),
        }
    }

    /// Returns `true` if this node is the last one in its sibling group.
    #[inline]
    pub fn is_last_sibling(&self) -> bool {
        self.lower_siblings_count.last().is_none_or(|&count| count == 0)
    }
}

/// Renderable view of the records: id → node mapping plus the root id.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hierarchy {
    items: FxHashMap<NodeId, HierarchyNode>,
    parents: FxHashMap<NodeId, NodeId>,
    root_id: NodeId,
}

impl Hierarchy {
    /// Builds the hierarchy from a flat record list.
    ///
    /// Every node starts expanded. Malformed input is not rejected: records whose
    /// parent chain never reaches the root keep an empty trail and never appear
    /// under the root, and a duplicated id keeps its last record.
    pub fn build(records: &[FlatNode]) -> Self {
        let mut groups = partition_by_parent(records);
        let mut items = FxHashMap::with_capacity_and_hasher(records.len() + 1, FxBuildHasher);
        let mut parents = FxHashMap::with_capacity_and_hasher(records.len(), FxBuildHasher);

        let top_level = groups.remove(&ROOT_ID).unwrap_or_default();
        let top_level_count = top_level.len();
        items.insert(ROOT_ID, HierarchyNode::new(ROOT_ID, top_level));

        for record in records {
            if record.id == ROOT_ID {
                tracing::warn!("record uses the reserved root id, skipped");
                continue;
            }
            let children = groups.get(&record.id).cloned().unwrap_or_default();
            if items
                .insert(record.id, HierarchyNode::new(record.id, children))
                .is_some()
            {
                tracing::warn!(id = record.id, "duplicate record id");
            }
            parents.insert(record.id, record.parent_id);
        }

        let mut hierarchy = Self {
            items,
            parents,
            root_id: ROOT_ID,
        };
        let reached = hierarchy.annotate_lower_siblings();
        let unreachable = hierarchy.len().saturating_sub(reached);
        if unreachable > 0 {
            tracing::warn!(unreachable, "records not reachable from the root");
        }
        tracing::debug!(
            records = records.len(),
            top_level = top_level_count,
            "built hierarchy"
        );
        hierarchy
    }

    /// Builds the hierarchy and carries over expand flags from an earlier snapshot.
    pub fn build_with(records: &[FlatNode], expansion: &ExpansionState) -> Self {
        let mut hierarchy = Self::build(records);
        expansion.apply_to(&mut hierarchy);
        hierarchy
    }

    // Top-down pass; each id is visited once so cycles or duplicates cannot loop.
    fn annotate_lower_siblings(&mut self) -> usize {
        let mut visited: FxHashSet<NodeId> =
            FxHashSet::with_capacity_and_hasher(self.items.len(), FxBuildHasher);
        visited.insert(self.root_id);
        let mut stack: Vec<(NodeId, SiblingTrail)> = vec![(self.root_id, SiblingTrail::new())];
        let mut reached = 0;

        while let Some((id, trail)) = stack.pop() {
            let Some(node) = self.items.get_mut(&id) else {
                continue;
            };
            let count = node.children.len();
            for (idx, &child) in node.children.iter().enumerate() {
                if !visited.insert(child) {
                    continue;
                }
                let mut child_trail = trail.clone();
                child_trail.push(count - 1 - idx);
                stack.push((child, child_trail));
            }
            node.lower_siblings_count = trail;
            if id != self.root_id {
                reached += 1;
            }
        }
        reached
    }

    #[inline]
    pub const fn root_id(&self) -> NodeId {
        self.root_id
    }

    /// Returns the node with the given id (the root included).
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.items.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.items.contains_key(&id)
    }

    /// Returns the ordered children of a node (empty for unknown ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.items
            .get(&id)
            .map_or(&[], |node| node.children.as_slice())
    }

    /// Iterates over all nodes in unspecified order, the root included.
    pub fn nodes(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.items.values()
    }

    /// Number of record nodes (the synthetic root excluded).
    pub fn len(&self) -> usize {
        self.items.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the parent id stored in the node's record.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    /// Depth of the node below the root (top-level = 1), if reachable.
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        self.items
            .get(&id)
            .map(|node| node.lower_siblings_count.len())
            .filter(|&depth| depth > 0)
    }

    /// Current position of a node in its parent's children.
    pub fn locate(&self, id: NodeId) -> Option<Locator> {
        let parent_id = self.parent_of(id)?;
        let index = self.children(parent_id).iter().position(|&child| child == id)?;
        Some(Locator::new(parent_id, index))
    }

    /// Id at a given locator, if that position exists.
    pub fn id_at(&self, locator: Locator) -> Option<NodeId> {
        self.children(locator.parent_id).get(locator.index).copied()
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.items.get(&id).is_some_and(|node| node.is_expanded)
    }

    /// Sets the expand flag of one node. Returns `false` for unknown ids and the root.
    pub fn set_expanded(&mut self, id: NodeId, expand: bool) -> bool {
        if id == self.root_id {
            return false;
        }
        match self.items.get_mut(&id) {
            Some(node) => {
                node.is_expanded = expand;
                true
            }
            None => false,
        }
    }

    /// Flips the expand flag and returns the new value.
    pub fn toggle(&mut self, id: NodeId) -> Option<bool> {
        let expand = !self.items.get(&id)?.is_expanded;
        self.set_expanded(id, expand).then_some(expand)
    }
}

impl TreeModel for Hierarchy {
    type Id = NodeId;

    fn root(&self) -> Option<Self::Id> {
        Some(self.root_id)
    }

    fn children(&self, id: Self::Id) -> &[Self::Id] {
        Self::children(self, id)
    }

    fn contains(&self, id: Self::Id) -> bool {
        Self::contains(self, id)
    }

    fn lower_siblings(&self, id: Self::Id) -> &[usize] {
        self.items
            .get(&id)
            .map_or(&[], |node| node.lower_siblings_count.as_slice())
    }

    fn is_expanded(&self, id: Self::Id) -> bool {
        id == self.root_id || Self::is_expanded(self, id)
    }

    fn size_hint(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Records from the reference data set.
    //   1 ── 5, 6
    //   2 ── 7, 8
    //   3 ── 4 ── 10
    //        9
    fn records() -> Vec<FlatNode> {
        vec![
            FlatNode::new(1, 0, 1, 1),
            FlatNode::new(2, 0, 2, 1),
            FlatNode::new(3, 0, 3, 1),
            FlatNode::new(4, 3, 1, 2),
            FlatNode::new(5, 1, 1, 2),
            FlatNode::new(6, 1, 2, 2),
            FlatNode::new(7, 2, 1, 2),
            FlatNode::new(8, 2, 2, 2),
            FlatNode::new(9, 3, 2, 2),
            FlatNode::new(10, 4, 1, 3),
        ]
    }

    fn trail(tree: &Hierarchy, id: NodeId) -> Vec<usize> {
        tree.get(id).unwrap().lower_siblings_count.to_vec()
    }

    #[test]
    fn builds_children_sorted_by_order() {
        let tree = Hierarchy::build(&records());

        assert_eq!(tree.root_id(), ROOT_ID);
        assert_eq!(tree.children(ROOT_ID), &[1, 2, 3]);
        assert_eq!(tree.children(3), &[4, 9]);
        assert_eq!(tree.children(4), &[10]);
        assert!(tree.children(10).is_empty());
        assert_eq!(tree.len(), 10);

        let leaf = tree.get(10).unwrap();
        assert!(!leaf.has_children);
        assert!(leaf.is_expanded);
        assert!(tree.get(3).unwrap().has_children);
    }

    #[test]
    fn computes_lower_siblings_trails() {
        let tree = Hierarchy::build(&records());

        assert!(trail(&tree, ROOT_ID).is_empty());
        assert_eq!(trail(&tree, 1), vec![2]);
        assert_eq!(trail(&tree, 3), vec![0]);
        assert_eq!(trail(&tree, 5), vec![2, 1]);
        assert_eq!(trail(&tree, 4), vec![0, 1]);
        assert_eq!(trail(&tree, 10), vec![0, 1, 0]);
        assert!(tree.get(10).unwrap().is_last_sibling());
        assert!(!tree.get(4).unwrap().is_last_sibling());
    }

    #[test]
    fn single_child_trail() {
        let tree = Hierarchy::build(&[
            FlatNode::new(1, 0, 1, 1),
            FlatNode::new(2, 0, 2, 1),
            FlatNode::new(3, 1, 1, 2),
        ]);
        assert_eq!(trail(&tree, 1), vec![1]);
        assert_eq!(trail(&tree, 2), vec![0]);
        assert_eq!(trail(&tree, 3), vec![1, 0]);
    }

    #[test]
    fn ties_keep_list_position() {
        let tree = Hierarchy::build(&[
            FlatNode::new(7, 0, 1, 1),
            FlatNode::new(3, 0, 1, 1),
        ]);
        assert_eq!(tree.children(ROOT_ID), &[7, 3]);
    }

    #[test]
    fn empty_input_yields_bare_root() {
        let tree = Hierarchy::build(&[]);
        assert!(tree.is_empty());
        assert!(!tree.get(ROOT_ID).unwrap().has_children);
    }

    #[test]
    fn orphans_and_cycles_stay_unreachable() {
        let tree = Hierarchy::build(&[
            FlatNode::new(1, 0, 1, 1),
            FlatNode::new(2, 42, 1, 2),
            FlatNode::new(3, 4, 1, 2),
            FlatNode::new(4, 3, 1, 2),
        ]);
        assert_eq!(tree.children(ROOT_ID), &[1]);
        assert!(tree.contains(2));
        assert_eq!(tree.depth_of(2), None);
        assert_eq!(tree.children(3), &[4]);
        assert_eq!(tree.depth_of(4), None);
    }

    #[test]
    fn locate_and_id_at_agree() {
        let tree = Hierarchy::build(&records());
        assert_eq!(tree.locate(9), Some(Locator::new(3, 1)));
        assert_eq!(tree.locate(2), Some(Locator::new(ROOT_ID, 1)));
        assert_eq!(tree.id_at(Locator::new(3, 1)), Some(9));
        assert_eq!(tree.id_at(Locator::new(3, 2)), None);
        assert_eq!(tree.locate(99), None);
        assert_eq!(tree.depth_of(10), Some(3));
        assert_eq!(tree.parent_of(10), Some(4));
    }

    #[test]
    fn toggles_only_the_flag() {
        let mut tree = Hierarchy::build(&records());
        assert_eq!(tree.toggle(3), Some(false));
        assert!(!tree.is_expanded(3));
        assert_eq!(tree.children(3), &[4, 9]);
        assert_eq!(tree.toggle(99), None);
        assert!(!tree.set_expanded(ROOT_ID, false));
    }

    #[test]
    fn build_with_restores_collapsed_nodes() {
        let expansion: ExpansionState = [4].into_iter().collect();
        let tree = Hierarchy::build_with(&records(), &expansion);
        assert!(!tree.is_expanded(4));
        assert!(tree.is_expanded(3));
    }

    #[test]
    fn rebuild_is_deterministic() {
        let records = records();
        assert_eq!(Hierarchy::build(&records), Hierarchy::build(&records));
    }
}
