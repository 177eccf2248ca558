use smallvec::SmallVec;

use crate::model::TreeModel;

/// A visible node row with metadata used for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleRow<Id> {
    pub id: Id,
    /// Depth below the root (top-level rows are level 1).
    pub level: u16,
    pub parent: Option<Id>,
    /// Position among the parent's children.
    pub index: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub lower_siblings_count: SmallVec<[usize; 8]>,
}

/// Flattens the expanded part of the tree in display order.
///
/// The root itself is not emitted; descendants of collapsed nodes are skipped.
pub fn visible_rows<T: TreeModel>(model: &T) -> Vec<VisibleRow<T::Id>> {
    let mut rows = Vec::with_capacity(model.size_hint());
    if let Some(root) = model.root() {
        push_children(model, root, 1, &mut rows);
    }
    rows
}

fn push_children<T: TreeModel>(
    model: &T,
    parent: T::Id,
    level: u16,
    rows: &mut Vec<VisibleRow<T::Id>>,
) {
    for (index, child) in model.children(parent).iter().copied().enumerate() {
        let has_children = !model.children(child).is_empty();
        let is_expanded = has_children && model.is_expanded(child);
        rows.push(VisibleRow {
            id: child,
            level,
            parent: Some(parent),
            index,
            has_children,
            is_expanded,
            lower_siblings_count: SmallVec::from_slice(model.lower_siblings(child)),
        });
        if is_expanded {
            push_children(model, child, level.saturating_add(1), rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Hierarchy;
    use crate::record::{FlatNode, ROOT_ID};

    fn tree() -> Hierarchy {
        Hierarchy::build(&[
            FlatNode::new(1, 0, 1, 1),
            FlatNode::new(2, 0, 2, 1),
            FlatNode::new(3, 1, 1, 2),
            FlatNode::new(4, 1, 2, 2),
            FlatNode::new(5, 3, 1, 3),
        ])
    }

    #[test]
    fn flattens_in_display_order() {
        let rows = visible_rows(&tree());

        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        let levels: Vec<_> = rows.iter().map(|r| r.level).collect();
        assert_eq!(ids, vec![1, 3, 5, 4, 2]);
        assert_eq!(levels, vec![1, 2, 3, 2, 1]);
        assert_eq!(rows[0].parent, Some(ROOT_ID));
        assert_eq!(rows[3].index, 1);
        assert_eq!(rows[2].lower_siblings_count.as_slice(), &[1, 1, 0]);
    }

    #[test]
    fn skips_collapsed_subtrees() {
        let mut tree = tree();
        tree.set_expanded(1, false);

        let rows = visible_rows(&tree);
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(rows[0].has_children);
        assert!(!rows[0].is_expanded);
    }
}
