//! Move/reorder normalization over the flat record list.

use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::error::MoveError;
use crate::locator::Locator;
use crate::record::{FlatNode, NodeId, ROOT_ID, sibling_group};

/// Moves the record at `source` to `destination` and renumbers affected groups.
///
/// A `None` destination is a cancelled drop and returns the records unchanged.
/// `destination.index` is the final position of the moved record among its new
/// siblings; indices past the end of the group append. Only the old and the new
/// sibling groups are renumbered, every other record is returned as-is and the
/// list keeps its original record positions.
///
/// # Errors
///
/// - [`MoveError::SourceNotFound`] if no sibling sits at `source`.
/// - [`MoveError::UnknownParent`] if the destination parent does not exist.
/// - [`MoveError::WouldCreateCycle`] if the destination parent is the moved
///   record or one of its descendants.
pub fn move_node(
    records: &[FlatNode],
    source: Locator,
    destination: Option<Locator>,
) -> Result<Vec<FlatNode>, MoveError> {
    let Some(destination) = destination else {
        tracing::trace!(?source, "move cancelled");
        return Ok(records.to_vec());
    };

    let moved = *source
        .resolve(records)
        .ok_or(MoveError::SourceNotFound {
            parent_id: source.parent_id,
            index: source.index,
        })?;
    check_destination(records, moved.id, destination.parent_id)?;

    let mut updated: FxHashMap<NodeId, FlatNode> =
        FxHashMap::with_capacity_and_hasher(records.len() / 2 + 1, FxBuildHasher);

    let target_group: Vec<&FlatNode> = sibling_group(records, destination.parent_id)
        .into_iter()
        .filter(|record| record.id != moved.id)
        .collect();
    let slot = destination.index.min(target_group.len());
    for (idx, record) in target_group.iter().enumerate() {
        // Position `slot` is reserved for the moved record.
        let position = if idx < slot { idx + 1 } else { idx + 2 };
        updated.insert(
            record.id,
            FlatNode {
                order: to_order(position),
                ..**record
            },
        );
    }
    tracing::trace!(
        parent_id = destination.parent_id,
        siblings = target_group.len(),
        "renumbered destination group"
    );

    if source.parent_id != destination.parent_id {
        let old_group = sibling_group(records, source.parent_id)
            .into_iter()
            .filter(|record| record.id != moved.id);
        let mut remaining = 0;
        for (idx, record) in old_group.enumerate() {
            updated.insert(
                record.id,
                FlatNode {
                    order: to_order(idx + 1),
                    ..*record
                },
            );
            remaining += 1;
        }
        tracing::trace!(
            parent_id = source.parent_id,
            siblings = remaining,
            "renumbered source group"
        );
    }

    updated.insert(
        moved.id,
        FlatNode {
            parent_id: destination.parent_id,
            order: to_order(slot + 1),
            ..moved
        },
    );

    tracing::debug!(
        id = moved.id,
        from_parent = source.parent_id,
        from_index = source.index,
        to_parent = destination.parent_id,
        to_index = slot,
        "moved node"
    );

    Ok(records
        .iter()
        .map(|record| updated.get(&record.id).copied().unwrap_or(*record))
        .collect())
}

/// Returns `true` if `candidate` is `ancestor` itself or sits below it.
///
/// Walks the parent chain of `candidate`; the walk is bounded by the number of
/// records so pre-existing cycles terminate.
pub fn is_same_or_descendant(records: &[FlatNode], ancestor: NodeId, candidate: NodeId) -> bool {
    let parents: FxHashMap<NodeId, NodeId> = records
        .iter()
        .map(|record| (record.id, record.parent_id))
        .collect();

    let mut current = candidate;
    for _ in 0..=records.len() {
        if current == ancestor {
            return true;
        }
        if current == ROOT_ID {
            return false;
        }
        match parents.get(&current) {
            Some(&parent) => current = parent,
            None => return false,
        }
    }
    false
}

fn check_destination(
    records: &[FlatNode],
    moved: NodeId,
    parent_id: NodeId,
) -> Result<(), MoveError> {
    if parent_id != ROOT_ID && !records.iter().any(|record| record.id == parent_id) {
        return Err(MoveError::UnknownParent(parent_id));
    }
    if is_same_or_descendant(records, moved, parent_id) {
        return Err(MoveError::WouldCreateCycle {
            node: moved,
            parent_id,
        });
    }
    Ok(())
}

#[inline]
fn to_order(position: usize) -> u32 {
    u32::try_from(position).unwrap_or(u32::MAX)
}
