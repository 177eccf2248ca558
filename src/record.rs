use rustc_hash::{FxBuildHasher, FxHashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::OrderError;

/// Node identifier. Real records use positive ids; `0` is reserved for [`ROOT_ID`].
pub type NodeId = u64;

/// Sentinel parent id for top-level records and the id of the synthetic root.
pub const ROOT_ID: NodeId = 0;

/// Source-of-truth record of the hierarchy.
///
/// Records sharing one `parent_id` form a sibling group whose `order` values are
/// expected to be exactly `1..=k`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlatNode {
    /// Unique positive identifier.
    pub id: NodeId,
    /// Parent identifier, or [`ROOT_ID`] for top-level records.
    pub parent_id: NodeId,
    /// 1-based position among siblings.
    pub order: u32,
    /// Informational depth (top-level = 1). Never read by the algorithms.
    pub level: u32,
}

impl FlatNode {
    /// Creates a record.
    pub const fn new(id: NodeId, parent_id: NodeId, order: u32, level: u32) -> Self {
        Self {
            id,
            parent_id,
            order,
            level,
        }
    }

    /// Returns `true` if the record hangs directly under the synthetic root.
    #[inline]
    pub const fn is_top_level(&self) -> bool {
        self.parent_id == ROOT_ID
    }
}

/// Returns the direct children of `parent_id` sorted by `order`.
///
/// Ties keep their original list position.
pub fn sibling_group(records: &[FlatNode], parent_id: NodeId) -> Vec<&FlatNode> {
    let mut group: Vec<&FlatNode> = records
        .iter()
        .filter(|record| record.parent_id == parent_id)
        .collect();
    group.sort_by_key(|record| record.order);
    group
}

/// Groups records by parent id, each group sorted by `order` (stable).
pub(crate) fn partition_by_parent(records: &[FlatNode]) -> FxHashMap<NodeId, Vec<NodeId>> {
    let mut groups: FxHashMap<NodeId, Vec<&FlatNode>> =
        FxHashMap::with_capacity_and_hasher(records.len() / 2 + 1, FxBuildHasher);
    for record in records {
        groups.entry(record.parent_id).or_default().push(record);
    }
    groups
        .into_iter()
        .map(|(parent_id, mut group)| {
            group.sort_by_key(|record| record.order);
            (parent_id, group.into_iter().map(|record| record.id).collect())
        })
        .collect()
}

/// Verifies that every sibling group carries a dense 1-based order sequence.
///
/// # Errors
///
/// Returns the first duplicate or gap found. Groups are checked in ascending
/// parent id order so the reported error is deterministic.
pub fn check_dense_order(records: &[FlatNode]) -> Result<(), OrderError> {
    let mut groups: FxHashMap<NodeId, Vec<u32>> = FxHashMap::default();
    for record in records {
        groups
            .entry(record.parent_id)
            .or_default()
            .push(record.order);
    }

    let mut groups: Vec<(NodeId, Vec<u32>)> = groups.into_iter().collect();
    groups.sort_unstable_by_key(|(parent_id, _)| *parent_id);
    for (parent_id, mut orders) in groups {
        orders.sort_unstable();
        if let Some(pair) = orders.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(OrderError::Duplicate {
                parent_id,
                order: pair[0],
            });
        }
        for (expected, &found) in (1u32..).zip(orders.iter()) {
            if found != expected {
                return Err(OrderError::Gap {
                    parent_id,
                    expected,
                    found,
                });
            }
        }
    }
    Ok(())
}

/// Recomputes the informational `level` of every record from the parent chain.
///
/// Top-level records get level 1. Records whose chain never reaches the root
/// (orphans or cycles) keep their stored level.
pub fn relevel(records: &[FlatNode]) -> Vec<FlatNode> {
    let parents: FxHashMap<NodeId, NodeId> = records
        .iter()
        .map(|record| (record.id, record.parent_id))
        .collect();

    records
        .iter()
        .map(|record| {
            let mut level = 1u32;
            let mut current = record.parent_id;
            let mut reached_root = true;
            while current != ROOT_ID {
                let Some(&next) = parents.get(&current) else {
                    reached_root = false;
                    break;
                };
                level += 1;
                if level as usize > records.len() {
                    reached_root = false;
                    break;
                }
                current = next;
            }
            if reached_root {
                FlatNode { level, ..*record }
            } else {
                *record
            }
        })
        .collect()
}

/// Default display label for a record.
pub fn default_label(id: NodeId) -> String {
    format!("Node {id}")
}
