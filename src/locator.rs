#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::record::{FlatNode, NodeId, ROOT_ID, sibling_group};

/// Position within a sibling group: `index` is `order - 1` of the node there.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Locator {
    pub parent_id: NodeId,
    pub index: usize,
}

impl Locator {
    pub const fn new(parent_id: NodeId, index: usize) -> Self {
        Self { parent_id, index }
    }

    /// Position among the top-level records.
    pub const fn top_level(index: usize) -> Self {
        Self::new(ROOT_ID, index)
    }

    /// Resolves the record at this position in `records`.
    pub fn resolve(self, records: &[FlatNode]) -> Option<&FlatNode> {
        sibling_group(records, self.parent_id)
            .get(self.index)
            .copied()
    }
}

impl From<(NodeId, usize)> for Locator {
    fn from((parent_id, index): (NodeId, usize)) -> Self {
        Self::new(parent_id, index)
    }
}
