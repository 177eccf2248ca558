#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::action::{TreeAction, TreeEvent};
use crate::config::TreeSessionConfig;
use crate::error::MoveError;
use crate::expansion::ExpansionState;
use crate::hierarchy::Hierarchy;
use crate::locator::Locator;
use crate::normalize::move_node;
use crate::record::{FlatNode, NodeId, relevel};
use crate::rows::{VisibleRow, visible_rows};

/// Editing session: canonical records, the derived hierarchy and expand flags.
///
/// Records are replaced wholesale on every move and the hierarchy is rebuilt
/// from them, so each edit applies to the output of the previous one.
#[derive(Clone, Debug)]
pub struct TreeSession {
    records: Vec<FlatNode>,
    hierarchy: Hierarchy,
    expansion: ExpansionState,
    config: TreeSessionConfig,
}

/// Snapshot of a session (records and collapsed ids).
///
/// With the `serde` feature enabled, this type derives `Serialize`/`Deserialize`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeSessionSnapshot {
    pub records: Vec<FlatNode>,
    pub collapsed: Vec<NodeId>,
}

impl TreeSession {
    /// Creates a session with the default configuration.
    pub fn new(records: Vec<FlatNode>) -> Self {
        Self::with_config(records, TreeSessionConfig::default())
    }

    pub fn with_config(records: Vec<FlatNode>, config: TreeSessionConfig) -> Self {
        let hierarchy = Hierarchy::build(&records);
        Self {
            expansion: ExpansionState::with_capacity(records.len()),
            records,
            hierarchy,
            config,
        }
    }

    #[inline]
    pub fn records(&self) -> &[FlatNode] {
        &self.records
    }

    #[inline]
    pub const fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    #[inline]
    pub const fn config(&self) -> TreeSessionConfig {
        self.config
    }

    /// Rows currently visible, in display order.
    pub fn visible_rows(&self) -> Vec<VisibleRow<NodeId>> {
        visible_rows(&self.hierarchy)
    }

    /// Locator of a node in the live hierarchy, suitable as a move source.
    pub fn locate(&self, id: NodeId) -> Option<Locator> {
        self.hierarchy.locate(id)
    }

    /// Applies a move and rebuilds the hierarchy.
    ///
    /// Returns the moved id, or `None` when the drop was cancelled.
    ///
    /// # Errors
    ///
    /// Propagates [`MoveError`]; the session is left unchanged in that case.
    pub fn apply_move(
        &mut self,
        source: Locator,
        destination: Option<Locator>,
    ) -> Result<Option<NodeId>, MoveError> {
        if destination.is_none() {
            return Ok(None);
        }
        let moved = self.hierarchy.id_at(source);
        let records = move_node(&self.records, source, destination)?;
        self.records = if self.config.relevel_on_move {
            relevel(&records)
        } else {
            records
        };
        self.rebuild();
        Ok(moved)
    }

    /// Replaces all records (an edit made outside the session) and rebuilds.
    pub fn replace_records(&mut self, records: Vec<FlatNode>) {
        self.records = records;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        if self.config.preserve_expansion {
            self.hierarchy = Hierarchy::build_with(&self.records, &self.expansion);
            self.expansion.prune(&self.hierarchy);
        } else {
            self.hierarchy = Hierarchy::build(&self.records);
            self.expansion.expand_all();
        }
    }

    /// Sets the expand flag of one node. Returns `false` for unknown ids.
    pub fn set_expanded(&mut self, id: NodeId, expand: bool) -> bool {
        if !self.hierarchy.set_expanded(id, expand) {
            return false;
        }
        self.expansion.set_expanded(id, expand);
        true
    }

    /// Handles an action and returns the resulting event.
    ///
    /// # Errors
    ///
    /// Only [`TreeAction::Move`] can fail, see [`Self::apply_move`].
    pub fn handle_action(&mut self, action: TreeAction) -> Result<TreeEvent, MoveError> {
        let event = match action {
            TreeAction::Move {
                source,
                destination,
            } => match self.apply_move(source, destination)? {
                Some(id) => TreeEvent::Moved { id },
                None => TreeEvent::Unhandled,
            },
            TreeAction::Expand(id) => handled(self.set_expanded(id, true)),
            TreeAction::Collapse(id) => handled(self.set_expanded(id, false)),
            TreeAction::Toggle(id) => match self.hierarchy.toggle(id) {
                Some(expanded) => {
                    self.expansion.set_expanded(id, expanded);
                    TreeEvent::Handled
                }
                None => TreeEvent::Unhandled,
            },
            TreeAction::ExpandAll => {
                self.expansion.expand_all();
                self.hierarchy = Hierarchy::build(&self.records);
                TreeEvent::Handled
            }
            TreeAction::CollapseAll => {
                self.expansion.collapse_all(&self.hierarchy);
                self.expansion.apply_to(&mut self.hierarchy);
                TreeEvent::Handled
            }
        };
        Ok(event)
    }

    /// Captures a snapshot for persistence or restore.
    pub fn snapshot(&self) -> TreeSessionSnapshot {
        TreeSessionSnapshot {
            records: self.records.clone(),
            collapsed: self.expansion.collapsed(),
        }
    }

    /// Restores records and expand flags from a snapshot.
    pub fn restore(&mut self, snapshot: TreeSessionSnapshot) {
        self.expansion = snapshot.collapsed.into_iter().collect();
        self.records = snapshot.records;
        self.hierarchy = Hierarchy::build_with(&self.records, &self.expansion);
        self.expansion.prune(&self.hierarchy);
    }
}

const fn handled(changed: bool) -> TreeEvent {
    if changed {
        TreeEvent::Handled
    } else {
        TreeEvent::Unhandled
    }
}
