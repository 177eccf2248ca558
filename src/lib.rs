//! Ordered hierarchy over a flat record list, with drag-and-drop move normalization.
//!
//! The canonical data is a `Vec<FlatNode>` (id, parent id, 1-based sibling order,
//! depth level). [`Hierarchy::build`] derives a renderable tree from it, and
//! [`move_node`] turns a finished drag gesture into a new record list whose
//! sibling orders stay dense (`1..=k` in every group). [`TreeSession`] bundles
//! both for a presentation layer and keeps expand flags across rebuilds.
//!
//! Feature flags:
//! - `serde`: serde support for records, locators, hierarchies and snapshots.

mod action;
mod config;
mod error;
mod expansion;
mod glyphs;
mod hierarchy;
mod locator;
mod model;
mod normalize;
pub mod prelude;
mod record;
mod rows;
mod session;

pub use action::{TreeAction, TreeEvent};
pub use config::TreeSessionConfig;
pub use error::{MoveError, OrderError};
pub use expansion::ExpansionState;
pub use glyphs::{TreeGlyphs, TreeLineStyle, connector_glyphs, expander_glyph, tree_label_line};
pub use hierarchy::{Hierarchy, HierarchyNode, SiblingTrail};
pub use locator::Locator;
pub use model::TreeModel;
pub use normalize::{is_same_or_descendant, move_node};
pub use record::{
    FlatNode, NodeId, ROOT_ID, check_dense_order, default_label, relevel, sibling_group,
};
pub use rows::{VisibleRow, visible_rows};
pub use session::{TreeSession, TreeSessionSnapshot};
