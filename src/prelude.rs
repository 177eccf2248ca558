pub use crate::{
    ExpansionState, FlatNode, Hierarchy, HierarchyNode, Locator, MoveError, NodeId, OrderError,
    ROOT_ID, TreeAction, TreeEvent, TreeGlyphs, TreeLineStyle, TreeModel, TreeSession,
    TreeSessionConfig, TreeSessionSnapshot, VisibleRow, check_dense_order, move_node,
    tree_label_line, visible_rows,
};
