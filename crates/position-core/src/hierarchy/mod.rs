//! Hierarchy Utilities
//!
//! Pure functions over a snapshot of positions:
//! - tree: nested display nodes with sibling ordering
//! - descendants: transitive children of a position
//! - outline: flattened rows and parent picker options

mod tree;
mod descendants;
mod outline;

pub use tree::{build_tree, count_nodes, locale_cmp, TreeNode};
pub use descendants::descendant_ids;
pub use outline::{flatten, parent_options, OutlineRow, ParentOption, ROOT_OPTION_LABEL};
