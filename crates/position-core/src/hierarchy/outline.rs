//! Outline
//!
//! Flattened views of the tree: indented rows for rendering, and the
//! options of the parent picker.

use serde::Serialize;

use super::tree::{build_tree, TreeNode};
use crate::domain::Position;

/// Label of the "no parent" choice
pub const ROOT_OPTION_LABEL: &str = "(No parent / Root)";

/// One rendered row of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineRow<'a> {
    pub position: &'a Position,
    pub depth: usize,
    pub is_leaf: bool,
}

/// One entry of the parent picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentOption {
    /// None = make the position a root
    pub id: Option<u32>,
    pub label: String,
}

/// Rows in display order (pre-order, siblings already sorted)
pub fn flatten<'a>(tree: &[TreeNode<'a>]) -> Vec<OutlineRow<'a>> {
    let mut result = Vec::new();
    let mut stack: Vec<(&TreeNode<'a>, usize)> = tree.iter().rev().map(|node| (node, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        result.push(OutlineRow {
            position: node.origin,
            depth,
            is_leaf: node.is_leaf,
        });
        stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
    }

    result
}

/// Root choice followed by every position in tree order, indented with dashes.
///
/// Follows [`build_tree`], so positions with a missing parent and positions
/// promoted out of a parentId cycle are offered as top-level choices too.
pub fn parent_options(positions: &[Position]) -> Vec<ParentOption> {
    let tree = build_tree(positions);
    let mut options = vec![ParentOption {
        id: None,
        label: ROOT_OPTION_LABEL.to_string(),
    }];

    options.extend(flatten(&tree).into_iter().map(|row| ParentOption {
        id: Some(row.position.id),
        label: format!("{} {}", "—".repeat(row.depth), row.position.name)
            .trim()
            .to_string(),
    }));

    options
}
