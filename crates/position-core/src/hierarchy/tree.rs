//! Tree Builder
//!
//! Turns a flat list of positions into nested display nodes.

use std::cmp::Ordering;
use std::collections::HashMap;

use feruca::Collator;
use log::{debug, warn};
use serde::Serialize;

use crate::domain::Position;

/// Display node derived from a position snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode<'a> {
    /// Position name
    pub title: &'a str,
    /// Position id as text
    pub key: String,
    /// Sorted children; None for leaves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode<'a>>>,
    pub is_leaf: bool,
    /// Always true: the tree renders fully expanded
    pub expanded: bool,
    /// Source position (lookup only)
    pub origin: &'a Position,
}

impl<'a> TreeNode<'a> {
    fn new(origin: &'a Position, children: Vec<TreeNode<'a>>) -> Self {
        let is_leaf = children.is_empty();
        Self {
            title: &origin.name,
            key: origin.id.to_string(),
            children: if is_leaf { None } else { Some(children) },
            is_leaf,
            expanded: true,
            origin,
        }
    }

    pub fn id(&self) -> u32 {
        self.origin.id
    }

    /// Children as a slice, empty for leaves
    pub fn children(&self) -> &[TreeNode<'a>] {
        self.children.as_deref().unwrap_or(&[])
    }
}

// Unlinks children iteratively so a very deep chain does not recurse on drop.
impl Drop for TreeNode<'_> {
    fn drop(&mut self) {
        let mut pending = self.children.take().unwrap_or_default();
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children.take() {
                pending.extend(children);
            }
        }
    }
}

/// Total number of nodes in a forest
pub fn count_nodes(nodes: &[TreeNode<'_>]) -> usize {
    let mut stack: Vec<&TreeNode<'_>> = nodes.iter().collect();
    let mut count = 0;
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children().iter());
    }
    count
}

/// Locale-aware name order: Unicode collation with the root locale.
///
/// Base letters decide first, then accents, then case (lowercase first), so
/// "éclair" sorts before "Eve" and "alice" before "Alice".
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

fn sibling_order(collator: &mut Collator, positions: &[Position], a: usize, b: usize) -> Ordering {
    collator
        .collate(positions[a].name.as_str(), positions[b].name.as_str())
        .then_with(|| positions[a].id.cmp(&positions[b].id))
        .then_with(|| a.cmp(&b))
}

fn mark_subtree(root: usize, children: &[Vec<usize>], placed: &mut [bool]) {
    let mut stack = vec![root];
    while let Some(slot) = stack.pop() {
        if std::mem::replace(&mut placed[slot], true) {
            continue;
        }
        stack.extend(children[slot].iter().copied());
    }
}

/// Build the display forest for `positions`.
///
/// Every position appears exactly once. Positions whose parent is missing
/// become roots, and each parentId cycle is cut at one node which is then
/// promoted to a root. Roots and children are sorted with [`locale_cmp`],
/// ties broken by id.
pub fn build_tree(positions: &[Position]) -> Vec<TreeNode<'_>> {
    let n = positions.len();

    let mut index: HashMap<u32, usize> = HashMap::with_capacity(n);
    for (slot, position) in positions.iter().enumerate() {
        index.entry(position.id).or_insert(slot);
    }

    let parent_of: Vec<Option<usize>> = positions
        .iter()
        .map(|p| p.parent_id.and_then(|pid| index.get(&pid).copied()))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots = Vec::new();
    for (slot, parent) in parent_of.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(slot),
            None => roots.push(slot),
        }
    }

    let mut placed = vec![false; n];
    for &root in &roots {
        mark_subtree(root, &children, &mut placed);
    }

    // Anything still unplaced sits on or below a parentId cycle
    let mut walk_stamp = vec![usize::MAX; n];
    for start in 0..n {
        if placed[start] {
            continue;
        }
        let mut cursor = start;
        while walk_stamp[cursor] != start {
            walk_stamp[cursor] = start;
            match parent_of[cursor] {
                Some(parent) => cursor = parent,
                None => break,
            }
        }
        if let Some(parent) = parent_of[cursor] {
            children[parent].retain(|&child| child != cursor);
        }
        warn!(
            "position {} is part of a parentId cycle, showing it as a root",
            positions[cursor].id
        );
        roots.push(cursor);
        mark_subtree(cursor, &children, &mut placed);
    }

    let mut collator = Collator::default();
    roots.sort_by(|&a, &b| sibling_order(&mut collator, positions, a, b));
    for list in children.iter_mut() {
        list.sort_by(|&a, &b| sibling_order(&mut collator, positions, a, b));
    }

    let mut preorder = Vec::with_capacity(n);
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(slot) = stack.pop() {
        preorder.push(slot);
        stack.extend(children[slot].iter().rev().copied());
    }

    // Reverse pre-order visits every child before its parent
    let mut built: Vec<Option<TreeNode<'_>>> = (0..n).map(|_| None).collect();
    for &slot in preorder.iter().rev() {
        let kids: Vec<TreeNode<'_>> = children[slot]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[slot] = Some(TreeNode::new(&positions[slot], kids));
    }

    debug!("built tree: {} positions, {} roots", n, roots.len());
    roots.iter().filter_map(|&root| built[root].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(id: u32, name: &str, parent_id: Option<u32>) -> Position {
        Position::new(id, name).with_parent(parent_id)
    }

    /// (id, depth) pairs in display order
    fn shape(nodes: &[TreeNode<'_>]) -> Vec<(u32, usize)> {
        fn walk(nodes: &[TreeNode<'_>], depth: usize, out: &mut Vec<(u32, usize)>) {
            for node in nodes {
                out.push((node.id(), depth));
                walk(node.children(), depth + 1, out);
            }
        }
        let mut out = Vec::new();
        walk(nodes, 0, &mut out);
        out
    }

    fn titles<'a>(nodes: &'a [TreeNode<'a>]) -> Vec<&'a str> {
        nodes.iter().map(|n| n.title).collect()
    }

    fn org_chart() -> Vec<Position> {
        vec![
            pos(1, "CEO", None),
            pos(2, "CTO", Some(1)),
            pos(3, "Engineer", Some(2)),
            pos(4, "CFO", Some(1)),
            pos(5, "Board", None),
        ]
    }

    #[test]
    fn test_forest_counts() {
        let positions = org_chart();
        let tree = build_tree(&positions);

        let root_count = positions.iter().filter(|p| p.parent_id.is_none()).count();
        assert_eq!(tree.len(), root_count);
        assert_eq!(count_nodes(&tree), positions.len());
    }

    #[test]
    fn test_structure_and_order() {
        let positions = org_chart();
        let tree = build_tree(&positions);

        // Board < CEO; under CEO: CFO < CTO
        assert_eq!(shape(&tree), vec![(5, 0), (1, 0), (4, 1), (2, 1), (3, 2)]);
    }

    #[test]
    fn test_leaf_flags() {
        let positions = org_chart();
        let tree = build_tree(&positions);

        let board = &tree[0];
        assert!(board.is_leaf);
        assert!(board.children.is_none());

        let ceo = &tree[1];
        assert!(!ceo.is_leaf);
        assert_eq!(ceo.children().len(), 2);
        assert_eq!(ceo.key, "1");
        assert!(std::ptr::eq(ceo.origin, &positions[0]));
    }

    #[test]
    fn test_locale_aware_sibling_order() {
        let positions = vec![pos(1, "Bob", None), pos(2, "alice", None)];
        let tree = build_tree(&positions);
        assert_eq!(titles(&tree), vec!["alice", "Bob"]);

        let positions = vec![
            pos(1, "Bob", None),
            pos(2, "bob", None),
            pos(3, "Alice", None),
            pos(4, "alice", None),
        ];
        let tree = build_tree(&positions);
        assert_eq!(titles(&tree), vec!["alice", "Alice", "bob", "Bob"]);
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("alice", "Bob"), Ordering::Less);
        assert_eq!(locale_cmp("Zed", "adam"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
        assert_eq!(locale_cmp("Dev", "Developer"), Ordering::Less);
        assert_eq!(locale_cmp("éclair", "Eve"), Ordering::Less);
        assert_eq!(locale_cmp("Émile", "zebra"), Ordering::Less);
        assert_eq!(locale_cmp("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_cmp("Resume", "résumé"), Ordering::Less);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let positions = vec![
            pos(1, "zebra", None),
            pos(2, "éclair", None),
            pos(3, "Eve", None),
            pos(4, "Émile", None),
        ];
        let tree = build_tree(&positions);
        assert_eq!(titles(&tree), vec!["éclair", "Émile", "Eve", "zebra"]);
    }

    #[test]
    fn test_duplicate_names_ordered_by_id() {
        let positions = vec![pos(9, "Analyst", None), pos(3, "Analyst", None)];
        let tree = build_tree(&positions);
        assert_eq!(tree[0].id(), 3);
        assert_eq!(tree[1].id(), 9);
    }

    #[test]
    fn test_orphan_becomes_root() {
        let positions = vec![pos(1, "CEO", None), pos(2, "Lost", Some(42))];
        let tree = build_tree(&positions);

        assert_eq!(tree.len(), 2);
        assert!(tree.iter().any(|n| n.id() == 2));
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let positions = org_chart();
        let mut reversed = positions.clone();
        reversed.reverse();

        assert_eq!(shape(&build_tree(&positions)), shape(&build_tree(&reversed)));
    }

    #[test]
    fn test_self_reference_becomes_root() {
        let positions = vec![pos(1, "Loop", Some(1)), pos(2, "Child", Some(1))];
        let tree = build_tree(&positions);

        assert_eq!(shape(&tree), vec![(1, 0), (2, 1)]);
    }

    #[test]
    fn test_cycle_is_cut_once() {
        let positions = vec![
            pos(1, "A", Some(2)),
            pos(2, "B", Some(1)),
            pos(3, "C", Some(2)),
            pos(4, "Root", None),
        ];
        let tree = build_tree(&positions);

        assert_eq!(count_nodes(&tree), positions.len());
        // A is where the walk from the first unplaced node repeats
        assert_eq!(shape(&tree), vec![(1, 0), (2, 1), (3, 2), (4, 0)]);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 20_000;
        let positions: Vec<Position> = (1..=depth)
            .map(|id| pos(id, &format!("P{}", id), if id == 1 { None } else { Some(id - 1) }))
            .collect();
        let tree = build_tree(&positions);

        assert_eq!(tree.len(), 1);
        assert_eq!(count_nodes(&tree), depth as usize);

        let mut cursor = &tree[0];
        let mut levels = 1;
        while let Some(next) = cursor.children().first() {
            cursor = next;
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert!(cursor.is_leaf);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let positions = vec![pos(1, "CEO", None), pos(2, "CTO", Some(1))];
        let tree = build_tree(&positions);
        let value = serde_json::to_value(&tree).unwrap();

        assert_eq!(value[0]["title"], "CEO");
        assert_eq!(value[0]["key"], "1");
        assert_eq!(value[0]["isLeaf"], false);
        assert_eq!(value[0]["children"][0]["isLeaf"], true);
        assert!(value[0]["children"][0].get("children").is_none());
        assert_eq!(value[0]["children"][0]["origin"]["parentId"], 1);
    }
}
