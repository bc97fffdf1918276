//! Descendant Resolver

use std::collections::{HashMap, HashSet};

use crate::domain::Position;

/// Ids of every position below `id`, excluding `id` itself. Order is unspecified.
///
/// Each id is visited once, so a parentId cycle terminates instead of looping.
pub fn descendant_ids(positions: &[Position], id: u32) -> Vec<u32> {
    let mut children_map: HashMap<u32, Vec<u32>> = HashMap::new();
    for position in positions {
        if let Some(parent_id) = position.parent_id {
            children_map.entry(parent_id).or_default().push(position.id);
        }
    }

    let mut visited = HashSet::from([id]);
    let mut result = Vec::new();
    let mut to_visit = vec![id];

    while let Some(current_id) = to_visit.pop() {
        let Some(children) = children_map.get(&current_id) else {
            continue;
        };
        for &child in children {
            if visited.insert(child) {
                result.push(child);
                to_visit.push(child);
            }
        }
    }

    result
}
