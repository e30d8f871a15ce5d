//! Hierarchical node numbers ("labels").
//!
//! Forward children of the center are numbered `1, 2, 3, ...`, reverse
//! parents `-1, -2, -3, ...`; deeper nodes append a dot segment to the label
//! of the node they hang off (`2.1`, `-2.1`).

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::graph::{CENTER_LABEL, MindMap, NodeId};

static LEADING_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// A new child (right-hand branch).
    Forward,
    /// A new parent (left-hand branch).
    Reverse,
}

/// Leading integer of a label fragment (`"3.1"` is 3, `"2a"` is 2).
/// Fragments without one count as 0.
pub fn parse_number(text: &str) -> i64 {
    LEADING_INT_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .unwrap_or(0)
}

/// Label for a new node attached to `anchor` in `direction`.
pub fn generate_label(map: &MindMap, anchor: NodeId, direction: Direction) -> String {
    let Some(node) = map.node(anchor) else {
        return String::new();
    };
    let siblings = match direction {
        Direction::Forward => node.children(),
        Direction::Reverse => node.parents(),
    };
    let sibling_labels = siblings.iter().map(|id| map.label(*id));

    if node.label == CENTER_LABEL {
        let numbers = sibling_labels.map(parse_number);
        return match direction {
            Direction::Forward => format!("{}", numbers.max().unwrap_or(0) + 1),
            Direction::Reverse => format!("{}", numbers.min().unwrap_or(0) - 1),
        };
    }

    let prefix = format!("{}.", node.label);
    let max = sibling_labels
        .map(|label| parse_number(label.strip_prefix(prefix.as_str()).unwrap_or(label)))
        .max()
        .unwrap_or(0);
    format!("{}{}", prefix, max + 1)
}

/// Ensures the center carries `"0"` and numbers every unlabeled node,
/// children in ascending `y` order.
///
/// Nodes the two walks from the center cannot reach (detached subtrees,
/// extra children of reverse nodes) become new top-level forward nodes in
/// creation order, and their unlabeled descendants are numbered under them.
pub fn assign_missing_labels(map: &mut MindMap) -> Option<NodeId> {
    let center = map.center()?;
    if let Some(node) = map.node_mut(center) {
        node.label = CENTER_LABEL.to_string();
    }
    let mut visited = HashSet::new();
    label_branch(map, center, center, Direction::Forward, &mut visited, &|label: &str| {
        needs_label(label, Direction::Forward)
    });
    let mut reverse_visited = HashSet::new();
    label_branch(map, center, center, Direction::Reverse, &mut reverse_visited, &|label: &str| {
        needs_label(label, Direction::Reverse)
    });
    visited.extend(reverse_visited);

    let ids: Vec<NodeId> = map.ids().collect();
    for id in ids {
        if visited.contains(&id) {
            continue;
        }
        // Reached later through the walk from an unvisited ancestor.
        let has_unvisited_parent = map
            .node(id)
            .is_some_and(|node| node.parents().iter().any(|parent| !visited.contains(parent)));
        if has_unvisited_parent {
            continue;
        }
        if map.label(id).is_empty() {
            let label = next_top_level_label(map);
            tracing::debug!(node = %id, %label, "numbered detached node");
            if let Some(node) = map.node_mut(id) {
                node.label = label;
            }
        }
        label_branch(map, id, center, Direction::Forward, &mut visited, &str::is_empty);
    }
    Some(center)
}

/// One past the highest top-level forward number anywhere in the map.
fn next_top_level_label(map: &MindMap) -> String {
    let max = map
        .nodes()
        .filter(|node| !node.is_center() && !node.is_reverse() && !node.label.contains('.'))
        .map(|node| parse_number(&node.label))
        .max()
        .unwrap_or(0)
        .max(0);
    format!("{}", max + 1)
}

fn label_branch(
    map: &mut MindMap,
    start: NodeId,
    center: NodeId,
    direction: Direction,
    visited: &mut HashSet<NodeId>,
    needs: &dyn Fn(&str) -> bool,
) {
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        let mut next = match (map.node(current), direction) {
            (Some(node), Direction::Forward) => node.children().to_vec(),
            (Some(node), Direction::Reverse) => node.parents().to_vec(),
            (None, _) => continue,
        };
        next.sort_by(|a, b| {
            let ay = map.node(*a).map(|n| n.y).unwrap_or(0.0);
            let by = map.node(*b).map(|n| n.y).unwrap_or(0.0);
            ay.total_cmp(&by)
        });
        for id in &next {
            if *id != center && needs(map.label(*id)) {
                let label = generate_label(map, current, direction);
                tracing::debug!(node = %id, %label, "assigned node number");
                if let Some(node) = map.node_mut(*id) {
                    node.label = label;
                }
            }
        }
        // Reverse so the topmost sibling is expanded first.
        stack.extend(next.into_iter().rev());
    }
}

fn needs_label(label: &str, direction: Direction) -> bool {
    if label.is_empty() || label == CENTER_LABEL {
        return true;
    }
    match direction {
        Direction::Forward => label.starts_with('-'),
        Direction::Reverse => !label.starts_with('-'),
    }
}
