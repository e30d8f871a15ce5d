use std::cmp::Reverse;
use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::depth::{Branch, Classification};
use crate::graph::{MindMap, Node, NodeId};
use crate::natural::{natural_cmp, virtual_key};

/// Middle value of `values`; the mean of the two middle values when the
/// count is even. `values` must already be in the desired order.
pub fn median(values: &[f32]) -> Option<f32> {
    let n = values.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(values[n / 2]),
        _ => Some((values[n / 2 - 1] + values[n / 2]) / 2.0),
    }
}

/// Row placement: leaves are stacked around the center's current `y`,
/// every other node sits on the median of its same-branch neighbors, and
/// the reverse branch is shifted so it lines up with the center.
pub fn place_y(
    map: &MindMap,
    classification: &Classification,
    config: &LayoutConfig,
) -> HashMap<NodeId, f32> {
    let mut ys = HashMap::new();
    let Some(center) = classification.center.and_then(|id| map.node(id)) else {
        return ys;
    };
    let baseline = center.y;

    for branch in [Branch::Forward, Branch::Reverse] {
        place_branch(map, classification, branch, baseline, config, &mut ys);
    }

    let forward_y = neighbor_median(map, classification, &ys, center, Branch::Forward);
    let reverse_y = neighbor_median(map, classification, &ys, center, Branch::Reverse);
    let center_y = forward_y.or(reverse_y).unwrap_or(baseline);
    ys.insert(center.id, center_y);

    if let Some(reverse_y) = reverse_y {
        let shift = center_y - reverse_y;
        tracing::debug!(shift, "aligning reverse branch with the center");
        for id in &classification.reverse {
            if let Some(y) = ys.get_mut(id) {
                *y += shift;
            }
        }
    }

    ys
}

fn neighbors(node: &Node, branch: Branch) -> &[NodeId] {
    match branch {
        Branch::Reverse => node.parents(),
        _ => node.children(),
    }
}

fn place_branch(
    map: &MindMap,
    classification: &Classification,
    branch: Branch,
    baseline: f32,
    config: &LayoutConfig,
    ys: &mut HashMap<NodeId, f32>,
) {
    let ids = match branch {
        Branch::Forward => &classification.forward,
        Branch::Reverse => &classification.reverse,
        Branch::Center => return,
    };
    let (leaves, mut interior): (Vec<NodeId>, Vec<NodeId>) = ids.iter().copied().partition(|id| {
        map.node(*id).is_none_or(|node| {
            !neighbors(node, branch)
                .iter()
                .any(|next| classification.branch(*next) == Some(branch))
        })
    });

    let mut keyed: Vec<(String, NodeId)> = leaves
        .into_iter()
        .map(|id| (virtual_key(map.label(id), classification.max_level), id))
        .collect();
    keyed.sort_by(|a, b| natural_cmp(&a.0, &b.0));

    let heights: Vec<f32> = keyed
        .iter()
        .map(|(_, id)| map.node(*id).map(|node| node.height).unwrap_or(0.0))
        .collect();
    if let Some(first) = heights.first() {
        let total = heights.iter().sum::<f32>() + config.vertical_gap * (heights.len() - 1) as f32;
        let mut current = baseline - total / 2.0 + first / 2.0;
        for (index, (_, id)) in keyed.iter().enumerate() {
            ys.insert(*id, current);
            if let Some(next) = heights.get(index + 1) {
                current += heights[index] / 2.0 + config.vertical_gap + next / 2.0;
            }
        }
    }

    interior.sort_by_key(|id| Reverse(classification.depth(*id).unwrap_or(0)));
    for id in interior {
        let Some(node) = map.node(id) else {
            continue;
        };
        if let Some(y) = neighbor_median(map, classification, ys, node, branch) {
            ys.insert(id, y);
        }
    }
}

/// Median `y` of `node`'s neighbors in `branch`, in natural label order.
/// Neighbors not placed yet contribute their current position.
fn neighbor_median(
    map: &MindMap,
    classification: &Classification,
    ys: &HashMap<NodeId, f32>,
    node: &Node,
    branch: Branch,
) -> Option<f32> {
    let mut placed: Vec<(&str, f32)> = neighbors(node, branch)
        .iter()
        .filter(|id| classification.branch(**id) == Some(branch))
        .filter_map(|id| {
            let neighbor = map.node(*id)?;
            let y = ys.get(id).copied().unwrap_or(neighbor.y);
            Some((neighbor.label.as_str(), y))
        })
        .collect();
    placed.sort_by(|a, b| natural_cmp(a.0, b.0));
    let values: Vec<f32> = placed.into_iter().map(|(_, y)| y).collect();
    median(&values)
}
