use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::depth::{Branch, Classification};
use crate::graph::{MindMap, NodeId};

/// Column placement. Forward levels grow rightward from the center's right
/// edge, reverse levels leftward from its left edge, one `horizontal_gap`
/// between the facing edges of consecutive non-empty levels.
pub fn place_x(
    map: &MindMap,
    classification: &Classification,
    config: &LayoutConfig,
) -> HashMap<NodeId, f32> {
    let mut xs = HashMap::new();
    let Some(center) = classification.center.and_then(|id| map.node(id)) else {
        return xs;
    };
    let anchor = center.x;
    xs.insert(center.id, anchor);

    let width_of = |id: &NodeId| map.node(*id).map(|node| node.width).unwrap_or(0.0);

    let mut right_edge = anchor + center.width / 2.0;
    for ids in classification.levels(Branch::Forward).values() {
        let start = right_edge + config.horizontal_gap;
        let mut level_right = start;
        for id in ids {
            let width = width_of(id);
            xs.insert(*id, start + width / 2.0);
            level_right = level_right.max(start + width);
        }
        right_edge = level_right;
    }

    let mut left_edge = anchor - center.width / 2.0;
    for ids in classification.levels(Branch::Reverse).values() {
        let end = left_edge - config.horizontal_gap;
        let widest = ids.iter().map(width_of).fold(0.0f32, f32::max);
        for id in ids {
            xs.insert(*id, end - width_of(id) / 2.0);
        }
        left_edge = end - widest;
    }

    xs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::classify;

    fn labeled(map: &mut MindMap, label: &str, width: f32) -> NodeId {
        let id = map.add_node(label, 0.0, 0.0, &[]).unwrap();
        let node = map.node_mut(id).unwrap();
        node.label = label.to_string();
        node.width = width;
        id
    }

    #[test]
    fn forward_levels_start_after_the_widest_previous_level() {
        let mut map = MindMap::with_center("root");
        let center = map.labeled_center().unwrap();
        let one = labeled(&mut map, "1", 400.0);
        let two = labeled(&mut map, "2", 200.0);
        let nested = labeled(&mut map, "1.1", 100.0);

        let xs = place_x(&map, &classify(&map), &LayoutConfig::default());
        assert_eq!(xs[&center], 0.0);
        // Level 1 starts at 200 + 120.
        assert_eq!(xs[&one], 320.0 + 200.0);
        assert_eq!(xs[&two], 320.0 + 100.0);
        // Level 2 starts at 720 + 120.
        assert_eq!(xs[&nested], 840.0 + 50.0);
    }

    #[test]
    fn reverse_levels_are_right_aligned() {
        let mut map = MindMap::with_center("root");
        let wide = labeled(&mut map, "-1", 400.0);
        let narrow = labeled(&mut map, "-2", 100.0);
        let deeper = labeled(&mut map, "-1.1", 400.0);

        let xs = place_x(&map, &classify(&map), &LayoutConfig::default());
        // Level -1 ends at -200 - 120.
        assert_eq!(xs[&wide], -320.0 - 200.0);
        assert_eq!(xs[&narrow], -320.0 - 50.0);
        // Next level ends at -720 - 120.
        assert_eq!(xs[&deeper], -840.0 - 200.0);
    }

    #[test]
    fn missing_levels_do_not_leave_gaps() {
        let mut map = MindMap::with_center("root");
        let one = labeled(&mut map, "1", 400.0);
        let deep = labeled(&mut map, "1.1.1", 400.0);

        let xs = place_x(&map, &classify(&map), &LayoutConfig::default());
        let left_of_deep = xs[&deep] - 200.0;
        let right_of_one = xs[&one] + 200.0;
        assert_eq!(left_of_deep - right_of_one, 120.0);
    }

    #[test]
    fn center_keeps_its_current_x() {
        let mut map = MindMap::with_center("root");
        let center = map.labeled_center().unwrap();
        map.node_mut(center).unwrap().x = 75.0;
        let one = labeled(&mut map, "1", 400.0);
        let xs = place_x(&map, &classify(&map), &LayoutConfig::default());
        assert_eq!(xs[&center], 75.0);
        assert_eq!(xs[&one], 75.0 + 200.0 + 120.0 + 200.0);
    }
}
