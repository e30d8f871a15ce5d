use crate::graph::MindMap;

/// Translates the whole map so the center sits at the origin. Maps without
/// a center are left untouched. Running it twice changes nothing.
pub fn normalize(map: &mut MindMap) {
    let Some((cx, cy)) = map.center().and_then(|id| map.node(id)).map(|node| (node.x, node.y)) else {
        return;
    };
    if cx == 0.0 && cy == 0.0 {
        return;
    }
    for node in map.nodes_mut() {
        node.x -= cx;
        node.y -= cy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_moves_to_origin_and_offsets_are_kept() {
        let mut map = MindMap::with_center("root");
        let center = map.labeled_center().unwrap();
        map.node_mut(center).unwrap().x = 200.0;
        map.node_mut(center).unwrap().y = 200.0;
        let other = map.add_node("other", 650.0, 135.0, &[center]).unwrap();

        normalize(&mut map);
        let center = map.node(center).unwrap();
        assert_eq!((center.x, center.y), (0.0, 0.0));
        let other = map.node(other).unwrap();
        assert_eq!((other.x, other.y), (450.0, -65.0));
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        let mut map = MindMap::with_center("root");
        let center = map.labeled_center().unwrap();
        map.node_mut(center).unwrap().x = -31.5;
        let other = map.add_node("other", 10.0, 10.0, &[center]).unwrap();

        normalize(&mut map);
        let once = (map.node(other).unwrap().x, map.node(other).unwrap().y);
        normalize(&mut map);
        let twice = (map.node(other).unwrap().x, map.node(other).unwrap().y);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_map_is_ignored() {
        let mut map = MindMap::new();
        normalize(&mut map);
        assert!(map.is_empty());
    }
}
