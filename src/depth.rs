//! Label-driven depth classification. Graph edges are not consulted.

use std::collections::{BTreeMap, HashMap};

use crate::graph::{CENTER_LABEL, MindMap, NodeId};
use crate::natural;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Center,
    /// Right of the center.
    Forward,
    /// Left of the center, labels starting with `-`.
    Reverse,
}

impl Branch {
    pub fn of_label(label: &str) -> Branch {
        if label == CENTER_LABEL {
            Branch::Center
        } else if label.starts_with('-') {
            Branch::Reverse
        } else {
            Branch::Forward
        }
    }
}

/// Depth of a label: 0 for the center, else its segment count.
pub fn level_of(label: &str) -> usize {
    if label == CENTER_LABEL {
        0
    } else {
        natural::level_of(label)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub center: Option<NodeId>,
    /// Forward nodes in creation order.
    pub forward: Vec<NodeId>,
    /// Reverse nodes in creation order.
    pub reverse: Vec<NodeId>,
    /// Highest level over all nodes.
    pub max_level: usize,
    depths: HashMap<NodeId, (usize, Branch)>,
}

impl Classification {
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.depths.get(&id).map(|(depth, _)| *depth)
    }

    pub fn branch(&self, id: NodeId) -> Option<Branch> {
        self.depths.get(&id).map(|(_, branch)| *branch)
    }

    /// Nodes of `branch` grouped by level, levels ascending. Levels with no
    /// nodes are absent.
    pub fn levels(&self, branch: Branch) -> BTreeMap<usize, Vec<NodeId>> {
        let ids: &[NodeId] = match branch {
            Branch::Forward => &self.forward,
            Branch::Reverse => &self.reverse,
            Branch::Center => return self.center.map(|id| BTreeMap::from([(0, vec![id])])).unwrap_or_default(),
        };
        let mut levels: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        for id in ids {
            if let Some(depth) = self.depth(*id) {
                levels.entry(depth).or_default().push(*id);
            }
        }
        levels
    }
}

/// Classifies every node by its label. A center without label `"0"` (the
/// connectivity fallback) is still treated as depth 0.
pub fn classify(map: &MindMap) -> Classification {
    let center = map.center();
    let mut classification = Classification {
        center,
        ..Classification::default()
    };

    for node in map.nodes() {
        let (depth, branch) = if Some(node.id) == center {
            (0, Branch::Center)
        } else {
            let branch = match Branch::of_label(&node.label) {
                // A stray second "0" counts as a level-1 forward node.
                Branch::Center => Branch::Forward,
                other => other,
            };
            (natural::level_of(&node.label), branch)
        };
        match branch {
            Branch::Forward => classification.forward.push(node.id),
            Branch::Reverse => classification.reverse.push(node.id),
            Branch::Center => {}
        }
        classification.max_level = classification.max_level.max(depth);
        classification.depths.insert(node.id, (depth, branch));
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(map: &mut MindMap, label: &str) -> NodeId {
        let id = map.add_node(label, 0.0, 0.0, &[]).unwrap();
        map.node_mut(id).unwrap().label = label.to_string();
        id
    }

    #[test]
    fn label_levels() {
        assert_eq!(level_of("0"), 0);
        assert_eq!(level_of("1"), 1);
        assert_eq!(level_of("2.1"), 2);
        assert_eq!(level_of("-3"), 1);
        assert_eq!(level_of("-2.4.1"), 3);
    }

    #[test]
    fn partitions_by_label_sign() {
        let mut map = MindMap::with_center("root");
        let center = map.labeled_center().unwrap();
        let one = labeled(&mut map, "1");
        let nested = labeled(&mut map, "1.2.3");
        let back = labeled(&mut map, "-1");
        let back_nested = labeled(&mut map, "-1.1");

        let classes = classify(&map);
        assert_eq!(classes.center, Some(center));
        assert_eq!(classes.forward, vec![one, nested]);
        assert_eq!(classes.reverse, vec![back, back_nested]);
        assert_eq!(classes.depth(center), Some(0));
        assert_eq!(classes.depth(nested), Some(3));
        assert_eq!(classes.branch(back_nested), Some(Branch::Reverse));
        assert_eq!(classes.max_level, 3);
    }

    #[test]
    fn levels_skip_missing_depths() {
        let mut map = MindMap::with_center("root");
        let one = labeled(&mut map, "1");
        let deep = labeled(&mut map, "1.1.1");
        let levels = classify(&map).levels(Branch::Forward);
        assert_eq!(levels.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(levels[&1], vec![one]);
        assert_eq!(levels[&3], vec![deep]);
    }

    #[test]
    fn fallback_center_is_depth_zero() {
        let mut map = MindMap::new();
        let root = map.add_node("root", 0.0, 0.0, &[]).unwrap();
        let classes = classify(&map);
        assert_eq!(classes.center, Some(root));
        assert_eq!(classes.depth(root), Some(0));
        assert!(classes.forward.is_empty());
    }
}
