use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::config::{NodeConfig, PlacementConfig};
use crate::error::{Error, Result};
use crate::numbering::{self, Direction};

/// Label carried by the center of the mind map.
pub const CENTER_LABEL: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeStyle {
    pub font_size: f32,
    pub font_family: String,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            font_family: "Arial".to_string(),
        }
    }
}

/// A mind-map node. `x`/`y` is the node's center in model space.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub style: NodeStyle,
    parents: Vec<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(id: NodeId, x: f32, y: f32, config: &NodeConfig) -> Self {
        Self {
            id,
            label: String::new(),
            text: String::new(),
            x,
            y,
            width: config.default_width,
            height: config.default_height,
            style: NodeStyle {
                font_size: config.font_size,
                font_family: config.font_family.clone(),
            },
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_center(&self) -> bool {
        self.label == CENTER_LABEL
    }

    pub fn is_reverse(&self) -> bool {
        self.label.starts_with('-')
    }

    pub fn rect(&self) -> BoundingBox {
        BoundingBox {
            min_x: self.x - self.width / 2.0,
            min_y: self.y - self.height / 2.0,
            max_x: self.x + self.width / 2.0,
            max_y: self.y + self.height / 2.0,
        }
    }
}

/// Arena of nodes keyed by monotonic ids; iteration follows creation order.
#[derive(Debug, Clone)]
pub struct MindMap {
    nodes: BTreeMap<NodeId, Node>,
    /// One past the highest id ever handed out; may exceed `u32::MAX`.
    next_id: u64,
    node_config: NodeConfig,
}

impl MindMap {
    pub fn new() -> Self {
        Self::with_node_config(NodeConfig::default())
    }

    pub fn with_node_config(node_config: NodeConfig) -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: 1,
            node_config,
        }
    }

    /// A fresh map holding only the center node at the origin.
    pub fn with_center(text: &str) -> Self {
        let mut map = Self::new();
        if let Ok(id) = map.allocate(0.0, 0.0)
            && let Some(node) = map.nodes.get_mut(&id)
        {
            node.label = CENTER_LABEL.to_string();
            node.text = text.to_string();
        }
        map
    }

    pub fn node_config(&self) -> &NodeConfig {
        &self.node_config
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn label(&self, id: NodeId) -> &str {
        self.nodes.get(&id).map(|node| node.label.as_str()).unwrap_or("")
    }

    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.parents.is_empty())
            .map(|node| node.id)
            .collect()
    }

    /// The node explicitly labeled `"0"`, if any.
    pub fn labeled_center(&self) -> Option<NodeId> {
        self.nodes.values().find(|node| node.is_center()).map(|node| node.id)
    }

    /// Center used by layout: the `"0"` node, else the first parentless node,
    /// else the first node. The last case only arises for cyclic links, which
    /// layout rejects.
    pub fn center(&self) -> Option<NodeId> {
        if let Some(id) = self.labeled_center() {
            return Some(id);
        }
        self.nodes
            .values()
            .find(|node| node.parents.is_empty())
            .or_else(|| self.nodes.values().next())
            .map(|node| node.id)
    }

    fn allocate(&mut self, x: f32, y: f32) -> Result<NodeId> {
        let raw = u32::try_from(self.next_id).map_err(|_| Error::IdsExhausted)?;
        let id = NodeId(raw);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, x, y, &self.node_config));
        Ok(id)
    }

    /// Creates an unlabeled node with the default size and links it under
    /// every given parent.
    pub fn add_node(&mut self, text: &str, x: f32, y: f32, parents: &[NodeId]) -> Result<NodeId> {
        if let Some(missing) = parents.iter().find(|id| !self.contains(**id)) {
            return Err(Error::UnknownNode(*missing));
        }
        let id = self.allocate(x, y)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.text = text.to_string();
        }
        for parent in parents {
            self.add_edge(*parent, id)?;
        }
        Ok(id)
    }

    /// Inserts a node under a caller-chosen id (document loading). The id
    /// counter is bumped past it so later ids stay unique.
    pub fn insert_with_id(&mut self, id: NodeId, x: f32, y: f32) -> &mut Node {
        self.next_id = self.next_id.max(u64::from(id.0) + 1);
        let config = self.node_config.clone();
        let node = self
            .nodes
            .entry(id)
            .or_insert_with(|| Node::new(id, x, y, &config));
        node.x = x;
        node.y = y;
        node
    }

    pub(crate) fn bump_next_id(&mut self, next_id: u64) {
        self.next_id = self.next_id.max(next_id);
    }

    /// Links `parent -> child`. Returns `Ok(false)` when the edge already
    /// exists.
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        if !self.contains(parent) {
            return Err(Error::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(Error::UnknownNode(child));
        }
        if parent == child {
            return Err(Error::SelfLoop(parent));
        }
        if self.nodes[&parent].children.contains(&child) {
            return Ok(false);
        }
        if self.reaches(child, parent) {
            return Err(Error::WouldCycle { parent, child });
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child)
            && !node.parents.contains(&parent)
        {
            node.parents.push(parent);
        }
        Ok(true)
    }

    pub fn remove_edge(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return false;
        };
        let before = parent_node.children.len();
        parent_node.children.retain(|id| *id != child);
        if parent_node.children.len() == before {
            return false;
        }
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parents.retain(|id| *id != parent);
        }
        true
    }

    /// Removes a node after severing every link; children are kept and may
    /// become roots.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let (parents, children) = {
            let node = self.nodes.get(&id)?;
            (node.parents.clone(), node.children.clone())
        };
        for parent in parents {
            self.remove_edge(parent, id);
        }
        for child in children {
            self.remove_edge(id, child);
        }
        self.nodes.remove(&id)
    }

    /// Whether `to` is reachable from `from` following child links.
    fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        let mut stack = vec![from];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().copied());
            }
        }
        false
    }

    pub fn has_cycle(&self) -> bool {
        if self.nodes.len() < 2 {
            return false;
        }
        let mut indegree: HashMap<NodeId, usize> =
            self.nodes.values().map(|node| (node.id, node.parents.len())).collect();
        let mut queue: VecDeque<NodeId> = indegree
            .iter()
            .filter_map(|(id, deg)| if *deg == 0 { Some(*id) } else { None })
            .collect();
        let mut visited = 0usize;
        while let Some(id) = queue.pop_front() {
            visited += 1;
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            for child in &node.children {
                if let Some(deg) = indegree.get_mut(child) {
                    *deg = deg.saturating_sub(1);
                    if *deg == 0 {
                        queue.push_back(*child);
                    }
                }
            }
        }
        visited < indegree.len()
    }

    /// Adds a forward child to the right of `parent`, numbered after its
    /// existing children.
    pub fn add_child_node(&mut self, parent: NodeId, placement: &PlacementConfig) -> Result<NodeId> {
        let parent_node = self.nodes.get(&parent).ok_or(Error::UnknownNode(parent))?;
        let default_width = self.node_config.default_width;
        let (x, y) = match parent_node.children.first() {
            None => (
                parent_node.x + parent_node.width / 2.0 + placement.horizontal_spacing + default_width / 2.0,
                parent_node.y,
            ),
            Some(first) => {
                let first_left = self.nodes.get(first).map(|n| n.rect().min_x).unwrap_or(parent_node.x);
                let bottom = self.lowest_bottom(&parent_node.children).unwrap_or(parent_node.y);
                (
                    first_left + default_width / 2.0,
                    bottom + placement.sibling_spacing + placement.estimated_height / 2.0,
                )
            }
        };
        let label = numbering::generate_label(self, parent, Direction::Forward);
        let id = self.allocate(x, y)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.label = label;
        }
        self.add_edge(parent, id)?;
        Ok(id)
    }

    /// Adds a reverse parent to the left of `target`, numbered after its
    /// existing parents.
    pub fn add_parent_node(&mut self, target: NodeId, placement: &PlacementConfig) -> Result<NodeId> {
        let target_node = self.nodes.get(&target).ok_or(Error::UnknownNode(target))?;
        let default_width = self.node_config.default_width;
        let (x, y) = match target_node.parents.first() {
            None => (
                target_node.x - target_node.width / 2.0 - placement.horizontal_spacing - default_width / 2.0,
                target_node.y,
            ),
            Some(first) => {
                let first_right = self.nodes.get(first).map(|n| n.rect().max_x).unwrap_or(target_node.x);
                let bottom = self.lowest_bottom(&target_node.parents).unwrap_or(target_node.y);
                (
                    first_right - default_width / 2.0,
                    bottom + placement.sibling_spacing + placement.estimated_height / 2.0,
                )
            }
        };
        let label = numbering::generate_label(self, target, Direction::Reverse);
        let id = self.allocate(x, y)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.label = label;
        }
        self.add_edge(id, target)?;
        Ok(id)
    }

    /// Links without validation, for exercising cycle handling.
    #[cfg(test)]
    pub(crate) fn link_unchecked(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parents.push(parent);
        }
    }

    fn lowest_bottom(&self, ids: &[NodeId]) -> Option<f32> {
        ids.iter()
            .filter_map(|id| self.nodes.get(id))
            .map(|node| node.rect().max_y)
            .fold(None, |acc: Option<f32>, bottom| Some(acc.map_or(bottom, |a| a.max(bottom))))
    }
}

impl Default for MindMap {
    fn default() -> Self {
        Self::new()
    }
}
