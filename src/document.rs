//! Saved mind-map documents (JSON, camelCase keys).

use serde::{Deserialize, Serialize};

use crate::config::NodeConfig;
use crate::error::{Error, Result};
use crate::graph::{MindMap, NodeId, NodeStyle};

const DEFAULT_POSITION: f32 = 200.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_node_id: Option<u64>,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub node_number: String,
    #[serde(default = "default_position")]
    pub x: f32,
    #[serde(default = "default_position")]
    pub y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
    #[serde(default)]
    pub parent_ids: Vec<u32>,
    /// Older files store parents as `[{ "id": n }]`.
    #[serde(default, skip_serializing)]
    pub parents: Vec<ParentRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParentRef {
    pub id: u32,
}

fn default_position() -> f32 {
    DEFAULT_POSITION
}

impl GraphDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Snapshot of `map`, nodes in id order.
    pub fn from_mind_map(map: &MindMap) -> Self {
        let nodes = map
            .nodes()
            .map(|node| NodeRecord {
                id: node.id.0,
                text: node.text.clone(),
                node_number: node.label.clone(),
                x: node.x,
                y: node.y,
                width: Some(node.width),
                height: Some(node.height),
                style: Some(node.style.clone()),
                parent_ids: node.parents().iter().map(|id| id.0).collect(),
                parents: Vec::new(),
            })
            .collect();
        Self {
            next_node_id: Some(map.next_id()),
            nodes,
        }
    }

    /// Rebuilds the graph. Parent ids that match no node are skipped with a
    /// warning; links that would close a cycle fail the load.
    pub fn into_mind_map(self, node_config: NodeConfig) -> Result<MindMap> {
        let mut map = MindMap::with_node_config(node_config);
        let defaults = map.node_config().clone();
        for record in &self.nodes {
            if map.contains(NodeId(record.id)) {
                tracing::warn!(id = record.id, "duplicate node id, later record wins");
            }
            let node = map.insert_with_id(NodeId(record.id), record.x, record.y);
            node.text = record.text.clone();
            node.label = record.node_number.clone();
            node.width = record.width.unwrap_or(defaults.default_width);
            node.height = record.height.unwrap_or(defaults.default_height);
            if let Some(style) = &record.style {
                node.style = style.clone();
            }
        }

        for record in &self.nodes {
            let child = NodeId(record.id);
            let parents = record
                .parent_ids
                .iter()
                .copied()
                .chain(record.parents.iter().map(|parent| parent.id));
            for parent in parents.map(NodeId) {
                if !map.contains(parent) {
                    tracing::warn!(child = %child, parent = %parent, "skipping link to unknown parent");
                    continue;
                }
                match map.add_edge(parent, child) {
                    Ok(_) => {}
                    Err(Error::SelfLoop(id)) => {
                        tracing::warn!(node = %id, "skipping self link");
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        if let Some(next) = self.next_node_id {
            map.bump_next_id(next);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_editor_defaults() {
        let doc = GraphDocument::from_json(r#"{ "nodes": [{ "id": 3, "text": "solo" }] }"#).unwrap();
        let map = doc.into_mind_map(NodeConfig::default()).unwrap();
        let node = map.node(NodeId(3)).unwrap();
        assert_eq!((node.x, node.y), (200.0, 200.0));
        assert_eq!((node.width, node.height), (400.0, 45.0));
        assert_eq!(node.label, "");
        assert_eq!(map.next_id(), 4);
    }

    #[test]
    fn unknown_parents_are_skipped() {
        let doc = GraphDocument::from_json(
            r#"{ "nextNodeId": 10, "nodes": [
                { "id": 1, "nodeNumber": "0" },
                { "id": 2, "nodeNumber": "1", "parentIds": [1, 99] }
            ] }"#,
        )
        .unwrap();
        let map = doc.into_mind_map(NodeConfig::default()).unwrap();
        assert_eq!(map.node(NodeId(2)).unwrap().parents(), &[NodeId(1)]);
        assert_eq!(map.next_id(), 10);
    }

    #[test]
    fn legacy_parent_objects_are_read() {
        let doc = GraphDocument::from_json(
            r#"{ "nodes": [
                { "id": 1 },
                { "id": 2, "parents": [{ "id": 1 }] }
            ] }"#,
        )
        .unwrap();
        let map = doc.into_mind_map(NodeConfig::default()).unwrap();
        assert_eq!(map.node(NodeId(1)).unwrap().children(), &[NodeId(2)]);
    }

    #[test]
    fn cyclic_documents_are_rejected() {
        let doc = GraphDocument::from_json(
            r#"{ "nodes": [
                { "id": 1, "parentIds": [2] },
                { "id": 2, "parentIds": [1] }
            ] }"#,
        )
        .unwrap();
        assert!(matches!(
            doc.into_mind_map(NodeConfig::default()),
            Err(Error::WouldCycle { .. })
        ));
    }

    #[test]
    fn highest_possible_id_does_not_wrap_the_counter() {
        let doc = GraphDocument::from_json(r#"{ "nodes": [{ "id": 4294967295, "nodeNumber": "0" }] }"#).unwrap();
        let mut map = doc.into_mind_map(NodeConfig::default()).unwrap();
        let center = NodeId(u32::MAX);
        assert!(matches!(
            map.add_child_node(center, &crate::config::PlacementConfig::default()),
            Err(Error::IdsExhausted)
        ));
        assert!(map.node(center).unwrap().children().is_empty());
        assert_eq!(GraphDocument::from_mind_map(&map).next_node_id, Some(1 << 32));
    }

    #[test]
    fn malformed_json_is_a_document_error() {
        assert!(matches!(
            GraphDocument::from_json("{ nodes: "),
            Err(Error::Document(_))
        ));
    }

    #[test]
    fn snapshot_preserves_links_and_numbers() {
        let mut map = MindMap::with_center("root");
        let center = map.labeled_center().unwrap();
        let child = map.add_node("child", 10.0, 20.0, &[center]).unwrap();
        map.node_mut(child).unwrap().label = "1".to_string();

        let doc = GraphDocument::from_mind_map(&map);
        assert_eq!(doc.next_node_id, Some(3));
        assert_eq!(doc.nodes[1].parent_ids, vec![center.0]);
        assert_eq!(doc.nodes[1].node_number, "1");

        let json = doc.to_json_pretty().unwrap();
        assert!(json.contains("\"parentIds\""));
        assert!(!json.contains("\"parents\""));
        let restored = GraphDocument::from_json(&json)
            .unwrap()
            .into_mind_map(NodeConfig::default())
            .unwrap();
        assert_eq!(restored.node(child).unwrap().parents(), &[center]);
        assert_eq!(restored.label(center), "0");
    }
}
