use crate::bounds::{BoundingBox, nodes_bounding_box};
use crate::config::BoundsConfig;
use crate::depth::Classification;
use crate::graph::MindMap;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub center: Option<u32>,
    pub max_level: usize,
    pub bounds: BoundingBox,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: u32,
    pub label: String,
    pub text: String,
    pub branch: String,
    pub depth: Option<usize>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: u32,
    pub to: u32,
    /// Centers of the two endpoints, parent first.
    pub points: [[f32; 2]; 2],
}

impl LayoutDump {
    pub fn from_layout(map: &MindMap, classification: &Classification, bounds: &BoundsConfig) -> Self {
        let nodes = map
            .nodes()
            .map(|node| NodeDump {
                id: node.id.0,
                label: node.label.clone(),
                text: node.text.clone(),
                branch: classification
                    .branch(node.id)
                    .map(|branch| format!("{branch:?}"))
                    .unwrap_or_default(),
                depth: classification.depth(node.id),
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
            })
            .collect();

        let edges = map
            .nodes()
            .flat_map(|parent| {
                parent.children().iter().filter_map(move |child_id| {
                    let child = map.node(*child_id)?;
                    Some(EdgeDump {
                        from: parent.id.0,
                        to: child.id.0,
                        points: [[parent.x, parent.y], [child.x, child.y]],
                    })
                })
            })
            .collect();

        LayoutDump {
            center: classification.center.map(|id| id.0),
            max_level: classification.max_level,
            bounds: nodes_bounding_box(map, bounds),
            nodes,
            edges,
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    map: &MindMap,
    classification: &Classification,
    bounds: &BoundsConfig,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(map, classification, bounds);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
