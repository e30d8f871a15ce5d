use mindmap_layout::bounds::{BoundingBox, MinimapProjection, Viewport, nodes_bounding_box};
use mindmap_layout::text::{EstimatedMetrics, resize_nodes};
use mindmap_layout::{Config, GraphDocument, auto_layout};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOptions {
    horizontal_gap: Option<f32>,
    vertical_gap: Option<f32>,
    /// Re-estimate node sizes from their text first.
    measure: Option<bool>,
    /// Current canvas viewport; enables the minimap section of the result.
    viewport: Option<Viewport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutResult {
    document: GraphDocument,
    bounds: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimap: Option<Minimap>,
}

#[derive(Debug, Serialize)]
struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl From<BoundingBox> for Rect {
    fn from(bbox: BoundingBox) -> Self {
        Rect {
            x: bbox.min_x,
            y: bbox.min_y,
            width: bbox.width(),
            height: bbox.height(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Minimap {
    scale: f32,
    viewport: Rect,
    nodes: Vec<MinimapNode>,
}

#[derive(Debug, Serialize)]
struct MinimapNode {
    id: u32,
    rect: Rect,
}

fn build_config(options: &LayoutOptions) -> Config {
    let mut config = Config::default();
    if let Some(gap) = options.horizontal_gap {
        config.layout.horizontal_gap = gap;
    }
    if let Some(gap) = options.vertical_gap {
        config.layout.vertical_gap = gap;
    }
    config
}

fn layout_json(document_json: &str, options: LayoutOptions) -> Result<String, String> {
    let config = build_config(&options);
    let mut map = GraphDocument::from_json(document_json)
        .and_then(|document| document.into_mind_map(config.node.clone()))
        .map_err(|error| error.to_string())?;
    if options.measure.unwrap_or(false) {
        // No font database in the browser sandbox.
        resize_nodes(&mut map, &EstimatedMetrics);
    }
    auto_layout(&mut map, &config.layout).map_err(|error| error.to_string())?;

    let content = nodes_bounding_box(&map, &config.bounds);
    let minimap = options.viewport.map(|viewport| {
        let projection = MinimapProjection::new(&content, &viewport, &config.minimap);
        Minimap {
            scale: projection.scale,
            viewport: projection.viewport_rect().into(),
            nodes: map
                .nodes()
                .map(|node| MinimapNode {
                    id: node.id.0,
                    rect: projection.node_rect(node).into(),
                })
                .collect(),
        }
    });

    let result = LayoutResult {
        document: GraphDocument::from_mind_map(&map),
        bounds: content.into(),
        minimap,
    };
    serde_json::to_string(&result).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn layout_mind_map(document_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<LayoutOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        LayoutOptions::default()
    };

    layout_json(document_json, options).map_err(|error| JsValue::from_str(&error))
}
