use serde::{Deserialize, Serialize};
use std::path::Path;

/// Spacing used by the automatic layout pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Gap between the facing edges of adjacent levels.
    pub horizontal_gap: f32,
    /// Gap between stacked leaves.
    pub vertical_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_gap: 120.0,
            vertical_gap: 20.0,
        }
    }
}

/// Content bounds handed to the canvas and minimap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundsConfig {
    pub padding: f32,
    pub min_size: f32,
    pub empty_width: f32,
    pub empty_height: f32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            min_size: 600.0,
            empty_width: 1200.0,
            empty_height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimapConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub extra_padding: f32,
    /// Added to a zero-width or zero-height extent before scaling.
    pub degenerate_extent: f32,
    pub min_scale: f32,
    pub fallback_scale: f32,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 150.0,
            padding: 10.0,
            extra_padding: 15.0,
            degenerate_extent: 100.0,
            min_scale: 0.01,
            fallback_scale: 0.1,
        }
    }
}

/// Node sizing. Width is fixed; height grows with wrapped text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    pub default_width: f32,
    pub default_height: f32,
    pub padding: f32,
    pub line_height: f32,
    pub min_height: f32,
    pub font_size: f32,
    pub font_family: String,
    /// Skip font lookup and use per-character width estimates.
    pub fast_text_metrics: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            default_width: 400.0,
            default_height: 45.0,
            padding: 15.0,
            line_height: 1.4,
            min_height: 45.0,
            font_size: 14.0,
            font_family: "Arial".to_string(),
            fast_text_metrics: false,
        }
    }
}

/// Where the editor drops freshly created nodes before the next layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub horizontal_spacing: f32,
    pub sibling_spacing: f32,
    pub estimated_height: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 108.0,
            sibling_spacing: 50.0,
            estimated_height: 50.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub layout: LayoutConfig,
    pub bounds: BoundsConfig,
    pub minimap: MinimapConfig,
    pub node: NodeConfig,
    pub placement: PlacementConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    horizontal_gap: Option<f32>,
    vertical_gap: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BoundsConfigFile {
    padding: Option<f32>,
    min_size: Option<f32>,
    empty_width: Option<f32>,
    empty_height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MinimapConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    extra_padding: Option<f32>,
    degenerate_extent: Option<f32>,
    min_scale: Option<f32>,
    fallback_scale: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct NodeConfigFile {
    default_width: Option<f32>,
    default_height: Option<f32>,
    padding: Option<f32>,
    line_height: Option<f32>,
    min_height: Option<f32>,
    font_size: Option<f32>,
    font_family: Option<String>,
    fast_text_metrics: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PlacementConfigFile {
    horizontal_spacing: Option<f32>,
    sibling_spacing: Option<f32>,
    estimated_height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout: Option<LayoutConfigFile>,
    bounds: Option<BoundsConfigFile>,
    minimap: Option<MinimapConfigFile>,
    node: Option<NodeConfigFile>,
    placement: Option<PlacementConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Applies a JSON/JSON5 override document on top of the defaults. Absent
/// fields keep their default values.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.horizontal_gap {
            config.layout.horizontal_gap = v;
        }
        if let Some(v) = layout.vertical_gap {
            config.layout.vertical_gap = v;
        }
    }

    if let Some(bounds) = parsed.bounds {
        if let Some(v) = bounds.padding {
            config.bounds.padding = v;
        }
        if let Some(v) = bounds.min_size {
            config.bounds.min_size = v;
        }
        if let Some(v) = bounds.empty_width {
            config.bounds.empty_width = v;
        }
        if let Some(v) = bounds.empty_height {
            config.bounds.empty_height = v;
        }
    }

    if let Some(minimap) = parsed.minimap {
        if let Some(v) = minimap.width {
            config.minimap.width = v;
        }
        if let Some(v) = minimap.height {
            config.minimap.height = v;
        }
        if let Some(v) = minimap.padding {
            config.minimap.padding = v;
        }
        if let Some(v) = minimap.extra_padding {
            config.minimap.extra_padding = v;
        }
        if let Some(v) = minimap.degenerate_extent {
            config.minimap.degenerate_extent = v;
        }
        if let Some(v) = minimap.min_scale {
            config.minimap.min_scale = v;
        }
        if let Some(v) = minimap.fallback_scale {
            config.minimap.fallback_scale = v;
        }
    }

    if let Some(node) = parsed.node {
        if let Some(v) = node.default_width {
            config.node.default_width = v;
        }
        if let Some(v) = node.default_height {
            config.node.default_height = v;
        }
        if let Some(v) = node.padding {
            config.node.padding = v;
        }
        if let Some(v) = node.line_height {
            config.node.line_height = v;
        }
        if let Some(v) = node.min_height {
            config.node.min_height = v;
        }
        if let Some(v) = node.font_size {
            config.node.font_size = v;
        }
        if let Some(v) = node.font_family {
            config.node.font_family = v;
        }
        if let Some(v) = node.fast_text_metrics {
            config.node.fast_text_metrics = v;
        }
    }

    if let Some(placement) = parsed.placement {
        if let Some(v) = placement.horizontal_spacing {
            config.placement.horizontal_spacing = v;
        }
        if let Some(v) = placement.sibling_spacing {
            config.placement.sibling_spacing = v;
        }
        if let Some(v) = placement.estimated_height {
            config.placement.estimated_height = v;
        }
    }

    Ok(config)
}
