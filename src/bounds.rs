//! Content bounds and the minimap (thumbnail) projection.

use serde::{Deserialize, Serialize};

use crate::config::{BoundsConfig, MinimapConfig};
use crate::graph::{MindMap, Node};

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            min_x: cx - width / 2.0,
            min_y: cy - height / 2.0,
            max_x: cx + width / 2.0,
            max_y: cy + height / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows every side by `amount`.
    pub fn expand(&self, amount: f32) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }
}

/// Padded union of all node rectangles. Boxes smaller than `min_size` on
/// either axis are scaled up around their center, keeping the aspect ratio
/// and growing along the dominant axis.
pub fn nodes_bounding_box(map: &MindMap, config: &BoundsConfig) -> BoundingBox {
    let Some(content) = map
        .nodes()
        .map(Node::rect)
        .reduce(|acc, rect| acc.union(&rect))
    else {
        return BoundingBox::from_center(0.0, 0.0, config.empty_width, config.empty_height);
    };

    let padded = content.expand(config.padding);
    let (width, height) = (padded.width(), padded.height());
    if width >= config.min_size && height >= config.min_size {
        return padded;
    }

    let aspect = width / height;
    let (new_width, new_height) = if aspect >= 1.0 {
        let w = width.max(config.min_size);
        (w, w / aspect)
    } else {
        let h = height.max(config.min_size);
        (h * aspect, h)
    };
    let (cx, cy) = padded.center();
    BoundingBox::from_center(cx, cy, new_width, new_height)
}

/// The visible part of the main canvas. The canvas is translated by
/// `offset`, so the world region on screen is `[-offset, -offset + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn world_rect(&self) -> BoundingBox {
        BoundingBox {
            min_x: -self.offset_x,
            min_y: -self.offset_y,
            max_x: -self.offset_x + self.width,
            max_y: -self.offset_y + self.height,
        }
    }
}

/// Maps world coordinates onto the fixed-size minimap and back.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapProjection {
    /// World region shown by the minimap: content and viewport, padded.
    pub total: BoundingBox,
    pub scale: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    viewport: Viewport,
}

impl MinimapProjection {
    pub fn new(content: &BoundingBox, viewport: &Viewport, config: &MinimapConfig) -> Self {
        let mut total = content
            .union(&viewport.world_rect())
            .expand(config.extra_padding);
        if total.min_x >= total.max_x {
            total.max_x = total.min_x + config.degenerate_extent;
        }
        if total.min_y >= total.max_y {
            total.max_y = total.min_y + config.degenerate_extent;
        }

        let available_width = config.width - config.padding * 2.0;
        let available_height = config.height - config.padding * 2.0;
        let mut scale = (available_width / total.width())
            .min(available_height / total.height())
            .max(config.min_scale);
        if !scale.is_finite() || scale <= 0.0 {
            scale = config.fallback_scale;
        }

        Self {
            total,
            scale,
            origin_x: (config.width - total.width() * scale) / 2.0,
            origin_y: (config.height - total.height() * scale) / 2.0,
            viewport: *viewport,
        }
    }

    pub fn to_minimap(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.origin_x + (x - self.total.min_x) * self.scale,
            self.origin_y + (y - self.total.min_y) * self.scale,
        )
    }

    pub fn to_world(&self, mx: f32, my: f32) -> (f32, f32) {
        (
            self.total.min_x + (mx - self.origin_x) / self.scale,
            self.total.min_y + (my - self.origin_y) / self.scale,
        )
    }

    /// A node's rectangle in minimap coordinates.
    pub fn node_rect(&self, node: &Node) -> BoundingBox {
        self.project(&node.rect())
    }

    /// The viewport outline in minimap coordinates.
    pub fn viewport_rect(&self) -> BoundingBox {
        self.project(&self.viewport.world_rect())
    }

    /// Viewport of the same size whose center is the clicked world point.
    pub fn recenter(&self, mx: f32, my: f32) -> Viewport {
        let (wx, wy) = self.to_world(mx, my);
        Viewport {
            offset_x: -wx + self.viewport.width / 2.0,
            offset_y: -wy + self.viewport.height / 2.0,
            ..self.viewport
        }
    }

    fn project(&self, rect: &BoundingBox) -> BoundingBox {
        let (min_x, min_y) = self.to_minimap(rect.min_x, rect.min_y);
        let (max_x, max_y) = self.to_minimap(rect.max_x, rect.max_y);
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn empty_map_uses_default_canvas() {
        let bbox = nodes_bounding_box(&MindMap::new(), &BoundsConfig::default());
        assert_eq!(bbox.min_x, -600.0);
        assert_eq!(bbox.max_y, 400.0);
        assert_eq!(bbox.width(), 1200.0);
        assert_eq!(bbox.height(), 800.0);
    }

    #[test]
    fn small_content_expands_keeping_aspect_ratio() {
        // One 400x45 node: padded to 480x125, wider than tall.
        let map = MindMap::with_center("root");
        let bbox = nodes_bounding_box(&map, &BoundsConfig::default());
        assert!(close(bbox.width(), 600.0));
        assert!(close(bbox.height(), 600.0 * 125.0 / 480.0));
        let (cx, cy) = bbox.center();
        assert!(close(cx, 0.0) && close(cy, 0.0));
    }

    #[test]
    fn tall_content_expands_along_height() {
        let mut map = MindMap::with_center("root");
        let center = map.labeled_center().unwrap();
        let node = map.node_mut(center).unwrap();
        node.width = 100.0;
        node.height = 300.0;
        let bbox = nodes_bounding_box(&map, &BoundsConfig::default());
        assert!(close(bbox.height(), 600.0));
        assert!(close(bbox.width(), 600.0 * 180.0 / 380.0));
    }

    #[test]
    fn large_content_is_only_padded() {
        let mut map = MindMap::with_center("root");
        map.add_node("far", 2000.0, 1000.0, &[]).unwrap();
        let bbox = nodes_bounding_box(&map, &BoundsConfig::default());
        assert_eq!(bbox.min_x, -240.0);
        assert_eq!(bbox.max_x, 2240.0);
        assert!(close(bbox.min_y, -62.5));
        assert!(close(bbox.max_y, 1062.5));
    }

    #[test]
    fn viewport_region_is_negated_offset() {
        let viewport = Viewport {
            offset_x: 100.0,
            offset_y: -50.0,
            width: 800.0,
            height: 600.0,
        };
        let rect = viewport.world_rect();
        assert_eq!((rect.min_x, rect.min_y), (-100.0, 50.0));
        assert_eq!((rect.max_x, rect.max_y), (700.0, 650.0));
    }

    #[test]
    fn projection_fits_and_centers_the_total_region() {
        let content = BoundingBox::from_center(0.0, 0.0, 1200.0, 800.0);
        let viewport = Viewport {
            offset_x: 600.0,
            offset_y: 400.0,
            width: 1200.0,
            height: 800.0,
        };
        let projection = MinimapProjection::new(&content, &viewport, &MinimapConfig::default());
        // Total 1230x830; 180/1230 < 130/830.
        assert!(close(projection.scale, 180.0 / 1230.0));
        assert!(close(projection.origin_x, 10.0));
        let (mx, my) = projection.to_minimap(0.0, 0.0);
        assert!(close(mx, 100.0) && close(my, 75.0));
    }

    #[test]
    fn minimap_round_trips_to_world() {
        let content = BoundingBox::from_center(300.0, -120.0, 2400.0, 700.0);
        let viewport = Viewport {
            offset_x: 0.0,
            offset_y: 0.0,
            width: 1024.0,
            height: 768.0,
        };
        let projection = MinimapProjection::new(&content, &viewport, &MinimapConfig::default());
        for (x, y) in [(0.0, 0.0), (-800.0, 200.0), (1400.0, -400.0)] {
            let (mx, my) = projection.to_minimap(x, y);
            let (wx, wy) = projection.to_world(mx, my);
            assert!(close(wx, x) && close(wy, y), "{x},{y} -> {wx},{wy}");
        }
    }

    #[test]
    fn scale_is_clamped_to_the_minimum() {
        let content = BoundingBox::from_center(0.0, 0.0, 1.0e6, 1.0e6);
        let viewport = Viewport {
            offset_x: 0.0,
            offset_y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let projection = MinimapProjection::new(&content, &viewport, &MinimapConfig::default());
        assert_eq!(projection.scale, 0.01);
    }

    #[test]
    fn recentering_puts_the_clicked_point_mid_viewport() {
        let content = BoundingBox::from_center(0.0, 0.0, 1200.0, 800.0);
        let viewport = Viewport {
            offset_x: 0.0,
            offset_y: 0.0,
            width: 800.0,
            height: 600.0,
        };
        let projection = MinimapProjection::new(&content, &viewport, &MinimapConfig::default());
        let (mx, my) = projection.to_minimap(250.0, -100.0);
        let moved = projection.recenter(mx, my);
        let (cx, cy) = moved.world_rect().center();
        assert!(close(cx, 250.0) && close(cy, -100.0));
        assert_eq!(moved.width, 800.0);
    }

    #[test]
    fn viewport_outline_is_projected() {
        let content = BoundingBox::from_center(0.0, 0.0, 1200.0, 800.0);
        let viewport = Viewport {
            offset_x: 400.0,
            offset_y: 300.0,
            width: 800.0,
            height: 600.0,
        };
        let projection = MinimapProjection::new(&content, &viewport, &MinimapConfig::default());
        let outline = projection.viewport_rect();
        assert!(close(outline.width(), 800.0 * projection.scale));
        let (cx, cy) = outline.center();
        let (mx, my) = projection.to_minimap(0.0, 0.0);
        assert!(close(cx, mx) && close(cy, my));
    }
}
