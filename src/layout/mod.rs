mod horizontal;
mod normalize;
mod vertical;

pub use horizontal::place_x;
pub use normalize::normalize;
pub use vertical::{median, place_y};

use crate::config::LayoutConfig;
use crate::depth::{self, Classification};
use crate::error::{Error, Result};
use crate::graph::MindMap;
use crate::numbering;

/// One automatic layout pass: numbers unlabeled nodes, places every node by
/// level and leaf order, then moves the center to the origin.
///
/// Returns the classification the pass used, or `None` for an empty map.
/// Maps containing a parent/child cycle are rejected before anything moves.
pub fn auto_layout(map: &mut MindMap, config: &LayoutConfig) -> Result<Option<Classification>> {
    if map.is_empty() {
        return Ok(None);
    }
    if map.has_cycle() {
        return Err(Error::CycleDetected);
    }

    let Some(center) = numbering::assign_missing_labels(map) else {
        return Ok(None);
    };
    let classification = depth::classify(map);
    tracing::debug!(
        center = %center,
        forward = classification.forward.len(),
        reverse = classification.reverse.len(),
        max_level = classification.max_level,
        "classified mind map"
    );

    let xs = place_x(map, &classification, config);
    let ys = place_y(map, &classification, config);
    for node in map.nodes_mut() {
        if let Some(x) = xs.get(&node.id) {
            node.x = *x;
        }
        if let Some(y) = ys.get(&node.id) {
            node.y = *y;
        }
    }

    normalize(map);
    Ok(Some(classification))
}
