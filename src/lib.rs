pub mod bounds;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod depth;
pub mod document;
pub mod error;
pub mod graph;
pub mod layout;
pub mod layout_dump;
pub mod natural;
pub mod numbering;
pub mod text;
#[cfg(feature = "fonts")]
pub mod text_metrics;

pub use bounds::{BoundingBox, MinimapProjection, Viewport, nodes_bounding_box};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use depth::{Branch, Classification, classify};
pub use document::GraphDocument;
pub use error::{Error, Result};
pub use graph::{MindMap, Node, NodeId};
pub use layout::{auto_layout, normalize, place_x, place_y};
pub use numbering::{Direction, generate_label};
