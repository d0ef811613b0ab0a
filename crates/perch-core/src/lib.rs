pub mod config;
pub mod geometry;

pub use config::{DashSettings, Edge, Orientation, ParseEdgeError, SettingKey};
pub use geometry::{
    compute_placement, edge_offsets, ActorGeometry, EdgeOffsets, MonitorGeometry, Placement,
};
