mod settings;

pub use settings::{DashSettings, Edge, Orientation, ParseEdgeError, SettingKey};
