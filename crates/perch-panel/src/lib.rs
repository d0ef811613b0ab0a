pub mod common;
pub mod host;
pub mod panel;

pub use common::ShellContext;
pub use host::{
    ChromeOptions, DockHandle, HandlerId, JsonSettingsStore, KeyBindings, NodeConfig, NodeId,
    SceneGraph, SettingsStore, SignalCallback,
};
pub use panel::{DashPanel, TOGGLE_DASH_ACTION};
