//! Trait surfaces over the host shell.
//!
//! The shell owns the scene graph, the dock widget, the settings store and
//! keybinding registration; this module is the narrow synchronous seam the
//! panel reaches them through. Everything here is single-threaded: the host
//! delivers one signal at a time and handlers run to completion.

mod dock;
mod keybindings;
mod scene;
mod settings;

pub use dock::DockHandle;
pub use keybindings::KeyBindings;
pub use scene::{ChromeOptions, NodeConfig, NodeId, SceneGraph};
pub use settings::{JsonSettingsStore, SettingsStore};

/// Token for a connected signal handler, unique within the issuing service.
/// Every token handed out during activation must be disconnected during
/// deactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

/// Callback invoked by the host when a subscribed signal fires.
pub type SignalCallback = Box<dyn FnMut()>;
