use compact_str::CompactString;

use perch_core::{ActorGeometry, MonitorGeometry};

use super::{HandlerId, SignalCallback};

/// Opaque handle to a container node in the host scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Construction-time properties for a container node.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    pub name: CompactString,
    pub reactive: bool,
    pub track_hover: bool,
    pub clip_to_allocation: bool,
    pub x_expand: bool,
    pub y_expand: bool,
}

impl NodeConfig {
    pub fn named(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Options for registering a node as shell chrome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeOptions {
    /// Reserve screen space so maximized windows tile around the node.
    pub affects_struts: bool,
    /// Keep the node mapped when a window goes fullscreen.
    pub track_fullscreen: bool,
}

/// The host shell's scene-graph service.
///
/// Node handles stay valid until `destroy_node`; operations on a node the
/// host no longer knows are ignored, mirroring the toolkit's behavior during
/// teardown races.
pub trait SceneGraph {
    fn create_node(&self, config: NodeConfig) -> NodeId;

    /// Destroy the node, detaching it from its parent. Children still
    /// attached are destroyed with it.
    fn destroy_node(&self, node: NodeId);

    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn add_child(&self, parent: NodeId, child: NodeId);
    fn insert_child_at(&self, parent: NodeId, child: NodeId, index: usize);
    fn remove_child(&self, parent: NodeId, child: NodeId);

    fn set_position(&self, node: NodeId, x: i32, y: i32);
    fn set_size(&self, node: NodeId, width: i32, height: i32);
    fn set_vertical(&self, node: NodeId, vertical: bool);

    /// Apply an inline style fragment (e.g. `padding: 4px;`).
    fn set_style(&self, node: NodeId, style: &str);

    fn set_visible(&self, node: NodeId, visible: bool);
    fn visible(&self, node: NodeId) -> bool;

    /// Register the node as always-on-top shell chrome.
    fn add_chrome(&self, node: NodeId, options: ChromeOptions);
    fn remove_chrome(&self, node: NodeId);

    fn primary_monitor(&self) -> MonitorGeometry;

    /// Snapshot of every actor the shell's layout manager currently tracks,
    /// chrome of other components included.
    fn tracked_actors(&self) -> Vec<ActorGeometry>;

    fn connect_monitors_changed(&self, callback: SignalCallback) -> HandlerId;
    fn disconnect(&self, handler: HandlerId);
}
