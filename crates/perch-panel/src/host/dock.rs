use super::scene::NodeId;

/// The host's dock widget. The widget stays owned by the host; the panel
/// only borrows its attachment point while active and must hand it back
/// unharmed on deactivation.
pub trait DockHandle {
    /// The dock's node in the scene graph, used for reparenting.
    fn node(&self) -> NodeId;

    fn set_visible(&self, visible: bool);
    fn set_opacity(&self, opacity: u8);

    /// Upper bound for the size the dock may request from its parent.
    fn set_max_size(&self, width: i32, height: i32);

    fn set_icon_size(&self, size: i32);

    /// Orientation of the dock's inner icon box.
    fn set_vertical(&self, vertical: bool);
}
