use super::SignalCallback;

/// Keybinding registration service. Actions are name-keyed; registering is
/// paired with removal at deactivation so no binding outlives the panel.
pub trait KeyBindings {
    /// Register a named action, fired in normal interaction mode. The
    /// action ships default-unbound; the user assigns a key in the host's
    /// settings.
    fn add_keybinding(&self, name: &str, callback: SignalCallback);

    fn remove_keybinding(&self, name: &str);
}
