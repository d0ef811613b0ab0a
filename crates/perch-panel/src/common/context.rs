use std::rc::Rc;

use crate::host::{DockHandle, KeyBindings, SceneGraph, SettingsStore};

/// Host services handed to the panel component at construction.
#[derive(Clone)]
pub struct ShellContext {
    pub scene: Rc<dyn SceneGraph>,
    pub settings: Rc<dyn SettingsStore>,
    pub keybindings: Rc<dyn KeyBindings>,
    pub dock: Rc<dyn DockHandle>,
}
