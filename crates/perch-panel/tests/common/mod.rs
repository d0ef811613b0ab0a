#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ahash::AHashMap;
use compact_str::CompactString;
use tempfile::TempDir;

use perch_core::{ActorGeometry, MonitorGeometry};
use perch_panel::{
    ChromeOptions, DashPanel, DockHandle, HandlerId, JsonSettingsStore, KeyBindings, NodeConfig,
    NodeId, SceneGraph, ShellContext, SignalCallback,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[derive(Debug, Clone)]
pub struct MockNode {
    pub config: NodeConfig,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub position: (i32, i32),
    pub size: (i32, i32),
    pub vertical: bool,
    pub style: String,
    pub visible: bool,
}

/// In-memory scene graph standing in for the host shell.
pub struct MockScene {
    nodes: RefCell<AHashMap<NodeId, MockNode>>,
    chrome: RefCell<AHashMap<NodeId, ChromeOptions>>,
    monitor: Cell<MonitorGeometry>,
    actors: RefCell<Vec<ActorGeometry>>,
    monitors_handlers: RefCell<AHashMap<HandlerId, SignalCallback>>,
    next_node: Cell<u64>,
    next_handler: Cell<u64>,
}

impl MockScene {
    pub fn new(monitor: MonitorGeometry) -> Self {
        Self {
            nodes: RefCell::new(AHashMap::new()),
            chrome: RefCell::new(AHashMap::new()),
            monitor: Cell::new(monitor),
            actors: RefCell::new(Vec::new()),
            monitors_handlers: RefCell::new(AHashMap::new()),
            next_node: Cell::new(1),
            next_handler: Cell::new(1),
        }
    }

    pub fn set_monitor(&self, monitor: MonitorGeometry) {
        self.monitor.set(monitor);
    }

    pub fn set_actors(&self, actors: Vec<ActorGeometry>) {
        *self.actors.borrow_mut() = actors;
    }

    pub fn emit_monitors_changed(&self) {
        // Handlers may call back into the scene; keep the registry
        // unborrowed while they run.
        let mut active = self.monitors_handlers.take();
        for callback in active.values_mut() {
            callback();
        }
        let added = self.monitors_handlers.take();
        active.extend(added);
        self.monitors_handlers.replace(active);
    }

    pub fn node(&self, id: NodeId) -> MockNode {
        self.nodes.borrow().get(&id).cloned().expect("node exists")
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .find(|(_, node)| node.config.name == name)
            .map(|(&id, _)| id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn chrome_count(&self) -> usize {
        self.chrome.borrow().len()
    }

    pub fn chrome_options(&self, id: NodeId) -> Option<ChromeOptions> {
        self.chrome.borrow().get(&id).copied()
    }

    pub fn handler_count(&self) -> usize {
        self.monitors_handlers.borrow().len()
    }

    /// Point a node's parent field at `parent` without listing it among the
    /// children, reproducing the "indexOf came back empty" host state.
    pub fn set_parent_only(&self, child: NodeId, parent: NodeId) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(&child) {
            node.parent = Some(parent);
        }
    }
}

impl SceneGraph for MockScene {
    fn create_node(&self, config: NodeConfig) -> NodeId {
        let id = NodeId(self.next_node.get());
        self.next_node.set(id.0 + 1);
        self.nodes.borrow_mut().insert(
            id,
            MockNode {
                config,
                parent: None,
                children: Vec::new(),
                position: (0, 0),
                size: (0, 0),
                vertical: false,
                style: String::new(),
                visible: true,
            },
        );
        id
    }

    fn destroy_node(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(removed) = nodes.remove(&node) {
            if let Some(parent) = removed.parent {
                if let Some(parent_node) = nodes.get_mut(&parent) {
                    parent_node.children.retain(|&c| c != node);
                }
            }
            let mut stack = removed.children;
            while let Some(child) = stack.pop() {
                if let Some(child_node) = nodes.remove(&child) {
                    stack.extend(child_node.children);
                }
            }
        }
        drop(nodes);
        self.chrome.borrow_mut().remove(&node);
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow().get(&node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn add_child(&self, parent: NodeId, child: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent_node) = nodes.get_mut(&parent) {
            parent_node.children.push(child);
        }
        if let Some(child_node) = nodes.get_mut(&child) {
            child_node.parent = Some(parent);
        }
    }

    fn insert_child_at(&self, parent: NodeId, child: NodeId, index: usize) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent_node) = nodes.get_mut(&parent) {
            let index = index.min(parent_node.children.len());
            parent_node.children.insert(index, child);
        }
        if let Some(child_node) = nodes.get_mut(&child) {
            child_node.parent = Some(parent);
        }
    }

    fn remove_child(&self, parent: NodeId, child: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent_node) = nodes.get_mut(&parent) {
            parent_node.children.retain(|&c| c != child);
        }
        if let Some(child_node) = nodes.get_mut(&child) {
            if child_node.parent == Some(parent) {
                child_node.parent = None;
            }
        }
    }

    fn set_position(&self, node: NodeId, x: i32, y: i32) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&node) {
            n.position = (x, y);
        }
    }

    fn set_size(&self, node: NodeId, width: i32, height: i32) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&node) {
            n.size = (width, height);
        }
    }

    fn set_vertical(&self, node: NodeId, vertical: bool) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&node) {
            n.vertical = vertical;
        }
    }

    fn set_style(&self, node: NodeId, style: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&node) {
            n.style = style.to_string();
        }
    }

    fn set_visible(&self, node: NodeId, visible: bool) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&node) {
            n.visible = visible;
        }
    }

    fn visible(&self, node: NodeId) -> bool {
        self.nodes
            .borrow()
            .get(&node)
            .map(|n| n.visible)
            .unwrap_or(false)
    }

    fn add_chrome(&self, node: NodeId, options: ChromeOptions) {
        self.chrome.borrow_mut().insert(node, options);
    }

    fn remove_chrome(&self, node: NodeId) {
        self.chrome.borrow_mut().remove(&node);
    }

    fn primary_monitor(&self) -> MonitorGeometry {
        self.monitor.get()
    }

    fn tracked_actors(&self) -> Vec<ActorGeometry> {
        self.actors.borrow().clone()
    }

    fn connect_monitors_changed(&self, callback: SignalCallback) -> HandlerId {
        let handler = HandlerId(self.next_handler.get());
        self.next_handler.set(handler.0 + 1);
        self.monitors_handlers.borrow_mut().insert(handler, callback);
        handler
    }

    fn disconnect(&self, handler: HandlerId) {
        self.monitors_handlers.borrow_mut().remove(&handler);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DockState {
    pub visible: bool,
    pub opacity: u8,
    pub max_size: Option<(i32, i32)>,
    pub icon_size: Option<i32>,
    pub vertical: bool,
}

/// Stand-in for the host dock widget.
pub struct MockDock {
    node: NodeId,
    state: RefCell<DockState>,
}

impl MockDock {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            state: RefCell::new(DockState {
                visible: false,
                opacity: 128,
                max_size: None,
                icon_size: None,
                vertical: false,
            }),
        }
    }

    pub fn state(&self) -> DockState {
        *self.state.borrow()
    }
}

impl DockHandle for MockDock {
    fn node(&self) -> NodeId {
        self.node
    }

    fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    fn set_opacity(&self, opacity: u8) {
        self.state.borrow_mut().opacity = opacity;
    }

    fn set_max_size(&self, width: i32, height: i32) {
        self.state.borrow_mut().max_size = Some((width, height));
    }

    fn set_icon_size(&self, size: i32) {
        self.state.borrow_mut().icon_size = Some(size);
    }

    fn set_vertical(&self, vertical: bool) {
        self.state.borrow_mut().vertical = vertical;
    }
}

/// Name-keyed keybinding registry.
pub struct MockKeyBindings {
    bindings: RefCell<AHashMap<CompactString, SignalCallback>>,
}

impl MockKeyBindings {
    pub fn new() -> Self {
        Self {
            bindings: RefCell::new(AHashMap::new()),
        }
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.borrow().len()
    }

    /// Fire the named action if bound; unbound names are ignored like a
    /// keypress with no action attached.
    pub fn press(&self, name: &str) {
        let callback = self.bindings.borrow_mut().remove(name);
        if let Some(mut callback) = callback {
            callback();
            self.bindings
                .borrow_mut()
                .insert(CompactString::from(name), callback);
        }
    }
}

impl KeyBindings for MockKeyBindings {
    fn add_keybinding(&self, name: &str, callback: SignalCallback) {
        self.bindings
            .borrow_mut()
            .insert(CompactString::from(name), callback);
    }

    fn remove_keybinding(&self, name: &str) {
        self.bindings.borrow_mut().remove(name);
    }
}

pub const MONITOR: MonitorGeometry = MonitorGeometry {
    x: 0,
    y: 0,
    width: 1920,
    height: 1080,
};

pub fn bar(y: i32, width: i32, height: i32) -> ActorGeometry {
    ActorGeometry {
        x: 0,
        y,
        width,
        height,
        visible: true,
    }
}

/// A full mock shell with the dock parented somewhere in an overview node.
pub struct Harness {
    pub scene: Rc<MockScene>,
    pub dock: Rc<MockDock>,
    pub keys: Rc<MockKeyBindings>,
    pub settings: Rc<JsonSettingsStore>,
    pub panel: DashPanel,
    pub overview: NodeId,
    pub dock_node: NodeId,
    /// Node count before activation, for symmetry checks.
    pub baseline_nodes: usize,
    _tmp: TempDir,
}

impl Harness {
    /// Build a shell whose overview holds `before` siblings, then the dock,
    /// then `after` siblings.
    pub fn with_siblings(before: usize, after: usize) -> Self {
        init_tracing();

        let scene = Rc::new(MockScene::new(MONITOR));
        let overview = scene.create_node(NodeConfig::named("overview"));

        for i in 0..before {
            let sibling = scene.create_node(NodeConfig::named(format!("before-{i}")));
            scene.add_child(overview, sibling);
        }
        let dock_node = scene.create_node(NodeConfig::named("dash"));
        scene.add_child(overview, dock_node);
        for i in 0..after {
            let sibling = scene.create_node(NodeConfig::named(format!("after-{i}")));
            scene.add_child(overview, sibling);
        }

        let tmp = TempDir::new().expect("temp dir");
        let settings = Rc::new(JsonSettingsStore::new(tmp.path().join("settings.json")));
        let dock = Rc::new(MockDock::new(dock_node));
        let keys = Rc::new(MockKeyBindings::new());

        let ctx = ShellContext {
            scene: scene.clone(),
            settings: settings.clone(),
            keybindings: keys.clone(),
            dock: dock.clone(),
        };
        let panel = DashPanel::new(ctx);

        let baseline_nodes = scene.node_count();
        Self {
            scene,
            dock,
            keys,
            settings,
            panel,
            overview,
            dock_node,
            baseline_nodes,
            _tmp: tmp,
        }
    }

    pub fn new() -> Self {
        Self::with_siblings(1, 1)
    }

    pub fn panel_node(&self) -> NodeId {
        self.scene.find("perch-panel").expect("panel node exists")
    }

    pub fn dash_container(&self) -> NodeId {
        self.scene
            .find("perch-dash-container")
            .expect("dash container exists")
    }

    pub fn topbar_container(&self) -> NodeId {
        self.scene
            .find("perch-topbar-container")
            .expect("topbar container exists")
    }
}
