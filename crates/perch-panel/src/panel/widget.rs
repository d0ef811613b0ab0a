use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;
use tracing::{debug, info, warn};

use perch_core::{compute_placement, Placement, SettingKey};

use crate::common::ShellContext;
use crate::host::{ChromeOptions, HandlerId, NodeConfig, NodeId};

/// Keybinding action that flips the panel's visibility.
pub const TOGGLE_DASH_ACTION: &str = "toggle-dash";

/// Where the dock lived before activation; consumed on deactivation.
#[derive(Debug, Clone, Copy)]
struct OriginalDockLocation {
    parent: NodeId,
    /// Index among the parent's children, -1 when the dock was not found
    /// there. Restoration inserts at the index when >= 0, else appends.
    index: i32,
}

/// Nodes owned by the panel while active.
#[derive(Debug, Clone, Copy)]
struct PanelNodes {
    panel: NodeId,
    dash_container: NodeId,
    topbar_container: NodeId,
}

struct Inner {
    ctx: ShellContext,
    nodes: Option<PanelNodes>,
    original: Option<OriginalDockLocation>,
    setting_handlers: SmallVec<[HandlerId; 4]>,
    monitors_handler: Option<HandlerId>,
    keybinding_bound: bool,
}

/// The managed dash panel.
///
/// While active it holds the host's dock widget inside an always-visible
/// edge panel; deactivation tears every owned node down and hands the dock
/// back to wherever it was taken from. Activation and deactivation are
/// symmetric, and both are safe to call in any state.
pub struct DashPanel {
    inner: Rc<RefCell<Inner>>,
}

impl DashPanel {
    pub fn new(ctx: ShellContext) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                ctx,
                nodes: None,
                original: None,
                setting_handlers: SmallVec::new(),
                monitors_handler: None,
                keybinding_bound: false,
            })),
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().nodes.is_some()
    }

    /// Whether the managed panel node is currently shown. False when
    /// inactive.
    pub fn is_visible(&self) -> bool {
        let inner = self.inner.borrow();
        match inner.nodes {
            Some(nodes) => inner.ctx.scene.visible(nodes.panel),
            None => false,
        }
    }

    /// Detach the dock from its current parent and move it into a freshly
    /// built edge panel, then wire up the change signals.
    pub fn activate(&self) {
        if self.is_active() {
            warn!("dash panel already active, ignoring activate");
            return;
        }
        info!("dash panel activating");

        let ctx = self.inner.borrow().ctx.clone();
        let dock_node = ctx.dock.node();

        // Capture where the dock lives before the first detach. Not
        // refreshed again until the next activation.
        let original = ctx.scene.parent(dock_node).map(|parent| {
            let index = ctx
                .scene
                .children(parent)
                .iter()
                .position(|&child| child == dock_node)
                .map(|i| i as i32)
                .unwrap_or(-1);
            OriginalDockLocation { parent, index }
        });

        let panel = ctx.scene.create_node(NodeConfig {
            name: "perch-panel".into(),
            reactive: true,
            track_hover: true,
            clip_to_allocation: true,
            ..NodeConfig::default()
        });
        let dash_container = ctx.scene.create_node(NodeConfig {
            name: "perch-dash-container".into(),
            x_expand: true,
            y_expand: true,
            clip_to_allocation: true,
            ..NodeConfig::default()
        });
        let topbar_container = ctx
            .scene
            .create_node(NodeConfig::named("perch-topbar-container"));

        if let Some(original) = &original {
            ctx.scene.remove_child(original.parent, dock_node);
        }
        ctx.scene.add_child(dash_container, dock_node);
        ctx.scene.add_child(panel, dash_container);
        ctx.scene.add_child(panel, topbar_container);

        // Always-visible chrome: reserves struts and stays mapped across
        // fullscreen.
        ctx.scene.add_chrome(
            panel,
            ChromeOptions {
                affects_struts: true,
                track_fullscreen: true,
            },
        );

        {
            let mut inner = self.inner.borrow_mut();
            inner.nodes = Some(PanelNodes {
                panel,
                dash_container,
                topbar_container,
            });
            inner.original = original;
        }

        {
            let inner = self.inner.borrow();
            inner.update_position();
            inner.update_padding();
        }

        ctx.dock.set_visible(true);
        ctx.dock.set_opacity(u8::MAX);

        // Event wiring. Every token lands in the ledger so deactivation can
        // drain it.
        let monitors_handler = {
            let inner = Rc::clone(&self.inner);
            ctx.scene
                .connect_monitors_changed(Box::new(move || inner.borrow().update_position()))
        };

        let mut setting_handlers: SmallVec<[HandlerId; 4]> = SmallVec::new();
        for key in [
            SettingKey::DashPosition,
            SettingKey::DashSize,
            SettingKey::IconSize,
        ] {
            let inner = Rc::clone(&self.inner);
            setting_handlers.push(
                ctx.settings
                    .connect_changed(key, Box::new(move || inner.borrow().update_position())),
            );
        }
        {
            let inner = Rc::clone(&self.inner);
            setting_handlers.push(ctx.settings.connect_changed(
                SettingKey::PanelPadding,
                Box::new(move || inner.borrow().update_padding()),
            ));
        }

        {
            let inner = Rc::clone(&self.inner);
            ctx.keybindings.add_keybinding(
                TOGGLE_DASH_ACTION,
                Box::new(move || inner.borrow().toggle()),
            );
        }

        let mut inner = self.inner.borrow_mut();
        inner.monitors_handler = Some(monitors_handler);
        inner.setting_handlers = setting_handlers;
        inner.keybinding_bound = true;
        drop(inner);

        info!("dash panel activated");
    }

    /// Tear down the managed panel and restore the dock to its captured
    /// original location. Safe to call when activation never ran: every
    /// step is guarded, so the whole call degrades to a no-op.
    pub fn deactivate(&self) {
        info!("dash panel deactivating");

        let ctx = self.inner.borrow().ctx.clone();

        let (nodes, original, setting_handlers, monitors_handler, keybinding_bound) = {
            let mut inner = self.inner.borrow_mut();
            (
                inner.nodes.take(),
                inner.original.take(),
                std::mem::take(&mut inner.setting_handlers),
                inner.monitors_handler.take(),
                std::mem::replace(&mut inner.keybinding_bound, false),
            )
        };

        if keybinding_bound {
            ctx.keybindings.remove_keybinding(TOGGLE_DASH_ACTION);
        }
        if let Some(handler) = monitors_handler {
            ctx.scene.disconnect(handler);
        }
        for handler in setting_handlers {
            ctx.settings.disconnect(handler);
        }

        let dock_node = ctx.dock.node();

        if let Some(nodes) = nodes {
            ctx.scene.remove_child(nodes.dash_container, dock_node);
            ctx.scene.destroy_node(nodes.topbar_container);
            ctx.scene.destroy_node(nodes.dash_container);
            ctx.scene.remove_chrome(nodes.panel);
            ctx.scene.destroy_node(nodes.panel);
        }

        if let Some(original) = original {
            if original.index >= 0 {
                ctx.scene
                    .insert_child_at(original.parent, dock_node, original.index as usize);
            } else {
                ctx.scene.add_child(original.parent, dock_node);
            }
        }

        info!("dash panel deactivated");
    }

    /// Flip the managed panel's visibility. No-op while inactive.
    pub fn toggle(&self) {
        self.inner.borrow().toggle();
    }
}

impl Inner {
    /// Recompute the placement from fresh host snapshots and apply it to
    /// every managed node and the dock. Idempotent: unchanged inputs
    /// reapply the same state.
    fn update_position(&self) {
        let Some(nodes) = self.nodes else { return };

        let monitor = self.ctx.scene.primary_monitor();
        let settings = self.ctx.settings.snapshot();
        let actors = self.ctx.scene.tracked_actors();
        let placement = compute_placement(&monitor, &settings, &actors);

        self.apply(nodes, &placement);
    }

    fn apply(&self, nodes: PanelNodes, placement: &Placement) {
        let scene = &self.ctx.scene;
        scene.set_position(nodes.panel, placement.x, placement.y);
        scene.set_size(nodes.panel, placement.width, placement.height);

        let vertical = placement.orientation.is_vertical();
        scene.set_vertical(nodes.panel, vertical);
        scene.set_vertical(nodes.dash_container, vertical);
        scene.set_vertical(nodes.topbar_container, vertical);

        let dock = &self.ctx.dock;
        dock.set_vertical(vertical);
        dock.set_max_size(placement.width, placement.height);
        dock.set_icon_size(placement.icon_size);

        debug!(
            x = placement.x,
            y = placement.y,
            width = placement.width,
            height = placement.height,
            vertical,
            icon_size = placement.icon_size,
            "applied panel placement"
        );
    }

    fn update_padding(&self) {
        let Some(nodes) = self.nodes else { return };

        let padding = self.ctx.settings.snapshot().panel_padding;
        self.ctx
            .scene
            .set_style(nodes.dash_container, &format!("padding: {padding}px;"));

        // Padding feeds the available-size computation.
        self.update_position();
    }

    fn toggle(&self) {
        let Some(nodes) = self.nodes else { return };
        let visible = self.ctx.scene.visible(nodes.panel);
        self.ctx.scene.set_visible(nodes.panel, !visible);
    }
}
