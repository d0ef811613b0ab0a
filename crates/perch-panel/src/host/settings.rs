use std::cell::{Cell, RefCell};
use std::path::PathBuf;

use ahash::AHashMap;
use parking_lot::RwLock;
use tracing::warn;

use perch_core::{DashSettings, Edge, SettingKey};

use super::{HandlerId, SignalCallback};

/// Read surface of the settings store the panel consumes: point-in-time
/// snapshots plus per-key change signals.
pub trait SettingsStore {
    fn snapshot(&self) -> DashSettings;

    fn connect_changed(&self, key: SettingKey, callback: SignalCallback) -> HandlerId;
    fn disconnect(&self, handler: HandlerId);
}

/// File-backed settings store with synchronous per-key change signals.
///
/// Loads permissively at construction (missing or malformed file falls back
/// to defaults), persists best-effort on every setter, and fires the
/// affected key's subscribers before the setter returns.
pub struct JsonSettingsStore {
    path: PathBuf,
    values: RwLock<DashSettings>,
    subscribers: RefCell<AHashMap<HandlerId, (SettingKey, SignalCallback)>>,
    next_handler: Cell<u64>,
}

impl JsonSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        let values = DashSettings::load(&path);
        Self {
            path,
            values: RwLock::new(values),
            subscribers: RefCell::new(AHashMap::new()),
            next_handler: Cell::new(1),
        }
    }

    pub fn from_default_path() -> Self {
        Self::new(DashSettings::default_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Number of currently connected change handlers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn set_dash_position(&self, edge: Edge) {
        self.values.write().dash_position = edge;
        self.commit(SettingKey::DashPosition);
    }

    pub fn set_dash_size(&self, size: i32) {
        self.values.write().dash_size = size;
        self.commit(SettingKey::DashSize);
    }

    pub fn set_icon_size(&self, size: i32) {
        self.values.write().icon_size = size;
        self.commit(SettingKey::IconSize);
    }

    pub fn set_panel_padding(&self, padding: i32) {
        self.values.write().panel_padding = padding;
        self.commit(SettingKey::PanelPadding);
    }

    fn commit(&self, key: SettingKey) {
        let snapshot = self.values.read().clone();
        if let Err(err) = snapshot.save_to(&self.path) {
            warn!("failed to persist settings to {}: {err:#}", self.path.display());
        }
        self.emit(key);
    }

    fn emit(&self, key: SettingKey) {
        // Subscribers may read the store again; keep the registry
        // unborrowed while they run.
        let mut active = self.subscribers.take();
        for (subscribed, callback) in active.values_mut() {
            if *subscribed == key {
                callback();
            }
        }
        // Handlers connected mid-dispatch landed in the cell; fold them in.
        let added = self.subscribers.take();
        active.extend(added);
        self.subscribers.replace(active);
    }
}

impl SettingsStore for JsonSettingsStore {
    fn snapshot(&self) -> DashSettings {
        self.values.read().clone()
    }

    fn connect_changed(&self, key: SettingKey, callback: SignalCallback) -> HandlerId {
        let handler = HandlerId(self.next_handler.get());
        self.next_handler.set(handler.0 + 1);
        self.subscribers.borrow_mut().insert(handler, (key, callback));
        handler
    }

    fn disconnect(&self, handler: HandlerId) {
        self.subscribers.borrow_mut().remove(&handler);
    }
}
