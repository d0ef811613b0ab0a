use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Screen edge the dash panel is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Edge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Layout direction of the panel and the boxes inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

impl Edge {
    /// Top/bottom panels lay out horizontally, side panels vertically.
    pub fn orientation(self) -> Orientation {
        match self {
            Edge::Top | Edge::Bottom => Orientation::Horizontal,
            Edge::Left | Edge::Right => Orientation::Vertical,
        }
    }

    pub fn is_vertical(self) -> bool {
        self.orientation().is_vertical()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Top => "TOP",
            Edge::Bottom => "BOTTOM",
            Edge::Left => "LEFT",
            Edge::Right => "RIGHT",
        }
    }
}

/// A `dash-position` value outside TOP/BOTTOM/LEFT/RIGHT. Malformed settings
/// are a caller error, not something the panel falls back from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown edge value: {0:?}")]
pub struct ParseEdgeError(pub String);

impl FromStr for Edge {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TOP" => Ok(Edge::Top),
            "BOTTOM" => Ok(Edge::Bottom),
            "LEFT" => Ok(Edge::Left),
            "RIGHT" => Ok(Edge::Right),
            other => Err(ParseEdgeError(other.to_string())),
        }
    }
}

/// Identifies which settings key a change signal refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    DashPosition,
    DashSize,
    IconSize,
    PanelPadding,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::DashPosition,
        SettingKey::DashSize,
        SettingKey::IconSize,
        SettingKey::PanelPadding,
    ];

    /// Parse from the schema key name (for change signals)
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "dash-position" => Some(Self::DashPosition),
            "dash-size" => Some(Self::DashSize),
            "icon-size" => Some(Self::IconSize),
            "panel-padding" => Some(Self::PanelPadding),
            _ => None,
        }
    }

    /// Schema key name
    pub fn key(&self) -> &'static str {
        match self {
            Self::DashPosition => "dash-position",
            Self::DashSize => "dash-size",
            Self::IconSize => "icon-size",
            Self::PanelPadding => "panel-padding",
        }
    }
}

/// Dash panel settings (settings.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DashSettings {
    #[serde(default)]
    pub dash_position: Edge,
    #[serde(default = "default_dash_size")]
    pub dash_size: i32,
    #[serde(default = "default_icon_size")]
    pub icon_size: i32,
    #[serde(default = "default_panel_padding")]
    pub panel_padding: i32,
}

fn default_dash_size() -> i32 {
    48
}

fn default_icon_size() -> i32 {
    40
}

fn default_panel_padding() -> i32 {
    4
}

impl Default for DashSettings {
    fn default() -> Self {
        Self {
            dash_position: Edge::Bottom,
            dash_size: default_dash_size(),
            icon_size: default_icon_size(),
            panel_padding: default_panel_padding(),
        }
    }
}

impl DashSettings {
    /// Get the default settings path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("perch/settings.json")
    }

    pub fn load(path: &Path) -> Self {
        std::fs::read(path)
            .ok()
            .and_then(|data| serde_json::from_slice(&data).ok())
            .unwrap_or_default()
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Invalid path"))?;
        std::fs::create_dir_all(dir)?;
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Save to the default settings path
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Set the edge from its schema string form ("TOP", "BOTTOM", ...)
    pub fn set_dash_position(&mut self, val: &str) -> Result<(), ParseEdgeError> {
        self.dash_position = val.parse()?;
        Ok(())
    }
}
