//! Layout types for the dashboard grid.

use serde::{Deserialize, Serialize};

use super::widget::Widget;

/// Grid dimensions a layout's widgets are placed against.
///
/// Fixed for the lifetime of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    /// Number of columns in the grid.
    #[serde(default = "default_columns")]
    pub columns: u16,
    /// Number of rows in the grid.
    #[serde(default = "default_rows")]
    pub rows: u16,
}

fn default_columns() -> u16 {
    24
}

fn default_rows() -> u16 {
    18
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
        }
    }
}

/// Top-left cell coordinate of a widget rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u16,
    pub y: u16,
}

impl GridPosition {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Operating mode that determines a layout's starter widget set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Compact starter set for casual users.
    Light,
    /// Full starter set for power users.
    Pro,
}

impl LayoutMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(LayoutMode::Light),
            "pro" => Some(LayoutMode::Pro),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Light => "light",
            LayoutMode::Pro => "pro",
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named, independently persisted arrangement of widgets on a fixed-size grid.
///
/// A layout exclusively owns its widgets; deleting a layout discards them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Unique layout identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unordered tag set.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Mode the layout was created with (drives reset behavior).
    pub mode: LayoutMode,
    /// Grid dimensions widgets are placed against.
    #[serde(default)]
    pub grid: GridConfig,
    /// Widgets owned by this layout.
    #[serde(default)]
    pub widgets: Vec<Widget>,
    /// Whether this is the user's default layout.
    #[serde(default)]
    pub is_default: bool,
    /// Creation timestamp (ms since epoch).
    pub created_at: i64,
    /// Last update timestamp (ms since epoch).
    pub updated_at: i64,
}

impl Layout {
    /// Create an empty layout with fresh timestamps.
    pub fn new(id: String, name: &str, mode: LayoutMode, grid: GridConfig) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id,
            name: name.to_string(),
            description: None,
            tags: Vec::new(),
            mode,
            grid,
            widgets: Vec::new(),
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the timestamp to now.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }

    /// Look up a widget by id.
    pub fn widget(&self, widget_id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == widget_id)
    }

    /// Look up a widget by id, mutably.
    pub fn widget_mut(&mut self, widget_id: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == widget_id)
    }
}
