//! Widget types.
//!
//! A widget is a single positioned, sized, configurable panel of a fixed kind,
//! owned by exactly one layout.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::layout::GridPosition;

// =============================================================================
// Enums
// =============================================================================

/// The closed set of panel kinds the dashboard can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    /// Interactive price chart with indicator overlays.
    PriceChart,
    /// Sortable market data table.
    DataTable,
    /// Single-metric KPI scorecard.
    Scorecard,
    /// User watchlist with live quotes.
    Watchlist,
    /// News feed with sentiment badges.
    NewsSentiment,
    /// Prediction contest board.
    PredictionBoard,
    /// Trader/asset ranking table.
    RankingTable,
    /// Sector/market heatmap.
    MarketHeatmap,
    /// Portfolio value and allocation summary.
    PortfolioSummary,
    /// Triggered price/volume alerts.
    AlertsFeed,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::PriceChart => "price-chart",
            WidgetKind::DataTable => "data-table",
            WidgetKind::Scorecard => "scorecard",
            WidgetKind::Watchlist => "watchlist",
            WidgetKind::NewsSentiment => "news-sentiment",
            WidgetKind::PredictionBoard => "prediction-board",
            WidgetKind::RankingTable => "ranking-table",
            WidgetKind::MarketHeatmap => "market-heatmap",
            WidgetKind::PortfolioSummary => "portfolio-summary",
            WidgetKind::AlertsFeed => "alerts-feed",
        }
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Intended audience for a widget. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

// =============================================================================
// Core Structs
// =============================================================================

/// Widget footprint in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSize {
    pub width: u16,
    pub height: u16,
}

impl WidgetSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A single dashboard panel: kind, title, rectangle, and free-form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    /// Globally unique widget identifier.
    pub id: String,
    /// Panel kind.
    pub kind: WidgetKind,
    /// Display title.
    pub title: String,
    /// Current size in grid cells.
    pub size: WidgetSize,
    /// Smallest allowed size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<WidgetSize>,
    /// Largest allowed size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<WidgetSize>,
    /// Top-left cell coordinate.
    pub position: GridPosition,
    /// Free-form configuration (refresh interval, theme, feature flags).
    #[serde(default)]
    pub config: HashMap<String, serde_json::Value>,
    /// Hidden widgets keep their rectangle but are not rendered.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Locked widgets are exempt from drag/auto-arrange in the UI layer.
    /// The store itself does not enforce this.
    #[serde(default)]
    pub locked: bool,
    /// Audience tag.
    #[serde(default = "default_experience")]
    pub experience: ExperienceLevel,
    /// Creation timestamp (ms since epoch).
    pub created_at: i64,
    /// Last update timestamp (ms since epoch).
    pub updated_at: i64,
}

fn default_visible() -> bool {
    true
}

fn default_experience() -> ExperienceLevel {
    ExperienceLevel::Beginner
}

impl Widget {
    /// Create a widget with fresh timestamps and empty configuration.
    pub fn new(
        id: String,
        kind: WidgetKind,
        title: &str,
        size: WidgetSize,
        position: GridPosition,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id,
            kind,
            title: title.to_string(),
            size,
            min_size: None,
            max_size: None,
            position,
            config: HashMap::new(),
            visible: default_visible(),
            locked: false,
            experience: default_experience(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the timestamp to now.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}

/// Partial widget update; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<WidgetSize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<GridPosition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<HashMap<String, serde_json::Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceLevel>,
}

impl WidgetUpdate {
    /// Merge the set fields into a widget and refresh its update timestamp.
    pub fn apply_to(&self, widget: &mut Widget) {
        if let Some(ref title) = self.title {
            widget.title = title.clone();
        }
        if let Some(size) = self.size {
            widget.size = size;
        }
        if let Some(position) = self.position {
            widget.position = position;
        }
        if let Some(ref config) = self.config {
            widget.config = config.clone();
        }
        if let Some(visible) = self.visible {
            widget.visible = visible;
        }
        if let Some(locked) = self.locked {
            widget.locked = locked;
        }
        if let Some(experience) = self.experience {
            widget.experience = experience;
        }
        widget.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_widget() -> Widget {
        Widget::new(
            "widget-1".to_string(),
            WidgetKind::PriceChart,
            "Price Chart",
            WidgetSize::new(12, 8),
            GridPosition::new(0, 0),
        )
    }

    // =========================================================================
    // WidgetKind Tests
    // =========================================================================

    #[test]
    fn test_widget_kind_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&WidgetKind::PriceChart).unwrap(),
            "\"price-chart\""
        );
        let kind: WidgetKind = serde_json::from_str("\"news-sentiment\"").unwrap();
        assert_eq!(kind, WidgetKind::NewsSentiment);
    }

    #[test]
    fn test_widget_kind_unknown_is_rejected() {
        let parsed: Result<WidgetKind, _> = serde_json::from_str("\"mystery-panel\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_widget_kind_display_matches_serde() {
        let json = serde_json::to_string(&WidgetKind::RankingTable).unwrap();
        assert_eq!(json, format!("\"{}\"", WidgetKind::RankingTable));
    }

    // =========================================================================
    // Widget Tests
    // =========================================================================

    #[test]
    fn test_widget_new_defaults() {
        let widget = sample_widget();
        assert!(widget.visible);
        assert!(!widget.locked);
        assert!(widget.config.is_empty());
        assert_eq!(widget.experience, ExperienceLevel::Beginner);
    }

    #[test]
    fn test_widget_serde_defaults_on_missing_fields() {
        // Older snapshots may predate the visible/locked/config fields.
        let json = r#"{
            "id": "widget-1",
            "kind": "watchlist",
            "title": "Watchlist",
            "size": {"width": 6, "height": 8},
            "position": {"x": 0, "y": 0},
            "createdAt": 1,
            "updatedAt": 1
        }"#;
        let widget: Widget = serde_json::from_str(json).unwrap();
        assert!(widget.visible);
        assert!(!widget.locked);
        assert!(widget.config.is_empty());
        assert_eq!(widget.experience, ExperienceLevel::Beginner);
    }

    // =========================================================================
    // WidgetUpdate Tests
    // =========================================================================

    #[test]
    fn test_widget_update_applies_only_set_fields() {
        let mut widget = sample_widget();
        widget.updated_at = 0;

        let update = WidgetUpdate {
            title: Some("Renamed".to_string()),
            locked: Some(true),
            ..WidgetUpdate::default()
        };
        update.apply_to(&mut widget);

        assert_eq!(widget.title, "Renamed");
        assert!(widget.locked);
        assert_eq!(widget.size, WidgetSize::new(12, 8));
        assert_eq!(widget.position, GridPosition::new(0, 0));
        assert!(widget.updated_at > 0);
    }

    #[test]
    fn test_widget_update_replaces_config_wholesale() {
        let mut widget = sample_widget();
        widget
            .config
            .insert("theme".to_string(), serde_json::json!("dark"));

        let mut config = HashMap::new();
        config.insert("refreshInterval".to_string(), serde_json::json!(30));
        let update = WidgetUpdate {
            config: Some(config),
            ..WidgetUpdate::default()
        };
        update.apply_to(&mut widget);

        assert!(!widget.config.contains_key("theme"));
        assert_eq!(
            widget.config.get("refreshInterval"),
            Some(&serde_json::json!(30))
        );
    }
}
