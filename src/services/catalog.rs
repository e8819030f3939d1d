//! Widget catalog.
//!
//! Maps each widget kind to its default title, size, and resize bounds, and
//! holds the starter widget templates for each layout mode. Pure lookup
//! tables; no state.

use crate::types::{
    ExperienceLevel, GridPosition, LayoutMode, Widget, WidgetKind, WidgetSize,
};

/// Catalog entry describing how a widget kind is instantiated by default.
#[derive(Debug, Clone, Copy)]
pub struct WidgetSpec {
    pub kind: WidgetKind,
    pub title: &'static str,
    pub size: WidgetSize,
    pub min_size: WidgetSize,
    pub max_size: WidgetSize,
    pub experience: ExperienceLevel,
}

/// Look up the catalog entry for a widget kind.
pub fn spec(kind: WidgetKind) -> WidgetSpec {
    match kind {
        WidgetKind::PriceChart => WidgetSpec {
            kind,
            title: "Price Chart",
            size: WidgetSize { width: 12, height: 8 },
            min_size: WidgetSize { width: 6, height: 4 },
            max_size: WidgetSize { width: 24, height: 12 },
            experience: ExperienceLevel::Beginner,
        },
        WidgetKind::DataTable => WidgetSpec {
            kind,
            title: "Market Table",
            size: WidgetSize { width: 12, height: 8 },
            min_size: WidgetSize { width: 8, height: 4 },
            max_size: WidgetSize { width: 24, height: 18 },
            experience: ExperienceLevel::Intermediate,
        },
        WidgetKind::Scorecard => WidgetSpec {
            kind,
            title: "Scorecard",
            size: WidgetSize { width: 6, height: 4 },
            min_size: WidgetSize { width: 4, height: 3 },
            max_size: WidgetSize { width: 12, height: 6 },
            experience: ExperienceLevel::Beginner,
        },
        WidgetKind::Watchlist => WidgetSpec {
            kind,
            title: "Watchlist",
            size: WidgetSize { width: 6, height: 8 },
            min_size: WidgetSize { width: 4, height: 4 },
            max_size: WidgetSize { width: 8, height: 18 },
            experience: ExperienceLevel::Beginner,
        },
        WidgetKind::NewsSentiment => WidgetSpec {
            kind,
            title: "News & Sentiment",
            size: WidgetSize { width: 8, height: 6 },
            min_size: WidgetSize { width: 6, height: 4 },
            max_size: WidgetSize { width: 12, height: 10 },
            experience: ExperienceLevel::Beginner,
        },
        WidgetKind::PredictionBoard => WidgetSpec {
            kind,
            title: "Prediction Board",
            size: WidgetSize { width: 12, height: 8 },
            min_size: WidgetSize { width: 8, height: 6 },
            max_size: WidgetSize { width: 24, height: 12 },
            experience: ExperienceLevel::Advanced,
        },
        WidgetKind::RankingTable => WidgetSpec {
            kind,
            title: "Rankings",
            size: WidgetSize { width: 8, height: 8 },
            min_size: WidgetSize { width: 6, height: 4 },
            max_size: WidgetSize { width: 12, height: 18 },
            experience: ExperienceLevel::Intermediate,
        },
        WidgetKind::MarketHeatmap => WidgetSpec {
            kind,
            title: "Market Heatmap",
            size: WidgetSize { width: 12, height: 6 },
            min_size: WidgetSize { width: 8, height: 4 },
            max_size: WidgetSize { width: 24, height: 12 },
            experience: ExperienceLevel::Intermediate,
        },
        WidgetKind::PortfolioSummary => WidgetSpec {
            kind,
            title: "Portfolio Summary",
            size: WidgetSize { width: 8, height: 4 },
            min_size: WidgetSize { width: 6, height: 3 },
            max_size: WidgetSize { width: 12, height: 8 },
            experience: ExperienceLevel::Beginner,
        },
        WidgetKind::AlertsFeed => WidgetSpec {
            kind,
            title: "Alerts",
            size: WidgetSize { width: 6, height: 6 },
            min_size: WidgetSize { width: 4, height: 4 },
            max_size: WidgetSize { width: 8, height: 12 },
            experience: ExperienceLevel::Intermediate,
        },
    }
}

/// Default display title for a widget kind.
pub fn default_title(kind: WidgetKind) -> &'static str {
    spec(kind).title
}

/// Instantiate a widget of the given kind with catalog defaults.
///
/// `size` overrides the catalog default (starter templates pin their own
/// sizes); min/max bounds and the experience tag always come from the catalog.
pub fn instantiate(
    kind: WidgetKind,
    id: String,
    position: GridPosition,
    size: Option<WidgetSize>,
) -> Widget {
    let spec = spec(kind);
    let mut widget = Widget::new(id, kind, spec.title, size.unwrap_or(spec.size), position);
    widget.min_size = Some(spec.min_size);
    widget.max_size = Some(spec.max_size);
    widget.experience = spec.experience;
    widget
}

// =============================================================================
// Mode starter templates
// =============================================================================

/// One entry of a mode's starter template.
#[derive(Debug, Clone, Copy)]
pub struct StarterWidget {
    pub kind: WidgetKind,
    pub position: GridPosition,
    pub size: WidgetSize,
}

const fn starter(kind: WidgetKind, x: u16, y: u16, width: u16, height: u16) -> StarterWidget {
    StarterWidget {
        kind,
        position: GridPosition { x, y },
        size: WidgetSize { width, height },
    }
}

/// Light mode: a compact four-widget board.
const LIGHT_STARTERS: &[StarterWidget] = &[
    starter(WidgetKind::PriceChart, 0, 0, 12, 8),
    starter(WidgetKind::Watchlist, 12, 0, 6, 8),
    starter(WidgetKind::Scorecard, 18, 0, 6, 4),
    starter(WidgetKind::NewsSentiment, 0, 8, 12, 6),
];

/// Pro mode: the full analytics board.
const PRO_STARTERS: &[StarterWidget] = &[
    starter(WidgetKind::PriceChart, 0, 0, 12, 8),
    starter(WidgetKind::DataTable, 12, 0, 12, 8),
    starter(WidgetKind::PredictionBoard, 0, 8, 12, 8),
    starter(WidgetKind::RankingTable, 12, 8, 8, 8),
    starter(WidgetKind::Scorecard, 20, 8, 4, 4),
    starter(WidgetKind::AlertsFeed, 20, 12, 4, 6),
];

/// Ordered starter widget set for a layout mode.
pub fn starter_widgets(mode: LayoutMode) -> &'static [StarterWidget] {
    match mode {
        LayoutMode::Light => LIGHT_STARTERS,
        LayoutMode::Pro => PRO_STARTERS,
    }
}
