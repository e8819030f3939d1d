//! Persisted store record.

use serde::{Deserialize, Serialize};

use super::layout::{GridConfig, Layout};

/// Everything needed to resume a dashboard session: the layout collection,
/// the active-layout pointer, and the default grid configuration.
///
/// Written to durable storage after every mutating store operation and read
/// once at store construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub layouts: Vec<Layout>,
    #[serde(default)]
    pub active_layout_id: Option<String>,
    #[serde(default)]
    pub grid_config: GridConfig,
}
