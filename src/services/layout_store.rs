//! Layout store.
//!
//! Single source of truth for dashboard layouts: the layout collection, the
//! active-layout pointer, the default grid configuration, and transient UI
//! state. Every mutating operation updates in-memory state synchronously,
//! writes a snapshot through the injected storage backend, then notifies
//! observers. Persistence is fire-and-forget: a failed write is logged and
//! never surfaced to the caller.
//!
//! Operating on an unknown layout or widget id is a silent no-op, except
//! where a return value is expected, in which case `None` signals failure.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::types::{
    GridConfig, GridPosition, Layout, LayoutMode, StoreSnapshot, Widget, WidgetKind, WidgetSize,
    WidgetUpdate,
};

use super::catalog;
use super::grid;
use super::ids::IdGenerator;
use super::storage::SnapshotStorage;

// =============================================================================
// Events
// =============================================================================

/// Change notification emitted after each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    LayoutCreated { layout_id: String },
    LayoutDeleted { layout_id: String },
    LayoutUpdated { layout_id: String },
    ActiveLayoutChanged { layout_id: Option<String> },
    WidgetAdded { layout_id: String, widget_id: String },
    WidgetRemoved { layout_id: String, widget_id: String },
    WidgetUpdated { layout_id: String, widget_id: String },
}

/// Observer handle returned by [`LayoutStore::subscribe`].
pub type SubscriberId = usize;

type Listener = Box<dyn Fn(&StoreEvent)>;

// =============================================================================
// Store
// =============================================================================

/// The layout store. See the module docs for its contracts.
pub struct LayoutStore {
    layouts: Vec<Layout>,
    active_layout_id: Option<String>,
    grid: GridConfig,
    edit_mode: bool,
    dragging: bool,
    selected_widget_id: Option<String>,
    ids: Box<dyn IdGenerator>,
    storage: Box<dyn SnapshotStorage>,
    listeners: Vec<Option<Listener>>,
}

impl LayoutStore {
    /// Create a store with the default 24x18 grid, restoring any saved snapshot.
    pub fn new(storage: Box<dyn SnapshotStorage>, ids: Box<dyn IdGenerator>) -> Self {
        Self::with_grid(storage, ids, GridConfig::default())
    }

    /// Create a store with an explicit default grid, restoring any saved snapshot.
    pub fn with_grid(
        storage: Box<dyn SnapshotStorage>,
        ids: Box<dyn IdGenerator>,
        grid: GridConfig,
    ) -> Self {
        let mut store = Self {
            layouts: Vec::new(),
            active_layout_id: None,
            grid,
            edit_mode: false,
            dragging: false,
            selected_widget_id: None,
            ids,
            storage,
            listeners: Vec::new(),
        };
        store.restore();
        store
    }

    /// Read the persisted snapshot once. A missing or malformed snapshot
    /// leaves the store empty; it never partially applies.
    fn restore(&mut self) {
        let bytes = match self.storage.load() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No layout snapshot found, starting empty");
                return;
            }
            Err(e) => {
                warn!("Failed to read layout snapshot: {}", e);
                return;
            }
        };
        match serde_json::from_slice::<StoreSnapshot>(&bytes) {
            Ok(snapshot) => {
                self.grid = snapshot.grid_config;
                self.active_layout_id = snapshot
                    .active_layout_id
                    .filter(|id| snapshot.layouts.iter().any(|l| &l.id == id))
                    .or_else(|| snapshot.layouts.first().map(|l| l.id.clone()));
                self.layouts = snapshot.layouts;
                info!("Restored {} layout(s) from snapshot", self.layouts.len());
            }
            Err(e) => warn!("Malformed layout snapshot, starting empty: {}", e),
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register a change observer. Observers run synchronously, after the
    /// snapshot write for the mutation that triggered them.
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + 'static) -> SubscriberId {
        self.listeners.push(Some(Box::new(listener)));
        self.listeners.len() - 1
    }

    /// Drop a previously registered observer. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        if let Some(slot) = self.listeners.get_mut(id) {
            *slot = None;
        }
    }

    fn notify(&self, event: &StoreEvent) {
        for listener in self.listeners.iter().flatten() {
            listener(event);
        }
    }

    /// Serialize `{layouts, activeLayoutId, gridConfig}` and hand it to the
    /// storage backend. Failures are logged and swallowed.
    fn persist(&self) {
        let snapshot = StoreSnapshot {
            layouts: self.layouts.clone(),
            active_layout_id: self.active_layout_id.clone(),
            grid_config: self.grid,
        };
        match serde_json::to_vec(&snapshot) {
            Ok(bytes) => {
                if let Err(e) = self.storage.save(&bytes) {
                    warn!("Failed to persist layout snapshot: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize layout snapshot: {}", e),
        }
    }

    fn commit(&mut self, event: StoreEvent) {
        self.persist();
        self.notify(&event);
    }

    // =========================================================================
    // Layout operations
    // =========================================================================

    /// Create a layout seeded with the mode's starter widgets, make it active,
    /// and return its id.
    pub fn create_layout(&mut self, name: &str, mode: LayoutMode) -> String {
        let layout_id = self.ids.next_id();
        let mut layout = Layout::new(layout_id.clone(), name, mode, self.grid);
        layout.widgets = self.starter_set(mode);
        self.layouts.push(layout);
        self.active_layout_id = Some(layout_id.clone());
        info!("Created layout {} ({} mode)", layout_id, mode);
        self.persist();
        self.notify(&StoreEvent::LayoutCreated {
            layout_id: layout_id.clone(),
        });
        self.notify(&StoreEvent::ActiveLayoutChanged {
            layout_id: Some(layout_id.clone()),
        });
        layout_id
    }

    /// Instantiate a mode's starter template with fresh widget ids.
    fn starter_set(&mut self, mode: LayoutMode) -> Vec<Widget> {
        catalog::starter_widgets(mode)
            .iter()
            .map(|s| catalog::instantiate(s.kind, self.ids.next_id(), s.position, Some(s.size)))
            .collect()
    }

    /// Delete a layout and all its widgets. Unknown ids are a silent no-op.
    /// If the deleted layout was active, the pointer falls back to the first
    /// remaining layout, or to none when the collection is empty.
    pub fn delete_layout(&mut self, id: &str) {
        let Some(index) = self.layouts.iter().position(|l| l.id == id) else {
            debug!("delete_layout: unknown layout {}", id);
            return;
        };
        let removed = self.layouts.remove(index);
        let clear_selection = match self.selected_widget_id.as_deref() {
            Some(selected) => removed.widgets.iter().any(|w| w.id == selected),
            None => false,
        };
        if clear_selection {
            self.selected_widget_id = None;
        }
        let active_changed = self.active_layout_id.as_deref() == Some(id);
        if active_changed {
            self.active_layout_id = self.layouts.first().map(|l| l.id.clone());
        }
        info!("Deleted layout {}", id);
        self.persist();
        self.notify(&StoreEvent::LayoutDeleted {
            layout_id: removed.id,
        });
        if active_changed {
            self.notify(&StoreEvent::ActiveLayoutChanged {
                layout_id: self.active_layout_id.clone(),
            });
        }
    }

    /// Deep-copy a layout under a new name: fresh ids and timestamps for the
    /// layout and every widget, `is_default` cleared. Returns the new id, or
    /// `None` when the source does not exist.
    pub fn duplicate_layout(&mut self, id: &str, new_name: &str) -> Option<String> {
        let mut copy = self.layouts.iter().find(|l| l.id == id)?.clone();
        let layout_id = self.ids.next_id();
        let now = Utc::now().timestamp_millis();
        copy.id = layout_id.clone();
        copy.name = new_name.to_string();
        copy.is_default = false;
        copy.created_at = now;
        copy.updated_at = now;
        for widget in &mut copy.widgets {
            widget.id = self.ids.next_id();
            widget.created_at = now;
            widget.updated_at = now;
        }
        self.layouts.push(copy);
        info!("Duplicated layout {} -> {}", id, layout_id);
        self.commit(StoreEvent::LayoutCreated {
            layout_id: layout_id.clone(),
        });
        Some(layout_id)
    }

    /// Point the store at a layout. No existence check; callers are expected
    /// to pass valid identifiers.
    pub fn set_active_layout(&mut self, id: &str) {
        self.active_layout_id = Some(id.to_string());
        self.commit(StoreEvent::ActiveLayoutChanged {
            layout_id: self.active_layout_id.clone(),
        });
    }

    /// Rename a layout. Unknown ids are a silent no-op.
    pub fn update_layout_name(&mut self, id: &str, name: &str) {
        let Some(layout) = self.layouts.iter_mut().find(|l| l.id == id) else {
            return;
        };
        layout.name = name.to_string();
        layout.touch();
        self.commit(StoreEvent::LayoutUpdated {
            layout_id: id.to_string(),
        });
    }

    /// Set or clear a layout's description. Unknown ids are a silent no-op.
    pub fn update_layout_description(&mut self, id: &str, description: Option<String>) {
        let Some(layout) = self.layouts.iter_mut().find(|l| l.id == id) else {
            return;
        };
        layout.description = description;
        layout.touch();
        self.commit(StoreEvent::LayoutUpdated {
            layout_id: id.to_string(),
        });
    }

    /// Replace a layout's tag set. Unknown ids are a silent no-op.
    pub fn update_layout_tags(&mut self, id: &str, tags: Vec<String>) {
        let Some(layout) = self.layouts.iter_mut().find(|l| l.id == id) else {
            return;
        };
        layout.tags = tags;
        layout.touch();
        self.commit(StoreEvent::LayoutUpdated {
            layout_id: id.to_string(),
        });
    }

    /// Mark one layout as the default, clearing the flag everywhere else.
    /// Unknown ids are a silent no-op.
    pub fn set_default_layout(&mut self, id: &str) {
        if !self.layouts.iter().any(|l| l.id == id) {
            return;
        }
        for layout in &mut self.layouts {
            let is_default = layout.id == id;
            if layout.is_default != is_default {
                layout.is_default = is_default;
                layout.touch();
            }
        }
        self.commit(StoreEvent::LayoutUpdated {
            layout_id: id.to_string(),
        });
    }

    /// Replace a layout's widgets with a fresh copy of its mode's starter set.
    pub fn reset_layout(&mut self, layout_id: &str) {
        let Some(index) = self.layouts.iter().position(|l| l.id == layout_id) else {
            return;
        };
        let mode = self.layouts[index].mode;
        let widgets = self.starter_set(mode);
        let layout = &mut self.layouts[index];
        let clear_selection = match self.selected_widget_id.as_deref() {
            Some(selected) => layout.widgets.iter().any(|w| w.id == selected),
            None => false,
        };
        if clear_selection {
            self.selected_widget_id = None;
        }
        layout.widgets = widgets;
        layout.touch();
        info!("Reset layout {} to its {} starter set", layout_id, mode);
        self.commit(StoreEvent::LayoutUpdated {
            layout_id: layout_id.to_string(),
        });
    }

    // =========================================================================
    // Widget operations
    // =========================================================================

    /// Add a widget of the given kind. With no explicit position the grid
    /// engine picks the first free slot for the kind's default size; `None`
    /// means the layout is unknown or no slot is available. An explicit
    /// position is clamped into the grid but not overlap-checked (see
    /// [`check_collision`](Self::check_collision)).
    pub fn add_widget(
        &mut self,
        layout_id: &str,
        kind: WidgetKind,
        position: Option<GridPosition>,
    ) -> Option<String> {
        let Some(layout) = self.layouts.iter_mut().find(|l| l.id == layout_id) else {
            debug!("add_widget: unknown layout {}", layout_id);
            return None;
        };
        let spec = catalog::spec(kind);
        let position = match position {
            Some(explicit) => grid::clamp_position(explicit, spec.size, layout.grid),
            None => match grid::first_free_position(layout.grid, &layout.widgets, spec.size) {
                Some(pos) => pos,
                None => {
                    debug!("add_widget: no space for {} in layout {}", kind, layout_id);
                    return None;
                }
            },
        };
        let widget_id = self.ids.next_id();
        layout
            .widgets
            .push(catalog::instantiate(kind, widget_id.clone(), position, None));
        layout.touch();
        info!(
            "Added {} widget {} to layout {} at ({}, {})",
            kind, widget_id, layout_id, position.x, position.y
        );
        self.commit(StoreEvent::WidgetAdded {
            layout_id: layout_id.to_string(),
            widget_id: widget_id.clone(),
        });
        Some(widget_id)
    }

    /// Remove a widget. Unknown layout or widget ids are a silent no-op.
    /// Clears the widget selection if it pointed at the removed widget.
    pub fn remove_widget(&mut self, layout_id: &str, widget_id: &str) {
        let Some(layout) = self.layouts.iter_mut().find(|l| l.id == layout_id) else {
            return;
        };
        let Some(index) = layout.widgets.iter().position(|w| w.id == widget_id) else {
            debug!(
                "remove_widget: unknown widget {} in layout {}",
                widget_id, layout_id
            );
            return;
        };
        layout.widgets.remove(index);
        layout.touch();
        if self.selected_widget_id.as_deref() == Some(widget_id) {
            self.selected_widget_id = None;
        }
        self.commit(StoreEvent::WidgetRemoved {
            layout_id: layout_id.to_string(),
            widget_id: widget_id.to_string(),
        });
    }

    /// Merge a partial update into a widget and refresh its timestamp. The
    /// resulting rectangle is clamped to the widget's size bounds and the
    /// grid extents. Unknown ids are a silent no-op.
    pub fn update_widget(&mut self, layout_id: &str, widget_id: &str, update: WidgetUpdate) {
        let Some(layout) = self.layouts.iter_mut().find(|l| l.id == layout_id) else {
            return;
        };
        let grid_config = layout.grid;
        let Some(widget) = layout.widget_mut(widget_id) else {
            return;
        };
        update.apply_to(widget);
        widget.size = grid::clamp_size(widget.size, widget.min_size, widget.max_size, grid_config);
        widget.position = grid::clamp_position(widget.position, widget.size, grid_config);
        layout.touch();
        self.commit(StoreEvent::WidgetUpdated {
            layout_id: layout_id.to_string(),
            widget_id: widget_id.to_string(),
        });
    }

    /// Move a widget to an explicit cell. Clamped into the grid; overlap is
    /// not checked here. Callers validate drags with `check_collision`.
    pub fn move_widget(&mut self, layout_id: &str, widget_id: &str, position: GridPosition) {
        self.update_widget(
            layout_id,
            widget_id,
            WidgetUpdate {
                position: Some(position),
                ..WidgetUpdate::default()
            },
        );
    }

    /// Resize a widget, honoring its min/max bounds and the grid extents.
    pub fn resize_widget(&mut self, layout_id: &str, widget_id: &str, size: WidgetSize) {
        self.update_widget(
            layout_id,
            widget_id,
            WidgetUpdate {
                size: Some(size),
                ..WidgetUpdate::default()
            },
        );
    }

    /// Flip a widget's visibility flag.
    pub fn toggle_widget_visibility(&mut self, layout_id: &str, widget_id: &str) {
        let Some(visible) = self
            .layout(layout_id)
            .and_then(|l| l.widget(widget_id))
            .map(|w| w.visible)
        else {
            return;
        };
        self.update_widget(
            layout_id,
            widget_id,
            WidgetUpdate {
                visible: Some(!visible),
                ..WidgetUpdate::default()
            },
        );
    }

    /// Set a widget's locked flag. Locking is a UI-level contract; the store
    /// itself still moves locked widgets when asked to.
    pub fn set_widget_locked(&mut self, layout_id: &str, widget_id: &str, locked: bool) {
        self.update_widget(
            layout_id,
            widget_id,
            WidgetUpdate {
                locked: Some(locked),
                ..WidgetUpdate::default()
            },
        );
    }

    /// Deterministically repack all of a layout's widgets in their current
    /// iteration order into a row-major tiling.
    pub fn auto_arrange_widgets(&mut self, layout_id: &str) {
        let Some(layout) = self.layouts.iter_mut().find(|l| l.id == layout_id) else {
            return;
        };
        let positions = grid::row_major_arrangement(layout.grid, &layout.widgets);
        for (widget, position) in layout.widgets.iter_mut().zip(positions) {
            if widget.position != position {
                widget.position = position;
                widget.touch();
            }
        }
        layout.touch();
        info!(
            "Auto-arranged {} widget(s) in layout {}",
            layout.widgets.len(),
            layout_id
        );
        self.commit(StoreEvent::LayoutUpdated {
            layout_id: layout_id.to_string(),
        });
    }

    // =========================================================================
    // Placement queries
    // =========================================================================

    /// First free slot for a rectangle of the given size, scanning row-major.
    /// `None` when the layout is unknown or the grid has no room.
    pub fn optimal_position(&self, layout_id: &str, size: WidgetSize) -> Option<GridPosition> {
        let layout = self.layout(layout_id)?;
        grid::first_free_position(layout.grid, &layout.widgets, size)
    }

    /// Whether a rectangle would overlap any widget in the layout other than
    /// `widget_id` itself.
    pub fn check_collision(
        &self,
        layout_id: &str,
        widget_id: &str,
        position: GridPosition,
        size: WidgetSize,
    ) -> bool {
        let Some(layout) = self.layout(layout_id) else {
            return false;
        };
        grid::collides_with_any(&layout.widgets, Some(widget_id), position, size)
    }

    // =========================================================================
    // Export / import
    // =========================================================================

    /// Serialize one layout (with all its widgets) to pretty JSON.
    pub fn export_layout(&self, id: &str) -> Option<String> {
        let layout = self.layout(id)?;
        match serde_json::to_string_pretty(layout) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Failed to export layout {}: {}", id, e);
                None
            }
        }
    }

    /// Import a layout from its exported JSON form. The layout and every
    /// widget receive brand-new ids and timestamps so they cannot collide
    /// with existing data; `is_default` is cleared. Malformed input is
    /// rejected without mutating the store.
    pub fn import_layout(&mut self, text: &str) -> Result<String> {
        let mut layout: Layout = serde_json::from_str(text).map_err(|e| {
            warn!("Rejected malformed layout import: {}", e);
            StoreError::MalformedImport(e.to_string())
        })?;
        let now = Utc::now().timestamp_millis();
        layout.id = self.ids.next_id();
        layout.is_default = false;
        layout.created_at = now;
        layout.updated_at = now;
        for widget in &mut layout.widgets {
            widget.id = self.ids.next_id();
            widget.created_at = now;
            widget.updated_at = now;
        }
        let layout_id = layout.id.clone();
        self.layouts.push(layout);
        info!("Imported layout {}", layout_id);
        self.commit(StoreEvent::LayoutCreated {
            layout_id: layout_id.clone(),
        });
        Ok(layout_id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn layout(&self, id: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.id == id)
    }

    pub fn active_layout_id(&self) -> Option<&str> {
        self.active_layout_id.as_deref()
    }

    pub fn active_layout(&self) -> Option<&Layout> {
        self.layout(self.active_layout_id.as_deref()?)
    }

    /// Default grid configuration for new layouts.
    pub fn grid_config(&self) -> GridConfig {
        self.grid
    }

    pub fn widget(&self, layout_id: &str, widget_id: &str) -> Option<&Widget> {
        self.layout(layout_id)?.widget(widget_id)
    }

    // =========================================================================
    // Transient UI state
    // =========================================================================
    //
    // Not part of the persisted snapshot; changing it fires no events.

    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_dragging(&mut self, on: bool) {
        self.dragging = on;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Select a widget (or clear the selection with `None`).
    pub fn select_widget(&mut self, widget_id: Option<&str>) {
        self.selected_widget_id = widget_id.map(str::to_string);
    }

    pub fn selected_widget_id(&self) -> Option<&str> {
        self.selected_widget_id.as_deref()
    }
}
