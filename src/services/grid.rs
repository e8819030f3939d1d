//! Grid placement engine.
//!
//! Pure geometry over a layout's fixed column×row grid: half-open rectangle
//! overlap, bounds checks, first-fit slot search, and the deterministic
//! row-major tiling used by auto-arrange. The naive scans are O(rows ×
//! columns × widgets), which is fine for the 24×18 grids this runs on.

use crate::types::{GridConfig, GridPosition, Widget, WidgetSize};

/// Half-open rectangle overlap test. Touching edges do not count as overlap.
/// Arithmetic is widened so caller-supplied coordinates near `u16::MAX`
/// cannot wrap.
pub fn rects_overlap(
    a_pos: GridPosition,
    a_size: WidgetSize,
    b_pos: GridPosition,
    b_size: WidgetSize,
) -> bool {
    (a_pos.x as u32) < b_pos.x as u32 + b_size.width as u32
        && a_pos.x as u32 + a_size.width as u32 > b_pos.x as u32
        && (a_pos.y as u32) < b_pos.y as u32 + b_size.height as u32
        && a_pos.y as u32 + a_size.height as u32 > b_pos.y as u32
}

/// Whether the rectangle lies entirely within `[0, columns) x [0, rows)`.
pub fn within_bounds(pos: GridPosition, size: WidgetSize, grid: GridConfig) -> bool {
    pos.x as u32 + size.width as u32 <= grid.columns as u32
        && pos.y as u32 + size.height as u32 <= grid.rows as u32
}

/// Clamp a rectangle's origin so the rectangle lies within the grid.
/// Rectangles larger than the grid are pinned to the origin on that axis.
pub fn clamp_position(pos: GridPosition, size: WidgetSize, grid: GridConfig) -> GridPosition {
    GridPosition {
        x: pos.x.min(grid.columns.saturating_sub(size.width)),
        y: pos.y.min(grid.rows.saturating_sub(size.height)),
    }
}

/// Clamp a size to the widget's min/max bounds and the grid extents.
pub fn clamp_size(
    size: WidgetSize,
    min: Option<WidgetSize>,
    max: Option<WidgetSize>,
    grid: GridConfig,
) -> WidgetSize {
    let min = min.unwrap_or(WidgetSize { width: 1, height: 1 });
    let max = max.unwrap_or(WidgetSize {
        width: grid.columns,
        height: grid.rows,
    });
    WidgetSize {
        width: size
            .width
            .max(1)
            .max(min.width)
            .min(max.width)
            .min(grid.columns),
        height: size
            .height
            .max(1)
            .max(min.height)
            .min(max.height)
            .min(grid.rows),
    }
}

/// Whether the rectangle overlaps any widget other than `exclude_id`.
pub fn collides_with_any(
    widgets: &[Widget],
    exclude_id: Option<&str>,
    pos: GridPosition,
    size: WidgetSize,
) -> bool {
    widgets
        .iter()
        .filter(|w| exclude_id != Some(w.id.as_str()))
        .any(|w| rects_overlap(pos, size, w.position, w.size))
}

/// First-fit search: scan candidate top-left cells in row-major order
/// (`y` outer, `x` inner) and return the first cell whose full rectangle is
/// free of every existing widget. `None` when no slot exists.
pub fn first_free_position(
    grid: GridConfig,
    widgets: &[Widget],
    size: WidgetSize,
) -> Option<GridPosition> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    if size.width > grid.columns || size.height > grid.rows {
        return None;
    }
    for y in 0..=(grid.rows - size.height) {
        for x in 0..=(grid.columns - size.width) {
            let pos = GridPosition { x, y };
            if !collides_with_any(widgets, None, pos, size) {
                return Some(pos);
            }
        }
    }
    None
}

/// Deterministic row-major tiling of widgets in iteration order.
///
/// For the widget at index `i` with size `w`×`h`: `cols = columns / w` widgets
/// fit per row, `x = (i % cols) * w` (pulled back so the widget never extends
/// past the last column), `y = (i / cols) * h`. A simple tiling, not a packer;
/// wasted space is expected with mixed sizes.
pub fn row_major_arrangement(grid: GridConfig, widgets: &[Widget]) -> Vec<GridPosition> {
    widgets
        .iter()
        .enumerate()
        .map(|(i, widget)| {
            let w = widget.size.width.max(1);
            let h = widget.size.height.max(1);
            let cols = (grid.columns / w).max(1) as usize;
            let x = ((i % cols) as u16 * w).min(grid.columns.saturating_sub(w));
            let y = (i / cols) as u16 * h;
            GridPosition { x, y }
        })
        .collect()
}
