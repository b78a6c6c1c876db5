use crate::{
    foundation::core::{Point, Rect},
    grid::geometry::GridGeometry,
};

/// What happens to pointers that land on the container edge or outside the tiled cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// The container is closed on its far edges and the column/row are clamped to the last
    /// cell, so the untiled strip of a fixed grid maps onto the nearest edge cell.
    Clamp,
    /// The container is half-open and the column/row must lie inside the grid; anything
    /// else resolves to no cell.
    #[default]
    Reject,
}

/// Map a viewport-space pointer position to a cell index.
///
/// `bounds` is the container's current bounding box in viewport space.
pub fn resolve_cell(
    pointer: Point,
    bounds: Rect,
    geometry: &GridGeometry,
    policy: BoundaryPolicy,
) -> Option<usize> {
    if !(pointer.x.is_finite() && pointer.y.is_finite()) {
        return None;
    }
    let bounds = bounds.abs();
    let x = pointer.x - bounds.x0;
    let y = pointer.y - bounds.y0;
    let (w, h) = (bounds.width(), bounds.height());

    if x < 0.0 || y < 0.0 {
        return None;
    }
    let outside = match policy {
        BoundaryPolicy::Clamp => x > w || y > h,
        BoundaryPolicy::Reject => x >= w || y >= h,
    };
    if outside {
        return None;
    }

    let col = (x / geometry.cell_width).floor() as usize;
    let row = (y / geometry.cell_height).floor() as usize;
    let (col, row) = match policy {
        BoundaryPolicy::Clamp => (
            col.min(geometry.columns.saturating_sub(1)),
            row.min(geometry.rows.saturating_sub(1)),
        ),
        BoundaryPolicy::Reject => (col, row),
    };
    geometry.index_of(col, row)
}

#[cfg(test)]
#[path = "../../tests/unit/grid/resolver.rs"]
mod tests;
