use crate::foundation::{
    core::{Point, Rect, Size},
    error::{GridFxError, GridFxResult},
    math::floor_div,
};

/// How cell dimensions relate to the configured cell size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingPolicy {
    /// Cells stretch so the grid tiles the container exactly (`cell_size` is a minimum).
    #[default]
    Fit,
    /// Cells are exactly `cell_size` square; the grid may leave an untiled remainder.
    Fixed,
}

/// Inputs to [`compute_grid`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridSpec {
    pub cell_size: f64,
    #[serde(default)]
    pub policy: SizingPolicy,
    /// Containers narrower or shorter than this are treated as not laid out yet.
    #[serde(default = "default_min_ready_px")]
    pub min_ready_px: f64,
}

/// Smallest accepted `cell_size`, in pixels.
pub const MIN_CELL_SIZE: f64 = 1.0;

/// Upper bound on `columns * rows` for a single container.
pub const MAX_CELLS: usize = 1 << 20;

fn default_min_ready_px() -> f64 {
    10.0
}

impl GridSpec {
    pub fn new(cell_size: f64, policy: SizingPolicy) -> Self {
        Self {
            cell_size,
            policy,
            min_ready_px: default_min_ready_px(),
        }
    }

    pub fn validate(&self) -> GridFxResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size >= MIN_CELL_SIZE) {
            return Err(GridFxError::validation(format!(
                "grid cell_size must be finite and >= {MIN_CELL_SIZE}px"
            )));
        }
        if !(self.min_ready_px.is_finite() && self.min_ready_px >= 0.0) {
            return Err(GridFxError::validation(
                "grid min_ready_px must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Rectangular cell layout for one container measurement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub policy: SizingPolicy,
}

impl GridGeometry {
    pub fn total_cells(&self) -> usize {
        self.columns * self.rows
    }

    pub fn index_of(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }

    pub fn column_row(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.total_cells()).then(|| (index % self.columns, index / self.columns))
    }

    /// Cell bounds in container-local coordinates.
    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        let (col, row) = self.column_row(index)?;
        let origin = Point::new(col as f64 * self.cell_width, row as f64 * self.cell_height);
        Some(Rect::from_origin_size(
            origin,
            Size::new(self.cell_width, self.cell_height),
        ))
    }

    /// Row-major iteration over every cell with its local bounds.
    pub fn cells(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        (0..self.total_cells()).filter_map(|i| self.cell_rect(i).map(|r| (i, r)))
    }

    /// Area actually covered by cells (smaller than the container for fixed grids).
    pub fn extent(&self) -> Size {
        Size::new(
            self.columns as f64 * self.cell_width,
            self.rows as f64 * self.cell_height,
        )
    }
}

/// Derive the cell grid for a measured container.
///
/// Returns [`GridFxError::NotReady`] when the container is below `spec.min_ready_px` (or not
/// measurable at all); callers retry later instead of accepting a degenerate grid. A container
/// that would need more than [`MAX_CELLS`] cells is a [`GridFxError::Validation`] error.
#[tracing::instrument(level = "debug")]
pub fn compute_grid(size: Size, spec: &GridSpec) -> GridFxResult<GridGeometry> {
    spec.validate()?;

    let (w, h) = (size.width, size.height);
    let measurable = w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0;
    if !measurable || w < spec.min_ready_px || h < spec.min_ready_px {
        return Err(GridFxError::not_ready(w, h));
    }

    let columns = (floor_div(w, spec.cell_size) as usize).max(1);
    let rows = (floor_div(h, spec.cell_size) as usize).max(1);
    match columns.checked_mul(rows) {
        Some(total) if total <= MAX_CELLS => {}
        _ => {
            return Err(GridFxError::validation(format!(
                "grid of {columns}x{rows} cells exceeds the {MAX_CELLS} cell limit"
            )));
        }
    }
    let (cell_width, cell_height) = match spec.policy {
        SizingPolicy::Fit => (w / columns as f64, h / rows as f64),
        SizingPolicy::Fixed => (spec.cell_size, spec.cell_size),
    };

    Ok(GridGeometry {
        columns,
        rows,
        cell_width,
        cell_height,
        policy: spec.policy,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/grid/geometry.rs"]
mod tests;
