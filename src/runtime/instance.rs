use crate::{
    animation::smoothing::Smoothing,
    cells::store::CellStore,
    config::grid::GridConfig,
    foundation::{
        core::{Point, Rect, Size},
        error::GridFxResult,
    },
    grid::{
        geometry::{GridGeometry, GridSpec, compute_grid},
        resolver::{BoundaryPolicy, resolve_cell},
    },
    render::{
        painter::{GridStyle, paint_grid},
        surface::DrawSurface,
    },
};

/// Host-independent state of one grid: geometry, cell records and resolved style.
#[derive(Clone, Debug)]
pub struct GridInstance {
    spec: GridSpec,
    boundary: BoundaryPolicy,
    smoothing: Smoothing,
    style: GridStyle,
    geometry: Option<GridGeometry>,
    store: CellStore,
    dirty: bool,
}

impl GridInstance {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            spec: config.grid,
            boundary: config.boundary,
            smoothing: config.smoothing,
            style: config.style.resolve(),
            geometry: None,
            store: CellStore::new(config.targets, config.response),
            dirty: false,
        }
    }

    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    pub fn store(&self) -> &CellStore {
        &self.store
    }

    pub fn style(&self) -> &GridStyle {
        &self.style
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Recompute the grid for a new container size and reallocate every cell.
    ///
    /// A not-ready size leaves the current geometry and cells untouched.
    pub fn relayout(&mut self, size: Size) -> GridFxResult<GridGeometry> {
        let geometry = compute_grid(size, &self.spec)?;
        self.store.allocate(geometry.total_cells());
        self.geometry = Some(geometry);
        self.dirty = true;
        Ok(geometry)
    }

    /// Drop geometry and cells.
    pub fn discard(&mut self) {
        self.geometry = None;
        self.store.allocate(0);
        self.dirty = false;
    }

    /// Resolve a viewport-space pointer against the container box and update the hover.
    ///
    /// Returns `true` when the hovered cell changed.
    pub fn pointer_moved(&mut self, pointer: Point, bounds: Rect) -> bool {
        let Some(geometry) = self.geometry.as_ref() else {
            return false;
        };
        let index = resolve_cell(pointer, bounds, geometry, self.boundary);
        let changed = self.store.hover(index);
        self.dirty |= changed;
        changed
    }

    /// Whether the next frame has anything to do.
    pub fn needs_frame(&self) -> bool {
        self.dirty || !self.store.is_idle()
    }

    /// Advance every cell by `dt_ms`, then repaint. Skipped entirely when nothing changed.
    ///
    /// Returns whether a repaint happened.
    pub fn frame(&mut self, surface: &mut dyn DrawSurface, dt_ms: f64) -> bool {
        if !self.needs_frame() {
            return false;
        }
        let Some(geometry) = self.geometry.as_ref() else {
            return false;
        };
        self.store.tick(&self.smoothing, dt_ms);
        paint_grid(surface, geometry, self.store.cells(), &self.style);
        self.dirty = false;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/instance.rs"]
mod tests;
