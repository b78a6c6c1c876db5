use crate::{
    animation::{ease::Ease, smoothing::Smoothing},
    cells::state::{CellState, HighlightTargets, HoverResponse},
};

/// All cell records of one grid instance plus the single hovered index.
///
/// The collection is replaced wholesale by [`CellStore::allocate`] whenever the grid geometry
/// changes; it is never resized in place.
#[derive(Clone, Debug)]
pub struct CellStore {
    cells: Vec<CellState>,
    hovered: Option<usize>,
    targets: HighlightTargets,
    response: HoverResponse,
}

impl CellStore {
    pub fn new(targets: HighlightTargets, response: HoverResponse) -> Self {
        Self {
            cells: Vec::new(),
            hovered: None,
            targets,
            response,
        }
    }

    /// Replace every record with a fresh at-rest cell. In-flight animation is dropped.
    pub fn allocate(&mut self, total_cells: usize) {
        self.cells = vec![CellState::at_rest(self.targets.rest); total_cells];
        self.hovered = None;
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CellState> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn targets(&self) -> &HighlightTargets {
        &self.targets
    }

    /// Drive one cell into or out of the highlighted state. Out-of-range indices are ignored.
    pub fn set_target(&mut self, index: usize, highlighted: bool) -> bool {
        let rest = self.targets.rest;
        let active = self.targets.active;
        let Some(cell) = self.cells.get_mut(index) else {
            return false;
        };

        match (self.response, highlighted) {
            (HoverResponse::Follow, true) => cell.set_target(active),
            (HoverResponse::Follow, false) => cell.set_target(rest),
            (HoverResponse::Trail { fade_ms, ease, .. }, true) => {
                cell.start_fade(active, rest, fade_ms, ease)
            }
            (HoverResponse::Trail { release_ms, .. }, false) => {
                cell.release(rest, release_ms, Ease::default())
            }
        }
        true
    }

    /// Move the hover to `index`, returning the previous cell to rest first.
    ///
    /// Returns `true` when the hovered cell changed.
    pub fn hover(&mut self, index: Option<usize>) -> bool {
        let index = index.filter(|&i| i < self.cells.len());
        if index == self.hovered {
            return false;
        }
        if let Some(prev) = self.hovered {
            self.set_target(prev, false);
        }
        if let Some(next) = index {
            self.set_target(next, true);
        }
        self.hovered = index;
        true
    }

    /// Advance every animating cell by one frame. Returns how many are still animating.
    pub fn tick(&mut self, smoothing: &Smoothing, dt_ms: f64) -> usize {
        self.cells
            .iter_mut()
            .map(|c| c.step(smoothing, dt_ms))
            .filter(|&still| still)
            .count()
    }

    pub fn is_idle(&self) -> bool {
        self.cells.iter().all(|c| !c.animating)
    }

    /// Number of cells whose target is the active (highlighted) state.
    pub fn highlighted_count(&self) -> usize {
        let active = self.targets.active;
        self.cells.iter().filter(|c| c.target() == active).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cells/store.rs"]
mod tests;
