use serde::{Deserialize, Serialize};

use crate::automaton::{CellState, DisplayTag, Grid};

/// Read-only copy of one generation, handed to renderers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GridSnapshot {
    pub generation: u64,
    pub width: usize,
    pub height: usize,
    pub active_count: usize,
    pub cells: Vec<CellState>,
    pub tags: Vec<DisplayTag>,
}

impl GridSnapshot {
    pub fn capture(grid: &Grid, generation: u64, active_count: usize) -> Self {
        Self {
            generation,
            width: grid.width(),
            height: grid.height(),
            active_count,
            cells: grid.cells().to_vec(),
            tags: grid.tags().to_vec(),
        }
    }

    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> CellState {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn tag(&self, x: usize, y: usize) -> DisplayTag {
        self.tags[y * self.width + x]
    }

    /// Rows of `(state, tag)` pairs, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = (CellState, DisplayTag)> + '_> + '_ {
        self.cells
            .chunks(self.width)
            .zip(self.tags.chunks(self.width))
            .map(|(cells, tags)| cells.iter().copied().zip(tags.iter().copied()))
    }
}
