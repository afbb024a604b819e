use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

use super::MIN_GRID_SIDE;

/// Compass and diagonal offsets as `(dy, dx)`.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CellState {
    #[default]
    Inactive,
    Active,
    /// Fixed frame cell; never changes.
    BorderWall,
}

impl CellState {
    pub fn symbol(&self) -> char {
        match self {
            CellState::Active => '█',
            CellState::Inactive => '░',
            CellState::BorderWall => '═',
        }
    }
}

/// Rendering attribute carried next to every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayTag {
    #[default]
    Base,
    /// Active during a live run.
    Live,
    /// Active in a one-shot print.
    Preview,
}

/// Cell states plus display tags, stored row-major and always written
/// together. Row 0, row `height - 1`, column 0 and column `width - 1` are
/// [`CellState::BorderWall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    tags: Vec<DisplayTag>,
}

impl Grid {
    /// Blank grid: border ring plus inactive interior.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return Err(EngineError::grid_too_small(width, height));
        }

        let mut cells = vec![CellState::Inactive; width * height];
        for y in 0..height {
            for x in 0..width {
                if y == 0 || y == height - 1 || x == 0 || x == width - 1 {
                    cells[y * width + x] = CellState::BorderWall;
                }
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            tags: vec![DisplayTag::Base; width * height],
        })
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn interior_area(&self) -> usize {
        (self.width - 2) * (self.height - 2)
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn tags(&self) -> &[DisplayTag] {
        &self.tags
    }

    #[inline]
    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x < self.width - 1 && y < self.height - 1
    }

    /// State at `(x, y)`; out-of-range coordinates read as border.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> CellState {
        if x >= self.width || y >= self.height {
            return CellState::BorderWall;
        }
        self.cells[self.index(x, y)]
    }

    pub fn tag(&self, x: usize, y: usize) -> DisplayTag {
        if x >= self.width || y >= self.height {
            return DisplayTag::Base;
        }
        self.tags[self.index(x, y)]
    }

    /// Writes an interior cell. Border coordinates and `BorderWall` writes
    /// are refused; returns whether the write happened.
    pub fn set(&mut self, x: usize, y: usize, state: CellState, tag: DisplayTag) -> bool {
        if !self.is_interior(x, y) || state == CellState::BorderWall {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = state;
        self.tags[idx] = tag;
        true
    }

    pub fn activate(&mut self, x: usize, y: usize, tag: DisplayTag) -> bool {
        self.set(x, y, CellState::Active, tag)
    }

    pub fn deactivate(&mut self, x: usize, y: usize) -> bool {
        self.set(x, y, CellState::Inactive, DisplayTag::Base)
    }

    /// Resets every interior cell to inactive.
    pub fn clear_interior(&mut self) {
        for y in 1..self.height - 1 {
            let row = self.index(1, y)..self.index(self.width - 1, y);
            self.cells[row.clone()].fill(CellState::Inactive);
            self.tags[row].fill(DisplayTag::Base);
        }
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == CellState::Active).count()
    }

    /// Active cells among the 8 neighbors of an interior cell.
    pub fn active_neighbors(&self, x: usize, y: usize) -> u8 {
        count_active_neighbors(&self.cells, self.width, x, y)
    }
}

/// Neighbor count over a raw row-major buffer. `(x, y)` must be interior.
#[inline]
pub(crate) fn count_active_neighbors(cells: &[CellState], width: usize, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for (dy, dx) in NEIGHBOR_OFFSETS {
        let nx = x.wrapping_add_signed(dx);
        let ny = y.wrapping_add_signed(dy);
        if cells[ny * width + nx] == CellState::Active {
            count += 1;
        }
    }
    count
}
