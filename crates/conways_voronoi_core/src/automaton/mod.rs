//! Bounded cellular automaton seeded from noise.
//!
//! The grid is framed by a ring of [`CellState::BorderWall`] cells. Interior
//! cells follow a neighbor-count rule: exactly `neighbors_to_be_active`
//! active neighbors turn a cell on, one or fewer or more than the threshold
//! turn it off, anything in between leaves it as it was.
//!
//! A population governor keeps the new generation under
//! `max_active_count`: whenever the running count goes over the ceiling, a
//! random kill target in `[max / 2, max]` is drawn and random interior cells
//! are switched off until the count reaches it.

mod grid;

pub use grid::{CellState, DisplayTag, Grid, NEIGHBOR_OFFSETS};

use crate::config::AutomatonConfig;
use crate::error::Result;
use crate::noise::NoiseSampler;
use crate::snapshot::GridSnapshot;

/// Smallest width or height that leaves room for seed-blob anchors.
pub const MIN_GRID_SIDE: usize = 5;

/// Consecutive missed cull picks, per interior cell, before falling back to
/// a sweep.
const CULL_MISS_FACTOR: usize = 16;

/// Outcome of [`Automaton::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    /// Cells switched on by the noise threshold.
    pub noise_cells: usize,
    /// Activations spent by seed blobs, repeats included.
    pub blob_activations: usize,
    pub active_count: usize,
}

/// Outcome of one [`Automaton::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub generation: u64,
    pub active_count: usize,
    /// Times the governor fired during this generation.
    pub culls: u32,
    pub culled_cells: usize,
}

#[derive(Debug, Clone)]
pub struct Automaton {
    config: AutomatonConfig,
    grid: Grid,
    previous: Vec<CellState>,
    active_count: usize,
    generation: u64,
    active_tag: DisplayTag,
}

impl Automaton {
    /// Blank automaton: border ring, inactive interior, generation 0.
    pub fn new(config: AutomatonConfig) -> Result<Self> {
        let grid = Grid::new(config.width, config.height)?;
        let previous = grid.cells().to_vec();
        Ok(Self {
            config,
            grid,
            previous,
            active_count: 0,
            generation: 0,
            active_tag: DisplayTag::Live,
        })
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn active_tag(&self) -> DisplayTag {
        self.active_tag
    }

    /// Tag written on cells activated from now on.
    pub fn set_active_tag(&mut self, tag: DisplayTag) {
        self.active_tag = tag;
    }

    /// Rule parameters that do not change the grid shape.
    pub fn set_rules(&mut self, neighbors_to_be_active: u8, max_active_count: usize) {
        self.config.neighbors_to_be_active = neighbors_to_be_active;
        self.config.max_active_count = max_active_count;
    }

    /// Writes one interior cell outside the rule. Returns whether the write
    /// happened (border cells are refused).
    pub fn set_cell(&mut self, x: usize, y: usize, state: CellState) -> bool {
        let before = self.grid.get(x, y);
        let tag = match state {
            CellState::Active => self.active_tag,
            _ => DisplayTag::Base,
        };
        if !self.grid.set(x, y, state, tag) {
            return false;
        }
        match (before, state) {
            (CellState::Active, CellState::Inactive) => self.active_count -= 1,
            (CellState::Inactive, CellState::Active) => self.active_count += 1,
            _ => {}
        }
        true
    }

    /// Recreates the grid, activates every interior cell whose noise value
    /// reaches `activation_threshold`, then spends `starting_alive_count`
    /// activations on random seed blobs.
    pub fn seed(
        &mut self,
        sampler: &mut NoiseSampler,
        octaves: u32,
        activation_threshold: f32,
        starting_alive_count: usize,
    ) -> Result<SeedReport> {
        let (width, height) = (self.config.width, self.config.height);
        self.grid = Grid::new(width, height)?;
        self.previous = self.grid.cells().to_vec();
        self.generation = 0;
        self.active_count = 0;

        let field = sampler.sample_noise_map(width + 1, height + 1, octaves);
        let tag = self.active_tag;
        let mut report = SeedReport::default();
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                if field.get(x, y) >= activation_threshold {
                    self.grid.activate(x, y, tag);
                    report.noise_cells += 1;
                }
            }
        }

        let mut budget = starting_alive_count;
        while budget > 0 {
            let x = sampler.range(2, width as i64 - 2) as usize;
            let y = sampler.range(2, height as i64 - 2) as usize;
            self.grid.activate(x, y, tag);
            budget -= 1;
            report.blob_activations += 1;

            for (dy, dx) in NEIGHBOR_OFFSETS {
                if sampler.bool_value() {
                    self.grid
                        .activate(x.wrapping_add_signed(dx), y.wrapping_add_signed(dy), tag);
                    budget = budget.saturating_sub(1);
                    report.blob_activations += 1;
                }
            }
        }

        self.active_count = self.grid.active_count();
        report.active_count = self.active_count;
        tracing::debug!(
            width,
            height,
            noise_cells = report.noise_cells,
            blob_activations = report.blob_activations,
            active = report.active_count,
            "Seeded automaton"
        );
        Ok(report)
    }

    /// Advances one generation.
    pub fn step(&mut self, sampler: &mut NoiseSampler) -> StepReport {
        let width = self.grid.width();
        let height = self.grid.height();
        let threshold = self.config.neighbors_to_be_active;
        let max = self.config.max_active_count;
        let tag = self.active_tag;

        self.previous.copy_from_slice(self.grid.cells());
        self.grid.clear_interior();

        let mut count = 0usize;
        let mut report = StepReport::default();
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                if count > max {
                    let culled = self.cull(sampler, &mut count);
                    report.culls += 1;
                    report.culled_cells += culled;
                }

                let neighbors = grid::count_active_neighbors(&self.previous, width, x, y);
                let next = if neighbors == threshold {
                    CellState::Active
                } else if neighbors <= 1 || neighbors > threshold {
                    CellState::Inactive
                } else {
                    self.previous[y * width + x]
                };

                if next == CellState::Active {
                    self.grid.activate(x, y, tag);
                    count += 1;
                }
            }
        }
        if count > max {
            let culled = self.cull(sampler, &mut count);
            report.culls += 1;
            report.culled_cells += culled;
        }

        self.active_count = count;
        self.generation += 1;
        report.generation = self.generation;
        report.active_count = count;
        report
    }

    /// Switches off random active cells until `count` reaches a kill target
    /// drawn from `[max / 2, max]`. Returns how many cells were switched off.
    fn cull(&mut self, sampler: &mut NoiseSampler, count: &mut usize) -> usize {
        let max = self.config.max_active_count as i64;
        let kill_count = sampler.range(max / 2, max + 1) as usize;
        let width = self.grid.width() as i64;
        let height = self.grid.height() as i64;
        let miss_limit = CULL_MISS_FACTOR * self.grid.interior_area();

        let start = *count;
        let mut misses = 0usize;
        while *count > kill_count {
            if misses >= miss_limit {
                self.sweep_cull(count, kill_count);
                break;
            }
            let x = sampler.range(1, width - 1) as usize;
            let y = sampler.range(1, height - 1) as usize;
            if self.grid.get(x, y) == CellState::Active {
                self.grid.deactivate(x, y);
                *count -= 1;
                misses = 0;
            } else {
                misses += 1;
            }
        }

        tracing::trace!(from = start, to = *count, kill_count, "Culled population");
        start - *count
    }

    fn sweep_cull(&mut self, count: &mut usize, kill_count: usize) {
        tracing::debug!(remaining = *count - kill_count, "Cull fell back to sweep");
        for y in 1..self.grid.height() - 1 {
            for x in 1..self.grid.width() - 1 {
                if *count <= kill_count {
                    return;
                }
                if self.grid.get(x, y) == CellState::Active {
                    self.grid.deactivate(x, y);
                    *count -= 1;
                }
            }
        }
    }

    /// Immutable copy of the current generation.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid, self.generation, self.active_count)
    }
}
