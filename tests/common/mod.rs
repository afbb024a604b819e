use conways_voronoi_core::automaton::{Automaton, CellState};
use conways_voronoi_core::config::AutomatonConfig;
use conways_voronoi_core::noise::{NoiseConfig, NoiseSampler};

/// Builds an automaton with hand-placed cells and a sampler to drive it.
#[allow(dead_code)]
pub struct GridBuilder {
    config: AutomatonConfig,
    noise: NoiseConfig,
    active: Vec<(usize, usize)>,
}

#[allow(dead_code)]
impl GridBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            config: AutomatonConfig {
                width,
                height,
                ..Default::default()
            },
            noise: NoiseConfig::default(),
            active: Vec::new(),
        }
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AutomatonConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_noise<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut NoiseConfig),
    {
        modifier(&mut self.noise);
        self
    }

    pub fn with_active(mut self, x: usize, y: usize) -> Self {
        self.active.push((x, y));
        self
    }

    /// Horizontal three-cell line centered on `(x, y)`.
    pub fn with_blinker(self, x: usize, y: usize) -> Self {
        self.with_active(x - 1, y).with_active(x, y).with_active(x + 1, y)
    }

    pub fn build(self) -> (Automaton, NoiseSampler) {
        let mut automaton = Automaton::new(self.config).expect("valid grid config");
        for (x, y) in self.active {
            assert!(
                automaton.set_cell(x, y, CellState::Active),
                "({x}, {y}) is not an interior cell"
            );
        }
        (automaton, NoiseSampler::new(self.noise))
    }
}

/// Every border cell is a wall.
#[allow(dead_code)]
pub fn assert_border_intact(automaton: &Automaton) {
    let grid = automaton.grid();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if !grid.is_interior(x, y) {
                assert_eq!(
                    grid.get(x, y),
                    CellState::BorderWall,
                    "border cell ({x}, {y}) changed"
                );
            }
        }
    }
}
