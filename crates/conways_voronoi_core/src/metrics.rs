//! Run statistics and logging setup.
//!
//! Counters are atomics so a renderer or status line can read them through
//! a shared reference while the simulation loop records.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::automaton::{SeedReport, StepReport};

/// Generations between two summary log lines.
pub const SUMMARY_INTERVAL: u64 = 100;

pub struct Metrics {
    generations: AtomicU64,
    active_count: AtomicU64,
    culls: AtomicU64,
    culled_cells: AtomicU64,
    seeds: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("generations", &self.generations())
            .field("active_count", &self.active_count())
            .field("culls", &self.culls())
            .finish()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generations: AtomicU64::new(0),
            active_count: AtomicU64::new(0),
            culls: AtomicU64::new(0),
            culled_cells: AtomicU64::new(0),
            seeds: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a (re)seed of the grid.
    pub fn record_seed(&self, report: &SeedReport) {
        self.seeds.fetch_add(1, Ordering::Relaxed);
        self.active_count
            .store(report.active_count as u64, Ordering::Relaxed);
        tracing::info!(
            noise_cells = report.noise_cells,
            blob_activations = report.blob_activations,
            active = report.active_count,
            "Grid seeded"
        );
    }

    /// Records a finished generation with its duration.
    pub fn record_generation(&self, report: &StepReport, duration: Duration) {
        let generations = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        self.active_count
            .store(report.active_count as u64, Ordering::Relaxed);
        self.culls
            .fetch_add(u64::from(report.culls), Ordering::Relaxed);
        self.culled_cells
            .fetch_add(report.culled_cells as u64, Ordering::Relaxed);

        if generations.is_multiple_of(SUMMARY_INTERVAL) {
            tracing::info!(
                generations,
                generation = report.generation,
                active = report.active_count,
                culls = self.culls(),
                duration_us = duration.as_micros() as u64,
                "Simulation progress"
            );
        }
    }

    #[must_use]
    pub fn generations(&self) -> u64 {
        self.generations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn active_count(&self) -> u64 {
        self.active_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn culls(&self) -> u64 {
        self.culls.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn culled_cells(&self) -> u64 {
        self.culled_cells.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn seeds(&self) -> u64 {
        self.seeds.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the totals for a finished run.
    pub fn log_summary(&self) {
        tracing::info!(
            generations = self.generations(),
            seeds = self.seeds(),
            culls = self.culls(),
            culled_cells = self.culled_cells(),
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Run summary"
        );
    }
}

/// Installs a fmt subscriber on stderr at `level`. Later calls are no-ops.
pub fn init_logging(level: tracing::Level) {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish(),
    )
    .ok();
}
