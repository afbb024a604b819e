//! The simulation state owned by one session.

use std::time::Instant;

use crate::algorithms::Algorithm;
use crate::automaton::{Automaton, DisplayTag, SeedReport};
use crate::config::AppConfig;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::noise::{NoiseConfig, NoiseSampler};
use crate::settings::{sanitize_noise, Setting, SettingOutcome};
use crate::snapshot::GridSnapshot;

/// Config, sampler, automaton and metrics for one application. Moved into
/// the simulation task for a run and handed back afterwards.
#[derive(Debug)]
pub struct SimulationContext {
    config: AppConfig,
    sampler: NoiseSampler,
    automaton: Automaton,
    metrics: Metrics,
}

impl SimulationContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        let sampler = NoiseSampler::new(config.noise.clone());
        let automaton = Automaton::new(config.automaton.clone())?;
        Ok(Self {
            config,
            sampler,
            automaton,
            metrics: Metrics::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn sampler_mut(&mut self) -> &mut NoiseSampler {
        &mut self.sampler
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Replaces the noise parameters and rewinds the sampler. Out-of-range
    /// fields are corrected with the same rules as the settings menu; the
    /// outcome reports whether any field was bad.
    pub fn configure(&mut self, noise: NoiseConfig) -> SettingOutcome {
        let (noise, outcome) = sanitize_noise(&self.config.noise, noise);
        if outcome.is_bad_input() {
            tracing::warn!(?outcome, "Noise config had out-of-range fields");
        }
        self.sampler.configure(noise.clone());
        self.config.noise = noise;
        outcome
    }

    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        self.sampler.set_algorithm(algorithm);
        self.config.noise.algorithm = algorithm;
    }

    /// Out-of-range indices are refused; the previous algorithm stays.
    pub fn select_algorithm_index(&mut self, index: usize) -> Result<Algorithm> {
        let algorithm = self.sampler.set_algorithm_index(index)?;
        self.config.noise.algorithm = algorithm;
        Ok(algorithm)
    }

    pub fn set_seed(&mut self, seed: i64) {
        self.sampler.set_seed(seed);
        self.config.noise.seed = seed;
    }

    /// Applies one settings edit and pushes the result into the sampler and
    /// the automaton rules.
    pub fn apply_setting(&mut self, setting: Setting, raw: &str) -> SettingOutcome {
        let outcome = setting.apply(&mut self.config, raw);
        if outcome != SettingOutcome::Rejected {
            self.sampler.configure(self.config.noise.clone());
            let automaton = &self.config.automaton;
            self.automaton
                .set_rules(automaton.neighbors_to_be_active, automaton.max_active_count);
        }
        tracing::debug!(%setting, raw, ?outcome, "Setting edited");
        outcome
    }

    /// Draws a fresh seed unless the config is deterministic, in which case
    /// the sampler is rewound to the configured seed. Returns the seed the
    /// session runs with.
    pub fn begin_session(&mut self) -> i64 {
        let seed = if self.config.deterministic {
            self.config.noise.seed
        } else {
            rand::random()
        };
        self.set_seed(seed);
        tracing::info!(
            seed = self.config.noise.seed,
            algorithm = %self.config.noise.algorithm,
            fingerprint = %self.config.fingerprint(),
            "Session started"
        );
        self.config.noise.seed
    }

    /// Tag used for cells activated from now on.
    pub fn set_display_tag(&mut self, tag: DisplayTag) {
        self.automaton.set_active_tag(tag);
    }

    /// Rebuilds the grid at `width × height` and seeds it. A rejected size
    /// leaves both the config and the current grid untouched.
    pub fn seed(
        &mut self,
        width: usize,
        height: usize,
        activation_threshold: f32,
        starting_alive_count: usize,
    ) -> Result<SeedReport> {
        let mut next = self.config.automaton.clone();
        next.value_for_active = activation_threshold;
        next.starting_alive_count = starting_alive_count;
        next.width = width;
        next.height = height;
        if self.automaton.width() != width || self.automaton.height() != height {
            let tag = self.automaton.active_tag();
            self.automaton = Automaton::new(next.clone())?;
            self.automaton.set_active_tag(tag);
        }
        self.config.automaton = next;

        let report = self.automaton.seed(
            &mut self.sampler,
            self.config.noise.octave_count,
            activation_threshold,
            starting_alive_count,
        )?;
        self.metrics.record_seed(&report);
        Ok(report)
    }

    /// Seeds again with the configured dimensions and thresholds.
    pub fn reseed(&mut self) -> Result<SeedReport> {
        let automaton = &self.config.automaton;
        let (width, height) = (automaton.width, automaton.height);
        let (threshold, alive) = (automaton.value_for_active, automaton.starting_alive_count);
        self.seed(width, height, threshold, alive)
    }

    /// Advances one generation and returns it.
    pub fn step(&mut self) -> GridSnapshot {
        let started = Instant::now();
        let report = self.automaton.step(&mut self.sampler);
        self.metrics.record_generation(&report, started.elapsed());
        self.automaton.snapshot()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.automaton.snapshot()
    }

    /// `count` consecutive floats from the sampler.
    pub fn sample_floats(&mut self, count: usize) -> Vec<f32> {
        self.sampler.sample_floats(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reseed_uses_config() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        let report = context.reseed().unwrap();
        assert_eq!(report.active_count, context.snapshot().active_count);
        assert_eq!(context.metrics().seeds(), 1);
    }

    #[test]
    fn test_seed_resizes_grid() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        context.seed(20, 12, 1.0, 10).unwrap();
        let snapshot = context.snapshot();
        assert_eq!((snapshot.width, snapshot.height), (20, 12));
        assert_eq!(context.config().automaton.width, 20);
    }

    #[test]
    fn test_select_algorithm_index_out_of_range() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        context.select_algorithm(Algorithm::XorShift7);
        assert!(context.select_algorithm_index(99).is_err());
        assert_eq!(context.config().noise.algorithm, Algorithm::XorShift7);
    }

    #[test]
    fn test_step_advances_generation() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        context.reseed().unwrap();
        let snapshot = context.step();
        assert_eq!(snapshot.generation, 1);
        assert!(snapshot.active_count <= context.config().automaton.max_active_count);
        assert_eq!(context.metrics().generations(), 1);
    }

    #[test]
    fn test_apply_setting_reaches_automaton() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        context.apply_setting(Setting::MaxActiveCount, "12");
        assert_eq!(context.automaton().config().max_active_count, 12);
    }

    #[test]
    fn test_deterministic_session_keeps_seed() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        assert_eq!(context.begin_session(), 1337);
    }

    #[test]
    fn test_deterministic_sessions_repeat() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        context.begin_session();
        context.reseed().unwrap();
        let first = context.step();

        context.begin_session();
        context.reseed().unwrap();
        let second = context.step();
        assert_eq!(first.cells, second.cells);
        assert_eq!(first.active_count, second.active_count);
    }

    #[test]
    fn test_failed_seed_keeps_config_and_grid() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        assert!(context.seed(3, 3, 1.0, 10).is_err());
        assert_eq!(context.config().automaton.width, 100);
        assert_eq!(context.config().automaton.height, 25);
        assert_eq!(context.automaton().width(), 100);

        let report = context.reseed().unwrap();
        assert_eq!(report.active_count, context.snapshot().active_count);
        assert_eq!(context.snapshot().width, 100);
    }

    #[test]
    fn test_configure_corrects_bad_fields() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        let outcome = context.configure(NoiseConfig {
            seed: 9,
            octave_count: 0,
            scale: f32::NAN,
            displacement: -1.0,
            ..NoiseConfig::default()
        });
        assert!(outcome.is_bad_input());

        let noise = &context.config().noise;
        assert_eq!(noise.seed, 9);
        assert_eq!(noise.octave_count, crate::settings::FALLBACK_OCTAVES);
        assert_eq!(noise.displacement, crate::settings::FALLBACK_DISPLACEMENT);
        assert_eq!(noise.scale, 1.0);
        assert!(context.config().validate().is_ok());
        assert!(context.reseed().unwrap().noise_cells > 0);
    }

    #[test]
    fn test_configure_rejects_huge_octave_count() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        context.configure(NoiseConfig {
            octave_count: u32::MAX,
            ..NoiseConfig::default()
        });
        assert_eq!(context.config().noise.octave_count, crate::settings::FALLBACK_OCTAVES);
    }

    #[test]
    fn test_configure_accepts_valid_config() {
        let mut context = SimulationContext::new(AppConfig::default()).unwrap();
        let noise = NoiseConfig {
            seed: -4,
            frequency: 0.25,
            algorithm: Algorithm::Wyhash,
            ..NoiseConfig::default()
        };
        assert_eq!(context.configure(noise.clone()), SettingOutcome::Applied);
        assert_eq!(context.config().noise, noise);
    }
}
