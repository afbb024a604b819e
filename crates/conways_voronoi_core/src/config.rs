//! Configuration management for simulation parameters.
//!
//! Strongly-typed structures that map to the `config.toml` file.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults, missing keys keep defaults)
//! 3. Command-line flags (seed, algorithm) applied by the binary
//! 4. Interactive settings edits (see [`crate::settings`])
//!
//! ## Example `config.toml`
//!
//! ```toml
//! tick_ms = 10
//! deterministic = true
//!
//! [noise]
//! seed = 1337
//! frequency = 0.1
//! octave_count = 2
//! algorithm = "XorShift64Star"
//!
//! [automaton]
//! width = 100
//! height = 25
//! max_active_count = 200
//! ```

use serde::{Deserialize, Serialize};

use crate::noise::NoiseConfig;

/// Upper bound for the seed-blob budget; keeps initialization bounded.
pub const MAX_STARTING_ALIVE: usize = 100_000;

/// Grid dimensions and automaton rule parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AutomatonConfig {
    pub width: usize,
    pub height: usize,
    /// Population ceiling enforced by culling.
    pub max_active_count: usize,
    /// Exact neighbor count that activates a cell.
    pub neighbors_to_be_active: u8,
    /// Noise value at or above which a cell starts active.
    pub value_for_active: f32,
    /// Activation budget for random seed blobs.
    pub starting_alive_count: usize,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 25,
            max_active_count: 200,
            neighbors_to_be_active: 3,
            value_for_active: 1.0,
            starting_alive_count: 156,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Generation cadence in milliseconds.
    pub tick_ms: u64,
    /// Reuse `noise.seed` for every session instead of drawing a fresh one.
    pub deterministic: bool,
    pub noise: NoiseConfig,
    pub automaton: AutomatonConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            deterministic: true,
            noise: NoiseConfig::default(),
            automaton: AutomatonConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        let automaton = &self.automaton;
        anyhow::ensure!(automaton.width >= 5, "Grid width must be at least 5");
        anyhow::ensure!(automaton.width <= 1000, "Grid width too large (max 1000)");
        anyhow::ensure!(automaton.height >= 5, "Grid height must be at least 5");
        anyhow::ensure!(automaton.height <= 1000, "Grid height too large (max 1000)");
        anyhow::ensure!(
            (1..=8).contains(&automaton.neighbors_to_be_active),
            "Neighbors to be active must be in [1, 8]"
        );
        anyhow::ensure!(
            automaton.value_for_active.is_finite() && automaton.value_for_active >= 0.0,
            "Value for active must be a non-negative number"
        );
        anyhow::ensure!(
            automaton.starting_alive_count <= MAX_STARTING_ALIVE,
            "Starting alive count too large (max {})",
            MAX_STARTING_ALIVE
        );

        let noise = &self.noise;
        anyhow::ensure!(
            (1..=16).contains(&noise.octave_count),
            "Octave count must be in [1, 16]"
        );
        for (name, value) in [
            ("scale", noise.scale),
            ("frequency", noise.frequency),
            ("amplitude", noise.amplitude),
            ("gain", noise.gain),
            ("displacement", noise.displacement),
        ] {
            anyhow::ensure!(value.is_finite(), "Noise {} must be finite", name);
        }
        anyhow::ensure!(noise.frequency >= 0.0, "Noise frequency must be non-negative");

        anyhow::ensure!(self.tick_ms > 0, "Tick must be positive");
        anyhow::ensure!(self.tick_ms <= 10_000, "Tick too long (max 10000 ms)");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// SHA-256 over the parameters that shape a run.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.noise).as_bytes());
        hasher.update(format!("{:?}", self.automaton).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Algorithm;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_grid_width() {
        let config = AppConfig {
            automaton: AutomatonConfig {
                width: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_grid_height() {
        let config = AppConfig {
            automaton: AutomatonConfig {
                height: 1001,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_neighbor_threshold() {
        let config = AppConfig {
            automaton: AutomatonConfig {
                neighbors_to_be_active: 9,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_octaves() {
        let config = AppConfig {
            noise: NoiseConfig {
                octave_count: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_noise_parameter() {
        let config = AppConfig {
            noise: NoiseConfig {
                gain: f32::NAN,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_tick() {
        let config = AppConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [noise]
            seed = 7
            algorithm = "Wyhash"

            [automaton]
            max_active_count = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.noise.seed, 7);
        assert_eq!(config.noise.algorithm, Algorithm::Wyhash);
        assert_eq!(config.noise.octave_count, 2);
        assert_eq!(config.automaton.max_active_count, 50);
        assert_eq!(config.automaton.width, 100);
        assert_eq!(config.tick_ms, 10);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.noise.algorithm = Algorithm::XnTohl;
        config.automaton.neighbors_to_be_active = 2;
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = AppConfig::default();
        let mut config2 = AppConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());
        config2.noise.seed += 1;
        assert_ne!(config1.fingerprint(), config2.fingerprint());
    }
}
