//! Per-field settings edits with fallback defaults.
//!
//! Bad input never fails an edit. Fields with a fallback take it and report
//! [`SettingOutcome::FellBack`]; the seed and the free-form noise
//! multipliers keep their previous value and report
//! [`SettingOutcome::Rejected`].

use std::fmt;
use std::str::FromStr;

use crate::algorithms::Algorithm;
use crate::config::{AppConfig, MAX_STARTING_ALIVE};
use crate::noise::NoiseConfig;

pub const FALLBACK_OCTAVES: u32 = 2;
pub const FALLBACK_DISPLACEMENT: f32 = 1.0;
pub const FALLBACK_NEIGHBORS: u8 = 3;
pub const FALLBACK_VALUE_FOR_ACTIVE: f32 = 1.0;
pub const FALLBACK_STARTING_ALIVE: usize = 100;
pub const FALLBACK_MAX_ACTIVE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingOutcome {
    Applied,
    /// Input was bad; the field's fallback default was written.
    FellBack,
    /// Input was bad; the field was left unchanged.
    Rejected,
}

impl SettingOutcome {
    pub fn is_bad_input(self) -> bool {
        !matches!(self, SettingOutcome::Applied)
    }
}

/// Editable fields, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    OctaveCount,
    Displacement,
    Algorithm,
    Seed,
    NeighborsToBeActive,
    ValueForActive,
    StartingAliveCount,
    Scale,
    Frequency,
    Amplitude,
    Gain,
    MaxActiveCount,
}

impl Setting {
    pub const COUNT: usize = 12;

    pub const ALL: [Setting; Self::COUNT] = [
        Setting::OctaveCount,
        Setting::Displacement,
        Setting::Algorithm,
        Setting::Seed,
        Setting::NeighborsToBeActive,
        Setting::ValueForActive,
        Setting::StartingAliveCount,
        Setting::Scale,
        Setting::Frequency,
        Setting::Amplitude,
        Setting::Gain,
        Setting::MaxActiveCount,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Setting::OctaveCount => "Octave count",
            Setting::Displacement => "Displacement",
            Setting::Algorithm => "Algorithm",
            Setting::Seed => "Seed",
            Setting::NeighborsToBeActive => "Neighbors to be active",
            Setting::ValueForActive => "Value for active",
            Setting::StartingAliveCount => "Starting alive count",
            Setting::Scale => "Scale",
            Setting::Frequency => "Frequency",
            Setting::Amplitude => "Amplitude",
            Setting::Gain => "Gain",
            Setting::MaxActiveCount => "Max active count",
        }
    }

    /// Current value of this field, formatted for display.
    pub fn current(self, config: &AppConfig) -> String {
        let noise = &config.noise;
        let automaton = &config.automaton;
        match self {
            Setting::OctaveCount => noise.octave_count.to_string(),
            Setting::Displacement => noise.displacement.to_string(),
            Setting::Algorithm => noise.algorithm.to_string(),
            Setting::Seed => noise.seed.to_string(),
            Setting::NeighborsToBeActive => automaton.neighbors_to_be_active.to_string(),
            Setting::ValueForActive => automaton.value_for_active.to_string(),
            Setting::StartingAliveCount => automaton.starting_alive_count.to_string(),
            Setting::Scale => noise.scale.to_string(),
            Setting::Frequency => noise.frequency.to_string(),
            Setting::Amplitude => noise.amplitude.to_string(),
            Setting::Gain => noise.gain.to_string(),
            Setting::MaxActiveCount => automaton.max_active_count.to_string(),
        }
    }

    /// Parses `raw` and writes it into `config`.
    pub fn apply(self, config: &mut AppConfig, raw: &str) -> SettingOutcome {
        let raw = raw.trim();
        let noise = &mut config.noise;
        let automaton = &mut config.automaton;
        match self {
            Setting::OctaveCount => with_fallback(
                &mut noise.octave_count,
                parse_in(raw, octaves_ok),
                FALLBACK_OCTAVES,
            ),
            Setting::Displacement => with_fallback(
                &mut noise.displacement,
                parse_in(raw, magnitude_ok),
                FALLBACK_DISPLACEMENT,
            ),
            Setting::Algorithm => or_keep(&mut noise.algorithm, Algorithm::from_str(raw).ok()),
            Setting::Seed => or_keep(&mut noise.seed, raw.parse().ok()),
            Setting::NeighborsToBeActive => with_fallback(
                &mut automaton.neighbors_to_be_active,
                parse_in(raw, |v: &u8| (1..=8).contains(v)),
                FALLBACK_NEIGHBORS,
            ),
            Setting::ValueForActive => with_fallback(
                &mut automaton.value_for_active,
                parse_in(raw, magnitude_ok),
                FALLBACK_VALUE_FOR_ACTIVE,
            ),
            Setting::StartingAliveCount => with_fallback(
                &mut automaton.starting_alive_count,
                parse_in(raw, |v: &usize| *v <= MAX_STARTING_ALIVE),
                FALLBACK_STARTING_ALIVE,
            ),
            Setting::Scale => or_keep(&mut noise.scale, parse_in(raw, finite_ok)),
            Setting::Frequency => or_keep(&mut noise.frequency, parse_in(raw, magnitude_ok)),
            Setting::Amplitude => or_keep(&mut noise.amplitude, parse_in(raw, finite_ok)),
            Setting::Gain => or_keep(&mut noise.gain, parse_in(raw, finite_ok)),
            Setting::MaxActiveCount => with_fallback(
                &mut automaton.max_active_count,
                raw.parse().ok(),
                FALLBACK_MAX_ACTIVE,
            ),
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checks a whole incoming [`NoiseConfig`] field by field with the same rules
/// as [`Setting::apply`]. Fields with a fallback take it; scale, frequency,
/// amplitude and gain keep their value from `previous`. The outcome is
/// `Applied` when every field passed, `FellBack` when any field took its
/// fallback, and `Rejected` when fields were only kept.
pub fn sanitize_noise(previous: &NoiseConfig, incoming: NoiseConfig) -> (NoiseConfig, SettingOutcome) {
    let mut noise = previous.clone();
    noise.seed = incoming.seed;
    noise.algorithm = incoming.algorithm;
    let outcomes = [
        with_fallback(
            &mut noise.octave_count,
            Some(incoming.octave_count).filter(octaves_ok),
            FALLBACK_OCTAVES,
        ),
        with_fallback(
            &mut noise.displacement,
            Some(incoming.displacement).filter(magnitude_ok),
            FALLBACK_DISPLACEMENT,
        ),
        or_keep(&mut noise.scale, Some(incoming.scale).filter(finite_ok)),
        or_keep(&mut noise.frequency, Some(incoming.frequency).filter(magnitude_ok)),
        or_keep(&mut noise.amplitude, Some(incoming.amplitude).filter(finite_ok)),
        or_keep(&mut noise.gain, Some(incoming.gain).filter(finite_ok)),
    ];

    let outcome = if outcomes.contains(&SettingOutcome::FellBack) {
        SettingOutcome::FellBack
    } else if outcomes.contains(&SettingOutcome::Rejected) {
        SettingOutcome::Rejected
    } else {
        SettingOutcome::Applied
    };
    (noise, outcome)
}

fn octaves_ok(v: &u32) -> bool {
    (1..=16).contains(v)
}

fn finite_ok(v: &f32) -> bool {
    v.is_finite()
}

fn magnitude_ok(v: &f32) -> bool {
    v.is_finite() && *v >= 0.0
}

fn parse_in<T: FromStr>(raw: &str, accept: impl Fn(&T) -> bool) -> Option<T> {
    raw.parse().ok().filter(accept)
}

fn with_fallback<T>(field: &mut T, parsed: Option<T>, fallback: T) -> SettingOutcome {
    match parsed {
        Some(value) => {
            *field = value;
            SettingOutcome::Applied
        }
        None => {
            *field = fallback;
            SettingOutcome::FellBack
        }
    }
}

fn or_keep<T>(field: &mut T, parsed: Option<T>) -> SettingOutcome {
    match parsed {
        Some(value) => {
            *field = value;
            SettingOutcome::Applied
        }
        None => SettingOutcome::Rejected,
    }
}
