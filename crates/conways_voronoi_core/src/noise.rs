//! Stateful sampler over one selected [`Algorithm`].
//!
//! The sampler keeps a cursor that starts at the configured seed. Every draw
//! advances the cursor by a fixed odd Weyl increment and mixes the new
//! cursor value, so draws form an ordered sequence: two samplers built from
//! the same [`NoiseConfig`] produce the same values only if they are asked
//! for them in the same order. [`NoiseSampler::sample_noise_map`] takes part
//! in that sequence (it consumes exactly one draw for its lattice salt).
//!
//! Normalization: a mixed value `m` is folded as `m ^ (m >> 32)` on its
//! unsigned bits and the low 24 bits become a float in `[0.0, 1.0)`. The
//! fold keeps narrow mixers (32-bit outputs, byte swaps, masked values)
//! usable.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::error::Result;

/// Odd increment applied to the cursor before every draw.
pub const WEYL_INCREMENT: i64 = 0x9E37_79B9_7F4A_7C15_u64 as i64;

const UNIT_BITS: u32 = 24;
const UNIT_MASK: u64 = (1 << UNIT_BITS) - 1;
const UNIT_SCALE: f32 = (1u32 << UNIT_BITS) as f32;

const LATTICE_PRIME_X: i64 = 0x0000_0000_27d4_eb2d;
const LATTICE_PRIME_Y: i64 = 0x0000_0000_1656_67b1;
const OCTAVE_PRIME: i64 = 0x0000_0000_85eb_ca6b;
const VALUE_SALT: i64 = 0x0000_0000_c2b2_ae35;

/// Noise parameters plus the selected mixer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    pub seed: i64,
    /// Multiplier applied to the summed field.
    pub scale: f32,
    /// Lattice frequency of the first octave.
    pub frequency: f32,
    /// Weight of the first octave.
    pub amplitude: f32,
    /// Amplitude multiplier between octaves.
    pub gain: f32,
    /// Weight of the per-cell random value inside one octave.
    pub displacement: f32,
    pub octave_count: u32,
    pub algorithm: Algorithm,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            scale: 1.0,
            frequency: 0.1,
            amplitude: 1.0,
            gain: 0.5,
            displacement: 1.0,
            octave_count: 2,
            algorithm: Algorithm::AdaptedLehmer32,
        }
    }
}

/// Dense `width × height` float field, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl NoiseField {
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at `(x, y)`. Panics when out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of samples at or above `threshold`.
    #[must_use]
    pub fn count_at_least(&self, threshold: f32) -> usize {
        self.values.iter().filter(|v| **v >= threshold).count()
    }
}

#[inline]
fn fold(mixed: i64) -> u64 {
    let bits = mixed as u64;
    bits ^ (bits >> 32)
}

#[inline]
fn unit(mixed: i64) -> f32 {
    (fold(mixed) & UNIT_MASK) as f32 / UNIT_SCALE
}

#[derive(Debug, Clone)]
pub struct NoiseSampler {
    config: NoiseConfig,
    cursor: i64,
}

impl Default for NoiseSampler {
    fn default() -> Self {
        Self::new(NoiseConfig::default())
    }
}

impl NoiseSampler {
    #[must_use]
    pub fn new(config: NoiseConfig) -> Self {
        let cursor = config.seed;
        Self { config, cursor }
    }

    #[must_use]
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    /// Replaces the whole configuration and rewinds the cursor.
    pub fn configure(&mut self, config: NoiseConfig) {
        self.cursor = config.seed;
        self.config = config;
    }

    /// Sets the seed and rewinds the cursor to it.
    pub fn set_seed(&mut self, seed: i64) {
        self.config.seed = seed;
        self.cursor = seed;
    }

    /// Switches the mixer and rewinds the cursor.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
        self.cursor = self.config.seed;
    }

    /// Switches the mixer by catalog index. Out-of-range indices are refused
    /// and leave the sampler untouched.
    pub fn set_algorithm_index(&mut self, index: usize) -> Result<Algorithm> {
        let algorithm = Algorithm::try_from_index(index)?;
        self.set_algorithm(algorithm);
        Ok(algorithm)
    }

    /// Advances the cursor and returns the mixed value.
    #[inline]
    pub fn next_raw(&mut self) -> i64 {
        self.cursor = self.cursor.wrapping_add(WEYL_INCREMENT);
        self.config.algorithm.mix(self.cursor)
    }

    #[inline]
    fn next_unit_bits(&mut self) -> u64 {
        fold(self.next_raw()) & UNIT_MASK
    }

    /// Next float in `[0.0, 1.0)`.
    pub fn next_float(&mut self) -> f32 {
        self.next_unit_bits() as f32 / UNIT_SCALE
    }

    /// Next integer in `[min, max)`. Callers must pass `max > min`.
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(max > min, "range({min}, {max}) has an empty span");
        if max <= min {
            return min;
        }
        let span = (i128::from(max) - i128::from(min)) as u128;
        let offset = (u128::from(self.next_unit_bits()) * span) >> UNIT_BITS;
        (i128::from(min) + offset as i128) as i64
    }

    /// One bit of the next draw.
    pub fn bool_value(&mut self) -> bool {
        fold(self.next_raw()) & 1 == 1
    }

    /// `count` consecutive [`NoiseSampler::next_float`] draws.
    pub fn sample_floats(&mut self, count: usize) -> Vec<f32> {
        (0..count).map(|_| self.next_float()).collect()
    }

    /// Fractal Voronoi field of `width × height` samples.
    ///
    /// Consumes one draw for the lattice salt, then sums `octaves` layers.
    /// Layer `i` samples at `frequency * 2^i`, is weighted by
    /// `amplitude * gain^i` and contributes `displacement * cell_value`,
    /// where `cell_value` in `[0, 1)` belongs to the nearest jittered feature
    /// point. The sum is multiplied by `scale`.
    pub fn sample_noise_map(&mut self, width: usize, height: usize, octaves: u32) -> NoiseField {
        let salt = self.next_raw();
        let algorithm = self.config.algorithm;
        let displacement = self.config.displacement;
        let mut values = vec![0.0f32; width * height];

        let mut amplitude = self.config.amplitude;
        let mut frequency = self.config.frequency;
        for octave in 0..octaves {
            let octave_salt = salt ^ i64::from(octave).wrapping_mul(OCTAVE_PRIME);
            for y in 0..height {
                for x in 0..width {
                    let cell = voronoi(algorithm, octave_salt, x as f32 * frequency, y as f32 * frequency);
                    values[y * width + x] += amplitude * displacement * cell;
                }
            }
            amplitude *= self.config.gain;
            frequency *= 2.0;
        }

        let scale = self.config.scale;
        for value in &mut values {
            *value *= scale;
        }

        tracing::debug!(width, height, octaves, %algorithm, "Sampled noise map");
        NoiseField { width, height, values }
    }
}

#[inline]
fn lattice_hash(algorithm: Algorithm, salt: i64, ix: i64, iy: i64) -> i64 {
    let hx = algorithm.mix(salt ^ ix.wrapping_mul(LATTICE_PRIME_X));
    algorithm.mix(hx ^ iy.wrapping_mul(LATTICE_PRIME_Y))
}

/// Value of the nearest feature point around `(px, py)`.
fn voronoi(algorithm: Algorithm, salt: i64, px: f32, py: f32) -> f32 {
    let cx = px.floor() as i64;
    let cy = py.floor() as i64;

    let mut best_distance = f32::MAX;
    let mut best_hash = 0i64;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let ix = cx + dx;
            let iy = cy + dy;
            let hash = lattice_hash(algorithm, salt, ix, iy);
            let fx = ix as f32 + unit(hash);
            let fy = iy as f32 + unit(algorithm.mix(hash));
            let distance = (fx - px) * (fx - px) + (fy - py) * (fy - py);
            if distance < best_distance {
                best_distance = distance;
                best_hash = hash;
            }
        }
    }

    unit(algorithm.mix(best_hash ^ VALUE_SALT))
}

impl RngCore for NoiseSampler {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        fold(self.next_raw())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
