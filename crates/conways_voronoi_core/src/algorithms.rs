//! Catalog of stateless integer mixers.
//!
//! Every mixer maps an `i64` seed to an `i64` value with no hidden state.
//! Arithmetic is 64-bit two's complement and wraps on overflow; right shifts
//! on the signed working value are arithmetic.
//!
//! ```
//! use conways_voronoi_core::algorithms::Algorithm;
//!
//! let algo = Algorithm::select(2);
//! assert_eq!(algo, Algorithm::XorShift32);
//! assert_eq!(algo.mix(42), algo.mix(42));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Selectable mixer. The discriminant order is the menu/index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Algorithm {
    #[default]
    AdaptedLehmer32,
    Lehmer64,
    XorShift32,
    XorSeededShift32,
    XorShift64,
    XorSeededShift64,
    XorShift128,
    Wyhash,
    Reverse17,
    Reverse23,
    XorShift7,
    XorShift256,
    XnTohl,
    XorShift64Star,
}

impl Algorithm {
    /// Number of entries in the catalog.
    pub const COUNT: usize = 14;

    pub const ALL: [Algorithm; Self::COUNT] = [
        Algorithm::AdaptedLehmer32,
        Algorithm::Lehmer64,
        Algorithm::XorShift32,
        Algorithm::XorSeededShift32,
        Algorithm::XorShift64,
        Algorithm::XorSeededShift64,
        Algorithm::XorShift128,
        Algorithm::Wyhash,
        Algorithm::Reverse17,
        Algorithm::Reverse23,
        Algorithm::XorShift7,
        Algorithm::XorShift256,
        Algorithm::XnTohl,
        Algorithm::XorShift64Star,
    ];

    /// Looks up an algorithm by catalog index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Like [`Algorithm::from_index`], but an out-of-range index falls back to
    /// [`Algorithm::AdaptedLehmer32`].
    #[must_use]
    pub fn select(index: usize) -> Self {
        Self::from_index(index).unwrap_or_default()
    }

    /// Checked lookup for callers that must refuse bad indices.
    pub fn try_from_index(index: usize) -> Result<Self, EngineError> {
        Self::from_index(index).ok_or(EngineError::AlgorithmOutOfRange {
            index,
            count: Self::COUNT,
        })
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::AdaptedLehmer32 => "AdaptedLehmer32",
            Algorithm::Lehmer64 => "Lehmer64",
            Algorithm::XorShift32 => "XorShift32",
            Algorithm::XorSeededShift32 => "XorSeededShift32",
            Algorithm::XorShift64 => "XorShift64",
            Algorithm::XorSeededShift64 => "XorSeededShift64",
            Algorithm::XorShift128 => "XorShift128",
            Algorithm::Wyhash => "Wyhash",
            Algorithm::Reverse17 => "Reverse17",
            Algorithm::Reverse23 => "Reverse23",
            Algorithm::XorShift7 => "XorShift7",
            Algorithm::XorShift256 => "XorShift256",
            Algorithm::XnTohl => "XnTohl",
            Algorithm::XorShift64Star => "XorShift64Star",
        }
    }

    /// Applies the mixer to `seed`.
    #[inline]
    #[must_use]
    pub fn mix(self, seed: i64) -> i64 {
        match self {
            Algorithm::AdaptedLehmer32 => adapted_lehmer32(seed),
            Algorithm::Lehmer64 => lehmer64(seed),
            Algorithm::XorShift32 => xorshift32(seed),
            Algorithm::XorSeededShift32 => xorseededshift32(seed),
            Algorithm::XorShift64 => xorshift64(seed),
            Algorithm::XorSeededShift64 => xorseededshift64(seed),
            Algorithm::XorShift128 => xorshift128(seed),
            Algorithm::Wyhash => wyhash(seed),
            Algorithm::Reverse17 => reverse17(seed),
            Algorithm::Reverse23 => reverse23(seed),
            Algorithm::XorShift7 => xorshift7(seed),
            Algorithm::XorShift256 => xorshift256(seed),
            Algorithm::XnTohl => xn_tohl(seed),
            Algorithm::XorShift64Star => xorshift64star(seed),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a catalog index (`"2"`) or a case-insensitive name (`"xorshift32"`).
impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::try_from_index(index);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|algo| algo.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EngineError::UnknownAlgorithm(trimmed.to_string()))
    }
}

pub fn xorshift32(seed: i64) -> i64 {
    let mut r = seed;
    r ^= r << 13;
    r ^= r >> 17;
    r ^= r << 5;
    r
}

pub fn xorshift64(seed: i64) -> i64 {
    let mut r = seed;
    r ^= r << 13;
    r ^= r >> 7;
    r ^= r << 17;
    r
}

/// Xorshift with every operand taken from the original seed.
pub fn xorseededshift32(seed: i64) -> i64 {
    let mut r = seed;
    r ^= seed << 13;
    r ^= seed >> 17;
    r ^= seed << 5;
    r
}

pub fn xorseededshift64(seed: i64) -> i64 {
    let mut r = seed;
    r ^= seed << 13;
    r ^= seed >> 7;
    r ^= seed << 17;
    r
}

/// `(s ^ (s >> 17) ^ (s >> 34) ^ (s >> 51)) & i64::MAX`
pub fn reverse17(seed: i64) -> i64 {
    (seed ^ (seed >> 17) ^ (seed >> 34) ^ (seed >> 51)) & i64::MAX
}

/// `(s ^ (s << 23) ^ (s << 46)) & i64::MAX`
pub fn reverse23(seed: i64) -> i64 {
    (seed ^ (seed << 23) ^ (seed << 46)) & i64::MAX
}

pub fn xorshift128(seed: i64) -> i64 {
    let folded = reverse23(reverse17(seed));
    let mut r = seed;
    r ^= r << 23;
    r ^= r << 17;
    r ^= folded;
    r ^= folded >> 7;
    r
}

/// Two rounds of `<<1, <<7, >>4` folding; the second round folds the first.
pub fn xorshift7(seed: i64) -> i64 {
    let mut r = (seed << 1) ^ (seed << 7) ^ (seed >> 4);
    r ^= (r << 1) ^ (r << 7) ^ (r >> 4);
    r
}

/// Four lanes seeded through the smaller xorshifts, one xoshiro-style
/// scramble, then a byte-swap fold.
///
/// The output folds in `c` as well (`... ^ a ^ c ^ d`). Leaving `c` out would
/// make the third lane dead after the scramble.
pub fn xorshift256(seed: i64) -> i64 {
    let mut a = seed;
    let mut b = xorshift32(a);
    let mut c = xorshift64(b);
    let mut d = xorshift128(c);

    let t = b << 17;

    c ^= a;
    d ^= b;
    b ^= c;
    a ^= d;

    c ^= t;
    d = rol64(d, 45);

    let r = rol64(b.wrapping_mul(5), 7).wrapping_mul(9) ^ a ^ c ^ d;
    r ^ xn_tohl(r)
}

#[inline]
pub fn rol64(x: i64, k: u32) -> i64 {
    x.rotate_left(k)
}

/// Byte-swaps the low 32-bit word of `seed`. The result is zero-extended.
pub fn xn_tohl(seed: i64) -> i64 {
    i64::from((seed as u32).swap_bytes())
}

pub fn xorshift64star(seed: i64) -> i64 {
    xorshift64(seed).wrapping_mul(0x2545_F491_4F6C_DD1D)
}

/// High word of the 128-bit product with the Lehmer multiplier.
///
/// The product is widened to `u128` before shifting. Shifting a 64-bit value
/// by 64 is masked to a shift by 0 on most targets and would return the low
/// word (the plain wrapping product) instead.
pub fn lehmer64(seed: i64) -> i64 {
    let product = u128::from(seed as u64) * 0xda94_2042_e4dd_58b5_u128;
    (product >> 64) as u64 as i64
}

/// Two 32-bit multiply/fold rounds after offsetting by `i32::MAX`.
pub fn adapted_lehmer32(seed: i64) -> i64 {
    let value = (seed as i32).wrapping_add(i32::MAX);
    let tmp = i64::from(value).wrapping_mul(0x4a39_b70d);
    let m1 = ((tmp >> 32) ^ tmp) as i32;
    let tmp = i64::from(m1).wrapping_mul(0x12fa_d5c9);
    i64::from(((tmp >> 32) ^ tmp) as i32)
}

pub fn wyhash(seed: i64) -> i64 {
    let v = seed.wrapping_add(0x60be_e2be_e120_fc15);
    let tmp = v.wrapping_mul(0x60be_e2be_e120_fc15);
    let m1 = (tmp << 16) ^ tmp;
    let tmp = m1.wrapping_mul(0x1b03_7387_12fa_d5c9);
    (tmp >> 16) ^ tmp
}
