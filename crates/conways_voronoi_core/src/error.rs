//! Error types for the simulation core.
//!
//! Only conditions the caller can act on live here. Bad user input on
//! settings is not an error at all: it resolves to a fallback value (see
//! [`crate::settings`]).

use thiserror::Error;

/// Main error type for conways_voronoi_core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The grid cannot hold a border ring plus room for seed blobs.
    #[error("Grid too small: {width}x{height} (minimum {min}x{min})")]
    GridTooSmall { width: usize, height: usize, min: usize },

    /// Algorithm index past the end of the catalog.
    #[error("Algorithm index {index} out of range (catalog has {count} entries)")]
    AlgorithmOutOfRange { index: usize, count: usize },

    /// Unknown algorithm name.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Result type alias for conways_voronoi_core operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Creates a grid-size error for the given dimensions.
    #[must_use]
    pub fn grid_too_small(width: usize, height: usize) -> Self {
        Self::GridTooSmall {
            width,
            height,
            min: crate::automaton::MIN_GRID_SIDE,
        }
    }
}
