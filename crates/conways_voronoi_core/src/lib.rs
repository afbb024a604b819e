//! # Conways Voronoi Core
//!
//! Simulation engine for a noise-seeded cellular automaton.
//!
//! This crate contains:
//! - A catalog of integer bit-mixing functions
//! - A stateful noise sampler over one selected mixer, with fractal Voronoi fields
//! - A bounded automaton with a neighbor-count rule and a population governor
//! - A coordinator that steps the automaton on a cadence and obeys commands
//! - Configuration, settings edits, metrics and structured logging
//!
//! ## Example
//!
//! ```
//! use conways_voronoi_core::config::AppConfig;
//! use conways_voronoi_core::SimulationContext;
//!
//! let mut context = SimulationContext::new(AppConfig::default()).unwrap();
//! context.reseed().unwrap();
//! let snapshot = context.step();
//! assert_eq!(snapshot.generation, 1);
//! assert!(snapshot.active_count <= 200);
//! ```

/// Integer mixing functions and the `Algorithm` catalog
pub mod algorithms;
/// Grid, cell states and the generation rule
pub mod automaton;
/// Latest-wins command channel between input and simulation
pub mod command;
/// Configuration management for simulation parameters
pub mod config;
/// Owned simulation state for one application
pub mod context;
/// Cadence loop and renderer seam
pub mod coordinator;
/// Error types
pub mod error;
/// Run metrics and logging setup
pub mod metrics;
/// Noise sampler and noise fields
pub mod noise;
/// Per-field settings edits with fallbacks
pub mod settings;
/// Immutable generation copies for renderers
pub mod snapshot;

pub use algorithms::Algorithm;
pub use automaton::{Automaton, CellState, DisplayTag};
pub use command::{command_channel, CommandReceiver, CommandSender, SimulationCommand};
pub use context::SimulationContext;
pub use coordinator::{Coordinator, Renderer, RunOutcome};
pub use error::EngineError;
pub use metrics::{init_logging, Metrics};
pub use noise::{NoiseConfig, NoiseSampler};
pub use snapshot::GridSnapshot;
