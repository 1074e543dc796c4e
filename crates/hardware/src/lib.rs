//! Tile-graph composer for gem5 simulations of tiled multi-core systems.
//!
//! This crate composes the network-on-chip system of a scratchpad-memory platform and hands
//! it to an external simulator. It provides:
//! 1. **Configuration:** Environment snapshot (`M3_TARGET`, `M3_GEM5_TILES`, `M3_GEM5_FS`,
//!    `M3_GEM5_FSNUM`, `M3_ISA`) and the sizing rules derived from it.
//! 2. **Topology:** Compute tiles, a Keccak accelerator, the serial tile and memory tiles,
//!    numbered densely in construction order, with their kernel descriptor words.
//! 3. **Composition:** A framework capability trait, the composer that drives it, and a
//!    JSON manifest framework.
//! 4. **Build Recipes:** The declarative per-directory recipes of the OS tree and the
//!    environment interface they are written against.

/// Common types (tile ids, sizes, constants, errors).
pub mod common;
/// Environment snapshot, derived platform parameters and options.
pub mod config;
/// Per-directory build recipes.
pub mod recipe;
/// Framework trait, composer and manifest framework.
pub mod sim;
/// Tile model, descriptors and topology planner.
pub mod soc;

/// Environment snapshot; take one with `EnvConfig::from_env()`.
pub use crate::config::{EnvConfig, Options, PlatformConfig};
/// Composition entry point.
pub use crate::sim::{Framework, compose};
/// Planned tile list.
pub use crate::soc::Topology;
