//! Common types used throughout the composer.
//!
//! This module provides the building blocks shared by the planner, the composer and the
//! framework adapters. It includes:
//! 1. **Tile Ids:** A strong type for tile numbers.
//! 2. **Sizes:** Memory sizes with the simulator's `"32MB"` string form.
//! 3. **Constants:** Endpoint counts, tile counts, sizes and environment variable names.
//! 4. **Error Handling:** Configuration and composition error types.

/// Platform constants.
pub mod constants;

/// Error types.
pub mod error;

/// Tile id type.
pub mod id;

/// Memory size type.
pub mod size;

pub use error::{ComposeError, ConfigError};
pub use id::TileId;
pub use size::MemSize;
