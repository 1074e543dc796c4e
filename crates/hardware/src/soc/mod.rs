//! Tiles and topology of the simulated system.
//!
//! This module describes the NoC system as plain data, independent of any simulator
//! framework: the tile variants with their factory parameters, the kernel's tile
//! descriptor words, and the planner that lays out the ordered tile list.

/// Topology planner.
pub mod builder;

/// Tile descriptor words.
pub mod desc;

/// Tile variants and factory parameters.
pub mod tile;

pub use builder::Topology;
pub use desc::TileDesc;
pub use tile::{CoreTileParams, MemTileParams, SerialTileParams, TileKind, TileSpec};
