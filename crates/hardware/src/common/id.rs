//! Tile identifiers.
//!
//! This module defines the strong type used for tile numbers on the NoC. It provides:
//! 1. **Type Safety:** Keeps tile numbers apart from endpoint counts and sizes.
//! 2. **Arithmetic:** Offsetting used when numbering tiles densely in construction order.
//! 3. **Formatting:** Displays as the bare number, which is what the simulator expects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tile number on the network-on-chip.
///
/// Tile numbers are unique within a run, dense, and start at 0. They are assigned
/// in construction order: compute tiles, accelerators, the serial tile, memory tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl TileId {
    /// Creates a tile id from a raw number.
    ///
    /// # Arguments
    ///
    /// * `no` - The raw tile number.
    ///
    /// # Returns
    ///
    /// A new `TileId` wrapping the number.
    #[inline]
    pub const fn new(no: u32) -> Self {
        Self(no)
    }

    /// Returns the raw tile number.
    #[inline]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns the id `n` positions after this one.
    #[inline]
    pub const fn offset(self, n: u32) -> Self {
        Self(self.0 + n)
    }
}

impl From<u32> for TileId {
    fn from(no: u32) -> Self {
        Self(no)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
