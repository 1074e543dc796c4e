//! Platform constants.
//!
//! This module defines the fixed parameters of the scratchpad-memory platform. It includes:
//! 1. **Endpoint Counts:** Per-tile endpoints for hardware and simulator targets.
//! 2. **Tile Counts:** The fixed number of accelerator and memory tiles.
//! 3. **Sizes:** Scratchpad and memory tile capacities.
//! 4. **Environment Names:** The variables the composer reads.

use super::size::MemSize;

/// Endpoints per tile when targeting the hardware platform (`M3_TARGET=hw`).
pub const HW_EP_COUNT: u32 = 128;

/// Endpoints per tile for every other target.
pub const SIM_EP_COUNT: u32 = 192;

/// Number of Keccak accelerator tiles.
pub const NUM_KECACC: u32 = 1;

/// Number of memory tiles.
pub const NUM_MEM: u32 = 1;

/// Number of serial-input tiles.
pub const NUM_SERIAL: u32 = 1;

/// Largest accepted number of compute tiles; every tile number must fit in a `u32`.
pub const MAX_TILES: u32 = u32::MAX - NUM_KECACC - NUM_SERIAL - NUM_MEM;

/// Scratchpad size of compute and accelerator tiles.
pub const SPM_SIZE: MemSize = MemSize::from_mib(32);

/// Capacity of each memory tile.
pub const MEM_TILE_SIZE: MemSize = MemSize::from_mib(3072);

/// Default filesystem image sequence number.
pub const DEFAULT_FS_NUM: u32 = 1;

/// Command-line index the accelerator tile takes its command from.
///
/// Fixed regardless of the number of compute tiles; see `Topology::plan`.
pub const KECACC_CMD_INDEX: usize = 1;

/// Separator between command lines in the `cmd` option.
pub const CMD_SEPARATOR: char = ',';

/// Build target selector; `hw` selects the hardware endpoint count.
pub const ENV_TARGET: &str = "M3_TARGET";

/// Number of compute tiles (required).
pub const ENV_TILES: &str = "M3_GEM5_TILES";

/// Filesystem image for the first memory tile (optional).
pub const ENV_FS: &str = "M3_GEM5_FS";

/// Filesystem image sequence number (optional, defaults to [`DEFAULT_FS_NUM`]).
pub const ENV_FS_NUM: &str = "M3_GEM5_FSNUM";

/// ISA of the compute tiles, recorded in tile descriptors (optional).
pub const ENV_ISA: &str = "M3_ISA";
