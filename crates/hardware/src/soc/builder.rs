//! Topology planning.
//!
//! This module turns the derived platform parameters and the option bundle into the
//! complete, ordered tile list. It performs:
//! 1. **Validation:** The command-line list must cover every compute tile. Nothing is
//!    created when it does not.
//! 2. **Numbering:** Tiles are numbered densely from 0 in construction order: compute
//!    tiles, accelerators, the serial tile, memory tiles.
//! 3. **Wiring:** Every non-memory tile references the first memory tile; only the first
//!    memory tile carries the filesystem image.

use serde::{Deserialize, Serialize};

use crate::common::constants::{KECACC_CMD_INDEX, MEM_TILE_SIZE, NUM_SERIAL};
use crate::common::{ConfigError, TileId};
use crate::config::{Options, PlatformConfig};

use super::desc::TileDesc;
use super::tile::{CoreTileParams, MemTileParams, SerialTileParams, TileKind, TileSpec};

/// The validated tile list of one run, in construction order.
///
/// # Examples
///
/// ```
/// use tilegraph_core::config::{EnvConfig, Options, PlatformConfig};
/// use tilegraph_core::soc::Topology;
///
/// let env = EnvConfig::from_pairs([("M3_GEM5_TILES", "2")]).unwrap();
/// let topology = Topology::plan(&PlatformConfig::from(&env), &Options::with_cmd("c0,c1")).unwrap();
/// assert_eq!(topology.len(), 5);
/// assert_eq!(topology.tiles()[2].cmdline(), Some("c1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Parameters the plan was derived from.
    pub platform: PlatformConfig,
    tiles: Vec<TileSpec>,
}

impl Topology {
    /// Plans the topology for the given platform and options.
    ///
    /// # Arguments
    ///
    /// * `platform` - Derived sizing parameters.
    /// * `options` - Option bundle; only `cmd` is read.
    ///
    /// # Returns
    ///
    /// The ordered tile list, or `ConfigError::TooFewCommands` if `cmd` has fewer entries
    /// than compute tiles.
    ///
    /// The accelerator takes its command line from index 1 of the list no matter how many
    /// compute tiles there are. A single-entry list has no index 1; the accelerator then
    /// runs that one entry, the same as tile 0.
    pub fn plan(platform: &PlatformConfig, options: &Options) -> Result<Self, ConfigError> {
        let commands = options.commands();
        let needed = required_commands(platform);
        if commands.len() < needed {
            return Err(ConfigError::TooFewCommands {
                needed,
                found: commands.len(),
            });
        }

        let kecacc_cmd = commands
            .get(KECACC_CMD_INDEX)
            .or_else(|| commands.last())
            .copied()
            .unwrap_or_default();
        let mem_tile = platform.mem_tile_no();
        let ep_count = platform.num_eps;
        let mut tiles = Vec::with_capacity(platform.total_tiles() as usize);

        for (i, cmdline) in commands.iter().take(platform.num_tiles as usize).enumerate() {
            tiles.push(TileSpec::Core(CoreTileParams::new(
                TileId(i as u32),
                *cmdline,
                mem_tile,
                ep_count,
            )));
        }

        for i in 0..platform.num_kecacc {
            tiles.push(TileSpec::KecAcc(CoreTileParams::new(
                platform.first_kecacc_no().offset(i),
                kecacc_cmd,
                mem_tile,
                ep_count,
            )));
        }

        for i in 0..NUM_SERIAL {
            tiles.push(TileSpec::Serial(SerialTileParams {
                no: platform.serial_tile_no().offset(i),
                mem_tile,
                ep_count,
            }));
        }

        for i in 0..platform.num_mem {
            tiles.push(TileSpec::Memory(MemTileParams {
                no: mem_tile.offset(i),
                size: MEM_TILE_SIZE,
                image: if i == 0 {
                    platform.fs_image.clone()
                } else {
                    None
                },
                image_num: platform.fs_num,
                ep_count,
            }));
        }

        Ok(Self {
            platform: platform.clone(),
            tiles,
        })
    }

    /// Returns the tiles in construction order.
    pub fn tiles(&self) -> &[TileSpec] {
        &self.tiles
    }

    /// Returns the number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if the topology has no tiles; never the case for a planned topology.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterates over the tiles of one kind, in construction order.
    pub fn of_kind(&self, kind: TileKind) -> impl Iterator<Item = &TileSpec> {
        self.tiles.iter().filter(move |t| t.kind() == kind)
    }

    /// Returns the number of the first memory tile.
    pub const fn mem_tile_no(&self) -> TileId {
        self.platform.mem_tile_no()
    }

    /// Returns the descriptor word of every tile, indexed by tile number.
    pub fn descriptors(&self) -> Vec<TileDesc> {
        self.tiles
            .iter()
            .map(|t| t.desc(self.platform.isa))
            .collect()
    }
}

/// Minimum number of `cmd` entries the platform needs.
fn required_commands(platform: &PlatformConfig) -> usize {
    let for_kecacc = usize::from(platform.num_kecacc > 0);
    (platform.num_tiles as usize).max(for_kecacc)
}
