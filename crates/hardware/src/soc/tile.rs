//! Tile descriptions.
//!
//! A `TileSpec` is the plain-data description of one tile on the NoC: its number, its role
//! and exactly the named parameters its factory receives. The parameter structs double as
//! the argument types of the framework factories.

use serde::{Deserialize, Serialize};

use crate::common::constants::SPM_SIZE;
use crate::common::{MemSize, TileId};
use crate::config::Isa;

use super::desc::{TileDesc, TileIsa, TileType, attr};

/// Tile variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    /// Compute core.
    Core,
    /// Keccak crypto accelerator.
    #[serde(rename = "kecacc")]
    KecAcc,
    /// Serial-input endpoint.
    Serial,
    /// Backing store.
    Memory,
}

/// Factory parameters of a compute or accelerator tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreTileParams {
    /// Tile number.
    pub no: TileId,
    /// Command line the tile executes.
    pub cmdline: String,
    /// Number of the memory tile the tile is backed by.
    pub mem_tile: TileId,
    /// Scratchpad size.
    pub spm_size: MemSize,
    /// Endpoint count.
    pub ep_count: u32,
}

/// Factory parameters of the serial tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialTileParams {
    /// Tile number.
    pub no: TileId,
    /// Number of the memory tile the tile is backed by.
    pub mem_tile: TileId,
    /// Endpoint count.
    pub ep_count: u32,
}

/// Factory parameters of a memory tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemTileParams {
    /// Tile number.
    pub no: TileId,
    /// Memory size.
    pub size: MemSize,
    /// Filesystem image to preload, if any.
    pub image: Option<String>,
    /// Image sequence number.
    pub image_num: u32,
    /// Endpoint count.
    pub ep_count: u32,
}

/// One tile of the topology, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TileSpec {
    /// Compute core.
    Core(CoreTileParams),
    /// Keccak accelerator.
    #[serde(rename = "kecacc")]
    KecAcc(CoreTileParams),
    /// Serial-input endpoint.
    Serial(SerialTileParams),
    /// Memory tile.
    Memory(MemTileParams),
}

impl TileSpec {
    /// Returns the tile number.
    pub const fn no(&self) -> TileId {
        match self {
            Self::Core(p) | Self::KecAcc(p) => p.no,
            Self::Serial(p) => p.no,
            Self::Memory(p) => p.no,
        }
    }

    /// Returns the tile variant.
    pub const fn kind(&self) -> TileKind {
        match self {
            Self::Core(_) => TileKind::Core,
            Self::KecAcc(_) => TileKind::KecAcc,
            Self::Serial(_) => TileKind::Serial,
            Self::Memory(_) => TileKind::Memory,
        }
    }

    /// Returns the endpoint count.
    pub const fn ep_count(&self) -> u32 {
        match self {
            Self::Core(p) | Self::KecAcc(p) => p.ep_count,
            Self::Serial(p) => p.ep_count,
            Self::Memory(p) => p.ep_count,
        }
    }

    /// Returns the command line, for tiles that execute one.
    pub fn cmdline(&self) -> Option<&str> {
        match self {
            Self::Core(p) | Self::KecAcc(p) => Some(&p.cmdline),
            Self::Serial(_) | Self::Memory(_) => None,
        }
    }

    /// Returns the referenced memory tile, for non-memory tiles.
    pub const fn mem_tile(&self) -> Option<TileId> {
        match self {
            Self::Core(p) | Self::KecAcc(p) => Some(p.mem_tile),
            Self::Serial(p) => Some(p.mem_tile),
            Self::Memory(_) => None,
        }
    }

    /// Returns the preloaded image, for memory tiles that carry one.
    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Memory(p) => p.image.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` for memory tiles.
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory(_))
    }

    /// Computes the kernel's descriptor word for this tile.
    ///
    /// # Arguments
    ///
    /// * `isa` - ISA of the programmable tiles.
    pub fn desc(&self, isa: Isa) -> TileDesc {
        match self {
            Self::Core(p) => TileDesc::new(TileType::CompImem, isa.into(), p.spm_size, 0),
            Self::KecAcc(p) => {
                TileDesc::new(TileType::CompImem, isa.into(), p.spm_size, attr::KECACC)
            }
            Self::Serial(_) => TileDesc::new(
                TileType::CompImem,
                TileIsa::SerialDev,
                MemSize::from_bytes(0),
                0,
            ),
            Self::Memory(p) => TileDesc::new(TileType::Mem, TileIsa::None, p.size, 0),
        }
    }
}

impl CoreTileParams {
    /// Creates parameters with the platform's scratchpad size.
    pub fn new(no: TileId, cmdline: impl Into<String>, mem_tile: TileId, ep_count: u32) -> Self {
        Self {
            no,
            cmdline: cmdline.into(),
            mem_tile,
            spm_size: SPM_SIZE,
            ep_count,
        }
    }
}
