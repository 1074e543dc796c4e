//! Tile descriptor words.
//!
//! The kernel identifies each tile by a 64-bit descriptor word. This module encodes and
//! decodes that word:
//! 1. **Layout:** Bits 0..3 hold the tile type, bits 3..7 the ISA, bits 7..11 the attributes,
//!    and the page-aligned memory size is OR-ed into the upper bits.
//! 2. **Queries:** Programmability, device tiles, activity and multiplexing support.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::MemSize;
use crate::config::Isa;

const TYPE_MASK: u64 = 0x7;
const ISA_SHIFT: u64 = 3;
const ISA_MASK: u64 = 0xF;
const ATTR_SHIFT: u64 = 7;
const ATTR_MASK: u64 = 0xF;
const MEM_MASK: u64 = !0xFFF;

/// Kind of tile as seen by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u64)]
pub enum TileType {
    /// Compute tile with internal memory (scratchpad).
    CompImem = 0,
    /// Compute tile with cache and external memory.
    CompEmem = 1,
    /// Memory tile.
    Mem = 2,
}

impl TileType {
    const fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            0 => Some(Self::CompImem),
            1 => Some(Self::CompEmem),
            2 => Some(Self::Mem),
            _ => None,
        }
    }
}

/// Instruction set or device class of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u64)]
pub enum TileIsa {
    /// No core (memory tiles).
    None = 0,
    /// x86-64 core.
    X86 = 1,
    /// ARM core.
    Arm = 2,
    /// RISC-V core.
    RiscV = 3,
    /// Indirect-chaining accelerator.
    AccelIndir = 4,
    /// Copy accelerator.
    AccelCopy = 5,
    /// ROT13 accelerator.
    AccelRot13 = 6,
    /// IDE controller.
    IdeDev = 7,
    /// Network interface.
    NicDev = 8,
    /// Serial input device.
    SerialDev = 9,
}

impl TileIsa {
    const fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            0 => Some(Self::None),
            1 => Some(Self::X86),
            2 => Some(Self::Arm),
            3 => Some(Self::RiscV),
            4 => Some(Self::AccelIndir),
            5 => Some(Self::AccelCopy),
            6 => Some(Self::AccelRot13),
            7 => Some(Self::IdeDev),
            8 => Some(Self::NicDev),
            9 => Some(Self::SerialDev),
            _ => None,
        }
    }
}

impl From<Isa> for TileIsa {
    fn from(isa: Isa) -> Self {
        match isa {
            Isa::X86_64 => Self::X86,
            Isa::Arm => Self::Arm,
            Isa::Riscv => Self::RiscV,
        }
    }
}

/// Tile attribute bits.
pub mod attr {
    /// BOOM out-of-order core.
    pub const BOOM: u8 = 0x1;
    /// Rocket in-order core.
    pub const ROCKET: u8 = 0x2;
    /// Tile has a network interface.
    pub const NIC: u8 = 0x4;
    /// Tile has a Keccak accelerator.
    pub const KECACC: u8 = 0x8;
}

/// A 64-bit tile descriptor word.
///
/// # Examples
///
/// ```
/// use tilegraph_core::common::MemSize;
/// use tilegraph_core::soc::desc::{attr, TileDesc, TileIsa, TileType};
///
/// let desc = TileDesc::new(TileType::CompImem, TileIsa::RiscV, MemSize::from_mib(32), attr::KECACC);
/// assert_eq!(desc.tile_type(), Some(TileType::CompImem));
/// assert_eq!(desc.isa(), Some(TileIsa::RiscV));
/// assert_eq!(desc.attr(), attr::KECACC);
/// assert_eq!(desc.mem_size(), MemSize::from_mib(32));
/// assert!(desc.is_programmable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileDesc(u64);

impl TileDesc {
    /// Builds a descriptor from its fields.
    ///
    /// # Arguments
    ///
    /// * `ty` - Tile type.
    /// * `isa` - ISA or device class.
    /// * `mem_size` - Internal memory size; the low 12 bits are dropped.
    /// * `attr` - Attribute bits (see [`attr`]).
    pub const fn new(ty: TileType, isa: TileIsa, mem_size: MemSize, attr: u8) -> Self {
        Self(
            (ty as u64)
                | ((isa as u64) << ISA_SHIFT)
                | (((attr as u64) & ATTR_MASK) << ATTR_SHIFT)
                | (mem_size.bytes() & MEM_MASK),
        )
    }

    /// Wraps a raw descriptor word.
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw descriptor word.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the tile type, or `None` for an unknown encoding.
    pub const fn tile_type(self) -> Option<TileType> {
        TileType::from_raw(self.0 & TYPE_MASK)
    }

    /// Returns the ISA, or `None` for an unknown encoding.
    pub const fn isa(self) -> Option<TileIsa> {
        TileIsa::from_raw((self.0 >> ISA_SHIFT) & ISA_MASK)
    }

    /// Returns the attribute bits.
    pub const fn attr(self) -> u8 {
        ((self.0 >> ATTR_SHIFT) & ATTR_MASK) as u8
    }

    /// Returns the memory size encoded in the upper bits.
    pub const fn mem_size(self) -> MemSize {
        MemSize::from_bytes(self.0 & MEM_MASK)
    }

    /// Returns `true` if the tile has a programmable core.
    pub fn is_programmable(self) -> bool {
        self.isa()
            .is_some_and(|isa| isa != TileIsa::None && isa < TileIsa::AccelIndir)
    }

    /// Returns `true` for device tiles (NIC, IDE, serial).
    pub fn is_device(self) -> bool {
        matches!(
            self.isa(),
            Some(TileIsa::NicDev | TileIsa::IdeDev | TileIsa::SerialDev)
        )
    }

    /// Returns `true` if activities can run on the tile.
    pub fn supports_activities(self) -> bool {
        self.tile_type() != Some(TileType::Mem)
    }

    /// Returns `true` if the tile takes part in the context-switching protocol.
    pub fn supports_tilemux(self) -> bool {
        self.supports_activities() && !self.is_device()
    }

    /// Returns `true` if the tile has internal memory.
    pub fn has_internal_mem(self) -> bool {
        self.tile_type() == Some(TileType::CompImem)
    }
}

impl fmt::Display for TileDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
