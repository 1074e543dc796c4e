//! Configuration for the tile-graph composer.
//!
//! This module defines the inputs of a composition run. It provides:
//! 1. **Defaults:** The fixed platform parameters (endpoint counts, tile counts, sizes).
//! 2. **Environment Snapshot:** `EnvConfig`, read once from the process environment
//!    (or any lookup function, for tests).
//! 3. **Derived Parameters:** `PlatformConfig`, the sizing rules applied to the snapshot.
//! 4. **Options:** The option bundle handed through to the framework, of which the
//!    composer only reads `cmd`.

use std::collections::HashMap;
use std::env::VarError;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::constants::{
    CMD_SEPARATOR, DEFAULT_FS_NUM, ENV_FS, ENV_FS_NUM, ENV_ISA, ENV_TARGET, ENV_TILES,
    HW_EP_COUNT, MAX_TILES, NUM_KECACC, NUM_MEM, NUM_SERIAL, SIM_EP_COUNT,
};
use crate::common::{ConfigError, TileId};

/// Value of `M3_TARGET` that selects the hardware endpoint count.
const HW_TARGET: &str = "hw";

/// ISA of the programmable tiles.
///
/// Only recorded in tile descriptors; the factories do not receive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Isa {
    /// x86-64 cores.
    #[serde(rename = "x86_64")]
    X86_64,
    /// ARMv7 cores.
    Arm,
    /// RISC-V cores.
    #[default]
    Riscv,
}

impl FromStr for Isa {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x86_64" => Ok(Self::X86_64),
            "arm" => Ok(Self::Arm),
            "riscv" => Ok(Self::Riscv),
            other => Err(ConfigError::InvalidIsa {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X86_64 => "x86_64",
            Self::Arm => "arm",
            Self::Riscv => "riscv",
        })
    }
}

/// Snapshot of the environment variables the composer reads.
///
/// The environment is read exactly once, when the snapshot is taken; everything
/// downstream works from this value.
///
/// # Examples
///
/// ```
/// use tilegraph_core::config::EnvConfig;
///
/// let env = EnvConfig::from_pairs([("M3_GEM5_TILES", "2"), ("M3_TARGET", "hw")]).unwrap();
/// assert_eq!(env.tiles, 2);
/// assert_eq!(env.fs_num, 1);
/// assert!(env.fs_image.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// `M3_TARGET`, if set.
    pub target: Option<String>,
    /// `M3_GEM5_TILES`: number of compute tiles.
    pub tiles: u32,
    /// `M3_GEM5_FS`: filesystem image for the first memory tile. Empty counts as unset.
    pub fs_image: Option<String>,
    /// `M3_GEM5_FSNUM`: image sequence number.
    pub fs_num: u32,
    /// `M3_ISA`: ISA recorded in tile descriptors.
    pub isa: Isa,
}

impl EnvConfig {
    /// Reads the snapshot from the process environment.
    ///
    /// # Returns
    ///
    /// The snapshot, or a `ConfigError` naming the first missing or invalid variable.
    /// A variable set to a non-Unicode value is an error, not unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name))
    }

    /// Reads the snapshot through an arbitrary lookup function.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the value of the named variable, or `None` if it is unset.
    ///
    /// # Returns
    ///
    /// The snapshot, or a `ConfigError` naming the first missing or invalid variable.
    /// `M3_GEM5_TILES` is checked first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_vars(|name| lookup(name).ok_or(VarError::NotPresent))
    }

    /// Reads the snapshot through a lookup with `std::env::var` semantics.
    ///
    /// # Arguments
    ///
    /// * `var` - Returns the value of the named variable, `VarError::NotPresent` if it is
    ///   unset, or `VarError::NotUnicode` if its value is not valid Unicode.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let lookup = |name: &'static str| match var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { name }),
        };

        let tiles = match lookup(ENV_TILES)? {
            Some(value) => parse_count(ENV_TILES, &value)?,
            None => return Err(ConfigError::MissingVar { name: ENV_TILES }),
        };
        if tiles > MAX_TILES {
            return Err(ConfigError::TooManyTiles {
                value: tiles,
                max: MAX_TILES,
            });
        }
        let fs_num = match lookup(ENV_FS_NUM)? {
            Some(value) => parse_count(ENV_FS_NUM, &value)?,
            None => DEFAULT_FS_NUM,
        };
        let isa = match lookup(ENV_ISA)? {
            Some(value) => value.parse()?,
            None => Isa::default(),
        };
        let fs_image = lookup(ENV_FS)?.filter(|path| !path.is_empty());

        Ok(Self {
            target: lookup(ENV_TARGET)?,
            tiles,
            fs_image,
            fs_num,
            isa,
        })
    }

    /// Reads the snapshot from name/value pairs; variables not listed are unset.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    /// Returns `true` when `M3_TARGET` selects the hardware platform.
    pub fn is_hw_target(&self) -> bool {
        self.target.as_deref() == Some(HW_TARGET)
    }
}

/// Parses a non-negative decimal integer from an environment variable.
fn parse_count(name: &'static str, value: &str) -> Result<u32, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidInteger {
            name,
            value: value.to_string(),
        });
    }
    trimmed.parse().map_err(|_| ConfigError::InvalidInteger {
        name,
        value: value.to_string(),
    })
}

/// Sizing parameters derived from the environment snapshot.
///
/// # Examples
///
/// ```
/// use tilegraph_core::config::{EnvConfig, PlatformConfig};
/// use tilegraph_core::common::TileId;
///
/// let env = EnvConfig::from_pairs([("M3_GEM5_TILES", "2")]).unwrap();
/// let platform = PlatformConfig::from(&env);
/// assert_eq!(platform.num_eps, 192);
/// assert_eq!(platform.mem_tile_no(), TileId(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Endpoints on every tile.
    pub num_eps: u32,
    /// Number of memory tiles.
    pub num_mem: u32,
    /// Number of accelerator tiles.
    pub num_kecacc: u32,
    /// Number of compute tiles.
    pub num_tiles: u32,
    /// Image for the first memory tile.
    pub fs_image: Option<String>,
    /// Image sequence number passed to every memory tile.
    pub fs_num: u32,
    /// ISA recorded in compute and accelerator descriptors.
    pub isa: Isa,
}

impl PlatformConfig {
    /// Number of the first accelerator tile.
    pub const fn first_kecacc_no(&self) -> TileId {
        TileId(self.num_tiles)
    }

    /// Number of the serial tile.
    ///
    /// Tile numbers saturate at `u32::MAX`; counts read from the environment never
    /// get there.
    pub const fn serial_tile_no(&self) -> TileId {
        TileId(self.num_tiles.saturating_add(self.num_kecacc))
    }

    /// Number of the first memory tile; every non-memory tile references it.
    pub const fn mem_tile_no(&self) -> TileId {
        TileId(self.serial_tile_no().0.saturating_add(NUM_SERIAL))
    }

    /// Total number of tiles on the NoC, saturating at `u32::MAX`.
    pub const fn total_tiles(&self) -> u32 {
        self.mem_tile_no().0.saturating_add(self.num_mem)
    }
}

impl From<&EnvConfig> for PlatformConfig {
    fn from(env: &EnvConfig) -> Self {
        Self {
            num_eps: if env.is_hw_target() {
                HW_EP_COUNT
            } else {
                SIM_EP_COUNT
            },
            num_mem: NUM_MEM,
            num_kecacc: NUM_KECACC,
            num_tiles: env.tiles,
            fs_image: env.fs_image.clone(),
            fs_num: env.fs_num,
            isa: env.isa,
        }
    }
}

/// Option bundle handed to the framework.
///
/// The composer reads `cmd` only; `extra` is carried through untouched for the
/// framework's own use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Comma-separated command lines, one per compute tile.
    pub cmd: String,
    /// Further framework arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl Options {
    /// Creates an option bundle with the given command-line list.
    pub fn with_cmd(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            extra: Vec::new(),
        }
    }

    /// Splits `cmd` into its positional command lines.
    ///
    /// Entries are kept verbatim, including empty ones, so positions never shift.
    pub fn commands(&self) -> Vec<&str> {
        self.cmd.split(CMD_SEPARATOR).collect()
    }
}
