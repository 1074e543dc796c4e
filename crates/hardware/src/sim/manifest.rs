//! JSON manifest framework.
//!
//! An in-process [`Framework`] whose factories build plain records and whose runner writes
//! the composed graph as a JSON manifest. External simulator front ends read the manifest
//! instead of running the composition themselves.
//!
//! The manifest has three members: `root` (with its `noc`), the `options` bundle, and the
//! `tiles` in construction order. Each tile carries its factory parameters, the NoC it is
//! attached to, and its descriptor word.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Isa, Options};
use crate::soc::{CoreTileParams, MemTileParams, SerialTileParams, TileDesc, TileSpec};

use super::framework::Framework;

/// Name of the single NoC in every manifest.
pub const NOC_NAME: &str = "noc";

/// Errors of the manifest runner.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Writing the manifest failed.
    #[error("failed to write manifest: {0}")]
    Io(#[from] io::Error),

    /// Serializing the manifest failed.
    #[error("failed to serialize manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// The NoC of a manifest root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NocRecord {
    /// Object name of the NoC.
    pub name: String,
}

/// The root object of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootRecord {
    /// The single NoC all tiles attach to.
    pub noc: NocRecord,
}

/// A created tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Name of the NoC the tile is attached to.
    pub noc: String,
    /// Factory parameters, tagged by kind.
    #[serde(flatten)]
    pub spec: TileSpec,
    /// Descriptor word the kernel sees for the tile.
    pub desc: TileDesc,
}

/// The document written by the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Root object.
    pub root: RootRecord,
    /// Option bundle of the run.
    pub options: Options,
    /// Tiles in construction order.
    pub tiles: Vec<TileRecord>,
}

/// Framework that records tiles and writes them as a JSON manifest when run.
#[derive(Debug)]
pub struct ManifestFramework<W> {
    writer: W,
    isa: Isa,
    pretty: bool,
}

impl<W: Write> ManifestFramework<W> {
    /// Creates a manifest framework writing to `writer`.
    ///
    /// # Arguments
    ///
    /// * `writer` - Destination of the manifest.
    /// * `isa` - ISA recorded in the descriptors of programmable tiles.
    pub const fn new(writer: W, isa: Isa) -> Self {
        Self {
            writer,
            isa,
            pretty: true,
        }
    }

    /// Writes the manifest on a single line instead of pretty-printed.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn record(&self, noc: &NocRecord, spec: TileSpec) -> TileRecord {
        let desc = spec.desc(self.isa);
        TileRecord {
            noc: noc.name.clone(),
            spec,
            desc,
        }
    }
}

impl<W: Write> Framework for ManifestFramework<W> {
    type Root = RootRecord;
    type Noc = NocRecord;
    type Tile = TileRecord;
    type Error = ManifestError;

    fn create_root(&mut self, _options: &Options) -> Result<RootRecord, ManifestError> {
        Ok(RootRecord {
            noc: NocRecord {
                name: NOC_NAME.to_string(),
            },
        })
    }

    fn noc(&self, root: &RootRecord) -> Result<NocRecord, ManifestError> {
        Ok(root.noc.clone())
    }

    fn create_core_tile(
        &mut self,
        noc: &NocRecord,
        _options: &Options,
        params: &CoreTileParams,
    ) -> Result<TileRecord, ManifestError> {
        Ok(self.record(noc, TileSpec::Core(params.clone())))
    }

    fn create_kecacc_tile(
        &mut self,
        noc: &NocRecord,
        _options: &Options,
        params: &CoreTileParams,
    ) -> Result<TileRecord, ManifestError> {
        Ok(self.record(noc, TileSpec::KecAcc(params.clone())))
    }

    fn create_serial_tile(
        &mut self,
        noc: &NocRecord,
        _options: &Options,
        params: &SerialTileParams,
    ) -> Result<TileRecord, ManifestError> {
        Ok(self.record(noc, TileSpec::Serial(params.clone())))
    }

    fn create_mem_tile(
        &mut self,
        noc: &NocRecord,
        _options: &Options,
        params: &MemTileParams,
    ) -> Result<TileRecord, ManifestError> {
        Ok(self.record(noc, TileSpec::Memory(params.clone())))
    }

    fn run(
        &mut self,
        root: RootRecord,
        options: &Options,
        tiles: Vec<TileRecord>,
    ) -> Result<(), ManifestError> {
        let manifest = Manifest {
            root,
            options: options.clone(),
            tiles,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &manifest)?;
        } else {
            serde_json::to_writer(&mut self.writer, &manifest)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
