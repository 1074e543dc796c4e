//! Simulator framework capabilities.
//!
//! The composer never creates simulator objects itself. It drives an injected framework
//! through this trait: a root factory, access to the NoC embedded in the root, one factory
//! per tile variant, and the runner. Implementations exist for the JSON manifest
//! (`sim::manifest`), for gem5's Python factories (the bindings crate), and for recording
//! mocks in tests.

use crate::config::Options;
use crate::soc::{CoreTileParams, MemTileParams, SerialTileParams};

/// Factory and runner operations of a simulator framework.
///
/// Every method may fail with `Self::Error`; the composer passes such errors through
/// unchanged and never calls `run` after a failure.
pub trait Framework {
    /// Simulation root; owns the NoC.
    type Root;
    /// Handle to the NoC that tiles attach to.
    type Noc;
    /// A created tile.
    type Tile;
    /// Failure of a factory or the runner.
    type Error: std::error::Error + 'static;

    /// Creates the simulation root together with its NoC.
    fn create_root(&mut self, options: &Options) -> Result<Self::Root, Self::Error>;

    /// Returns the NoC embedded in `root`.
    fn noc(&self, root: &Self::Root) -> Result<Self::Noc, Self::Error>;

    /// Creates a compute tile attached to `noc`.
    fn create_core_tile(
        &mut self,
        noc: &Self::Noc,
        options: &Options,
        params: &CoreTileParams,
    ) -> Result<Self::Tile, Self::Error>;

    /// Creates a Keccak accelerator tile attached to `noc`.
    fn create_kecacc_tile(
        &mut self,
        noc: &Self::Noc,
        options: &Options,
        params: &CoreTileParams,
    ) -> Result<Self::Tile, Self::Error>;

    /// Creates the serial-input tile attached to `noc`.
    fn create_serial_tile(
        &mut self,
        noc: &Self::Noc,
        options: &Options,
        params: &SerialTileParams,
    ) -> Result<Self::Tile, Self::Error>;

    /// Creates a memory tile attached to `noc`.
    fn create_mem_tile(
        &mut self,
        noc: &Self::Noc,
        options: &Options,
        params: &MemTileParams,
    ) -> Result<Self::Tile, Self::Error>;

    /// Runs the simulation of the composed graph; returns when it ends.
    fn run(
        &mut self,
        root: Self::Root,
        options: &Options,
        tiles: Vec<Self::Tile>,
    ) -> Result<(), Self::Error>;
}
