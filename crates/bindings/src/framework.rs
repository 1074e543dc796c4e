//! Framework adapter over gem5's Python tile factories.
//!
//! Implements the composer's `Framework` trait by calling the factory functions of a Python
//! module (gem5's `tcu_fs` configuration helpers) with the keyword arguments they expect.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use tilegraph_core::Options;
use tilegraph_core::sim::Framework;
use tilegraph_core::soc::{CoreTileParams, MemTileParams, SerialTileParams};

/// Factory functions looked up on the module.
mod factory {
    pub const ROOT: &str = "createRoot";
    pub const CORE: &str = "createCoreTile";
    pub const KECACC: &str = "createKecAccTile";
    pub const SERIAL: &str = "createSerialTile";
    pub const MEM: &str = "createMemTile";
    pub const RUN: &str = "runSimulation";
}

/// Framework that drives a Python module's tile factories.
///
/// The Python option object is passed to every factory as `options`; the Rust-side
/// `Options` only supplies the command lines the composer reads.
#[derive(Debug)]
pub struct PyFramework<'py> {
    module: Bound<'py, PyAny>,
    options: Bound<'py, PyAny>,
}

impl<'py> PyFramework<'py> {
    /// Creates an adapter for `module`, passing `options` to every factory.
    pub fn new(module: Bound<'py, PyAny>, options: Bound<'py, PyAny>) -> Self {
        Self { module, options }
    }

    /// Keyword arguments shared by every tile factory.
    fn tile_kwargs(
        &self,
        noc: &Bound<'py, PyAny>,
        no: u32,
        ep_count: u32,
    ) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new(self.module.py());
        kwargs.set_item("noc", noc)?;
        kwargs.set_item("options", &self.options)?;
        kwargs.set_item("no", no)?;
        kwargs.set_item("epCount", ep_count)?;
        Ok(kwargs)
    }

    fn core_kwargs(
        &self,
        noc: &Bound<'py, PyAny>,
        params: &CoreTileParams,
    ) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = self.tile_kwargs(noc, params.no.val(), params.ep_count)?;
        kwargs.set_item("cmdline", &params.cmdline)?;
        kwargs.set_item("memTile", params.mem_tile.val())?;
        kwargs.set_item("spmsize", params.spm_size.to_mb_string())?;
        Ok(kwargs)
    }

    fn call_factory(
        &self,
        name: &str,
        kwargs: &Bound<'py, PyDict>,
    ) -> PyResult<Bound<'py, PyAny>> {
        self.module.call_method(name, (), Some(kwargs))
    }
}

impl<'py> Framework for PyFramework<'py> {
    type Root = Bound<'py, PyAny>;
    type Noc = Bound<'py, PyAny>;
    type Tile = Bound<'py, PyAny>;
    type Error = PyErr;

    fn create_root(&mut self, _options: &Options) -> PyResult<Self::Root> {
        self.module.call_method1(factory::ROOT, (&self.options,))
    }

    fn noc(&self, root: &Self::Root) -> PyResult<Self::Noc> {
        root.getattr("noc")
    }

    fn create_core_tile(
        &mut self,
        noc: &Self::Noc,
        _options: &Options,
        params: &CoreTileParams,
    ) -> PyResult<Self::Tile> {
        let kwargs = self.core_kwargs(noc, params)?;
        self.call_factory(factory::CORE, &kwargs)
    }

    fn create_kecacc_tile(
        &mut self,
        noc: &Self::Noc,
        _options: &Options,
        params: &CoreTileParams,
    ) -> PyResult<Self::Tile> {
        let kwargs = self.core_kwargs(noc, params)?;
        self.call_factory(factory::KECACC, &kwargs)
    }

    fn create_serial_tile(
        &mut self,
        noc: &Self::Noc,
        _options: &Options,
        params: &SerialTileParams,
    ) -> PyResult<Self::Tile> {
        let kwargs = self.tile_kwargs(noc, params.no.val(), params.ep_count)?;
        kwargs.set_item("memTile", params.mem_tile.val())?;
        self.call_factory(factory::SERIAL, &kwargs)
    }

    fn create_mem_tile(
        &mut self,
        noc: &Self::Noc,
        _options: &Options,
        params: &MemTileParams,
    ) -> PyResult<Self::Tile> {
        let kwargs = self.tile_kwargs(noc, params.no.val(), params.ep_count)?;
        kwargs.set_item("size", params.size.to_mb_string())?;
        kwargs.set_item("image", params.image.as_deref())?;
        kwargs.set_item("imageNum", params.image_num)?;
        self.call_factory(factory::MEM, &kwargs)
    }

    fn run(
        &mut self,
        root: Self::Root,
        _options: &Options,
        tiles: Vec<Self::Tile>,
    ) -> PyResult<()> {
        let tiles = PyList::new(self.module.py(), tiles)?;
        let _ = self
            .module
            .call_method1(factory::RUN, (root, &self.options, tiles))?;
        Ok(())
    }
}
