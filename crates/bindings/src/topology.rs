//! Topology Python binding.
//!
//! Exposes a planned topology to Python for inspection before (or instead of) composing:
//! tile count, memory tile number, per-tile descriptor words, and the JSON form.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use tilegraph_core::Topology;

/// Python-exposed topology: wraps a planned `Topology`.
#[pyclass(name = "Topology")]
#[derive(Debug, Clone)]
pub struct PyTopology {
    pub inner: Topology,
}

#[pymethods]
impl PyTopology {
    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Number of the first memory tile.
    #[getter]
    fn mem_tile_no(&self) -> u32 {
        self.inner.mem_tile_no().val()
    }

    /// Endpoint count of every tile.
    #[getter]
    fn ep_count(&self) -> u32 {
        self.inner.platform.num_eps
    }

    /// Command line of each tile, `None` for serial and memory tiles.
    fn cmdlines(&self) -> Vec<Option<String>> {
        self.inner
            .tiles()
            .iter()
            .map(|t| t.cmdline().map(str::to_string))
            .collect()
    }

    /// Descriptor word of each tile, indexed by tile number.
    fn descriptors(&self) -> Vec<u64> {
        self.inner.descriptors().into_iter().map(|d| d.value()).collect()
    }

    /// The topology as a JSON string.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Topology(tiles={}, mem_tile_no={}, ep_count={})",
            self.inner.len(),
            self.inner.mem_tile_no(),
            self.inner.platform.num_eps
        )
    }
}
