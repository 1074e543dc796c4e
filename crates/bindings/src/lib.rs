//! Python bindings for the tilegraph composer.
//!
//! This crate lets a gem5 configuration script hand composition to Rust. It provides:
//! 1. **Composition:** `compose(module, options)` reads the environment, plans the topology
//!    and drives the module's tile factories and runner (gem5's `tcu_fs` helpers).
//! 2. **Planning:** `plan(cmd)` returns the planned `Topology` for inspection.
//! 3. **Utilities:** Version string and logging setup.

use pyo3::prelude::*;
use tilegraph_core::config::PlatformConfig;
use tilegraph_core::{EnvConfig, Options, Topology};
use tracing::debug;

/// Error and option conversions.
pub mod conversion;
/// Framework adapter over the Python tile factories.
pub mod framework;
/// Topology binding (`PyTopology`).
pub mod topology;
/// Utility functions (version, logging).
pub mod utils;

use conversion::{compose_error, config_error, options_from_py};
use framework::PyFramework;
use topology::PyTopology;

/// Composes the tile graph with `module`'s factories and runs it.
///
/// # Arguments
///
/// * `module` - Object providing `createRoot`, `createCoreTile`, `createKecAccTile`,
///   `createSerialTile`, `createMemTile` and `runSimulation`.
/// * `options` - Parsed simulator options; passed to every factory, `cmd` is read.
///
/// # Returns
///
/// `None` once the simulation ends. Invalid environment or options raise `ValueError`
/// before any factory is called; exceptions from factories or the runner propagate.
#[pyfunction]
fn compose<'py>(module: Bound<'py, PyAny>, options: Bound<'py, PyAny>) -> PyResult<()> {
    let opts = options_from_py(&options)?;
    let env = EnvConfig::from_env().map_err(|e| config_error(&e))?;
    debug!(tiles = env.tiles, target = ?env.target, "composing through Python factories");
    let mut framework = PyFramework::new(module, options);
    tilegraph_core::compose(&mut framework, &env, &opts).map_err(compose_error)
}

/// Plans the topology for `cmd` from the current environment without creating anything.
#[pyfunction]
fn plan(cmd: &str) -> PyResult<PyTopology> {
    let env = EnvConfig::from_env().map_err(|e| config_error(&e))?;
    let inner = Topology::plan(&PlatformConfig::from(&env), &Options::with_cmd(cmd))
        .map_err(|e| config_error(&e))?;
    Ok(PyTopology { inner })
}

/// Registers all classes and functions onto the given Python module.
///
/// # Arguments
///
/// * `m` - The Python module to register types and functions on.
///
/// # Returns
///
/// `Ok(())` on success, or a `PyErr` if registration fails.
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTopology>()?;

    m.add_function(wrap_pyfunction!(compose, m)?)?;
    m.add_function(wrap_pyfunction!(plan, m)?)?;
    m.add_function(wrap_pyfunction!(utils::version, m)?)?;
    m.add_function(wrap_pyfunction!(utils::init_logging, m)?)?;

    Ok(())
}

#[pymodule]
fn tilegraph(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_module(m)
}
