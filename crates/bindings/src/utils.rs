//! Utility functions exposed to Python.
//!
//! Provides the version string and logging setup for the `tilegraph` module.

use pyo3::prelude::*;
use tracing_subscriber::EnvFilter;

/// Returns the composer version string (e.g., for scripting or diagnostics).
#[pyfunction]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG` (default `filter`).
///
/// Calling it again after a subscriber is installed has no effect.
#[pyfunction]
#[pyo3(signature = (filter="info"))]
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
