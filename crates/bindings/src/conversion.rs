//! Rust↔Python conversions.
//!
//! Maps composer errors onto Python exceptions and reads the `cmd` attribute of the Python
//! option object into the composer's `Options`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use tilegraph_core::Options;
use tilegraph_core::common::{ComposeError, ConfigError};

/// Converts a configuration error into a `ValueError` carrying its message.
pub fn config_error(err: &ConfigError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Converts a composition error; Python exceptions raised by factories pass through as-is.
pub fn compose_error(err: ComposeError<PyErr>) -> PyErr {
    match err {
        ComposeError::Config(e) => config_error(&e),
        ComposeError::Framework(e) => e,
    }
}

/// Builds the composer's options from a Python option object.
///
/// # Arguments
///
/// * `options` - Any object with a string attribute `cmd` (e.g. gem5's parsed options).
///
/// # Returns
///
/// The `Options`, or the `AttributeError`/`TypeError` raised while reading `cmd`.
pub fn options_from_py(options: &Bound<'_, PyAny>) -> PyResult<Options> {
    let cmd: String = options.getattr("cmd")?.extract()?;
    Ok(Options::with_cmd(cmd))
}
