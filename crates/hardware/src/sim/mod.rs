//! Composition against a simulator framework.
//!
//! Provides the framework capability trait, the composer that drives it, and the JSON
//! manifest framework used by the command-line front end.

/// Composition driver.
pub mod composer;

/// Framework capability trait.
pub mod framework;

/// JSON manifest framework.
pub mod manifest;

pub use composer::{build_graph, compose, run_topology};
pub use framework::Framework;
pub use manifest::{Manifest, ManifestError, ManifestFramework};
