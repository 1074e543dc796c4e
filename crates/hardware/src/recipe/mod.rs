//! Build recipes of the OS tree.
//!
//! Each directory of the tree carries a recipe that declares what to build there. The
//! build-graph generator that consumes the declarations is external; this module models
//! its narrow interface and the recipes themselves. It provides:
//! 1. **Environment Interface:** The `BuildEnv` trait: cloning, include paths, compiler
//!    flags, the target tag, and declarations for executables, static libraries,
//!    installation, filesystem images and sub-directory builds.
//! 2. **Recipes:** The known directory recipes as a closed set (`Recipe`).
//! 3. **Recording Generator:** `BuildGraph` and `RecordingEnv`, which collect declarations
//!    and expand sub-directory builds for inspection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recording generator and environment.
pub mod graph;

/// Directory recipes.
pub mod recipes;

pub use graph::{BuildGraph, Decl, RecordingEnv};
pub use recipes::Recipe;

/// Errors of recipe lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    /// The name is not one of `host`, `gem5`, `hw`.
    #[error("unknown build target {value:?} (expected host, gem5 or hw)")]
    UnknownTarget {
        /// The rejected name.
        value: String,
    },

    /// No recipe is known for the directory.
    #[error("no recipe for directory {dir:?}")]
    NoRecipe {
        /// The requested directory.
        dir: String,
    },
}

/// Target tag of a build environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTarget {
    /// Host (Linux process) build.
    Host,
    /// gem5 simulator build.
    #[default]
    Gem5,
    /// FPGA hardware build.
    Hw,
}

impl BuildTarget {
    /// Returns `true` for the host target.
    pub const fn is_host(self) -> bool {
        matches!(self, Self::Host)
    }
}

impl FromStr for BuildTarget {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Self::Host),
            "gem5" => Ok(Self::Gem5),
            "hw" => Ok(Self::Hw),
            other => Err(RecipeError::UnknownTarget {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Host => "host",
            Self::Gem5 => "gem5",
            Self::Hw => "hw",
        })
    }
}

/// A build product declared by a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artifact {
    /// Output path relative to the build directory.
    pub path: String,
}

/// Environment a recipe runs in.
///
/// Cloning yields an independent environment; recipes clone before changing include
/// paths or flags so that their changes stay local.
pub trait BuildEnv: Clone {
    /// The build-graph generator declarations are added to.
    type Generator;

    /// Returns the target tag.
    fn target(&self) -> BuildTarget;

    /// Returns the library installation directory (`LIBDIR`).
    fn lib_dir(&self) -> &str;

    /// Returns the include path list (`CPPPATH`).
    fn cpp_path_mut(&mut self) -> &mut Vec<String>;

    /// Returns the C++ compiler flag list (`CXXFLAGS`).
    fn cxx_flags_mut(&mut self) -> &mut Vec<String>;

    /// Declares an M3 executable.
    fn m3_exe(
        &self,
        generator: &mut Self::Generator,
        out: &str,
        ins: &[&str],
        libs: &[&str],
    ) -> Artifact;

    /// Declares a static library.
    fn static_lib(&self, generator: &mut Self::Generator, out: &str, ins: &[&str]) -> Artifact;

    /// Declares the installation of `artifact` into `dir`.
    fn install(&self, generator: &mut Self::Generator, dir: &str, artifact: &Artifact);

    /// Declares a filesystem image built from `dir`.
    fn build_fs(
        &self,
        generator: &mut Self::Generator,
        out: &str,
        dir: &str,
        blocks: u64,
        inodes: u64,
    );

    /// Declares a recursive build of the sub-directory `dir`.
    fn sub_build(&self, generator: &mut Self::Generator, dir: &str);
}
