//! Recording build-graph generator.
//!
//! `RecordingEnv` implements [`BuildEnv`] by appending declarations to a `BuildGraph`.
//! Each declaration keeps the directory it was made in and the environment settings in
//! effect at that point, so a recipe's local changes are visible in what it declared.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Artifact, BuildEnv, BuildTarget, Recipe};

/// A declaration made by a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum Decl {
    /// An M3 executable.
    Exe {
        /// Declaring directory.
        dir: String,
        /// Output name.
        out: String,
        /// Source files.
        ins: Vec<String>,
        /// Libraries linked against.
        libs: Vec<String>,
        /// Include paths in effect.
        cpp_path: Vec<String>,
    },
    /// A static library.
    StaticLib {
        /// Declaring directory.
        dir: String,
        /// Output name.
        out: String,
        /// Source files.
        ins: Vec<String>,
        /// C++ flags in effect.
        cxx_flags: Vec<String>,
    },
    /// Installation of an artifact.
    Install {
        /// Target directory.
        dest: String,
        /// Installed artifact.
        artifact: Artifact,
    },
    /// A filesystem image.
    FsImage {
        /// Declaring directory.
        dir: String,
        /// Output image name.
        out: String,
        /// Source directory of the image contents.
        src: String,
        /// Number of blocks.
        blocks: u64,
        /// Number of inodes.
        inodes: u64,
    },
    /// A recursive build of a sub-directory.
    SubBuild {
        /// Full path of the sub-directory.
        dir: String,
    },
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exe {
                dir, out, ins, libs, ..
            } => write!(
                f,
                "exe     {dir}/{out} <- [{}] libs [{}]",
                ins.join(", "),
                libs.join(", ")
            ),
            Self::StaticLib { dir, out, ins, .. } => {
                write!(f, "lib     {dir}/{out}.a <- [{}]", ins.join(", "))
            }
            Self::Install { dest, artifact } => write!(f, "install {} -> {dest}", artifact.path),
            Self::FsImage {
                dir,
                out,
                src,
                blocks,
                inodes,
            } => write!(
                f,
                "fs      {dir}/{out} <- {src} ({blocks} blocks, {inodes} inodes)"
            ),
            Self::SubBuild { dir } => write!(f, "subdir  {dir}"),
        }
    }
}

/// Generator that collects declarations in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildGraph {
    decls: Vec<Decl>,
}

impl BuildGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the declarations in the order they were made.
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    /// Returns the sub-directories declared so far.
    pub fn sub_dirs(&self) -> impl Iterator<Item = &str> {
        self.decls.iter().filter_map(|d| match d {
            Decl::SubBuild { dir } => Some(dir.as_str()),
            _ => None,
        })
    }

    fn push(&mut self, decl: Decl) {
        self.decls.push(decl);
    }

    /// Runs the recipe of `dir` and, breadth first, the recipes of every sub-directory it
    /// declares. Directories without a known recipe stay as plain `SubBuild` declarations.
    ///
    /// # Returns
    ///
    /// The number of recipes that ran.
    pub fn expand(&mut self, env: &RecordingEnv, dir: &str) -> usize {
        let mut pending = VecDeque::from([dir.to_string()]);
        let mut ran = 0;
        while let Some(dir) = pending.pop_front() {
            let Some(recipe) = Recipe::for_dir(&dir) else {
                debug!(%dir, "no recipe");
                continue;
            };
            let before = self.decls.len();
            recipe.build(self, &env.at(&dir));
            ran += 1;
            for decl in &self.decls[before..] {
                if let Decl::SubBuild { dir } = decl {
                    pending.push_back(dir.clone());
                }
            }
        }
        ran
    }
}

/// Build environment that records into a [`BuildGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingEnv {
    /// Directory the environment belongs to.
    pub cwd: String,
    /// Target tag.
    pub target: BuildTarget,
    /// Library installation directory.
    pub lib_dir: String,
    /// Include paths.
    pub cpp_path: Vec<String>,
    /// C++ compiler flags.
    pub cxx_flags: Vec<String>,
}

impl RecordingEnv {
    /// Creates an environment for `target` rooted at the top of the tree.
    pub fn new(target: BuildTarget) -> Self {
        Self {
            cwd: String::new(),
            target,
            lib_dir: format!("build/{target}/lib"),
            cpp_path: vec!["src/include".to_string()],
            cxx_flags: Vec::new(),
        }
    }

    /// Returns a copy of the environment moved to `dir`.
    pub fn at(&self, dir: &str) -> Self {
        Self {
            cwd: dir.trim_end_matches('/').to_string(),
            ..self.clone()
        }
    }

    fn join(&self, name: &str) -> String {
        if self.cwd.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.cwd, name)
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl BuildEnv for RecordingEnv {
    type Generator = BuildGraph;

    fn target(&self) -> BuildTarget {
        self.target
    }

    fn lib_dir(&self) -> &str {
        &self.lib_dir
    }

    fn cpp_path_mut(&mut self) -> &mut Vec<String> {
        &mut self.cpp_path
    }

    fn cxx_flags_mut(&mut self) -> &mut Vec<String> {
        &mut self.cxx_flags
    }

    fn m3_exe(&self, generator: &mut BuildGraph, out: &str, ins: &[&str], libs: &[&str]) -> Artifact {
        generator.push(Decl::Exe {
            dir: self.cwd.clone(),
            out: out.to_string(),
            ins: owned(ins),
            libs: owned(libs),
            cpp_path: self.cpp_path.clone(),
        });
        Artifact {
            path: self.join(out),
        }
    }

    fn static_lib(&self, generator: &mut BuildGraph, out: &str, ins: &[&str]) -> Artifact {
        generator.push(Decl::StaticLib {
            dir: self.cwd.clone(),
            out: out.to_string(),
            ins: owned(ins),
            cxx_flags: self.cxx_flags.clone(),
        });
        Artifact {
            path: self.join(&format!("{out}.a")),
        }
    }

    fn install(&self, generator: &mut BuildGraph, dir: &str, artifact: &Artifact) {
        generator.push(Decl::Install {
            dest: dir.to_string(),
            artifact: artifact.clone(),
        });
    }

    fn build_fs(&self, generator: &mut BuildGraph, out: &str, dir: &str, blocks: u64, inodes: u64) {
        generator.push(Decl::FsImage {
            dir: self.cwd.clone(),
            out: out.to_string(),
            src: self.join(dir).trim_end_matches("/.").to_string(),
            blocks,
            inodes,
        });
    }

    fn sub_build(&self, generator: &mut BuildGraph, dir: &str) {
        generator.push(Decl::SubBuild {
            dir: self.join(dir),
        });
    }
}
