//! Directory recipes.
//!
//! The recipes that appear in the tree, as a closed set. Each one is a declarative leaf:
//! it only clones and adjusts its environment and adds declarations to the generator.

use serde::{Deserialize, Serialize};

use super::{BuildEnv, RecipeError};

/// Application directories built under `src/apps`, in build order.
pub const APP_DIRS: [&str; 31] = [
    "allocator",
    "asciiplay",
    "bench",
    "bsdutils",
    "coreutils",
    "cppnettests",
    "disktest",
    "dosattack",
    "evilcompute",
    "faulter",
    "filterchain",
    "hashmuxtests",
    "hello",
    "info",
    "libctest",
    "msgchan",
    "netechoserver",
    "noop",
    "parchksum",
    "ping",
    "plasma",
    "queue",
    "rusthello",
    "rustnettests",
    "ruststandalone",
    "rustunittests",
    "shell",
    "spammer",
    "standalone",
    "timertest",
    "unittests",
];

/// Filesystem blocks of the default image on the host target.
pub const HOST_FS_BLOCKS: u64 = 160 * 1024;

/// Filesystem blocks of the default image on all other targets.
pub const TARGET_FS_BLOCKS: u64 = 32 * 1024;

/// Inodes of the default image.
pub const FS_INODES: u64 = 512;

/// A recipe of one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recipe {
    /// `src/apps`: builds every application directory.
    Apps,
    /// `src/libs/crypto/kecacc-xkcp`: the Keccak accelerator library.
    KecaccXkcp,
    /// `src/apps/bench/voiceassist/vasnd`: the voice-assistant sound encoder.
    Vasnd,
    /// `src/fs/default`: the default filesystem image.
    FsDefault,
}

impl Recipe {
    /// Every known recipe.
    pub const ALL: [Self; 4] = [Self::Apps, Self::KecaccXkcp, Self::Vasnd, Self::FsDefault];

    /// Returns the directory the recipe belongs to.
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Apps => "src/apps",
            Self::KecaccXkcp => "src/libs/crypto/kecacc-xkcp",
            Self::Vasnd => "src/apps/bench/voiceassist/vasnd",
            Self::FsDefault => "src/fs/default",
        }
    }

    /// Looks up the recipe of `dir`.
    pub fn for_dir(dir: &str) -> Option<Self> {
        let dir = dir.trim_end_matches('/');
        Self::ALL.into_iter().find(|r| r.dir() == dir)
    }

    /// Looks up the recipe of `dir`, failing with `RecipeError::NoRecipe` if there is none.
    pub fn require(dir: &str) -> Result<Self, RecipeError> {
        Self::for_dir(dir).ok_or_else(|| RecipeError::NoRecipe {
            dir: dir.to_string(),
        })
    }

    /// Adds the recipe's declarations to `generator`.
    ///
    /// # Arguments
    ///
    /// * `generator` - Build-graph generator.
    /// * `env` - Environment of the directory; recipes that change it work on a clone.
    pub fn build<E: BuildEnv>(self, generator: &mut E::Generator, env: &E) {
        match self {
            Self::Apps => {
                for dir in APP_DIRS {
                    env.sub_build(generator, dir);
                }
            }
            Self::KecaccXkcp => {
                let mut env = env.clone();
                env.cxx_flags_mut().extend([
                    "-std=c++17".to_string(),
                    "-Wno-sign-conversion".to_string(),
                ]);
                let lib = env.static_lib(
                    generator,
                    "libkecacc-xkcp",
                    &["kecacc-xkcp.cc", "xkcp/KeccakP-1600-opt64.c"],
                );
                let lib_dir = env.lib_dir().to_string();
                env.install(generator, &lib_dir, &lib);
            }
            Self::Vasnd => {
                let mut env = env.clone();
                env.cpp_path_mut().push("src/libs/flac/include".to_string());
                let _ = env.m3_exe(generator, "vasnd", &["encoder.cc", "vasnd.cc"], &["flac"]);
            }
            Self::FsDefault => {
                let blocks = if env.target().is_host() {
                    HOST_FS_BLOCKS
                } else {
                    TARGET_FS_BLOCKS
                };
                env.build_fs(generator, "default.img", ".", blocks, FS_INODES);
            }
        }
    }
}
