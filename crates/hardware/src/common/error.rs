//! Configuration and composition errors.
//!
//! This module defines the two error kinds of the composer:
//! 1. **Configuration errors:** Missing or unparsable environment input, or an undersized
//!    command-line list. Raised before any framework object is created.
//! 2. **Composition errors:** Either a configuration error or a framework error, the latter
//!    passed through unchanged from a factory or the runner.

use thiserror::Error;

/// Errors raised while reading the environment or planning the topology.
///
/// Every variant names the offending input so that the message printed at startup
/// points straight at the variable or option to fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("environment variable {name} is not set")]
    MissingVar {
        /// Name of the variable.
        name: &'static str,
    },

    /// An environment variable is set to a value that is not valid Unicode.
    #[error("environment variable {name} is not valid Unicode")]
    NotUnicode {
        /// Name of the variable.
        name: &'static str,
    },

    /// `M3_GEM5_TILES` leaves no room to number the fixed tiles after the compute tiles.
    #[error("environment variable M3_GEM5_TILES={value} exceeds the maximum of {max}")]
    TooManyTiles {
        /// The rejected count.
        value: u32,
        /// Largest accepted count.
        max: u32,
    },

    /// An environment variable does not hold a non-negative decimal integer.
    #[error("environment variable {name}={value:?} is not a non-negative integer")]
    InvalidInteger {
        /// Name of the variable.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// `M3_ISA` names an ISA the tile descriptors cannot express.
    #[error("environment variable M3_ISA={value:?} is not one of x86_64, arm, riscv")]
    InvalidIsa {
        /// The rejected value.
        value: String,
    },

    /// The `cmd` option has fewer comma-separated entries than tiles need.
    #[error("option cmd has {found} entries, but {needed} are required")]
    TooFewCommands {
        /// Entries required by the topology.
        needed: usize,
        /// Entries present in the option.
        found: usize,
    },

    /// A size string could not be parsed.
    #[error("invalid memory size {value:?}")]
    InvalidSize {
        /// The rejected value.
        value: String,
    },
}

/// Errors returned by the composer.
///
/// Framework errors are carried verbatim; `Display` and `source` forward to the
/// underlying error.
#[derive(Debug, Error)]
pub enum ComposeError<E> {
    /// The environment or options are invalid; nothing was created.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A factory or the runner failed.
    #[error(transparent)]
    Framework(E),
}

impl<E> ComposeError<E> {
    /// Returns the configuration error, if this is one.
    pub const fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Config(e) => Some(e),
            Self::Framework(_) => None,
        }
    }

    /// Returns the framework error, if this is one.
    pub const fn as_framework(&self) -> Option<&E> {
        match self {
            Self::Framework(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}
