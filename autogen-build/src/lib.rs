//! Header autogen build tools.
//!
//! Expands `$NAME$` placeholders in header templates using the values stored
//! in a `key=value` configuration file and increments the build version kept
//! in that file.

use displaydoc::Display;
use std::{io, path::PathBuf};
use thiserror::Error;

pub mod conf;
pub mod generate;
pub mod template;

pub use conf::{Conf, VERSION_KEY};
pub use generate::{run, Generated, Options, Report};
pub use template::{expand, Expansion};

/// Default path of the configuration file relative to the project root.
pub const DEFAULT_CONF: &str = "autogen.conf";

/// Default pattern of header templates relative to the project root.
pub const DEFAULT_PATTERN: &str = "include/*.gen.h";

/// Error during header generation.
#[derive(Display, Error, Debug)]
pub enum Error {
    /// cannot access {path:?}: {source}
    Io {
        /// Path of the file or directory.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// line {line} of {path:?} is not of the form KEY=VALUE
    MalformedLine {
        /// Path of the configuration file.
        path: PathBuf,
        /// Line number, starting at 1.
        line: usize,
    },
    /// invalid version number: {0:?}
    InvalidVersion(String),
    /// version number overflowed
    VersionOverflow,
    /// invalid template pattern {pattern:?}: {reason}
    InvalidPattern {
        /// Pattern as specified.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },
    /// template {0:?} would overwrite itself
    OutputIsTemplate(PathBuf),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Result of header generation.
pub type Result<T> = std::result::Result<T, Error>;
