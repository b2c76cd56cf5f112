// Run configuration.
//
// `SyncOptions` is built once (by the CLI or a library caller) and only ever
// borrowed afterwards. Identifier parsing for formats, encodings and
// durations reports through `ConfigError` before any file is touched.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::delta::TimeDelta;
use crate::encoding::TextEncoding;
use crate::format::Format;

/// Invalid user-supplied configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown file format '{name}' (expected one of: {choices})")]
    UnknownFormat { name: String, choices: String },

    #[error("unknown encoding '{name}' (expected one of: {choices})")]
    UnknownEncoding { name: String, choices: String },

    #[error("invalid duration '{input}': {reason}")]
    InvalidDuration { input: String, reason: String },
}

/// Where shifted output goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Output {
    /// Process standard output (`-` on the command line).
    #[default]
    Stdout,
    /// A file, replaced atomically once the run succeeds.
    File(PathBuf),
}

impl FromStr for Output {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" => Self::Stdout,
            path => Self::File(PathBuf::from(path)),
        })
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("-"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Everything one run needs. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub input: PathBuf,
    pub output: Output,
    pub format: Format,
    pub reader_encoding: TextEncoding,
    pub writer_encoding: TextEncoding,
    pub delta: TimeDelta,
}

impl SyncOptions {
    /// Options with the CLI defaults: stdout, SAMI, UTF-8 in and out, no shift.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: Output::Stdout,
            format: Format::Smi,
            reader_encoding: TextEncoding::Utf8,
            writer_encoding: TextEncoding::Utf8,
            delta: TimeDelta::ZERO,
        }
    }
}
