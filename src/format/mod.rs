// Subtitle timestamp rewrite strategies.
//
//   - `smi`: SAMI tag attribute: `<SYNC Start=12345>` (milliseconds)
//   - `srt`: SubRip arrow range: `00:00:01,000 --> 00:00:03,000`
//
// Each strategy looks at one line at a time. A line that does not match the
// structural pattern passes through untouched; a line that matches but
// carries an unparseable payload is an error for the whole run.

pub mod smi;
pub mod srt;

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::config::ConfigError;
use crate::delta::TimeDelta;

pub use srt::Timestamp;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A line matched a timestamp pattern but its payload could not be shifted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("invalid SYNC start value '{text}': {source}")]
    InvalidSyncValue {
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid timestamp '{text}': {reason}")]
    InvalidTimestamp { text: String, reason: &'static str },

    #[error("shifting '{text}' overflows")]
    OutOfRange { text: String },
}

// ---------------------------------------------------------------------------
// Rewrite outcome
// ---------------------------------------------------------------------------

/// Result of running a strategy over one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// The line carried no timestamp field.
    Unchanged,
    /// The line matched; this is its shifted replacement.
    Shifted(String),
}

impl Rewrite {
    pub fn is_shifted(&self) -> bool {
        matches!(self, Self::Shifted(_))
    }

    /// The text to emit in place of `original`.
    pub fn into_line(self, original: String) -> String {
        match self {
            Self::Unchanged => original,
            Self::Shifted(line) => line,
        }
    }
}

// ---------------------------------------------------------------------------
// Format selector
// ---------------------------------------------------------------------------

/// Supported subtitle dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// SAMI `<SYNC Start=ms>` tags.
    #[default]
    Smi,
    /// SubRip `HH:MM:SS,mmm --> HH:MM:SS,mmm` cue timings.
    Srt,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Smi, Format::Srt];

    /// Identifier accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Smi => "smi",
            Self::Srt => "srt",
        }
    }

    /// Shift every timestamp field this format recognizes in `line`.
    pub fn rewrite(self, line: &str, delta: TimeDelta) -> Result<Rewrite, RewriteError> {
        match self {
            Self::Smi => smi::rewrite(line, delta),
            Self::Srt => srt::rewrite(line, delta),
        }
    }

    fn choices() -> String {
        Self::ALL.map(Format::name).join(", ")
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownFormat {
                name: s.to_string(),
                choices: Self::choices(),
            })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
