// SubRip arrow-range strategy.
//
// A line matches when it carries `<ts> --> <ts>`. The first two
// timestamp-shaped substrings are parsed against the fixed field widths
// (HH:MM:SS,mmm), shifted independently, and re-rendered as the whole line.
// Text around the pair (cue numbers glued onto the line, positioning hints)
// is not carried over. A leading `-` is a sign only at line start or after
// whitespace.

use std::fmt;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::{Rewrite, RewriteError};
use crate::delta::TimeDelta;

const ARROW: &str = " --> ";

const NANOS_PER_MILLI: u64 = 1_000_000;
const MILLIS_PER_SEC: u64 = 1_000;
const MILLIS_PER_MIN: u64 = 60 * MILLIS_PER_SEC;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MIN;

/// Loose shape; widths are checked by `Timestamp::parse`.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?[0-9]+:[0-9]+:[0-9]+,[0-9]+").expect("timestamp pattern is valid")
});

static ARROW_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?[0-9]+:[0-9]+:[0-9]+,[0-9]+ --> -?[0-9]+:[0-9]+:[0-9]+,[0-9]+")
        .expect("arrow range pattern is valid")
});

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// A clock offset with nanosecond resolution, rendered as `HH:MM:SS,mmm`.
///
/// No wraparound: hours grow past 23 (and past two digits), and instants
/// shifted before zero render with a leading `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    nanos: i64,
}

impl Timestamp {
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    pub fn from_hms_milli(hours: u32, minutes: u32, seconds: u32, millis: u32) -> Self {
        let total = u64::from(hours) * MILLIS_PER_HOUR
            + u64::from(minutes) * MILLIS_PER_MIN
            + u64::from(seconds) * MILLIS_PER_SEC
            + u64::from(millis);
        let nanos = total.saturating_mul(NANOS_PER_MILLI).min(i64::MAX as u64);
        Self::from_nanos(nanos as i64)
    }

    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Parse `HH:MM:SS,mmm`: two or more hour digits, exactly two minute and
    /// second digits (each below 60), exactly three millisecond digits, with
    /// an optional leading `-`.
    pub fn parse(text: &str) -> Result<Self, RewriteError> {
        let invalid = |reason| RewriteError::InvalidTimestamp {
            text: text.to_string(),
            reason,
        };

        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (clock, millis) = body.split_once(',').ok_or_else(|| invalid("missing ','"))?;
        let mut fields = clock.split(':');
        let (Some(hours), Some(minutes), Some(seconds), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(invalid("expected HH:MM:SS"));
        };

        if hours.len() < 2 {
            return Err(invalid("hours must be at least two digits"));
        }
        if minutes.len() != 2 || seconds.len() != 2 {
            return Err(invalid("minutes and seconds must be two digits"));
        }
        if millis.len() != 3 {
            return Err(invalid("milliseconds must be three digits"));
        }

        let digits = |field: &str| -> Result<u64, RewriteError> {
            if !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("non-digit in field"));
            }
            field.parse().map_err(|_| invalid("field out of range"))
        };
        let (h, m, s, ms) = (digits(hours)?, digits(minutes)?, digits(seconds)?, digits(millis)?);
        if m >= 60 {
            return Err(invalid("minutes out of range"));
        }
        if s >= 60 {
            return Err(invalid("seconds out of range"));
        }

        let nanos = h
            .checked_mul(MILLIS_PER_HOUR)
            .and_then(|t| t.checked_add(m * MILLIS_PER_MIN + s * MILLIS_PER_SEC + ms))
            .and_then(|t| t.checked_mul(NANOS_PER_MILLI))
            .and_then(|t| i64::try_from(t).ok())
            .ok_or_else(|| invalid("hours out of range"))?;

        Ok(Self::from_nanos(if negative { -nanos } else { nanos }))
    }

    pub fn checked_shift(self, delta: TimeDelta) -> Option<Self> {
        self.nanos.checked_add(delta.as_nanos()).map(Self::from_nanos)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = self.nanos.unsigned_abs() / NANOS_PER_MILLI;
        let sign = if self.nanos < 0 && total_ms > 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{:02}:{:02}:{:02},{:03}",
            total_ms / MILLIS_PER_HOUR,
            total_ms % MILLIS_PER_HOUR / MILLIS_PER_MIN,
            total_ms % MILLIS_PER_MIN / MILLIS_PER_SEC,
            total_ms % MILLIS_PER_SEC
        )
    }
}

// ---------------------------------------------------------------------------
// Rewrite
// ---------------------------------------------------------------------------

/// The matched text, minus a leading `-` glued onto a preceding word
/// (`Note-00:00:01,000`). A sign counts only at line start or after whitespace.
fn field<'a>(line: &'a str, m: regex::Match<'a>) -> &'a str {
    let text = m.as_str();
    let glued = line[..m.start()]
        .chars()
        .next_back()
        .is_some_and(|c| !c.is_whitespace());
    match text.strip_prefix('-') {
        Some(unsigned) if glued => unsigned,
        _ => text,
    }
}

fn shift(text: &str, delta: TimeDelta) -> Result<Timestamp, RewriteError> {
    Timestamp::parse(text)?
        .checked_shift(delta)
        .ok_or_else(|| RewriteError::OutOfRange {
            text: text.to_string(),
        })
}

pub fn rewrite(line: &str, delta: TimeDelta) -> Result<Rewrite, RewriteError> {
    if !ARROW_RANGE.is_match(line) {
        return Ok(Rewrite::Unchanged);
    }

    let mut stamps = TIMESTAMP.find_iter(line);
    // ARROW_RANGE matching guarantees at least two timestamp-shaped runs.
    let (Some(first), Some(second)) = (stamps.next(), stamps.next()) else {
        return Ok(Rewrite::Unchanged);
    };

    let (first, second) = (field(line, first), field(line, second));
    let start = shift(first, delta)?;
    let end = shift(second, delta)?;

    debug!("cue {first} --> {second} shifted to {start}{ARROW}{end}");

    Ok(Rewrite::Shifted(format!("{start}{ARROW}{end}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
