// Signed time offset applied to every timestamp in a run.
//
// Stored as nanoseconds so the arrow format can carry sub-millisecond
// offsets; the tag format truncates to whole milliseconds.

use std::fmt;
use std::ops::{Add, Neg};
use std::str::FromStr;

use crate::config::ConfigError;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// Fractional digits beyond this carry no nanosecond precision.
const MAX_FRACTION_DIGITS: usize = 18;

/// A signed duration with nanosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeDelta {
    nanos: i64,
}

impl TimeDelta {
    pub const ZERO: Self = Self { nanos: 0 };

    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// Saturates at the `i64` nanosecond range (about 292 years).
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            nanos: millis.saturating_mul(NANOS_PER_MILLI as i64),
        }
    }

    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Whole milliseconds, truncated toward zero.
    pub const fn as_millis(self) -> i64 {
        self.nanos / NANOS_PER_MILLI as i64
    }

    pub const fn is_negative(self) -> bool {
        self.nanos < 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.nanos.checked_add(other.nanos).map(Self::from_nanos)
    }
}

impl Add for TimeDelta {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_nanos(self.nanos.saturating_add(other.nanos))
    }
}

impl Neg for TimeDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_nanos(self.nanos.saturating_neg())
    }
}

impl fmt::Display for TimeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanos % NANOS_PER_MILLI as i64 == 0 {
            write!(f, "{}ms", self.as_millis())
        } else {
            write!(f, "{}ns", self.nanos)
        }
    }
}

// ---------------------------------------------------------------------------
// Duration literal parsing
// ---------------------------------------------------------------------------

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "h" => Some(NANOS_PER_HOUR),
        "m" => Some(NANOS_PER_MIN),
        "s" => Some(NANOS_PER_SEC),
        "ms" => Some(NANOS_PER_MILLI),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ns" => Some(1),
        _ => None,
    }
}

/// Parses literals such as `1.5s`, `-200ms`, `1m30s` or `+2h3m`.
impl FromStr for TimeDelta {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidDuration {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let s = input.trim();
        let (negative, mut rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        if rest.is_empty() {
            return Err(invalid("empty duration"));
        }
        if rest == "0" {
            return Ok(Self::ZERO);
        }

        let mut total: u128 = 0;
        while !rest.is_empty() {
            let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
            let (int_part, after_int) = rest.split_at(int_len);
            let (frac_part, after_num) = match after_int.strip_prefix('.') {
                Some(tail) => {
                    let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
                    tail.split_at(frac_len)
                }
                None => ("", after_int),
            };
            if int_part.is_empty() && frac_part.is_empty() {
                return Err(invalid("expected a number"));
            }

            let unit_len = after_num
                .char_indices()
                .find(|(_, c)| !c.is_alphabetic())
                .map_or(after_num.len(), |(i, _)| i);
            let (unit, tail) = after_num.split_at(unit_len);
            if unit.is_empty() {
                return Err(invalid("missing unit (h, m, s, ms, us, ns)"));
            }
            let scale = unit_nanos(unit).ok_or_else(|| invalid(&format!("unknown unit '{unit}'")))?;

            let whole: u128 = if int_part.is_empty() {
                0
            } else {
                int_part.parse().map_err(|_| invalid("number too large"))?
            };
            let mut amount = whole
                .checked_mul(scale)
                .ok_or_else(|| invalid("duration out of range"))?;

            let frac_part = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS)];
            if !frac_part.is_empty() {
                let digits: u128 = frac_part.parse().map_err(|_| invalid("bad fraction"))?;
                let denom = 10u128.pow(frac_part.len() as u32);
                amount = amount
                    .checked_add(digits * scale / denom)
                    .ok_or_else(|| invalid("duration out of range"))?;
            }

            total = total
                .checked_add(amount)
                .ok_or_else(|| invalid("duration out of range"))?;
            rest = tail;
        }

        let magnitude = i64::try_from(total).map_err(|_| invalid("duration out of range"))?;
        Ok(Self::from_nanos(if negative { -magnitude } else { magnitude }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
