// SAMI tag-attribute strategy.
//
// Only the first `<SYNC Start=N>` on a line is rewritten. Everything outside
// the numeric run is copied byte for byte, so tag case, the attribute key and
// any trailing markup (`<P Class=KRCC>`) survive untouched.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::{Rewrite, RewriteError};
use crate::delta::TimeDelta;

/// The sign is accepted so lines shifted below zero can be shifted again.
static SYNC_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<SYNC\s+Start=(-?[0-9]+)>").expect("SYNC pattern is valid")
});

pub fn rewrite(line: &str, delta: TimeDelta) -> Result<Rewrite, RewriteError> {
    let Some(value) = SYNC_TAG.captures(line).and_then(|caps| caps.get(1)) else {
        return Ok(Rewrite::Unchanged);
    };

    let text = value.as_str();
    let start: i32 = text.parse().map_err(|source| RewriteError::InvalidSyncValue {
        text: text.to_string(),
        source,
    })?;
    let shifted = i64::from(start)
        .checked_add(delta.as_millis())
        .ok_or_else(|| RewriteError::OutOfRange {
            text: text.to_string(),
        })?;

    debug!("sync start {start} -> {shifted}");

    let mut out = String::with_capacity(line.len() + 4);
    out.push_str(&line[..value.start()]);
    out.push_str(&shifted.to_string());
    out.push_str(&line[value.end()..]);
    Ok(Rewrite::Shifted(out))
}
