// Single-pass subtitle shifting pipeline.
//
//   decode (LineReader) -> rewrite (Format) -> encode (LineEncoder) -> write
//
// One line is in flight at a time. The first rewrite, encode or I/O failure
// aborts the run; lines already written stay written.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use log::{debug, info, trace, warn};
use thiserror::Error;

use crate::encoding::{EncodeError, LineEncoder, LineReader, TextEncoding};
use crate::format::RewriteError;

pub use crate::config::{Output, SyncOptions};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal error for a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("cannot open input {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create output {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot replace output {}: {source}", path.display())]
    PersistOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error: {0}")]
    Read(#[source] io::Error),

    #[error("write error: {0}")]
    Write(#[source] io::Error),

    #[error("line {line}: {source}")]
    Rewrite {
        line: u64,
        #[source]
        source: RewriteError,
    },

    #[error("line {line}: cannot encode {ch:?} as {encoding}")]
    Unmappable {
        line: u64,
        ch: char,
        encoding: TextEncoding,
    },
}

impl SyncError {
    fn from_encode(err: EncodeError, line: u64) -> Self {
        match err {
            EncodeError::Io(e) => Self::Write(e),
            EncodeError::Unmappable { ch, encoding } => Self::Unmappable { line, ch, encoding },
        }
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Counters for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Lines read (and written).
    pub lines: u64,
    /// Lines whose timestamps were shifted.
    pub matched: u64,
    /// Raw input bytes consumed.
    pub bytes_in: u64,
    /// Encoded output bytes written.
    pub bytes_out: u64,
}

// ---------------------------------------------------------------------------
// sync
// ---------------------------------------------------------------------------

/// Shift every timestamp in `reader` and write the result to `writer`.
///
/// `opts.input` and `opts.output` are not consulted here; the caller owns the
/// streams (see [`crate::io::sync_file`]). The writer is flushed before
/// returning.
pub fn sync<R: Read, W: Write>(
    reader: R,
    writer: W,
    opts: &SyncOptions,
) -> Result<SyncStats, SyncError> {
    let mut lines = LineReader::new(reader, opts.reader_encoding);
    let mut out = LineEncoder::new(writer, opts.writer_encoding);
    let mut stats = SyncStats::default();

    debug!(
        "sync: format={} delta={} {} -> {}",
        opts.format, opts.delta, opts.reader_encoding, opts.writer_encoding
    );

    while let Some(line) = lines.next_line().map_err(SyncError::Read)? {
        stats.lines += 1;
        let n = stats.lines;

        let rewrite = opts
            .format
            .rewrite(&line, opts.delta)
            .map_err(|source| SyncError::Rewrite { line: n, source })?;
        if rewrite.is_shifted() {
            stats.matched += 1;
        } else {
            trace!("line {n}: unchanged");
        }

        let text = rewrite.into_line(line);
        out.write_line(&text)
            .map_err(|e| SyncError::from_encode(e, n))?;
    }

    if lines.had_replacements() {
        warn!(
            "input is not valid {}; malformed bytes were replaced with U+FFFD",
            opts.reader_encoding
        );
    }

    stats.bytes_in = lines.bytes_read();
    let (_, bytes_out) = out
        .finish()
        .map_err(|e| SyncError::from_encode(e, stats.lines))?;
    stats.bytes_out = bytes_out;

    info!(
        "sync: {} lines, {} shifted by {}",
        stats.lines, stats.matched, opts.delta
    );
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
