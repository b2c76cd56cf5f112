// File-level driver around the streaming pipeline.
//
// Opens the input with a `BufReader`, then writes either to locked stdout or
// to a temp file next to the target that is renamed over it only after the
// whole document has been shifted and flushed. A failed run leaves an
// existing target untouched, which also makes in-place edits
// (`-o same-file`) safe.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::config::{Output, SyncOptions};
use crate::pipeline::{self, SyncError, SyncStats};

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

/// Run `opts` end to end: open input, shift, write output.
pub fn sync_file(opts: &SyncOptions) -> Result<SyncStats, SyncError> {
    let file = File::open(&opts.input).map_err(|source| SyncError::OpenInput {
        path: opts.input.clone(),
        source,
    })?;
    let reader = BufReader::with_capacity(BUF_SIZE, file);

    match &opts.output {
        Output::Stdout => {
            let writer = BufWriter::with_capacity(BUF_SIZE, io::stdout().lock());
            pipeline::sync(reader, writer, opts)
        }
        Output::File(path) => sync_to_path(reader, path, opts),
    }
}

fn sync_to_path<R: Read>(
    reader: R,
    path: &Path,
    opts: &SyncOptions,
) -> Result<SyncStats, SyncError> {
    let create_err = |source| SyncError::CreateOutput {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir).map_err(create_err)?;
    debug!("writing {} via {}", path.display(), temp.path().display());

    let stats = pipeline::sync(reader, BufWriter::with_capacity(BUF_SIZE, temp.as_file()), opts)?;

    // Keep the mode of a file being replaced; a fresh temp file is 0600.
    if let Ok(meta) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(meta.permissions())
            .map_err(create_err)?;
    }

    temp.persist(path)
        .map_err(|e| SyncError::PersistOutput {
            path: path.to_path_buf(),
            source: e.error,
        })?;
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
