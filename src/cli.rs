// Command-line front end for subshift.
//
// Parses arguments into an immutable `SyncOptions`, sets up logging, runs
// the file driver and maps the outcome to an exit code.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueHint};

use crate::config::{Output, SyncOptions};
use crate::delta::TimeDelta;
use crate::encoding::TextEncoding;
use crate::format::Format;
use crate::io;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Shift SAMI/SubRip subtitle timestamps by a fixed offset.
#[derive(Parser, Debug)]
#[command(
    name = "subshift",
    version,
    about = "Shift subtitle timestamps, optionally transcoding the text",
    arg_required_else_help = true
)]
struct Cli {
    /// Subtitle file to read.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Offset to add to every timestamp (e.g. 1.5s, -200ms, 1m30s).
    #[arg(short = 't', long = "timestamp", default_value = "0", allow_hyphen_values = true)]
    timestamp: TimeDelta,

    /// Output file; `-` writes to stdout.
    #[arg(short = 'o', long = "out", default_value = "-", value_hint = ValueHint::FilePath)]
    out: Output,

    /// Subtitle format: smi or srt.
    #[arg(short = 'f', long = "file-format", default_value = "smi")]
    file_format: Format,

    /// Encoding of the input (UTF8, UTF8BOM, UTF16LE, UTF16LEBOM, UTF16BE, UTF16BEBOM, EUCKR).
    #[arg(short = 'R', long = "reader-encoding", default_value = "UTF8")]
    reader_encoding: TextEncoding,

    /// Encoding of the output (same choices as --reader-encoding).
    #[arg(short = 'W', long = "writer-encoding", default_value = "UTF8")]
    writer_encoding: TextEncoding,

    /// Quiet mode (only errors are logged).
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Output run stats as JSON to stderr.
    #[arg(long = "json")]
    json_output: bool,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

struct Options {
    sync: SyncOptions,
    quiet: bool,
    verbose: u8,
    json_output: bool,
}

fn resolve_options(cli: Cli) -> Options {
    Options {
        sync: SyncOptions {
            input: cli.input,
            output: cli.out,
            format: cli.file_format,
            reader_encoding: cli.reader_encoding,
            writer_encoding: cli.writer_encoding,
            delta: cli.timestamp,
        },
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
    }
}

fn log_filter(opts: &Options) -> &'static str {
    match (opts.quiet, opts.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("subshift".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Sync command
// ---------------------------------------------------------------------------

fn cmd_sync(opts: &Options) -> i32 {
    let stats = match io::sync_file(&opts.sync) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("subshift: {e}");
            return 1;
        }
    };

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "subshift: {}: {} lines, {} shifted, {} bytes in, {} bytes out",
            opts.sync.input.display(),
            stats.lines,
            stats.matched,
            stats.bytes_in,
            stats.bytes_out
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "sync",
            "input": opts.sync.input.display().to_string(),
            "output": opts.sync.output.to_string(),
            "format": opts.sync.format.name(),
            "reader_encoding": opts.sync.reader_encoding.name(),
            "writer_encoding": opts.sync.writer_encoding.name(),
            "delta_ms": opts.sync.delta.as_millis(),
            "lines": stats.lines,
            "matched": stats.matched,
            "bytes_in": stats.bytes_in,
            "bytes_out": stats.bytes_out,
        });
        eprintln!("{json:#}");
    }

    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, runs the sync.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(&opts)))
        .format_timestamp(None)
        .format_target(false)
        .init();

    process::exit(cmd_sync(&opts));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
