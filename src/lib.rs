//! Subshift: shift subtitle timestamps by a fixed offset.
//!
//! The crate provides:
//! - Per-line timestamp rewrite strategies for SAMI and SubRip (`format`)
//! - Streaming decode/encode for UTF-8, UTF-16 and EUC-KR text (`encoding`)
//! - The single-pass shifting pipeline (`pipeline`)
//! - File-oriented helpers with temp-then-rename output (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```no_run
//! use subshift::delta::TimeDelta;
//! use subshift::format::Format;
//! use subshift::pipeline::{self, SyncOptions};
//!
//! let input = "1\n00:00:01,000 --> 00:00:03,000\nHello\n";
//! let opts = SyncOptions {
//!     format: Format::Srt,
//!     delta: "1.5s".parse::<TimeDelta>().unwrap(),
//!     ..SyncOptions::new("subs.srt")
//! };
//!
//! let mut out = Vec::new();
//! pipeline::sync(input.as_bytes(), &mut out, &opts).unwrap();
//! assert_eq!(out, b"1\n00:00:02,500 --> 00:00:04,500\nHello\n");
//! ```

pub mod config;
pub mod delta;
pub mod encoding;
pub mod format;
pub mod io;
pub mod pipeline;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{ConfigError, Output, SyncOptions};
pub use delta::TimeDelta;
pub use encoding::TextEncoding;
pub use format::Format;
pub use pipeline::{SyncError, SyncStats};
