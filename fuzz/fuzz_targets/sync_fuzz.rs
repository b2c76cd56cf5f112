#![no_main]
use libfuzzer_sys::fuzz_target;
use subshift::encoding::TextEncoding;
use subshift::format::Format;
use subshift::pipeline::{self, SyncOptions};
use subshift::TimeDelta;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    // First bytes pick the configuration; the rest is the document.
    let all = TextEncoding::ALL;
    let opts = SyncOptions {
        format: Format::ALL[usize::from(data[0] & 1)],
        reader_encoding: all[usize::from(data[1]) % all.len()],
        writer_encoding: all[usize::from(data[2]) % all.len()],
        delta: TimeDelta::from_millis(i64::from(data[0] as i8) * 997),
        ..SyncOptions::new("fuzz")
    };

    // Arbitrary input must only ever produce errors, never panics.
    let mut out = Vec::new();
    let _ = pipeline::sync(&data[3..], &mut out, &opts);
});
