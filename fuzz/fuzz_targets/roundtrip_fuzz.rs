#![no_main]
use libfuzzer_sys::fuzz_target;
use subshift::encoding::TextEncoding;
use subshift::format::Format;
use subshift::pipeline::{self, SyncOptions};

fn run(input: &[u8], format: Format, from: TextEncoding, to: TextEncoding) -> Option<Vec<u8>> {
    let opts = SyncOptions {
        format,
        reader_encoding: from,
        writer_encoding: to,
        ..SyncOptions::new("fuzz")
    };
    let mut out = Vec::new();
    pipeline::sync(input, &mut out, &opts).ok()?;
    Some(out)
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let all = TextEncoding::ALL;
    let target = all[usize::from(data[0]) % all.len()];
    let format = Format::ALL[usize::from(data[0] >> 7)];
    let text = String::from_utf8_lossy(&data[1..]);

    // UTF-8 -> target -> UTF-8 must match a direct UTF-8 run.
    let Some(direct) = run(text.as_bytes(), format, TextEncoding::Utf8, TextEncoding::Utf8) else {
        return;
    };
    // Text the target cannot represent is rejected, not mangled.
    let Some(encoded) = run(text.as_bytes(), format, TextEncoding::Utf8, target) else {
        return;
    };
    let back = run(&encoded, format, target, TextEncoding::Utf8).unwrap();
    assert_eq!(back, direct);
});
