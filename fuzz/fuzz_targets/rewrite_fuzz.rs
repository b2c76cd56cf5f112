#![no_main]
use libfuzzer_sys::fuzz_target;
use subshift::format::{Format, Rewrite};
use subshift::TimeDelta;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for line in text.lines() {
        for format in Format::ALL {
            let _ = format.rewrite(line, TimeDelta::from_millis(-3_600_000));

            // A zero shift normalizes once and is stable afterwards.
            let Ok(Rewrite::Shifted(once)) = format.rewrite(line, TimeDelta::ZERO) else {
                continue;
            };
            let twice = format
                .rewrite(&once, TimeDelta::ZERO)
                .unwrap()
                .into_line(once.clone());
            assert_eq!(twice, once);
        }
    }
});
