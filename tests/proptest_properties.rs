use proptest::prelude::*;
use subshift::encoding::{LineReader, TextEncoding};
use subshift::format::{Format, Timestamp};
use subshift::pipeline::{self, SyncOptions};
use subshift::TimeDelta;

fn apply(format: Format, line: &str, delta: TimeDelta) -> String {
    format
        .rewrite(line, delta)
        .unwrap()
        .into_line(line.to_string())
}

fn srt_line(start_ms: i64, end_ms: i64) -> String {
    let ts = |ms: i64| Timestamp::from_nanos(ms * 1_000_000);
    format!("{} --> {}", ts(start_ms), ts(end_ms))
}

fn read_lines(bytes: &[u8], capacity: usize, encoding: TextEncoding) -> Vec<String> {
    LineReader::with_capacity(capacity, bytes, encoding)
        .collect::<Result<_, _>>()
        .unwrap()
}

fn any_encoding() -> impl Strategy<Value = TextEncoding> {
    proptest::sample::select(TextEncoding::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_smi_zero_delta_is_identity(
        start in 0i32..=i32::MAX,
        tail in "[a-zA-Z0-9 =]{0,24}"
    ) {
        let line = format!("<SYNC Start={start}>{tail}");
        prop_assert_eq!(apply(Format::Smi, &line, TimeDelta::ZERO), line);
    }

    #[test]
    fn prop_srt_zero_delta_is_identity(
        start in 0i64..360_000_000,
        len in 0i64..600_000
    ) {
        let line = srt_line(start, start + len);
        prop_assert_eq!(apply(Format::Srt, &line, TimeDelta::ZERO), line);
    }

    #[test]
    fn prop_smi_shifts_compose(
        start in 0i32..1_000_000_000,
        a in -1_000_000i64..1_000_000,
        b in -1_000_000i64..1_000_000
    ) {
        let line = format!("<SYNC Start={start}><P Class=KRCC>");
        let (da, db) = (TimeDelta::from_millis(a), TimeDelta::from_millis(b));
        let twice = apply(Format::Smi, &apply(Format::Smi, &line, da), db);
        let once = apply(Format::Smi, &line, da + db);
        prop_assert_eq!(&twice, &once);
        prop_assert_eq!(once, format!("<SYNC Start={}><P Class=KRCC>", i64::from(start) + a + b));
    }

    #[test]
    fn prop_srt_shifts_compose(
        start in 0i64..360_000_000,
        len in 0i64..600_000,
        a in -10_000_000i64..10_000_000,
        b in -10_000_000i64..10_000_000
    ) {
        let line = srt_line(start, start + len);
        let (da, db) = (TimeDelta::from_millis(a), TimeDelta::from_millis(b));
        let twice = apply(Format::Srt, &apply(Format::Srt, &line, da), db);
        let once = apply(Format::Srt, &line, da + db);
        prop_assert_eq!(&twice, &once);
        prop_assert_eq!(once, srt_line(start + a + b, start + len + a + b));
    }

    #[test]
    fn prop_plain_text_passes_through(
        line in "[a-zA-Z0-9 ,.!?'\"가-힣-]{0,64}",
        ms in -100_000i64..100_000,
        format in proptest::sample::select(Format::ALL.to_vec())
    ) {
        prop_assert_eq!(apply(format, &line, TimeDelta::from_millis(ms)), line);
    }

    #[test]
    fn prop_pipeline_preserves_line_count_and_order(
        lines in proptest::collection::vec("[a-zA-Z0-9 ,.가-힣]{0,40}", 1..32),
        encoding in any_encoding()
    ) {
        let text = lines.join("\n") + "\n";
        let opts = SyncOptions {
            reader_encoding: TextEncoding::Utf8,
            writer_encoding: encoding,
            delta: TimeDelta::from_millis(1234),
            ..SyncOptions::new("unused")
        };
        let mut out = Vec::new();
        let stats = pipeline::sync(text.as_bytes(), &mut out, &opts).unwrap();
        prop_assert_eq!(stats.lines, lines.len() as u64);
        prop_assert_eq!(stats.matched, 0);

        let decoded = read_lines(&out, 4096, encoding);
        prop_assert_eq!(decoded, lines);
    }

    #[test]
    fn prop_line_splitting_ignores_chunk_size(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
        capacity in 1usize..17,
        encoding in any_encoding()
    ) {
        let whole = read_lines(&bytes, 64 * 1024, encoding);
        let chunked = read_lines(&bytes, capacity, encoding);
        prop_assert_eq!(chunked, whole);
    }
}

#[test]
#[ignore = "performance properties are workload and machine dependent"]
fn perf_property_sync_not_pathological() {
    use std::time::Instant;
    let mut doc = String::new();
    for i in 0..200_000u32 {
        doc.push_str(&format!("<SYNC Start={}><P Class=KRCC>\n대사 {i}\n", i * 1000));
    }
    let opts = SyncOptions {
        delta: TimeDelta::from_millis(500),
        ..SyncOptions::new("unused")
    };

    let t0 = Instant::now();
    let mut out = Vec::with_capacity(doc.len() + 1024);
    let stats = pipeline::sync(doc.as_bytes(), &mut out, &opts).unwrap();
    let dt = t0.elapsed();
    assert_eq!(stats.matched, 200_000);
    assert!(dt.as_secs_f64() < 20.0, "sync took {:?}", dt);
}
