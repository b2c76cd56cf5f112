use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use subshift::encoding::TextEncoding;
use subshift::format::Format;
use subshift::pipeline::{self, SyncOptions};
use subshift::TimeDelta;

fn gen_smi(cues: usize) -> String {
    let mut doc = String::from("<SAMI>\n<BODY>\n");
    for i in 0..cues {
        doc.push_str(&format!(
            "<SYNC Start={}><P Class=KRCC>\n자막 라인 {i}\n<SYNC Start={}><P Class=KRCC>&nbsp;\n",
            i * 2000,
            i * 2000 + 1500
        ));
    }
    doc.push_str("</BODY>\n</SAMI>\n");
    doc
}

fn gen_srt(cues: usize) -> String {
    let mut doc = String::new();
    for i in 0..cues {
        let (h, m, s) = (i / 1800, i / 30 % 60, i * 2 % 60);
        doc.push_str(&format!(
            "{}\n{h:02}:{m:02}:{s:02},000 --> {h:02}:{m:02}:{s:02},900\nSubtitle line {i}\n\n",
            i + 1
        ));
    }
    doc
}

fn encode_euc_kr(text: &str) -> Vec<u8> {
    encoding_rs::EUC_KR.encode(text).0.into_owned()
}

fn opts(format: Format, reader: TextEncoding, writer: TextEncoding) -> SyncOptions {
    SyncOptions {
        format,
        reader_encoding: reader,
        writer_encoding: writer,
        delta: TimeDelta::from_millis(-1250),
        ..SyncOptions::new("bench")
    }
}

fn bench_line_rewrite(c: &mut Criterion) {
    let mut g = c.benchmark_group("line_rewrite");
    let delta = TimeDelta::from_millis(2500);
    let lines = [
        ("smi_match", Format::Smi, "<SYNC Start=1234567><P Class=KRCC>"),
        ("smi_miss", Format::Smi, "그 사람은 오지 않았다."),
        ("srt_match", Format::Srt, "01:02:03,456 --> 01:02:05,789"),
        ("srt_miss", Format::Srt, "Subtitle text without timing"),
    ];
    for (name, format, line) in lines {
        g.bench_function(name, |b| {
            b.iter(|| black_box(format.rewrite(black_box(line), delta).unwrap()));
        });
    }
    g.finish();
}

fn bench_sync_throughput(c: &mut Criterion) {
    let mut g = c.benchmark_group("sync_mb_s");
    for cues in [1_000usize, 10_000, 100_000] {
        let smi = gen_smi(cues);
        let o = opts(Format::Smi, TextEncoding::Utf8, TextEncoding::Utf8);
        g.throughput(Throughput::Bytes(smi.len() as u64));
        g.bench_with_input(BenchmarkId::new("smi_utf8", cues), &smi, |b, doc| {
            b.iter(|| {
                let mut out = Vec::with_capacity(doc.len());
                pipeline::sync(black_box(doc.as_bytes()), &mut out, &o).unwrap();
                black_box(out);
            });
        });

        let srt = gen_srt(cues);
        let o = opts(Format::Srt, TextEncoding::Utf8, TextEncoding::Utf8);
        g.throughput(Throughput::Bytes(srt.len() as u64));
        g.bench_with_input(BenchmarkId::new("srt_utf8", cues), &srt, |b, doc| {
            b.iter(|| {
                let mut out = Vec::with_capacity(doc.len());
                pipeline::sync(black_box(doc.as_bytes()), &mut out, &o).unwrap();
                black_box(out);
            });
        });
    }
    g.finish();
}

fn bench_transcode(c: &mut Criterion) {
    let mut g = c.benchmark_group("transcode_mb_s");
    let input = encode_euc_kr(&gen_smi(10_000));
    g.throughput(Throughput::Bytes(input.len() as u64));
    for writer in [TextEncoding::Utf8, TextEncoding::Utf16LeBom, TextEncoding::EucKr] {
        let o = opts(Format::Smi, TextEncoding::EucKr, writer);
        g.bench_with_input(BenchmarkId::from_parameter(writer), &input, |b, bytes| {
            b.iter(|| {
                let mut out = Vec::with_capacity(bytes.len() * 2);
                pipeline::sync(black_box(bytes.as_slice()), &mut out, &o).unwrap();
                black_box(out);
            });
        });
    }
    g.finish();
}

criterion_group!(benches, bench_line_rewrite, bench_sync_throughput, bench_transcode);
criterion_main!(benches);
