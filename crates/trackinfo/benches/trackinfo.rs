//! Criterion benchmarks for the track info codec.
//!
//! Run: cargo bench -p trackinfo --bench trackinfo
//!
//! Results show:
//!   encode_token_*  : encode to base64 for short and long text fields
//!   decode_token_*  : base64 token → TrackInfo
//!   decode_bytes_*  : raw bytes → TrackInfo (no base64 step)

#![allow(
    clippy::unwrap_used, // benchmark helpers use unwrap for brevity
    clippy::expect_used,
    clippy::panic,
    missing_docs,        // criterion_group! macro generates undocumented items
)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use trackinfo::{PartialTrack, decode, encode_latest, encode_to_bytes};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_track(text_len: usize) -> PartialTrack {
    let filler = "ä".repeat(text_len);
    PartialTrack::new()
        .with_title(format!("Title {filler}"))
        .with_author(format!("Author {filler}"))
        .with_length(245_000)
        .with_identifier("https://cdn.example.org/audio/track.ogg")
        .with_stream(false)
        .with_uri("https://cdn.example.org/audio/track.ogg")
        .with_source("http")
        .with_probe_info("ogg|bitrate=320")
        .with_position(60_000)
}

const SIZES: [(&str, usize); 2] = [("short", 8), ("long", 1_024)];

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_token");
    for (name, len) in SIZES {
        let track = make_track(len);
        group.bench_with_input(BenchmarkId::from_parameter(name), &track, |b, t| {
            b.iter(|| encode_latest(black_box(t)).unwrap());
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_token");
    for (name, len) in SIZES {
        let token = encode_latest(&make_track(len)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &token, |b, t| {
            b.iter(|| decode(black_box(t.as_str())).unwrap());
        });
    }
    group.finish();

    let mut group = c.benchmark_group("decode_bytes");
    for (name, len) in SIZES {
        let bytes = encode_to_bytes(&make_track(len), 2).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &bytes, |b, raw| {
            b.iter(|| decode(black_box(raw.as_slice())).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
