// ABOUTME: Benchmark for resolution classification of encoded images
// ABOUTME: Compares decode cost across formats and sizes, including undecodable input

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{ImageFormat, RgbImage};
use pixgrab_core::classify;
use std::hint::black_box;
use std::io::Cursor;

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::new(width, height)
        .write_to(&mut out, format)
        .expect("Failed to encode fixture");
    out.into_inner()
}

fn benchmark_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    group.sample_size(20);

    for (width, height) in [(640, 480), (1920, 1080)] {
        let png = encode(width, height, ImageFormat::Png);
        group.bench_with_input(
            BenchmarkId::new("png", format!("{}x{}", width, height)),
            &png,
            |b, bytes| b.iter(|| black_box(classify(black_box(bytes)))),
        );

        let jpeg = encode(width, height, ImageFormat::Jpeg);
        group.bench_with_input(
            BenchmarkId::new("jpeg", format!("{}x{}", width, height)),
            &jpeg,
            |b, bytes| b.iter(|| black_box(classify(black_box(bytes)))),
        );
    }

    let garbage = vec![0u8; 64 * 1024];
    group.bench_function("undecodable", |b| {
        b.iter(|| black_box(classify(black_box(&garbage))))
    });

    group.finish();
}

criterion_group!(benches, benchmark_classify);
criterion_main!(benches);
