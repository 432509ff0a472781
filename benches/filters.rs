//! Benchmarks for pixel-buffer filters
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rasterkit::{
    apply_kernel, apply_tone_curve, resize_nearest, CurvePoint, Histogram, Kernel, PixelBuffer,
    ToneCurvePoints,
};

fn test_image(size: usize) -> PixelBuffer {
    let bytes = (0..size * size * 4).map(|i| (i * 31 % 256) as u8).collect();
    PixelBuffer::from_bytes(size, size, bytes).unwrap()
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filters");

    for size in [256usize, 1024] {
        let image = test_image(size);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("resize_half", size), &image, |b, img| {
            b.iter(|| resize_nearest(black_box(img), size / 2, size / 2).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("gaussian_3x3", size), &image, |b, img| {
            b.iter(|| apply_kernel(black_box(img), &Kernel::Gaussian3x3).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("histogram", size), &image, |b, img| {
            b.iter(|| Histogram::build(black_box(img)));
        });

        let points = ToneCurvePoints {
            enter: CurvePoint::new(30, 0),
            exit: CurvePoint::new(220, 255),
        };
        group.bench_with_input(BenchmarkId::new("tone_curve", size), &image, |b, img| {
            b.iter(|| apply_tone_curve(black_box(img), points).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
