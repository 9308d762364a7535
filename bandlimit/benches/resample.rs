use bandlimit::kernel::KernelLifecycle;
use bandlimit::resample::{DownSample1d, ResampleConfig, UpSample1d};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array1, ArrayD};

/// Deterministic low-frequency test signal.
fn slow_sine(n: usize) -> ArrayD<f64> {
    Array1::from_iter((0..n).map(|i| (2.0 * std::f64::consts::PI * i as f64 / 64.0).sin()))
        .into_dyn()
}

fn bench_resample_1d(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample_1d");
    for n in [1usize << 10, 1 << 14] {
        let x = slow_sine(n);

        let up = UpSample1d::<f64>::try_new(ResampleConfig::new(2)).unwrap();
        group.bench_with_input(BenchmarkId::new("upsample_x2", n), &x, |b, x| {
            b.iter(|| up.apply(black_box(x)).unwrap())
        });

        let down = DownSample1d::<f64>::try_new(ResampleConfig::new(2)).unwrap();
        group.bench_with_input(BenchmarkId::new("downsample_x2", n), &x, |b, x| {
            b.iter(|| down.apply(black_box(x)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resample_1d);
criterion_main!(benches);
