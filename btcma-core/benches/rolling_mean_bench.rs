//! Criterion benchmark for the moving-average stage over a decade of daily samples.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use btcma_core::indicators::{Indicator, RollingMean};

fn make_prices(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 300.0 * (1.0 + i as f64 / 50.0) + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn bench_rolling_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_mean");
    for &n in &[1_000usize, 3_653, 20_000] {
        let prices = make_prices(n);
        let rm = RollingMean::new(1460, 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &prices, |b, prices| {
            b.iter(|| rm.compute(black_box(prices)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rolling_mean);
criterion_main!(benches);
