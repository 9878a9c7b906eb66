//! Benchmarks for eva_models.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eva_models::calibration::{GpdMaximumLikelihood, KolmogorovSmirnov};
use eva_models::distributions::GeneralizedPareto;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sample(n: usize) -> Vec<f64> {
    let gpd = GeneralizedPareto::new(160.0, 50.0, 0.2).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| gpd.isf(rng.gen_range(f64::EPSILON..1.0)))
        .collect()
}

fn benchmark_gpd_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("gpd_mle");
    let fitter = GpdMaximumLikelihood::default();

    for size in [10, 50, 200, 1000] {
        let data = sample(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, d| {
            b.iter(|| fitter.fit(black_box(160.0), black_box(d)))
        });
    }

    group.finish();
}

fn benchmark_ks_test(c: &mut Criterion) {
    let data = sample(200);
    let gpd = GeneralizedPareto::new(160.0, 50.0, 0.2).unwrap();
    let ks = KolmogorovSmirnov::default();

    c.bench_function("ks_test_200", |b| {
        b.iter(|| ks.test(black_box(&data), black_box(&gpd)))
    });
}

criterion_group!(benches, benchmark_gpd_fit, benchmark_ks_test);
criterion_main!(benches);
