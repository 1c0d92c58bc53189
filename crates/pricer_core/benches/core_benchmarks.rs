//! Criterion benchmarks for the pricer_core numeric kernel.
//!
//! Measures the normal CDF used by the closed-form pricers and the complex
//! functions evaluated inside characteristic functions.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pricer_core::math::complex::Complex;
use pricer_core::math::distributions::norm_cdf;

/// Benchmark the CDF over a grid of arguments.
fn bench_norm_cdf(c: &mut Criterion) {
    let grid: Vec<f64> = (0..1000).map(|i| -5.0 + i as f64 * 0.01).collect();
    c.bench_function("norm_cdf_1000", |b| {
        b.iter(|| grid.iter().map(|&z| norm_cdf(black_box(z))).sum::<f64>());
    });
}

/// Benchmark the complex operations that dominate characteristic functions.
fn bench_complex(c: &mut Criterion) {
    let z = Complex::new(0.3, -1.2);
    c.bench_function("complex_exp_ln_sqrt", |b| {
        b.iter(|| {
            let w = black_box(z);
            w.exp() + w.ln().unwrap() + w.sqrt()
        });
    });
}

criterion_group!(benches, bench_norm_cdf, bench_complex);
criterion_main!(benches);
