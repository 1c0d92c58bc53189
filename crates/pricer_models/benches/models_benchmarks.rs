//! Criterion benchmarks for model pricing.
//!
//! Closed-form pricers are measured per call; the Fourier pricers are
//! measured per price, including the characteristic function evaluations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::instruments::{EuropeanCall, EuropeanCaplet, PathIndependentOption};
use pricer_models::models::{
    Bachelier, BlackScholes, FourierConfig, Heston, RoughHeston, RoughHestonConfig, Sabr,
};

/// Benchmark the closed-form pricers.
fn bench_closed_form(c: &mut Criterion) {
    let call = EuropeanCall::default();
    let caplet = EuropeanCaplet::default();
    let bs = BlackScholes::default();
    let bachelier = Bachelier::default();
    let sabr = Sabr::default();

    c.bench_function("black_scholes_call", |b| {
        b.iter(|| black_box(call).price(&bs).unwrap());
    });
    c.bench_function("bachelier_caplet", |b| {
        b.iter(|| black_box(caplet).price(&bachelier).unwrap());
    });
    c.bench_function("sabr_caplet", |b| {
        b.iter(|| black_box(caplet).price(&sabr).unwrap());
    });
}

/// Benchmark Heston pricing against the number of integration cells.
fn bench_heston(c: &mut Criterion) {
    let call = EuropeanCall::default();
    let mut group = c.benchmark_group("heston_call");
    for steps in [250, 1000, 4000] {
        let model = Heston::default()
            .with_fourier_config(FourierConfig::new(100.0, steps).unwrap())
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(steps), &model, |b, model| {
            b.iter(|| black_box(call).price(model).unwrap());
        });
    }
    group.finish();
}

/// Benchmark Rough Heston pricing against the number of Adams steps.
fn bench_rough_heston(c: &mut Criterion) {
    let call = EuropeanCall::default();
    let mut group = c.benchmark_group("rough_heston_call");
    group.sample_size(10);
    for time_steps in [50, 100, 200] {
        let model = RoughHeston::default()
            .with_config(RoughHestonConfig {
                time_steps,
                fourier: FourierConfig::new(60.0, 300).unwrap(),
            })
            .unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(time_steps),
            &model,
            |b, model| {
                b.iter(|| black_box(call).price(model).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_closed_form, bench_heston, bench_rough_heston);
criterion_main!(benches);
