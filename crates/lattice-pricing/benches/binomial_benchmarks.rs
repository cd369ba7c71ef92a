//! Benchmarks for the lattice pricing components.
//!
//! Run with: cargo bench -p lattice-pricing

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use lattice_core::prelude::*;
use lattice_pricing::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn reference_market() -> MarketInputs {
    MarketInputs::new(188.64, 0.0525, 0.0052).unwrap()
}

fn reference_call() -> OptionSpec {
    OptionSpec::from_days(
        OptionType::Call,
        190.0,
        148,
        DayCountConvention::Act360,
        ExerciseStyle::American,
    )
    .unwrap()
}

fn create_requests(count: usize) -> Vec<ImpliedVolRequest> {
    let market = reference_market();
    let engine = BinomialTreeEngine::new(500).unwrap();
    (0..count)
        .map(|i| {
            let strike = 160.0 + (i % 60) as f64;
            let option_type = if i % 2 == 0 {
                OptionType::Call
            } else {
                OptionType::Put
            };
            let spec = OptionSpec::american(option_type, strike, 0.5).unwrap();
            let vol = 0.15 + 0.01 * (i % 20) as f64;
            ImpliedVolRequest {
                spec,
                market,
                target_price: engine.price(&spec, &market, vol).unwrap(),
                initial_guess: 0.2,
            }
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_price_by_steps(c: &mut Criterion) {
    let market = reference_market();
    let spec = reference_call();

    let mut group = c.benchmark_group("crr_price");
    for steps in &[100usize, 500, 1000, 5000] {
        let engine = BinomialTreeEngine::new(*steps).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(steps), &engine, |b, engine| {
            b.iter(|| engine.price(black_box(&spec), black_box(&market), black_box(0.20)))
        });
    }
    group.finish();
}

fn bench_full_tree(c: &mut Criterion) {
    let market = reference_market();
    let spec = reference_call();
    let engine = BinomialTreeEngine::new(1000).unwrap();

    c.bench_function("crr_build_tree_1000", |b| {
        b.iter(|| engine.build_tree(black_box(&spec), black_box(&market), black_box(0.20)))
    });
}

fn bench_implied_volatility(c: &mut Criterion) {
    let market = reference_market();
    let spec = reference_call();
    let engine = BinomialTreeEngine::new(1000).unwrap();

    let mut group = c.benchmark_group("implied_vol_1000_steps");
    group.sample_size(20);
    for method in [RootMethod::Brent, RootMethod::Bisection] {
        let solver =
            ImpliedVolatilitySolver::new(ImpliedVolConfig::default().with_method(method)).unwrap();
        group.bench_function(method.to_string(), |b| {
            b.iter(|| solver.solve_option(&engine, &spec, &market, black_box(11.05), 0.20))
        });
    }
    group.finish();
}

fn bench_solve_batch(c: &mut Criterion) {
    let engine = BinomialTreeEngine::new(200).unwrap();
    let solver = ImpliedVolatilitySolver::default();

    let mut group = c.benchmark_group("implied_vol_batch");
    group.sample_size(20);
    for size in &[10usize, 100] {
        let requests = create_requests(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &requests, |b, requests| {
            b.iter(|| solve_batch(&solver, &engine, black_box(requests)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_price_by_steps,
    bench_full_tree,
    bench_implied_volatility,
    bench_solve_batch
);
criterion_main!(benches);
