//! Benchmarks for the constrained minimizers.
//!
//! Run with: cargo bench -p folio-math

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use folio_math::optimization::{
    project_onto_bounded_simplex, ConstrainedMinimizer, ConstrainedProblem, OptimizationConfig,
    ProjectedGradient, SimplexNelderMead,
};
use folio_math::statistics::{covariance_matrix, quadratic_form};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn synthetic_returns(periods: usize, assets: usize) -> Vec<Vec<f64>> {
    (0..periods)
        .map(|t| {
            (0..assets)
                .map(|a| {
                    let phase = (t * (a + 3)) as f64 * 0.37;
                    0.0005 * (a as f64 + 1.0) + 0.01 * phase.sin()
                })
                .collect()
        })
        .collect()
}

fn variance_problem(assets: usize) -> ConstrainedProblem {
    let cov = covariance_matrix(&synthetic_returns(252, assets)).unwrap();
    ConstrainedProblem::long_only(assets, move |w: &[f64]| quadratic_form(w, &cov)).unwrap()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    for n in [5, 10, 50] {
        let v: Vec<f64> = (0..n).map(|i| (i as f64 * 0.7).cos()).collect();
        let lower = vec![0.0; n];
        let upper = vec![1.0; n];
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| project_onto_bounded_simplex(black_box(&v), &lower, &upper, 1.0));
        });
    }
    group.finish();
}

fn bench_min_variance(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_variance");
    let config = OptimizationConfig::default();
    for n in [5, 10] {
        let problem = variance_problem(n);
        let x0 = problem.equal_weight();
        group.bench_with_input(BenchmarkId::new("projected_gradient", n), &n, |b, _| {
            b.iter(|| ProjectedGradient::default().minimize(&problem, black_box(&x0), &config));
        });
        group.bench_with_input(BenchmarkId::new("nelder_mead", n), &n, |b, _| {
            b.iter(|| SimplexNelderMead::default().minimize(&problem, black_box(&x0), &config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_projection, bench_min_variance);
criterion_main!(benches);
