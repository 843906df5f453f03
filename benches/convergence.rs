//! Convergence benchmark comparing the Rayleigh-quotient optimizers on a
//! shared diagonal test operator.
//!
//! Each benchmark measures a full solve (construction plus a fixed iteration
//! budget) so that the per-iteration costs and the line-search overhead of
//! the safeguarded methods are both reflected.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use faer::Mat;
use rand::{Rng, SeedableRng, rngs::StdRng};

use rayleigh_extrema::solvers::power_iteration;
use rayleigh_extrema::{ConjugateGradient, Extremum, GradientDescent, Nesterov, RmsProp};

const N: usize = 100;
const BUDGET: usize = 50;

fn diagonal_matrix(n: usize) -> Mat<f64> {
    Mat::from_fn(n, n, |i, j| if i == j { (i + 1) as f64 } else { 0.0 })
}

fn random_start(n: usize, seed: u64) -> Mat<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Mat::from_fn(n, 1, |_, _| 0.1 + rng.random::<f64>())
}

fn bench_optimizers(c: &mut Criterion) {
    let a = diagonal_matrix(N);
    let x0 = random_start(N, 42);

    let mut group = c.benchmark_group("rayleigh_quotient_solvers");

    group.bench_function("power_iteration", |b| {
        b.iter(|| {
            let mut x = x0.clone();
            black_box(power_iteration(&a, &mut x, BUDGET, 0.0, None).unwrap())
        })
    });

    group.bench_function("conjugate_gradient", |b| {
        b.iter(|| {
            let mut solver = ConjugateGradient::new(&a, x0.as_ref()).unwrap();
            black_box(solver.run(BUDGET))
        })
    });

    group.bench_function("rmsprop", |b| {
        b.iter(|| {
            let mut solver = RmsProp::new(&a, x0.as_ref()).unwrap();
            black_box(solver.run(BUDGET))
        })
    });

    group.bench_function("gradient_descent_pair", |b| {
        b.iter(|| {
            let mut solver = GradientDescent::new(&a, x0.as_ref(), false).unwrap();
            black_box(solver.run(BUDGET))
        })
    });

    group.bench_function("nesterov_max", |b| {
        b.iter(|| {
            let mut solver = Nesterov::new(&a, x0.as_ref(), 1.0, Extremum::Max).unwrap();
            black_box(solver.run(BUDGET))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_optimizers);
criterion_main!(benches);
