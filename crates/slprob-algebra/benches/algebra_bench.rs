//! Algebra benchmarks: the Beta and opinion operators, and a full run over
//! a wide disjunction of conjunctions.
//! Run with: cargo bench -p slprob-algebra --bench algebra_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use slprob_algebra::{
    BetaDistribution, Circuit, Opinion, SlProbLog, TemplateEvaluator,
};

fn beta_ops(c: &mut Criterion) {
    let x = BetaDistribution::new(0.3, 0.01);
    let y = BetaDistribution::new(0.6, 0.02);

    let mut group = c.benchmark_group("beta");
    group.bench_function("sum", |b| b.iter(|| black_box(x).sum(&black_box(y))));
    group.bench_function("product", |b| b.iter(|| black_box(x).product(&black_box(y))));
    group.bench_function("conditioning", |b| {
        b.iter(|| black_box(x).conditioning(&black_box(y)))
    });
    group.bench_function("moment_matching", |b| b.iter(|| black_box(x).moment_matching()));
    group.finish();
}

fn opinion_ops(c: &mut Criterion) {
    let x = Opinion::new(0.2, 0.6, 0.2, 0.2);
    let z = Opinion::new(0.4, 0.2, 0.4, 0.5);

    let mut group = c.benchmark_group("opinion");
    group.bench_function("plus", |b| b.iter(|| black_box(x).plus(&black_box(z))));
    group.bench_function("times", |b| b.iter(|| black_box(x).times(&black_box(z))));
    group.bench_function("normalize", |b| b.iter(|| black_box(x).normalize(&black_box(z))));
    group.finish();
}

/// `pairs` disjoint conjunctions of two facts each.
fn build_run(pairs: usize) -> (SlProbLog, TemplateEvaluator) {
    let program = (0..pairs * 2)
        .map(|i| format!("b({},0.0001)::f{i}.", 0.01 + 0.9 / (i + 2) as f64))
        .collect::<Vec<_>>()
        .join("\n");

    let mut c = Circuit::new();
    let mut terms = Vec::with_capacity(pairs);
    for p in 0..pairs {
        let a = c.atom(2 * p);
        let b = c.atom(2 * p + 1);
        terms.push(c.and([a, b]).unwrap());
    }
    let any = c.or(terms).unwrap();
    c.query("any", any).unwrap();

    (SlProbLog::new(program), TemplateEvaluator::new(c))
}

fn full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run");
    group.sample_size(20);

    for pairs in [4, 32, 256] {
        let (run, evaluator) = build_run(pairs);
        group.bench_with_input(BenchmarkId::new("beta", pairs), &pairs, |b, _| {
            b.iter(|| run.run_beta(&evaluator).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("sl", pairs), &pairs, |b, _| {
            b.iter(|| run.run_sl(&evaluator).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, beta_ops, opinion_ops, full_run);
criterion_main!(benches);
