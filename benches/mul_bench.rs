//! Benchmarks for the multiplication kernels.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use noether::prelude::*;

type Poly = Polynomial<i64, Z>;

/// Builds (x + y + z + 1)^n over {x, y, z}.
fn dense_cube(n: u64) -> Poly {
    let ss = SymbolSet::from_names(["x", "y", "z"]);
    let x = Poly::variable(ss.clone(), "x").unwrap();
    let y = Poly::variable(ss.clone(), "y").unwrap();
    let z = Poly::variable(ss.clone(), "z").unwrap();
    let one = Poly::constant(ss, Z::new(1));
    x.add(&y)
        .unwrap()
        .add(&z)
        .unwrap()
        .add(&one)
        .unwrap()
        .pow(n)
        .unwrap()
}

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("mul");
    for n in [4u64, 8, 12] {
        let f = dense_cube(n);
        group.bench_with_input(BenchmarkId::new("simple", n), &f, |b, f| {
            b.iter(|| {
                let mut h = Poly::new(f.symbol_set().clone());
                mul_simple(&mut h, black_box(f), black_box(f)).unwrap();
                h
            });
        });
        group.bench_with_input(BenchmarkId::new("mt_hm", n), &f, |b, f| {
            b.iter(|| {
                let mut h = Poly::new(f.symbol_set().clone());
                mul_mt_hm(&mut h, black_box(f), black_box(f)).unwrap();
                h
            });
        });
    }
    group.finish();
}

fn bench_truncated(c: &mut Criterion) {
    let mut group = c.benchmark_group("mul_truncated");
    let f = dense_cube(10);
    let over = SymbolSet::from_names(["x", "y"]);
    for d in [5i64, 10, 20] {
        let bound = Integer::new(d);
        group.bench_with_input(BenchmarkId::new("mt_hm", d), &f, |b, f| {
            b.iter(|| {
                let mut h = Poly::new(f.symbol_set().clone());
                mul_mt_hm_truncated(&mut h, black_box(f), black_box(f), &bound, Some(&over))
                    .unwrap();
                h
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kernels, bench_truncated);
criterion_main!(benches);
