//! Benchmarks for the sparse rank step, fixed-count runs, and the dense baseline.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::SeedableRng;
use std::hint::black_box;
use surfrank::{
    boost, dense_pagerank, normalize_in_place, uniform, DenseMatrix, RankIterator, SparseGraph,
};

/// Directed preferential attachment: each new node cites `m` earlier nodes,
/// chosen proportionally to in-degree (+1). Early nodes stay dangling, like the oldest
/// papers in a citation graph.
fn citation_graph(n: usize, m: usize, seed: u64) -> SparseGraph {
    assert!(n > m && m >= 1);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = SparseGraph::square(n);
    let mut targets: Vec<usize> = (0..=m).collect(); // node ids repeated by in-degree + 1

    for v in (m + 1)..n {
        let mut chosen: Vec<usize> = Vec::with_capacity(m);
        while chosen.len() < m {
            let u = targets[rng.random_range(0..targets.len())];
            if !chosen.contains(&u) {
                chosen.push(u);
            }
        }
        for &u in &chosen {
            g.append_entry(v, u, 1.0).expect("fresh edge");
            targets.push(u);
        }
        targets.push(v);
    }
    g
}

fn ring(n: usize) -> SparseGraph {
    let mut g = SparseGraph::square(n);
    for i in 0..n {
        g.append_entry(i, (i + 1) % n, 1.0).expect("fresh edge");
    }
    g
}

fn bench_sparse_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_step");

    for n in [1_000usize, 10_000, 100_000] {
        let graphs = [("ring", ring(n)), ("citation_m5", citation_graph(n, 5, 123))];

        for (name, mut g) in graphs {
            normalize_in_place(&mut g);
            let it = RankIterator::new(&g, 0.9).expect("normalized");
            let r = uniform(n);
            group.bench_with_input(BenchmarkId::new(format!("{name}/step"), n), &n, |b, _| {
                b.iter(|| {
                    let next = it.step(black_box(&r)).expect("step");
                    black_box(next);
                })
            });
        }
    }

    group.finish();
}

fn bench_boost_and_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("boost_and_run");
    group.sample_size(20);

    for n in [1_000usize, 10_000] {
        let raw = citation_graph(n, 5, 7);
        group.bench_with_input(BenchmarkId::new("boost_normalize_run50", n), &n, |b, _| {
            b.iter(|| {
                let mut g = raw.clone();
                boost(&mut g, 267, 1000).expect("boost");
                normalize_in_place(&mut g);
                let it = RankIterator::new(&g, 0.9).expect("normalized");
                black_box(it.run(&uniform(n), 50).expect("run"));
            })
        });
    }

    group.finish();
}

fn bench_dense_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense_baseline");

    for n in [100usize, 400] {
        let dense = DenseMatrix::from_sparse(&citation_graph(n, 5, 9));
        group.bench_with_input(BenchmarkId::new("hse_power2", n), &n, |b, _| {
            b.iter(|| black_box(dense_pagerank(black_box(&dense), 0.9, 2).expect("dense")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sparse_step, bench_boost_and_run, bench_dense_baseline);
criterion_main!(benches);
