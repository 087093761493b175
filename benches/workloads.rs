//! Workload benchmarks
//!
//! Reduced sizes of the three experiment workloads, each on a single-thread
//! pool and on the full machine, plus the scalar vs SIMD multiply kernels.
//!
//! Run with: cargo bench --bench workloads

use coreperf::limiter::{available_cores, CoreLimit};
use coreperf::workload::aggregate::{derive_column, group_sum, random_table, GROUP_KEY};
use coreperf::workload::matmul::Matrix;
use coreperf::workload::sort::quicksort;
use coreperf::Backend;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

const SORT_LEN: usize = 10_000;
const MATRIX_DIM: usize = 128;
const TABLE_ROWS: usize = 100_000;

fn core_counts() -> Vec<usize> {
    let total = available_cores();
    if total > 1 {
        vec![1, total]
    } else {
        vec![1]
    }
}

/// Quicksort on 10K integers (single-threaded by construction)
fn bench_quicksort(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let values: Vec<i64> = (0..SORT_LEN).map(|_| rng.gen_range(0..100_000)).collect();

    c.bench_function("quicksort_10k", |b| {
        b.iter(|| quicksort(black_box(&values)));
    });
}

/// Dense multiply per backend and core count
fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul_128");
    let mut rng = StdRng::seed_from_u64(42);
    let lhs = Matrix::random(&mut rng, MATRIX_DIM, MATRIX_DIM);
    let rhs = Matrix::random(&mut rng, MATRIX_DIM, MATRIX_DIM);

    for cores in core_counts() {
        let pool = CoreLimit::new(cores).thread_pool().unwrap();
        for (name, backend) in [("scalar", Backend::Scalar), ("simd", Backend::Simd)] {
            group.bench_with_input(BenchmarkId::new(name, cores), &cores, |b, _| {
                b.iter(|| pool.install(|| lhs.matmul(black_box(&rhs), backend).unwrap()));
            });
        }
    }

    group.finish();
}

/// Derive + group-by on a 100K row table per core count
fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_100k");
    let table = random_table(&mut StdRng::seed_from_u64(42), TABLE_ROWS, 100).unwrap();

    for cores in core_counts() {
        let pool = CoreLimit::new(cores).thread_pool().unwrap();
        group.bench_with_input(BenchmarkId::new("derive_group_sum", cores), &cores, |b, _| {
            b.iter(|| {
                pool.install(|| {
                    let derived = derive_column(black_box(&table)).unwrap();
                    group_sum(&derived, GROUP_KEY).unwrap()
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_quicksort, bench_matmul, bench_aggregate);
criterion_main!(benches);
