//! Criterion benchmarks for the three hafnian drivers on all-ones input.

use criterion::{ criterion_group, criterion_main, BenchmarkId, Criterion };
use hafnian::{ hafnian, hafnian_int, loop_hafnian };
use ndarray as nd;
use num_complex::Complex64 as C64;

fn ones_complex(n: usize) -> nd::Array2<C64> {
    nd::Array2::from_elem((n, n), C64::new(1.0, 0.0))
}

fn float_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("all_ones");
    group.sample_size(20);

    for m in [4, 6, 8] {
        let mat = ones_complex(2 * m);
        group.bench_function(BenchmarkId::new("hafnian", 2 * m), |bencher| {
            bencher.iter(|| hafnian(mat.view()).unwrap());
        });
        group.bench_function(
            BenchmarkId::new("loop_hafnian", 2 * m),
            |bencher| {
                bencher.iter(|| loop_hafnian(mat.view()).unwrap());
            },
        );
    }
    group.finish();
}

fn int_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("all_ones_int");
    group.sample_size(20);

    for m in [4, 6] {
        let mat: nd::Array2<i64> = nd::Array2::ones((2 * m, 2 * m));
        group.bench_function(
            BenchmarkId::new("hafnian_int", 2 * m),
            |bencher| {
                bencher.iter(|| hafnian_int(mat.view()).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, float_benchmark, int_benchmark);
criterion_main!(benches);
