//! Reference list operation benchmarks.
//!
//! The sort reference is a bubble sort over a singly linked list, so these
//! numbers bound how large the harness case lists can grow before probe
//! timeouts become a concern.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use asmcheck_abi::list::{
    build_int_list, cmp_int_asc, free_list, ref_list_size, ref_list_sort,
};

fn descending(len: usize) -> Vec<isize> {
    (0..len as isize).rev().collect()
}

fn bench_list_size(c: &mut Criterion) {
    let lens: &[usize] = &[10, 100, 1000];
    let mut group = c.benchmark_group("list_size");

    for &len in lens {
        let list = build_int_list(&descending(len));
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| black_box(unsafe { ref_list_size(black_box(list)) }));
        });

        unsafe { free_list(list) };
    }
    group.finish();
}

fn bench_list_sort(c: &mut Criterion) {
    let lens: &[usize] = &[10, 50, 200];
    let mut group = c.benchmark_group("list_sort/worst_case");

    for &len in lens {
        let values = descending(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &values, |b, values| {
            b.iter_batched(
                || build_int_list(values),
                |list| {
                    let mut head = list;
                    unsafe { ref_list_sort(&raw mut head, Some(cmp_int_asc)) };
                    unsafe { free_list(head) };
                },
                BatchSize::PerIteration,
            );
        });
    }
    group.finish();
}

fn bench_list_sort_presorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_sort/presorted");

    for &len in &[50usize, 200] {
        let values: Vec<isize> = (0..len as isize).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &values, |b, values| {
            b.iter_batched(
                || build_int_list(values),
                |list| {
                    let mut head = list;
                    unsafe { ref_list_sort(&raw mut head, Some(cmp_int_asc)) };
                    unsafe { free_list(head) };
                },
                BatchSize::PerIteration,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_list_size,
    bench_list_sort,
    bench_list_sort_presorted
);
criterion_main!(benches);
