//! Benchmarks contrasting the positional-access cost of the two storage
//! strategies: ArraySeq is O(1) per access, LinkedSeq is O(index).
//!
//! Run with: cargo bench

use bedrock_collections::{ArraySeq, LinkedSeq};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;
use rand::seq::SliceRandom;

const SIZES: &[usize] = &[100, 1_000, 10_000];

// ============================================================================
// Full scans: every index once. Array stays flat per element; linked grows
// with the chain length because each access restarts from the head.
// ============================================================================

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_all_indices");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        let mut array: ArraySeq<u64> = ArraySeq::with_capacity(size);
        let mut linked: LinkedSeq<u64> = LinkedSeq::new();
        for i in 0..size as u64 {
            array.push(i);
            linked.push(i);
        }

        group.bench_with_input(BenchmarkId::new("array", size), &size, |b, &size| {
            b.iter(|| {
                let mut sum = 0u64;
                for i in 0..size {
                    sum += *black_box(array.get(i));
                }
                sum
            });
        });

        group.bench_with_input(BenchmarkId::new("linked", size), &size, |b, &size| {
            b.iter(|| {
                let mut sum = 0u64;
                for i in 0..size {
                    sum += *black_box(linked.get(i));
                }
                sum
            });
        });
    }

    group.finish();
}

// ============================================================================
// Single-index access at the back of the sequence. Constant for the array,
// linear in the sequence length for the chain.
// ============================================================================

fn bench_back_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_last_index");

    for &size in SIZES {
        let mut array: ArraySeq<u64> = ArraySeq::with_capacity(size);
        let mut linked: LinkedSeq<u64> = LinkedSeq::new();
        for i in 0..size as u64 {
            array.push(i);
            linked.push(i);
        }

        group.bench_with_input(BenchmarkId::new("array", size), &size, |b, &size| {
            b.iter(|| black_box(*array.get(size - 1)));
        });

        group.bench_with_input(BenchmarkId::new("linked", size), &size, |b, &size| {
            b.iter(|| black_box(*linked.get(size - 1)));
        });
    }

    group.finish();
}

// ============================================================================
// Random access over the array (cache-hostile order). No linked counterpart;
// random access over a chain is the pathological case the docs warn about.
// ============================================================================

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_random_access");

    let size = 10_000;
    group.throughput(Throughput::Elements(size as u64));

    let mut rng = rand::thread_rng();
    let mut array: ArraySeq<u64> = ArraySeq::with_capacity(size);
    for _ in 0..size {
        array.push(rng.gen_range(0..1_000));
    }

    let mut order: Vec<usize> = (0..size).collect();
    order.shuffle(&mut rng);

    group.bench_function("shuffled_indices", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &i in &order {
                sum += *black_box(array.get(i));
            }
            sum
        });
    });

    group.finish();
}

criterion_group!(benches, bench_scan, bench_back_access, bench_random_access);
criterion_main!(benches);
