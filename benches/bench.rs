use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use cyclic_queue::{List, Queue};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use std::iter::FromIterator;

fn scrambled(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(0..n as u64 * 2 + 1)).collect()
}

/// Benchmark insert-at-tail followed by remove-at-head with a copy-out
fn bench_queue_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");
    group.throughput(Throughput::Elements(1));
    group.bench_function("insert_remove", |b| {
        let mut queue = Queue::new();
        let mut buf = [0u8; 32];
        b.iter(|| {
            queue.insert_tail(black_box("payload")).unwrap();
            queue.remove_head(Some(&mut buf)).unwrap()
        });
    });
    group.finish();
}

/// Benchmark the bottom-up merge sort on scrambled input
fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for &n in &[100_usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        let input = scrambled(n, n as u64);
        group.bench_function(n.to_string(), |b| {
            b.iter_batched(
                || List::from_iter(input.iter().copied()),
                |mut list| {
                    list.sort();
                    list
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

/// Benchmark the link-relocating shuffle (quadratic by design)
fn bench_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("shuffle");
    for &n in &[10_usize, 100, 1_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(n.to_string(), |b| {
            let mut rng = Xoshiro256StarStar::seed_from_u64(n as u64);
            b.iter_batched(
                || List::from_iter(0..n as u64),
                |mut list| {
                    list.shuffle(&mut rng);
                    list
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_queue_insert_remove,
    bench_sort,
    bench_shuffle
);
criterion_main!(benches);
