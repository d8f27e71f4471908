//! Benchmarks for the LRU cache.
//!
//! Every case runs against a full cache, where the recency list is longest
//! and every insert of a new key has to evict.
//!
//! Run with: cargo bench

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use lru_ttl_cache::Cache;
use std::time::Duration;

const CAPACITIES: [u64; 2] = [1_000, 100_000];

fn full_cache(capacity: u64) -> Cache<u64, u64> {
    let cache = Cache::with_capacity(capacity as usize).expect("non-zero capacity");
    for key in 0..capacity {
        cache.put(key, key);
    }
    cache
}

/// Hits on a full cache. Reading keys in insertion order always hits the
/// current LRU tail, so every get unlinks the tail and pushes it to the front.
fn bench_promote_on_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("promote_on_hit");

    for capacity in CAPACITIES {
        let cache = full_cache(capacity);
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &n| {
            let mut key = 0;
            b.iter(|| {
                black_box(cache.get(&key));
                key = (key + 1) % n;
            });
        });
    }

    // A hit on the head needs no relinking; the baseline for the cases above.
    let cache = full_cache(1_000);
    group.bench_function("head", |b| {
        b.iter(|| black_box(cache.get(&999)));
    });

    group.finish();
}

/// New keys into a full cache: each put evicts the tail, which
/// `swap_remove_index`es a slot and relinks the one moved into its place.
fn bench_evict_on_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("evict_on_put");

    for capacity in CAPACITIES {
        let cache = full_cache(capacity);
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &n| {
            let mut key = n;
            b.iter(|| {
                cache.put(black_box(key), key);
                key += 1;
            });
        });
    }

    // Overwrites stay in place: promote only, no eviction.
    let cache = full_cache(1_000);
    group.bench_function("overwrite", |b| {
        let mut key = 0;
        b.iter(|| {
            cache.put(black_box(key), key);
            key = (key + 1) % 1_000;
        });
    });

    group.finish();
}

/// Gets that find an expired entry, unlink it and report a miss.
fn bench_lazy_expiry(c: &mut Criterion) {
    const ENTRIES: u64 = 1_000;
    let mut group = c.benchmark_group("lazy_expiry");
    group.throughput(Throughput::Elements(ENTRIES));

    group.bench_function("get_expired", |b| {
        b.iter_batched(
            || {
                let cache = Cache::with_capacity(ENTRIES as usize).expect("non-zero capacity");
                for key in 0..ENTRIES {
                    cache.put_with_ttl(key, key, Duration::from_nanos(1));
                }
                std::thread::sleep(Duration::from_millis(1));
                cache
            },
            |cache: Cache<u64, u64>| {
                for key in 0..ENTRIES {
                    black_box(cache.get(&key));
                }
                cache
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let cache = full_cache(1_000);
    c.bench_function("snapshot_1000", |b| {
        b.iter(|| black_box(cache.snapshot()));
    });
}

criterion_group!(
    benches,
    bench_promote_on_hit,
    bench_evict_on_put,
    bench_lazy_expiry,
    bench_snapshot,
);
criterion_main!(benches);
