use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use treemap::TreeMap;

const SIZE: u64 = 10_000;

fn shuffled_keys() -> Vec<u64> {
    let mut keys: Vec<u64> = (0..SIZE).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(99));
    keys
}

fn populated(keys: &[u64]) -> TreeMap<u64, u64> {
    let mut map = TreeMap::new();
    for &key in keys {
        map.insert(key, key);
    }
    map
}

fn bench_insert(c: &mut Criterion) {
    let keys = shuffled_keys();
    let mut group = c.benchmark_group("insert");

    group.bench_function("sequential/treemap", |b| {
        b.iter(|| {
            let mut map = TreeMap::new();
            for i in 0..SIZE {
                map.insert(i, i);
            }
            map
        })
    });
    group.bench_function("sequential/std_btreemap", |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..SIZE {
                map.insert(i, i);
            }
            map
        })
    });
    group.bench_function("shuffled/treemap", |b| b.iter(|| populated(&keys)));
    group.bench_function("shuffled/std_btreemap", |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &key in &keys {
                map.insert(key, key);
            }
            map
        })
    });

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let keys = shuffled_keys();
    let map = populated(&keys);
    let model: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("get");
    group.bench_function("treemap", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(map.get(key));
            }
        })
    });
    group.bench_function("std_btreemap", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(model.get(key));
            }
        })
    });
    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let keys = shuffled_keys();
    let map = populated(&keys);
    let model: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("iterate");
    group.bench_function("treemap", |b| {
        b.iter(|| map.iter().map(|(_, v)| *v).sum::<u64>())
    });
    group.bench_function("treemap/cursor", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let mut cursor = map.begin();
            while !cursor.is_end() {
                sum += *cursor.value();
                cursor = cursor.next();
            }
            sum
        })
    });
    group.bench_function("std_btreemap", |b| {
        b.iter(|| model.values().sum::<u64>())
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let keys = shuffled_keys();

    let mut group = c.benchmark_group("remove");
    group.bench_function("treemap", |b| {
        b.iter_batched(
            || populated(&keys),
            |mut map| {
                for key in &keys {
                    black_box(map.remove(key));
                }
                map
            },
            BatchSize::LargeInput,
        )
    });
    group.bench_function("std_btreemap", |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>(),
            |mut map| {
                for key in &keys {
                    black_box(map.remove(key));
                }
                map
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_get, bench_iterate, bench_remove);
criterion_main!(benches);
