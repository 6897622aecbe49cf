use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use dense_hashmap::DenseHashMap;
use std::collections::HashMap;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_10k");
    group.bench_function("dense_hashmap", |b| {
        b.iter_batched(
            DenseHashMap::<u64, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.put(x, i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("std_hashmap", |b| {
        b.iter_batched(
            HashMap::<u64, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(x, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("hashbrown", |b| {
        b.iter_batched(
            hashbrown::HashMap::<u64, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(x, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    let keys: Vec<u64> = lcg(7).take(20_000).collect();

    let mut dense = DenseHashMap::<u64, u64>::new();
    for (i, &k) in keys.iter().enumerate() {
        dense.put(k, i as u64).unwrap();
    }
    let mut it = keys.iter().cycle();
    group.bench_function("dense_hashmap", |b| {
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(dense.get(k));
        })
    });

    let std_map: HashMap<u64, u64> = keys.iter().enumerate().map(|(i, &k)| (k, i as u64)).collect();
    let mut it = keys.iter().cycle();
    group.bench_function("std_hashmap", |b| {
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(std_map.get(k));
        })
    });
    group.finish();
}

fn bench_get_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_miss");
    let mut dense = DenseHashMap::<u64, u64>::new();
    for (i, x) in lcg(11).take(10_000).enumerate() {
        dense.put(x, i as u64).unwrap();
    }
    let mut miss = lcg(0xdead_beef);
    group.bench_function("dense_hashmap", |b| {
        b.iter(|| {
            // Keys from a disjoint stream are almost surely absent.
            let k = miss.next().unwrap();
            black_box(dense.get(&k));
        })
    });
    group.finish();
}

fn bench_remove_reinsert(c: &mut Criterion) {
    c.bench_function("dense_hashmap_remove_reinsert", |b| {
        let mut m = DenseHashMap::<u64, u64>::new();
        let keys: Vec<u64> = lcg(23).take(10_000).collect();
        for (i, &k) in keys.iter().enumerate() {
            m.put(k, i as u64).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = *it.next().unwrap();
            let v = m.remove(&k).unwrap();
            m.put(k, v).unwrap();
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_remove_reinsert
}
criterion_main!(benches);
