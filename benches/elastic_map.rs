#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::{collections::HashMap, hint::black_box};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use elastic_map::{ElasticConfig, ElasticMap};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;
const MAP_SIZES: [usize; 2] = [32, 1024];
const PROBE_LIMITS: [usize; 3] = [1, 5, 15];

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items =
        vec(any::<(String, String)>(), ITEMS_AMOUNT).new_tree(&mut runner).unwrap().current();

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut elastic_map = ElasticMap::new();
    let mut rust_map = HashMap::new();
    group.bench_function("elastic insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                // The default probe limit rejects the odd key at this size
                drop(black_box(elastic_map.insert(key, value)));
            }
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }
        });
    });
    group.bench_function("elastic get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(elastic_map.get(key));
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(rust_map.get(key));
            }
        });
    });
    group.finish();
}

// Put, get and remove every key of a presized table that never grows
fn composite_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Composite put/get/remove");
    group.sample_size(SAMPLE_SIZE);

    for map_size in MAP_SIZES {
        let capacity = map_size.max(16).next_power_of_two();

        for probe_limit in PROBE_LIMITS {
            let config = ElasticConfig::new()
                .with_capacity(capacity)
                .with_load_factor(1.0)
                .with_probe_limit(probe_limit);
            let id = BenchmarkId::new(format!("elastic probe limit {probe_limit}"), map_size);

            group.bench_with_input(id, &map_size, |b, &map_size| {
                b.iter(|| {
                    let mut map = ElasticMap::with_config(config);
                    for i in 0..map_size {
                        // Small probe limits reject some keys; that is part of what is measured
                        drop(black_box(map.insert(i, i)));
                    }
                    for i in 0..map_size {
                        black_box(map.get(&i));
                    }
                    for i in 0..map_size {
                        black_box(map.remove(&i));
                    }
                });
            });
        }

        group.bench_with_input(BenchmarkId::new("rust std", map_size), &map_size, |b, &map_size| {
            b.iter(|| {
                let mut map = HashMap::with_capacity(map_size);
                for i in 0..map_size {
                    black_box(map.insert(i, i));
                }
                for i in 0..map_size {
                    black_box(map.get(&i));
                }
                for i in 0..map_size {
                    black_box(map.remove(&i));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, hash_map_benches, composite_benches);

criterion_main!(benches);
