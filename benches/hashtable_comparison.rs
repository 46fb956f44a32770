use std::collections::HashMap as StdHashMap;
use std::hash::Hash;
use std::hint::black_box;

use chain_hash::DefaultHashBuilder;
use chain_hash::Dictionary;
use chain_hash::HashTable as ChainHashTable;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownHashMap;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;

trait TestKey: Clone + Hash + Eq {
    fn new(key: u64) -> Self;
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct TestItem(String);

impl TestKey for TestItem {
    fn new(key: u64) -> Self {
        black_box(Self(format!("key_{:016X}", key)))
    }
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct SmallTestItem(u64);

impl TestKey for SmallTestItem {
    fn new(key: u64) -> Self {
        black_box(Self(key))
    }
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 11),
    (1 << 12),
    (1 << 13),
    (1 << 14),
    (1 << 15),
    (1 << 16),
];

const KEY_SPACE_MULTIPLIER: usize = 2;

fn chain_table<K: TestKey>() -> ChainHashTable<K, u64> {
    ChainHashTable::with_hasher(DefaultHashBuilder::default())
}

fn hashbrown_map<K: TestKey>() -> HashbrownHashMap<K, u64, DefaultHashBuilder> {
    HashbrownHashMap::with_hasher(DefaultHashBuilder::default())
}

fn std_map<K: TestKey>() -> StdHashMap<K, u64, DefaultHashBuilder> {
    StdHashMap::with_hasher(DefaultHashBuilder::default())
}

fn random_keys<K: TestKey>(count: usize) -> Vec<(K, u64)> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| {
            let key = rng.try_next_u64().unwrap();
            (K::new(key), key)
        })
        .collect()
}

fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut items = items.to_vec();
    items.shuffle(&mut SmallRng::from_os_rng());
    items
}

fn bench_insert_random<K: TestKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_random_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let items = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || shuffled(&items),
                |items| {
                    let mut table = chain_table::<K>();
                    for (key, value) in items {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || shuffled(&items),
                |items| {
                    let mut table = hashbrown_map::<K>();
                    for (key, value) in items {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("std", |b| {
            b.iter_batched(
                || shuffled(&items),
                |items| {
                    let mut table = std_map::<K>();
                    for (key, value) in items {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit_miss<K: TestKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_miss_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let hits = (0..size as u64 * 2)
            .step_by(2)
            .map(|key| (K::new(key), key))
            .collect::<Vec<_>>();
        let lookups = (0..size as u64).map(K::new).collect::<Vec<_>>();

        let mut chain_hash_table = chain_table::<K>();
        let mut hashbrown_table = hashbrown_map::<K>();
        let mut std_table = std_map::<K>();
        for (key, value) in hits.iter().cloned() {
            chain_hash_table.insert(key.clone(), value);
            hashbrown_table.insert(key.clone(), value);
            std_table.insert(key, value);
        }

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || shuffled(&lookups),
                |lookups| {
                    for key in lookups.iter() {
                        black_box(chain_hash_table.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || shuffled(&lookups),
                |lookups| {
                    for key in lookups.iter() {
                        black_box(hashbrown_table.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("std", |b| {
            b.iter_batched(
                || shuffled(&lookups),
                |lookups| {
                    for key in lookups.iter() {
                        black_box(std_table.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Removes every entry, which walks a chained table through all of its
/// shrink steps.
fn bench_remove<K: TestKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let items = random_keys::<K>(size);
        let chain_hash_table: ChainHashTable<K, u64> = items.iter().cloned().collect();
        let hashbrown_table: HashbrownHashMap<K, u64, DefaultHashBuilder> =
            items.iter().cloned().collect();
        let std_table: StdHashMap<K, u64, DefaultHashBuilder> = items.iter().cloned().collect();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || (chain_hash_table.clone(), shuffled(&items)),
                |(mut table, items)| {
                    for (key, _) in items.iter() {
                        black_box(table.remove(key));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || (hashbrown_table.clone(), shuffled(&items)),
                |(mut table, items)| {
                    for (key, _) in items.iter() {
                        black_box(table.remove(key));
                    }
                    table.shrink_to_fit();
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("std", |b| {
            b.iter_batched(
                || (std_table.clone(), shuffled(&items)),
                |(mut table, items)| {
                    for (key, _) in items.iter() {
                        black_box(table.remove(key));
                    }
                    table.shrink_to_fit();
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration<K: TestKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let items = random_keys::<K>(size);
        let chain_hash_table: ChainHashTable<K, u64> = items.iter().cloned().collect();
        let hashbrown_table: HashbrownHashMap<K, u64, DefaultHashBuilder> =
            items.iter().cloned().collect();
        let std_table: StdHashMap<K, u64, DefaultHashBuilder> = items.iter().cloned().collect();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function("chain_hash", |b| {
            b.iter(|| black_box(chain_hash_table.values().fold(0u64, |acc, v| acc.wrapping_add(*v))))
        });

        group.bench_function("chain_hash_cursor", |b| {
            b.iter(|| {
                let mut sum = 0u64;
                let mut cursor = chain_hash_table.begin();
                while let Some(value) = cursor.value() {
                    sum = sum.wrapping_add(*value);
                    cursor.advance();
                }
                black_box(sum)
            })
        });

        group.bench_function("hashbrown", |b| {
            b.iter(|| black_box(hashbrown_table.values().fold(0u64, |acc, v| acc.wrapping_add(*v))))
        });

        group.bench_function("std", |b| {
            b.iter(|| black_box(std_table.values().fold(0u64, |acc, v| acc.wrapping_add(*v))))
        });
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Remove,
    Find,
}

fn bench_mixed_probabilistic_zipf<K: TestKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "mixed_probabilistic_zipf_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let mut rng = SmallRng::from_os_rng();
        let op_distr = Zipf::new(3.0, 1.0).unwrap();
        let insert_distr = Zipf::new(size as f32 - 1.0, 1.0).unwrap();
        let find_remove_distr =
            Zipf::new(size as f32 * KEY_SPACE_MULTIPLIER as f32 - 1.0, 1.0).unwrap();

        let operations = (0..size * 3)
            .map(|_| {
                let operation = match rng.sample(op_distr) as usize {
                    1 => Operation::Find,
                    2 => Operation::Insert,
                    _ => Operation::Remove,
                };
                let key = match operation {
                    Operation::Insert => rng.sample(insert_distr) as u64,
                    Operation::Remove | Operation::Find => rng.sample(find_remove_distr) as u64,
                };
                (operation, K::new(key), key)
            })
            .collect::<Vec<_>>();

        group.throughput(Throughput::Elements(operations.len() as u64));

        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut table = chain_table::<K>();
                    for (operation, key, value) in operations {
                        match operation {
                            Operation::Insert => {
                                *table.get_or_insert_default(key) = value;
                            }
                            Operation::Remove => {
                                black_box(table.remove(&key));
                            }
                            Operation::Find => {
                                black_box(table.get(&key));
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut table = hashbrown_map::<K>();
                    for (operation, key, value) in operations {
                        match operation {
                            Operation::Insert => {
                                table.insert(key, value);
                            }
                            Operation::Remove => {
                                black_box(table.remove(&key));
                            }
                            Operation::Find => {
                                black_box(table.get(&key));
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("std", |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut table = std_map::<K>();
                    for (operation, key, value) in operations {
                        match operation {
                            Operation::Insert => {
                                table.insert(key, value);
                            }
                            Operation::Remove => {
                                black_box(table.remove(&key));
                            }
                            Operation::Find => {
                                black_box(table.get(&key));
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_dictionary_update<const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group("dictionary_update");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        // Half of the incoming pairs overwrite existing keys.
        let existing = (0..size as u64)
            .map(|key| (format!("key_{key:016X}"), key.to_string()))
            .collect::<Vec<_>>();
        let incoming = (size as u64 / 2..size as u64 * 3 / 2)
            .map(|key| (format!("key_{key:016X}"), format!("updated_{key}")))
            .collect::<Vec<_>>();

        let mut base = Dictionary::new();
        base.update(existing.iter().cloned());

        group.throughput(Throughput::Elements(incoming.len() as u64));

        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || (base.clone(), shuffled(&incoming)),
                |(mut dict, incoming)| {
                    dict.update(incoming);
                    black_box(dict)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("std", |b| {
            b.iter_batched(
                || {
                    let table: StdHashMap<String, String, DefaultHashBuilder> =
                        existing.iter().cloned().collect();
                    (table, shuffled(&incoming))
                },
                |(mut table, incoming)| {
                    table.extend(incoming);
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<SmallTestItem, 6>,
    bench_insert_random::<TestItem, 6>,
    bench_find_hit_miss::<SmallTestItem, 6>,
    bench_find_hit_miss::<TestItem, 6>,
    bench_remove::<SmallTestItem, 6>,
    bench_remove::<TestItem, 6>,
    bench_iteration::<SmallTestItem, 6>,
    bench_iteration::<TestItem, 6>,
    bench_mixed_probabilistic_zipf::<SmallTestItem, 6>,
    bench_mixed_probabilistic_zipf::<TestItem, 6>,
    bench_dictionary_update::<5>,
);

criterion_main!(benches);
