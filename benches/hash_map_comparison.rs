use core::hash::Hash;
use core::hash::Hasher;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use flatbelt::HashTable;
use hashbrown::hash_table::Entry as HashbrownEntry;
use hashbrown::hash_table::HashTable as HashbrownHashTable;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use siphasher::sip::SipHasher;

#[derive(Clone)]
struct TestItem {
    key: u64,
    _value: [u8; 16],
}

impl TestItem {
    fn new(key: u64) -> Self {
        black_box(Self {
            key,
            _value: key.to_le_bytes().repeat(2).try_into().unwrap(),
        })
    }

    fn hash_key(&self) -> u64 {
        let mut hasher = SipHasher::new();
        self.key.hash(&mut hasher);
        hasher.finish()
    }
}

const SIZES: &[usize] = &[(1 << 10), (1 << 12), (1 << 14), (1 << 16)];

fn random_items(count: usize) -> Vec<(u64, TestItem)> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| {
            let item = TestItem::new(rng.try_next_u64().unwrap());
            (item.hash_key(), item)
        })
        .collect()
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        let hash_and_item = random_items(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_function(format!("flatbelt/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = hash_and_item.clone();
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    hash_and_item
                },
                |hash_and_item| {
                    let mut table = HashTable::<TestItem>::with_capacity(0);
                    for (hash, item) in hash_and_item {
                        table.insert(hash, item);
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = hash_and_item.clone();
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    hash_and_item
                },
                |hash_and_item| {
                    let mut table = HashbrownHashTable::with_capacity(0);
                    for (hash, item) in hash_and_item {
                        match table.entry(hash, |v: &TestItem| v.key == item.key, |v| v.hash_key())
                        {
                            HashbrownEntry::Vacant(entry) => {
                                black_box(entry.insert(item));
                            }
                            HashbrownEntry::Occupied(_) => unreachable!(),
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

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        let hash_and_item = random_items(*size);
        let misses = random_items(*size);

        let mut flat = HashTable::<TestItem>::with_capacity(*size);
        let mut brown = HashbrownHashTable::with_capacity(*size);
        for (hash, item) in &hash_and_item {
            flat.insert(*hash, item.clone());
            brown.insert_unique(*hash, item.clone(), |v: &TestItem| v.hash_key());
        }

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_function(format!("flatbelt_hit/{size}"), |b| {
            b.iter(|| {
                for (hash, item) in &hash_and_item {
                    black_box(flat.find(*hash, |v| v.key == item.key));
                }
            })
        });
        group.bench_function(format!("hashbrown_hit/{size}"), |b| {
            b.iter(|| {
                for (hash, item) in &hash_and_item {
                    black_box(brown.find(*hash, |v| v.key == item.key));
                }
            })
        });

        group.bench_function(format!("flatbelt_miss/{size}"), |b| {
            b.iter(|| {
                for (hash, item) in &misses {
                    black_box(flat.find(*hash, |v| v.key == item.key));
                }
            })
        });
        group.bench_function(format!("hashbrown_miss/{size}"), |b| {
            b.iter(|| {
                for (hash, item) in &misses {
                    black_box(brown.find(*hash, |v| v.key == item.key));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        let hash_and_item = random_items(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_function(format!("flatbelt/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut table = HashTable::<TestItem>::with_capacity(*size);
                    for (hash, item) in &hash_and_item {
                        table.insert(*hash, item.clone());
                    }
                    let mut order = hash_and_item.clone();
                    order.shuffle(&mut SmallRng::from_os_rng());
                    (table, order)
                },
                |(mut table, order)| {
                    for (hash, item) in order {
                        black_box(table.remove(hash, |v| v.key == item.key));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut table = HashbrownHashTable::with_capacity(*size);
                    for (hash, item) in &hash_and_item {
                        table.insert_unique(*hash, item.clone(), |v: &TestItem| v.hash_key());
                    }
                    let mut order = hash_and_item.clone();
                    order.shuffle(&mut SmallRng::from_os_rng());
                    (table, order)
                },
                |(mut table, order)| {
                    for (hash, item) in order {
                        match table.find_entry(hash, |v: &TestItem| v.key == item.key) {
                            Ok(entry) => {
                                black_box(entry.remove());
                            }
                            Err(_) => unreachable!(),
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

criterion_group!(benches, bench_insert_random, bench_lookup, bench_remove);
criterion_main!(benches);
