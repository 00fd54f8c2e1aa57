use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use recency_index::OrderedIndex;

const SIZE: u64 = 4096;

fn filled(size: u64) -> OrderedIndex<u64> {
    let mut index = OrderedIndex::with_capacity(size as usize);
    for i in 0..size {
        index.push_tail(i).unwrap();
    }
    index
}

fn bench_push_tail(c: &mut Criterion) {
    c.bench_function("ordered_index_push_tail", |b| {
        b.iter_batched(
            || OrderedIndex::with_capacity(SIZE as usize),
            |mut index| {
                for i in 0..SIZE {
                    let _ = index.push_tail(std::hint::black_box(i));
                }
                index
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_mark_accessed_random(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let keys: Vec<u64> = (0..SIZE).map(|_| rng.random_range(0..SIZE)).collect();

    c.bench_function("ordered_index_mark_accessed_random", |b| {
        b.iter_batched(
            || filled(SIZE),
            |mut index| {
                for key in &keys {
                    let _ = std::hint::black_box(index.mark_accessed(std::hint::black_box(key)));
                }
                index
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_evict_head(c: &mut Criterion) {
    c.bench_function("ordered_index_evict_head", |b| {
        b.iter_batched(
            || filled(SIZE),
            |mut index| {
                while let Some(item) = index.evict_head() {
                    std::hint::black_box(item);
                }
                index
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_bounded_lru_churn(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(7);
    let keys: Vec<u64> = (0..4 * SIZE).map(|_| rng.random_range(0..2 * SIZE)).collect();

    c.bench_function("ordered_index_bounded_lru_churn", |b| {
        b.iter_batched(
            || filled(SIZE),
            |mut index| {
                for &key in &keys {
                    if !index.mark_accessed(&key) {
                        index.push_head(key);
                        if index.len() as u64 > SIZE {
                            std::hint::black_box(index.evict_tail());
                        }
                    }
                }
                index
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iter(c: &mut Criterion) {
    let index = filled(SIZE);
    c.bench_function("ordered_index_iter", |b| {
        b.iter(|| std::hint::black_box(index.iter().sum::<u64>()))
    });
}

criterion_group!(
    benches,
    bench_push_tail,
    bench_mark_accessed_random,
    bench_evict_head,
    bench_bounded_lru_churn,
    bench_iter
);
criterion_main!(benches);
