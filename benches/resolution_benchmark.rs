use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loto_engine::{gains::PercentageTable, resolution::resolve, core::{Draw, Ticket}};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn create_test_pool(count: usize) -> Vec<Ticket> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| Ticket::random(format!("Player_{}", i + 1), &mut rng))
        .collect()
}

fn bench_resolution(c: &mut Criterion) {
    let table = PercentageTable::standard();
    let draw = Draw::random(&mut StdRng::seed_from_u64(7));

    let pool_10 = create_test_pool(10);
    let pool_50 = create_test_pool(50);
    let pool_100 = create_test_pool(100);

    c.bench_function("resolve_10", |b| {
        b.iter(|| black_box(resolve(&draw, pool_10.clone(), 3_000_000.0, &table)));
    });

    c.bench_function("resolve_50", |b| {
        b.iter(|| black_box(resolve(&draw, pool_50.clone(), 3_000_000.0, &table)));
    });

    c.bench_function("resolve_100", |b| {
        b.iter(|| black_box(resolve(&draw, pool_100.clone(), 3_000_000.0, &table)));
    });
}

criterion_group!(benches, bench_resolution);
criterion_main!(benches);
