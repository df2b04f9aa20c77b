use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dhlab::math::{find_primitive_roots_with, FactorCache, RootSearchConfig};
use num_bigint::BigUint;

fn bench_find_primitive_roots(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_primitive_roots");
    let config = RootSearchConfig {
        seed: Some(42),
        ..RootSearchConfig::default()
    };

    for p in [97u64, 9_973, 999_983] {
        let p = BigUint::from(p);

        group.bench_with_input(BenchmarkId::new("cold_cache", &p), &p, |b, p| {
            b.iter(|| find_primitive_roots_with(black_box(p), &config, &FactorCache::new()))
        });

        let cache = FactorCache::new();
        group.bench_with_input(BenchmarkId::new("warm_cache", &p), &p, |b, p| {
            b.iter(|| find_primitive_roots_with(black_box(p), &config, &cache))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_primitive_roots);
criterion_main!(benches);
