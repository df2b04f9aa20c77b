use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dhlab::math::{is_probable_prime_with_rng, DEFAULT_ROUNDS};
use num_bigint::BigUint;
use rand::{rngs::StdRng, SeedableRng};

fn bench_miller_rabin(c: &mut Criterion) {
    let mut group = c.benchmark_group("miller_rabin");
    // largest prime of each width, plus a composite that survives the small-prime filter
    let inputs = [
        ("prime_2_digits", 97u64),
        ("prime_4_digits", 9_973),
        ("prime_6_digits", 999_983),
        ("composite_6_digits", 994_009),
    ];

    for (name, n) in inputs {
        let n = BigUint::from(n);
        group.bench_with_input(BenchmarkId::from_parameter(name), &n, |b, n| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| is_probable_prime_with_rng(black_box(n), DEFAULT_ROUNDS, &mut rng))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_miller_rabin);
criterion_main!(benches);
