//! Primitive-root discovery over many primes at once.
//!
//! Work is spread over the rayon thread pool. All workers share one
//! [`FactorCache`]; each prime gets its own RNG so no random state is shared
//! between threads.

use crate::math::factorization::FactorCache;
use crate::math::primitive_root::{find_primitive_roots_with_rng, RootSearchConfig};
use crate::math::rng_from_seed;
use log::debug;
use num_bigint::BigUint;
use rayon::prelude::*;

/// Roots discovered for one surveyed modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSurvey {
    pub prime: BigUint,
    /// Empty when `prime` failed the primality test.
    pub roots: Vec<BigUint>,
}

/// Runs [`find_primitive_roots_with_rng`] for every entry of `primes` in parallel.
///
/// Results keep the order of `primes`. With `config.seed = Some(s)`, the RNG for
/// the `i`-th prime is seeded with `s + i`, so a seeded survey is reproducible
/// regardless of scheduling.
pub fn survey_primitive_roots(
    primes: &[BigUint],
    config: &RootSearchConfig,
    cache: &FactorCache,
) -> Vec<RootSurvey> {
    let surveys: Vec<RootSurvey> = primes
        .par_iter()
        .enumerate()
        .map(|(i, p)| {
            let seed = config.seed.map(|s| s.wrapping_add(i as u64));
            let mut rng = rng_from_seed(seed);
            RootSurvey {
                prime: p.clone(),
                roots: find_primitive_roots_with_rng(p, config, cache, &mut rng),
            }
        })
        .collect();

    debug!(
        "surveyed {} moduli, {} factorizations cached",
        surveys.len(),
        cache.len()
    );
    surveys
}
