//! Primitive-root certification and discovery.
//!
//! `g` is a primitive root modulo a prime `p` iff it is coprime to `p` and
//! `g^((p-1)/q) != 1 (mod p)` for every prime `q` dividing `p - 1`. The check is
//! exact once `p - 1` is factored.
//!
//! Discovery is deliberately not exhaustive for large `p`: every residue below
//! `exhaustive_bound` is tried, plus a capped random sample above it. The
//! result may miss primitive roots.

use crate::error::{Error, Result};
use crate::math::factorization::{distinct_prime_factors, FactorCache};
use crate::math::modular::pow_mod;
use crate::math::primality::{is_probable_prime_with_rng, DEFAULT_ROUNDS};
use crate::math::rng_from_seed;
use log::{debug, error, trace};
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use rand::Rng;
use std::collections::{BTreeSet, HashSet};

/// Configuration for [`find_primitive_roots_with`].
#[derive(Debug, Clone)]
pub struct RootSearchConfig {
    /// Every candidate in `[1, min(p, exhaustive_bound))` is tested.
    pub exhaustive_bound: u64,
    /// Number of extra candidates sampled without replacement from
    /// `[exhaustive_bound, p)` when `p > exhaustive_bound`.
    pub random_samples: usize,
    /// Miller-Rabin rounds used to re-validate `p`.
    pub rounds: usize,
    /// Optional RNG seed for reproducible sampling.
    pub seed: Option<u64>,
}

impl Default for RootSearchConfig {
    fn default() -> Self {
        Self {
            exhaustive_bound: 100,
            random_samples: 100,
            rounds: DEFAULT_ROUNDS,
            seed: None,
        }
    }
}

/// Returns whether `g` generates the multiplicative group modulo `p`.
///
/// `p` is assumed prime; primality is not re-checked here.
///
/// # Errors
/// Returns [`Error::InvalidInput`] if `p < 2`.
pub fn is_primitive_root(g: &BigUint, p: &BigUint) -> Result<bool> {
    check_modulus(p)?;
    let factors = distinct_prime_factors(&(p - 1u32))?;
    Ok(has_full_order(g, p, &factors))
}

/// [`is_primitive_root`] with the factorization of `p - 1` memoized in `cache`.
pub fn is_primitive_root_with_cache(g: &BigUint, p: &BigUint, cache: &FactorCache) -> Result<bool> {
    check_modulus(p)?;
    let factors = cache.distinct_prime_factors(&(p - 1u32))?;
    Ok(has_full_order(g, p, &factors))
}

fn check_modulus(p: &BigUint) -> Result<()> {
    if *p < BigUint::from(2u32) {
        return Err(Error::InvalidInput(format!(
            "primitive roots need a prime modulus, got {}",
            p
        )));
    }
    Ok(())
}

fn has_full_order(g: &BigUint, p: &BigUint, phi_factors: &BTreeSet<BigUint>) -> bool {
    if !g.gcd(p).is_one() {
        return false;
    }
    let phi = p - 1u32;
    phi_factors
        .iter()
        .all(|q| !pow_mod(g, &(&phi / q), p).is_one())
}

/// Finds primitive roots of `p` with the default configuration and a fresh cache.
pub fn find_primitive_roots(p: &BigUint) -> Vec<BigUint> {
    find_primitive_roots_with(p, &RootSearchConfig::default(), &FactorCache::new())
}

/// Finds primitive roots of `p`, seeding the sampler from `config.seed`.
pub fn find_primitive_roots_with(
    p: &BigUint,
    config: &RootSearchConfig,
    cache: &FactorCache,
) -> Vec<BigUint> {
    let mut rng = rng_from_seed(config.seed);
    find_primitive_roots_with_rng(p, config, cache, &mut rng)
}

/// Finds primitive roots of `p` using `rng` for primality witnesses and sampling.
///
/// Returns an empty list if `p` is not (probably) prime. Otherwise the roots
/// are returned in the order they were tested: the dense range ascending,
/// followed by sampled candidates in draw order.
pub fn find_primitive_roots_with_rng<R: Rng + ?Sized>(
    p: &BigUint,
    config: &RootSearchConfig,
    cache: &FactorCache,
    rng: &mut R,
) -> Vec<BigUint> {
    if !is_probable_prime_with_rng(p, config.rounds, rng) {
        debug!("{} is not prime, no primitive roots searched", p);
        return Vec::new();
    }

    let candidates = candidates(p, config, rng);
    let mut roots = Vec::new();
    for g in candidates {
        match is_primitive_root_with_cache(&g, p, cache) {
            Ok(true) => roots.push(g),
            Ok(false) => trace!("{} is not a primitive root mod {}", g, p),
            Err(e) => {
                // p passed the primality test, so p >= 2 and p - 1 >= 1.
                error!("primitive root check failed for prime {}: {}", p, e);
                return Vec::new();
            }
        }
    }

    debug!("found {} primitive roots mod {}", roots.len(), p);
    roots
}

/// Dense candidates below the bound, then a sample without replacement above it.
fn candidates<R: Rng + ?Sized>(p: &BigUint, config: &RootSearchConfig, rng: &mut R) -> Vec<BigUint> {
    let bound = BigUint::from(config.exhaustive_bound);
    let dense_end = if *p < bound { p.clone() } else { bound.clone() };

    let mut out = Vec::new();
    let mut g = BigUint::one();
    while g < dense_end {
        out.push(g.clone());
        g += 1u32;
    }

    if *p <= bound || config.random_samples == 0 {
        return out;
    }

    let span = p - &bound;
    match span.to_usize() {
        Some(len) => {
            let amount = config.random_samples.min(len);
            for offset in rand::seq::index::sample(rng, len, amount) {
                out.push(&bound + offset as u64);
            }
        }
        None => {
            // Span too wide to index; rejection sampling cannot stall since
            // the span dwarfs the sample size.
            let mut seen = HashSet::with_capacity(config.random_samples);
            while seen.len() < config.random_samples {
                let candidate = rng.gen_biguint_range(&bound, p);
                if seen.insert(candidate.clone()) {
                    out.push(candidate);
                }
            }
        }
    }

    out
}
