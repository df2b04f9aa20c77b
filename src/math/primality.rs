//! Probabilistic primality testing (Miller-Rabin).
//!
//! Inputs divisible by one of the first twelve primes are settled exactly by a
//! cheap divisibility check. Everything else goes through `rounds` independent
//! Miller-Rabin witnesses, which bounds the false-positive rate for composites
//! by `4^-rounds`. A prime is never rejected.
//!
//! Randomness is injected: the `*_with_rng` functions accept any [`Rng`], so
//! tests and callers that need reproducibility can pass a seeded generator.

use crate::error::{Error, Result};
use crate::math::{modular::pow_mod, rng_from_seed};
use log::{trace, warn};
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

/// Default number of Miller-Rabin rounds.
pub const DEFAULT_ROUNDS: usize = 40;

/// Primes used for the exact divisibility short-circuit.
pub const SMALL_PRIMES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Configuration for a primality check.
#[derive(Debug, Clone)]
pub struct PrimalityConfig {
    /// Number of Miller-Rabin rounds. Zero is treated as one.
    pub rounds: usize,
    /// Optional RNG seed for reproducible witness selection.
    pub seed: Option<u64>,
}

impl Default for PrimalityConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            seed: None,
        }
    }
}

/// Returns `true` if `n` is probably prime, drawing witnesses from the thread RNG.
pub fn is_probable_prime(n: &BigUint, rounds: usize) -> bool {
    let mut rng = rand::thread_rng();
    is_probable_prime_with_rng(n, rounds, &mut rng)
}

/// Same as [`is_probable_prime`], with round count and seed taken from `config`.
pub fn is_probable_prime_with_config(n: &BigUint, config: &PrimalityConfig) -> bool {
    let mut rng = rng_from_seed(config.seed);
    is_probable_prime_with_rng(n, config.rounds, &mut rng)
}

/// Miller-Rabin test with witnesses drawn uniformly from `[2, n-2]` using `rng`.
pub fn is_probable_prime_with_rng<R: Rng + ?Sized>(n: &BigUint, rounds: usize, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }

    for &small in SMALL_PRIMES.iter() {
        if (n % small).is_zero() {
            return *n == BigUint::from(small);
        }
    }

    let rounds = if rounds == 0 {
        warn!("Miller-Rabin called with 0 rounds; running 1 round instead");
        1
    } else {
        rounds
    };

    // n - 1 = d * 2^s with d odd
    let n_minus_1 = n - 1u32;
    let mut d = n_minus_1.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for round in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut x = pow_mod(&a, &d, n);

        if x.is_one() || x == n_minus_1 {
            continue 'witness;
        }

        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }

        trace!("{} is composite, witness {} found in round {}", n, a, round + 1);
        return false;
    }

    true
}

/// Picks a probable prime from the closed range `[low, high]`.
///
/// A uniformly random starting point is chosen, then candidates are scanned
/// upwards, wrapping around to `low` once. The scan visits every integer of the
/// range at most once, so a prime-free range is reported instead of looping.
///
/// # Errors
/// - [`Error::InvalidInput`] if `low > high`.
/// - [`Error::InvalidInput`] if the range contains no prime.
pub fn random_prime_in_range<R: Rng + ?Sized>(
    low: &BigUint,
    high: &BigUint,
    rounds: usize,
    rng: &mut R,
) -> Result<BigUint> {
    if low > high {
        return Err(Error::InvalidInput(format!(
            "empty range [{}, {}]",
            low, high
        )));
    }

    let span = high - low + 1u32;
    let start = rng.gen_biguint_below(&span);
    let mut offset = BigUint::zero();

    while offset < span {
        let candidate = low + (&start + &offset) % &span;
        if is_probable_prime_with_rng(&candidate, rounds, rng) {
            return Ok(candidate);
        }
        offset += 1u32;
    }

    Err(Error::InvalidInput(format!(
        "no prime in range [{}, {}]",
        low, high
    )))
}
