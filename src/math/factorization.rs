//! Distinct prime factors by trial division, with an optional memo.
//!
//! Root discovery factors the same `p - 1` once per candidate generator, so
//! [`FactorCache`] remembers results per input. The cache is owned by the
//! caller and is safe to share between threads.

use crate::error::{Error, Result};
use log::trace;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

/// Returns the set of distinct primes dividing `n`.
///
/// Factors of 2 are stripped first, then odd divisors from 3 up to the square
/// root of what remains. A cofactor left over after the loop is prime.
/// `n = 1` has no prime factors and yields an empty set.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for `n = 0`.
pub fn distinct_prime_factors(n: &BigUint) -> Result<BTreeSet<BigUint>> {
    if n.is_zero() {
        return Err(Error::InvalidInput(
            "cannot factor 0".to_string(),
        ));
    }

    let mut factors = BTreeSet::new();
    let mut remaining = n.clone();

    if remaining.is_even() {
        while remaining.is_even() {
            remaining >>= 1;
        }
        factors.insert(BigUint::from(2u32));
    }

    let mut divisor = BigUint::from(3u32);
    while &divisor * &divisor <= remaining {
        if (&remaining % &divisor).is_zero() {
            while (&remaining % &divisor).is_zero() {
                remaining /= &divisor;
            }
            factors.insert(divisor.clone());
        }
        divisor += 2u32;
    }

    if remaining > BigUint::one() {
        factors.insert(remaining);
    }

    Ok(factors)
}

/// Thread-safe memo for [`distinct_prime_factors`].
///
/// Entries are never evicted; the inputs seen while working with toy-sized
/// moduli are few and small.
#[derive(Debug, Default)]
pub struct FactorCache {
    entries: Mutex<HashMap<BigUint, BTreeSet<BigUint>>>,
}

impl FactorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached version of [`distinct_prime_factors`].
    ///
    /// The lock is not held while factoring, so two threads may factor the
    /// same value concurrently; both compute the same set.
    pub fn distinct_prime_factors(&self, n: &BigUint) -> Result<BTreeSet<BigUint>> {
        if let Some(hit) = self.lock().get(n) {
            trace!("factor cache hit for {}", n);
            return Ok(hit.clone());
        }

        let factors = distinct_prime_factors(n)?;
        self.lock().insert(n.clone(), factors.clone());
        Ok(factors)
    }

    /// Number of memoized inputs.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // The map is never left half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<BigUint, BTreeSet<BigUint>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
