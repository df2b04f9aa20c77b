//! Modular exponentiation by repeated squaring.
//!
//! Every other part of the crate reduces to `base^exponent mod modulus`, so the
//! routine is spelled out here instead of delegating to `BigUint::modpow`. The
//! tests check it against `modpow` as a reference.

use crate::error::{Error, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Computes `base^exponent mod modulus` with square-and-multiply.
///
/// Runs in `O(log exponent)` modular multiplications. Both operands are
/// reduced after every step, so intermediates never exceed `modulus^2`.
///
/// - `modulus == 1` yields `0`.
/// - `exponent == 0` yields `1 % modulus`.
///
/// # Errors
/// Returns [`Error::InvalidInput`] if `modulus` is zero.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidInput(
            "modulus must be at least 1".to_string(),
        ));
    }
    Ok(pow_mod(base, exponent, modulus))
}

/// Infallible core of [`mod_pow`]. Callers guarantee `modulus >= 1`.
pub(crate) fn pow_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    debug_assert!(!modulus.is_zero(), "pow_mod called with a zero modulus");

    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exp = exponent.clone();

    while !exp.is_zero() {
        if exp.bit(0) {
            result = (result * &base) % modulus;
        }
        exp >>= 1;
        base = (&base * &base) % modulus;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::RandBigInt;
    use rand::{rngs::StdRng, SeedableRng};

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_mod_pow_small() {
        // 2^10 = 1024, 1024 mod 1000 = 24
        assert_eq!(mod_pow(&big(2), &big(10), &big(1000)).unwrap(), big(24));
        assert_eq!(mod_pow(&big(4), &big(13), &big(497)).unwrap(), big(445));
    }

    #[test]
    fn test_mod_pow_zero_exponent() {
        assert_eq!(mod_pow(&big(42), &big(0), &big(5)).unwrap(), big(1));
        assert_eq!(mod_pow(&big(0), &big(0), &big(7)).unwrap(), big(1));
    }

    #[test]
    fn test_mod_pow_unit_modulus() {
        assert_eq!(mod_pow(&big(42), &big(0), &big(1)).unwrap(), big(0));
        assert_eq!(mod_pow(&big(42), &big(17), &big(1)).unwrap(), big(0));
    }

    #[test]
    fn test_mod_pow_zero_modulus_is_rejected() {
        let err = mod_pow(&big(3), &big(2), &big(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_mod_pow_base_larger_than_modulus() {
        // 100 = 8 mod 23, 8^2 = 64 = 18 mod 23
        assert_eq!(mod_pow(&big(100), &big(2), &big(23)).unwrap(), big(18));
    }

    #[test]
    fn test_mod_pow_upper_toy_range_does_not_overflow() {
        let p = big(999_983);
        let result = mod_pow(&big(999_982), &big(999_981), &p).unwrap();
        // (-1)^odd = -1 mod p
        assert_eq!(result, big(999_982));
    }

    #[test]
    fn test_mod_pow_matches_reference() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let modulus = rng.gen_biguint_range(&big(1), &big(2_000_000));
            let base = rng.gen_biguint(40);
            let exponent = rng.gen_biguint(24);
            let expected = base.modpow(&exponent, &modulus);
            assert_eq!(
                mod_pow(&base, &exponent, &modulus).unwrap(),
                expected,
                "{}^{} mod {}",
                base,
                exponent,
                modulus
            );
        }
    }

    #[test]
    fn test_mod_pow_is_idempotent() {
        let first = mod_pow(&big(5), &big(11), &big(23)).unwrap();
        let second = mod_pow(&big(5), &big(11), &big(23)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, big(22));
    }
}
