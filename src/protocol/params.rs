//! DISCLAIMER: toy Diffie-Hellman group parameters for demonstration and teaching.
//! The moduli are 2-6 decimal digits. Absolutely DO NOT use them for real key agreement.
//!
//! Parameters exist in two states. [`RawParameters`] holds whatever integers a
//! caller supplied and can be asked whether it is valid. [`DHParameters`] can
//! only be obtained through validation, so holding one means the prime passed
//! the primality test and the generator passed the primitive-root check.

use crate::error::{Error, Result};
use crate::math::factorization::FactorCache;
use crate::math::modular::pow_mod;
use crate::math::primality::{
    is_probable_prime_with_config, random_prime_in_range, PrimalityConfig, DEFAULT_ROUNDS,
};
use crate::math::primitive_root::{find_primitive_roots_with, is_primitive_root, RootSearchConfig};
use crate::math::rng_from_seed;
use log::debug;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;
use std::fmt;

/// Number of decimal digits of a toy prime, restricted to `2..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DigitWidth(u32);

impl DigitWidth {
    pub const MIN: u32 = 2;
    pub const MAX: u32 = 6;

    /// # Errors
    /// Returns [`Error::InvalidInput`] if `digits` is outside `2..=6`.
    pub fn new(digits: u32) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&digits) {
            return Err(Error::InvalidInput(format!(
                "digit width must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                digits
            )));
        }
        Ok(Self(digits))
    }

    pub fn digits(self) -> u32 {
        self.0
    }

    /// Smallest integer with this many digits, `10^(d-1)`.
    pub fn lower_bound(self) -> BigUint {
        BigUint::from(10u32).pow(self.0 - 1)
    }

    /// Largest integer with this many digits, `10^d - 1`.
    pub fn upper_bound(self) -> BigUint {
        BigUint::from(10u32).pow(self.0) - 1u32
    }

    pub fn contains(self, n: &BigUint) -> bool {
        *n >= self.lower_bound() && *n <= self.upper_bound()
    }
}

impl TryFrom<u32> for DigitWidth {
    type Error = Error;

    fn try_from(digits: u32) -> Result<Self> {
        Self::new(digits)
    }
}

impl fmt::Display for DigitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} digits", self.0)
    }
}

/// Configuration for generating a prime of a given width.
#[derive(Debug, Clone)]
pub struct PrimeGenConfig {
    pub width: DigitWidth,
    /// Miller-Rabin rounds per candidate.
    pub rounds: usize,
    /// Optional RNG seed for reproducibility in toy examples.
    pub seed: Option<u64>,
}

impl PrimeGenConfig {
    pub fn new(width: DigitWidth) -> Self {
        Self {
            width,
            rounds: DEFAULT_ROUNDS,
            seed: None,
        }
    }
}

/// Picks a random probable prime with exactly `config.width` digits.
pub fn random_prime(config: &PrimeGenConfig) -> Result<BigUint> {
    let mut rng = rng_from_seed(config.seed);
    random_prime_with_rng(config.width, config.rounds, &mut rng)
}

pub fn random_prime_with_rng<R: Rng + ?Sized>(
    width: DigitWidth,
    rounds: usize,
    rng: &mut R,
) -> Result<BigUint> {
    random_prime_in_range(&width.lower_bound(), &width.upper_bound(), rounds, rng)
}

/// Prime and generator exactly as supplied, not yet checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameters {
    pub prime: BigUint,
    pub generator: BigUint,
}

impl RawParameters {
    pub fn new(prime: BigUint, generator: BigUint) -> Self {
        Self { prime, generator }
    }

    /// `true` when [`RawParameters::validate`] would succeed.
    pub fn is_valid(&self) -> bool {
        self.check(&PrimalityConfig::default()).is_ok()
    }

    /// Validates with the default primality configuration.
    pub fn validate(self) -> Result<DHParameters> {
        self.validate_with(&PrimalityConfig::default())
    }

    /// Checks that `prime` is probably prime and `generator` is a primitive
    /// root in `[1, prime-1]`, then freezes the pair.
    ///
    /// # Errors
    /// - [`Error::NotPrime`] if the primality test rejects `prime`.
    /// - [`Error::InvalidInput`] if `generator` is outside `[1, prime-1]`.
    /// - [`Error::NotPrimitiveRoot`] if `generator` has smaller order.
    pub fn validate_with(self, config: &PrimalityConfig) -> Result<DHParameters> {
        self.check(config)?;
        debug!(
            "validated parameters: prime {}, generator {}",
            self.prime, self.generator
        );
        Ok(DHParameters {
            prime: self.prime,
            generator: self.generator,
        })
    }

    fn check(&self, config: &PrimalityConfig) -> Result<()> {
        if !is_probable_prime_with_config(&self.prime, config) {
            return Err(Error::NotPrime(self.prime.clone()));
        }
        if self.generator.is_zero() || self.generator >= self.prime {
            return Err(Error::InvalidInput(format!(
                "generator {} is outside [1, {}]",
                self.generator,
                &self.prime - 1u32
            )));
        }
        if !is_primitive_root(&self.generator, &self.prime)? {
            return Err(Error::NotPrimitiveRoot {
                generator: self.generator.clone(),
                prime: self.prime.clone(),
            });
        }
        Ok(())
    }
}

/// A prime modulus and a primitive root of it, both certified.
///
/// Private exponents are not stored here. Each party holds its own
/// [`PrivateKey`] (or [`KeyPair`]) checked against these parameters, and
/// [`DHParameters::exchange`] takes them per call.
///
/// *This is for demonstration only. DO NOT use in real systems.*
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DHParameters {
    prime: BigUint,
    generator: BigUint,
}

/// A private exponent known to lie in `[1, prime-2]` for some [`DHParameters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey(BigUint);

impl PrivateKey {
    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

/// Configuration for keypair generation.
#[derive(Debug, Clone, Default)]
pub struct KeyGenConfig {
    /// Optional RNG seed for reproducibility in toy examples.
    pub seed: Option<u64>,
}

/// A private exponent `a` and its public value `g^a mod p`.
#[derive(Debug, Clone)]
pub struct KeyPair {
    prime: BigUint,
    pub private_key: PrivateKey,
    pub public_key: BigUint,
}

impl KeyPair {
    /// Raises the other party's public value to this private exponent.
    ///
    /// No validation of `other_public` is done; a MITM can pass anything.
    pub fn compute_shared_secret(&self, other_public: &BigUint) -> BigUint {
        pow_mod(other_public, self.private_key.value(), &self.prime)
    }
}

impl DHParameters {
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    pub fn generator(&self) -> &BigUint {
        &self.generator
    }

    /// Generates a random prime of the configured width and pairs it with the
    /// first primitive root discovered for it.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if no prime or no root could be found.
    pub fn from_width(prime_config: &PrimeGenConfig, root_config: &RootSearchConfig) -> Result<Self> {
        let prime = random_prime(prime_config)?;
        let roots = find_primitive_roots_with(&prime, root_config, &FactorCache::new());
        let generator = roots.into_iter().next().ok_or_else(|| {
            Error::InvalidInput(format!("no primitive root found for {}", prime))
        })?;
        debug!(
            "generated {} parameters: prime {}, generator {}",
            prime_config.width, prime, generator
        );
        Ok(Self { prime, generator })
    }

    /// Wraps `value` as a private key after checking it lies in `[1, prime-2]`.
    pub fn private_key(&self, value: BigUint) -> Result<PrivateKey> {
        check_private_exponent(&value, &self.prime, "private key")?;
        Ok(PrivateKey(value))
    }

    /// `generator^private mod prime`.
    pub fn public_key(&self, private: &PrivateKey) -> BigUint {
        pow_mod(&self.generator, private.value(), &self.prime)
    }

    /// Draws a uniform private key from `[1, prime-2]` and derives its public value.
    pub fn generate_keypair(&self, config: &KeyGenConfig) -> Result<KeyPair> {
        let mut rng = rng_from_seed(config.seed);
        self.generate_keypair_with_rng(&mut rng)
    }

    /// # Errors
    /// Returns [`Error::InvalidInput`] if `prime < 3` (the key range is empty).
    pub fn generate_keypair_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<KeyPair> {
        let upper = private_exponent_upper_bound(&self.prime)?;
        let private_key = PrivateKey(rng.gen_biguint_range(&BigUint::one(), &(upper + 1u32)));
        let public_key = self.public_key(&private_key);
        Ok(KeyPair {
            prime: self.prime.clone(),
            private_key,
            public_key,
        })
    }
}

/// Largest valid private exponent, `prime - 2`.
fn private_exponent_upper_bound(prime: &BigUint) -> Result<BigUint> {
    if *prime < BigUint::from(3u32) {
        return Err(Error::InvalidInput(format!(
            "prime {} leaves no room for private exponents in [1, p-2]",
            prime
        )));
    }
    Ok(prime - 2u32)
}

/// Rejects exponents outside `[1, prime-2]`. `label` names the offending value.
pub(crate) fn check_private_exponent(value: &BigUint, prime: &BigUint, label: &str) -> Result<()> {
    let upper = private_exponent_upper_bound(prime)?;
    if value.is_zero() || *value > upper {
        return Err(Error::InvalidInput(format!(
            "{} {} is outside [1, {}]",
            label, value, upper
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    fn params_23() -> DHParameters {
        RawParameters::new(big(23), big(5)).validate().unwrap()
    }

    #[test]
    fn test_digit_width_bounds() {
        assert!(DigitWidth::new(1).is_err());
        assert!(DigitWidth::new(7).is_err());
        assert!(DigitWidth::try_from(0u32).is_err());

        let w = DigitWidth::new(2).unwrap();
        assert_eq!(w.lower_bound(), big(10));
        assert_eq!(w.upper_bound(), big(99));

        let w = DigitWidth::try_from(6u32).unwrap();
        assert_eq!(w.digits(), 6);
        assert_eq!(w.lower_bound(), big(100_000));
        assert_eq!(w.upper_bound(), big(999_999));
        assert!(w.contains(&big(999_983)));
        assert!(!w.contains(&big(1_000_003)));
        assert_eq!(w.to_string(), "6 digits");
    }

    #[test]
    fn test_random_prime_has_requested_width() {
        for digits in DigitWidth::MIN..=DigitWidth::MAX {
            let width = DigitWidth::new(digits).unwrap();
            let config = PrimeGenConfig {
                seed: Some(digits as u64),
                ..PrimeGenConfig::new(width)
            };
            let p = random_prime(&config).unwrap();
            assert!(width.contains(&p), "{} does not have {}", p, width);
            assert_eq!(p.to_string().len(), digits as usize);
            assert!(is_probable_prime_with_config(&p, &PrimalityConfig::default()));
        }
    }

    #[test]
    fn test_validate_accepts_good_parameters() {
        let params = params_23();
        assert_eq!(params.prime(), &big(23));
        assert_eq!(params.generator(), &big(5));
        assert!(RawParameters::new(big(23), big(5)).is_valid());
    }

    #[test]
    fn test_validate_rejects_composite_prime() {
        let err = RawParameters::new(big(21), big(2)).validate().unwrap_err();
        assert_eq!(err, Error::NotPrime(big(21)));
        assert!(!RawParameters::new(big(21), big(2)).is_valid());
    }

    #[test]
    fn test_validate_rejects_non_primitive_generator() {
        let err = RawParameters::new(big(23), big(2)).validate().unwrap_err();
        assert_eq!(
            err,
            Error::NotPrimitiveRoot {
                generator: big(2),
                prime: big(23)
            }
        );
    }

    #[test]
    fn test_validate_rejects_generator_out_of_range() {
        for g in [0u64, 23, 28] {
            let err = RawParameters::new(big(23), big(g)).validate().unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "g = {}", g);
        }
    }

    #[test]
    fn test_from_width_yields_valid_parameters() {
        let width = DigitWidth::new(4).unwrap();
        let prime_config = PrimeGenConfig {
            seed: Some(77),
            ..PrimeGenConfig::new(width)
        };
        let root_config = RootSearchConfig {
            seed: Some(78),
            ..RootSearchConfig::default()
        };
        let params = DHParameters::from_width(&prime_config, &root_config).unwrap();
        assert!(width.contains(params.prime()));
        let raw = RawParameters::new(params.prime().clone(), params.generator().clone());
        assert!(raw.is_valid());
    }

    #[test]
    fn test_private_key_range() {
        let params = params_23();
        assert!(params.private_key(big(1)).is_ok());
        assert!(params.private_key(big(21)).is_ok());
        assert!(params.private_key(big(0)).is_err());
        assert!(params.private_key(big(22)).is_err());
    }

    #[test]
    fn test_generated_keypairs_agree() {
        let params = params_23();
        let alice = params.generate_keypair(&KeyGenConfig { seed: Some(100) }).unwrap();
        let bob = params.generate_keypair(&KeyGenConfig { seed: Some(200) }).unwrap();

        for kp in [&alice, &bob] {
            let x = kp.private_key.value();
            assert!(*x >= big(1) && *x <= big(21));
            assert_eq!(kp.public_key, params.public_key(&kp.private_key));
        }

        assert_eq!(
            alice.compute_shared_secret(&bob.public_key),
            bob.compute_shared_secret(&alice.public_key),
            "Diffie-Hellman secrets must match"
        );
    }

    #[test]
    fn test_keypair_generation_needs_room() {
        let params = RawParameters::new(big(2), big(1)).validate().unwrap();
        assert!(params.generate_keypair(&KeyGenConfig::default()).is_err());
    }
}
