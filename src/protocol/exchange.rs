//! DISCLAIMER: This is a toy Diffie-Hellman key exchange in pure Rust.
//! It is *EXCLUSIVELY* for demonstration and educational purposes.
//! Absolutely DO NOT use it for real cryptographic or security-sensitive operations.

use crate::error::{Error, Result};
use crate::math::modular::pow_mod;
use crate::protocol::params::{check_private_exponent, DHParameters, PrivateKey};
use log::{debug, error, trace};
use num_bigint::BigUint;

/// Public values and derived secrets of one exchange between parties A and B.
///
/// All values lie in `[0, prime-1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeResult {
    /// `g^a mod p`, sent by A.
    pub public_a: BigUint,
    /// `g^b mod p`, sent by B.
    pub public_b: BigUint,
    /// `public_b^a mod p`, derived by A.
    pub secret_a: BigUint,
    /// `public_a^b mod p`, derived by B.
    pub secret_b: BigUint,
}

impl ExchangeResult {
    /// The value both parties agreed on.
    pub fn shared_secret(&self) -> &BigUint {
        &self.secret_a
    }
}

/// Runs a Diffie-Hellman exchange between two honest parties.
///
/// `prime` and `generator` are trusted as given; use [`DHParameters::exchange`]
/// to run on validated parameters.
///
/// # Errors
/// - [`Error::InvalidInput`] if either private exponent is outside `[1, prime-2]`.
/// - [`Error::InternalInconsistency`] if the two derived secrets differ, which
///   modular arithmetic rules out.
pub fn run_exchange(
    prime: &BigUint,
    generator: &BigUint,
    private_a: &BigUint,
    private_b: &BigUint,
) -> Result<ExchangeResult> {
    check_private_exponent(private_a, prime, "private exponent of A")?;
    check_private_exponent(private_b, prime, "private exponent of B")?;

    let public_a = pow_mod(generator, private_a, prime);
    let public_b = pow_mod(generator, private_b, prime);
    trace!("exchange public values: A = {}, B = {}", public_a, public_b);

    let secret_a = pow_mod(&public_b, private_a, prime);
    let secret_b = pow_mod(&public_a, private_b, prime);

    check_agreement(prime, &secret_a, &secret_b)?;

    debug!("exchange over prime {} completed", prime);
    Ok(ExchangeResult {
        public_a,
        public_b,
        secret_a,
        secret_b,
    })
}

/// Both parties of an honest exchange must derive the same secret.
fn check_agreement(prime: &BigUint, secret_a: &BigUint, secret_b: &BigUint) -> Result<()> {
    if secret_a == secret_b {
        return Ok(());
    }
    trace!("diverging secrets: A = {}, B = {}", secret_a, secret_b);
    error!("exchange over prime {} produced diverging secrets", prime);
    Err(Error::InternalInconsistency(format!(
        "shared secrets differ over prime {}",
        prime
    )))
}

impl DHParameters {
    /// [`run_exchange`] on validated parameters and keys.
    pub fn exchange(&self, private_a: &PrivateKey, private_b: &PrivateKey) -> Result<ExchangeResult> {
        run_exchange(
            self.prime(),
            self.generator(),
            private_a.value(),
            private_b.value(),
        )
    }
}
