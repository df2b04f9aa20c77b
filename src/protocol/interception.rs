//! DISCLAIMER: toy simulation of an unauthenticated man-in-the-middle attack on
//! Diffie-Hellman, for demonstration and teaching only.
//!
//! The attacker M intercepts both public values and substitutes the single
//! forged value `g^m mod p` in each direction. A and B then each derive a key
//! that M can also compute from the real public value it intercepted.

use crate::error::{Error, Result};
use crate::math::modular::pow_mod;
use crate::protocol::exchange::ExchangeResult;
use crate::protocol::params::{check_private_exponent, DHParameters, PrivateKey};
use log::{debug, error, trace};
use num_bigint::BigUint;
use std::fmt;

/// How an interception attempt turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackVerdict {
    /// Both victims hold the same secret and the attacker holds it too.
    /// Nothing in the exchange reveals the attack.
    AttackSucceeds,
    /// The victims hold different secrets. Later integrity failures would
    /// expose that something sits between them, though not who.
    AttackDetectableMismatch,
}

impl AttackVerdict {
    pub fn name(self) -> &'static str {
        match self {
            AttackVerdict::AttackSucceeds => "attack_succeeds",
            AttackVerdict::AttackDetectableMismatch => "attack_detectable_mismatch",
        }
    }
}

impl fmt::Display for AttackVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pairwise equalities among the four secrets of an interception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretAgreement {
    /// `compromised_a == compromised_b`
    pub victims: bool,
    /// `compromised_a == attacker_view_a`
    pub attacker_with_a: bool,
    /// `compromised_b == attacker_view_b`
    pub attacker_with_b: bool,
    /// `compromised_a == attacker_view_b`
    pub a_with_attacker_view_b: bool,
    /// `compromised_b == attacker_view_a`
    pub b_with_attacker_view_a: bool,
    /// `attacker_view_a == attacker_view_b`
    pub attacker_views: bool,
}

/// Everything computed during one interception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptionOutcome {
    /// `g^m mod p`, handed to both victims in place of the real public values.
    pub forged: BigUint,
    /// `forged^a mod p`: what A believes is the shared secret.
    pub compromised_a: BigUint,
    /// `forged^b mod p`: what B believes is the shared secret.
    pub compromised_b: BigUint,
    /// `public_a^m mod p`: what M derives from A's real public value.
    pub attacker_view_a: BigUint,
    /// `public_b^m mod p`: what M derives from B's real public value.
    pub attacker_view_b: BigUint,
    pub agreement: SecretAgreement,
    pub verdict: AttackVerdict,
}

impl InterceptionOutcome {
    pub fn is_successful(&self) -> bool {
        self.verdict == AttackVerdict::AttackSucceeds
    }
}

/// Simulates M intercepting an exchange between A and B.
///
/// `public_a` and `public_b` are the values A and B actually sent, as
/// produced by [`run_exchange`](crate::protocol::exchange::run_exchange) over
/// the same `prime` and `generator`.
///
/// # Errors
/// - [`Error::InvalidInput`] if a private exponent is outside `[1, prime-2]`,
///   or a public value is not reduced modulo `prime` or is not
///   `generator^private mod prime` for its party's exponent.
/// - [`Error::InternalInconsistency`] if both victims share a secret that the
///   attacker's own derivations disagree with, which modular arithmetic rules out.
pub fn simulate_interception(
    prime: &BigUint,
    generator: &BigUint,
    private_a: &BigUint,
    private_b: &BigUint,
    attacker_private: &BigUint,
    public_a: &BigUint,
    public_b: &BigUint,
) -> Result<InterceptionOutcome> {
    check_private_exponent(private_a, prime, "private exponent of A")?;
    check_private_exponent(private_b, prime, "private exponent of B")?;
    check_private_exponent(attacker_private, prime, "attacker exponent")?;
    for (label, public, private) in [
        ("public value of A", public_a, private_a),
        ("public value of B", public_b, private_b),
    ] {
        if public >= prime {
            return Err(Error::InvalidInput(format!(
                "{} {} is not reduced modulo {}",
                label, public, prime
            )));
        }
        if *public != pow_mod(generator, private, prime) {
            return Err(Error::InvalidInput(format!(
                "{} does not match its private exponent under generator {} mod {}",
                label, generator, prime
            )));
        }
    }

    let forged = pow_mod(generator, attacker_private, prime);
    let compromised_a = pow_mod(&forged, private_a, prime);
    let compromised_b = pow_mod(&forged, private_b, prime);
    let attacker_view_a = pow_mod(public_a, attacker_private, prime);
    let attacker_view_b = pow_mod(public_b, attacker_private, prime);
    trace!(
        "interception: forged {}, victims {} / {}, attacker {} / {}",
        forged,
        compromised_a,
        compromised_b,
        attacker_view_a,
        attacker_view_b
    );

    let (agreement, verdict) = classify(
        prime,
        &compromised_a,
        &compromised_b,
        &attacker_view_a,
        &attacker_view_b,
    )?;

    debug!("interception over prime {}: {}", prime, verdict);
    Ok(InterceptionOutcome {
        forged,
        compromised_a,
        compromised_b,
        attacker_view_a,
        attacker_view_b,
        agreement,
        verdict,
    })
}

/// Compares the four secrets of an interception and picks the verdict.
///
/// Victims that agree while the attacker's views do not is impossible for
/// consistent inputs and is reported as [`Error::InternalInconsistency`].
fn classify(
    prime: &BigUint,
    compromised_a: &BigUint,
    compromised_b: &BigUint,
    attacker_view_a: &BigUint,
    attacker_view_b: &BigUint,
) -> Result<(SecretAgreement, AttackVerdict)> {
    let agreement = SecretAgreement {
        victims: compromised_a == compromised_b,
        attacker_with_a: compromised_a == attacker_view_a,
        attacker_with_b: compromised_b == attacker_view_b,
        a_with_attacker_view_b: compromised_a == attacker_view_b,
        b_with_attacker_view_a: compromised_b == attacker_view_a,
        attacker_views: attacker_view_a == attacker_view_b,
    };

    if !agreement.victims {
        return Ok((agreement, AttackVerdict::AttackDetectableMismatch));
    }
    if !agreement.attacker_with_a || !agreement.attacker_with_b {
        trace!(
            "inconsistent interception: victims {}, attacker {} / {}",
            compromised_a,
            attacker_view_a,
            attacker_view_b
        );
        error!("interception over prime {}: victims agree but attacker views differ", prime);
        return Err(Error::InternalInconsistency(format!(
            "victims agree over prime {} but attacker views differ",
            prime
        )));
    }
    Ok((agreement, AttackVerdict::AttackSucceeds))
}

impl DHParameters {
    /// [`simulate_interception`] against an exchange run on these parameters.
    pub fn intercept(
        &self,
        private_a: &PrivateKey,
        private_b: &PrivateKey,
        attacker_private: &PrivateKey,
        exchange: &ExchangeResult,
    ) -> Result<InterceptionOutcome> {
        simulate_interception(
            self.prime(),
            self.generator(),
            private_a.value(),
            private_b.value(),
            attacker_private.value(),
            &exchange.public_a,
            &exchange.public_b,
        )
    }
}
