use num_bigint::BigUint;
use thiserror::Error;

/// Errors raised by the numeric core and the protocol simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument lies outside the domain the operation is defined for.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A candidate modulus was rejected by the primality test.
    #[error("{0} is not prime")]
    NotPrime(BigUint),

    /// A candidate generator does not generate the full group mod `prime`.
    #[error("{generator} is not a primitive root modulo {prime}")]
    NotPrimitiveRoot { generator: BigUint, prime: BigUint },

    /// The arithmetic produced a result that is algebraically impossible.
    /// This is a bug in the crate, not a property of the inputs.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
