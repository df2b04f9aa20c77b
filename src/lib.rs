//! DISCLAIMER: `dhlab` is a toy Diffie-Hellman engine for teaching.
//! It works with 2-6 digit moduli, makes no constant-time guarantees and is
//! not hardened against side channels. Absolutely DO NOT use it for real key
//! agreement.
//!
//! The [`math`] module holds the numeric core: modular exponentiation,
//! Miller-Rabin primality, trial-division factorization and primitive-root
//! certification/discovery. The [`protocol`] module builds the exchange and the
//! man-in-the-middle simulation on top of it.
//!
//! ```rust
//! use dhlab::protocol::{AttackVerdict, RawParameters};
//! use num_bigint::BigUint;
//!
//! let params = RawParameters::new(BigUint::from(23u32), BigUint::from(5u32))
//!     .validate()
//!     .unwrap();
//! let a = params.private_key(BigUint::from(4u32)).unwrap();
//! let b = params.private_key(BigUint::from(3u32)).unwrap();
//! let m = params.private_key(BigUint::from(3u32)).unwrap();
//!
//! let exchange = params.exchange(&a, &b).unwrap();
//! assert_eq!(exchange.shared_secret(), &BigUint::from(18u32));
//!
//! let outcome = params.intercept(&a, &b, &m, &exchange).unwrap();
//! assert_eq!(outcome.verdict, AttackVerdict::AttackDetectableMismatch);
//! ```

pub mod error;
pub mod math;
pub mod protocol;

pub use error::{Error, Result};
pub use math::{
    distinct_prime_factors, find_primitive_roots, is_primitive_root, is_probable_prime, mod_pow,
};
pub use protocol::{run_exchange, simulate_interception};
