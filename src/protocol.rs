pub mod exchange;
pub mod interception;
pub mod params;

// Re-export the exchange
pub use exchange::{run_exchange, ExchangeResult};

// Re-export the man-in-the-middle simulation
pub use interception::{simulate_interception, AttackVerdict, InterceptionOutcome, SecretAgreement};

// Re-export parameter handling
pub use params::{
    random_prime, random_prime_with_rng, DHParameters, DigitWidth, KeyGenConfig, KeyPair,
    PrimeGenConfig, PrivateKey, RawParameters,
};
