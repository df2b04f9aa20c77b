pub mod factorization;
pub mod modular;
pub mod primality;
pub mod primitive_root;
pub mod survey;

pub use factorization::{distinct_prime_factors, FactorCache};
pub use modular::mod_pow;
pub use primality::{
    is_probable_prime, is_probable_prime_with_config, is_probable_prime_with_rng,
    random_prime_in_range, PrimalityConfig, DEFAULT_ROUNDS, SMALL_PRIMES,
};
pub use primitive_root::{
    find_primitive_roots, find_primitive_roots_with, find_primitive_roots_with_rng,
    is_primitive_root, is_primitive_root_with_cache, RootSearchConfig,
};
pub use survey::{survey_primitive_roots, RootSurvey};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Builds the crate's RNG: seeded when `seed` is set, from OS entropy otherwise.
pub(crate) fn rng_from_seed(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(s) => ChaCha20Rng::seed_from_u64(s),
        None => ChaCha20Rng::from_entropy(),
    }
}
