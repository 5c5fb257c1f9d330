use serde::{Deserialize, Serialize};

use msnc_core::cogs::RngCore;
use msnc_impls::cogs::rng::wyhash::WyHash;

/// The source of randomness of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rng {
    Seed(u64),
    #[default]
    Entropy,
}

impl Rng {
    /// Creates the generator of the simulation, seeding it from the
    /// operating system for `Entropy`.
    ///
    /// `Rng::Seed(rng.seed())` recreates the returned generator.
    ///
    /// # Errors
    ///
    /// Returns a `getrandom::Error` if no entropy is available.
    pub fn resolve(self) -> Result<WyHash, getrandom::Error> {
        match self {
            Self::Seed(seed) => Ok(WyHash::from_seed(seed.to_le_bytes())),
            Self::Entropy => WyHash::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use msnc_core::cogs::RngCore;

    use super::Rng;

    #[test]
    fn resolved_seed_recreates_the_generator() {
        let mut entropy = Rng::Entropy.resolve().unwrap();
        let mut reseeded = Rng::Seed(entropy.seed()).resolve().unwrap();

        assert_eq!(reseeded.seed(), entropy.seed());

        for _ in 0..8 {
            assert_eq!(reseeded.sample_u64(), entropy.sample_u64());
        }

        assert_eq!(Rng::Seed(42).resolve().unwrap().seed(), 42);
    }
}
