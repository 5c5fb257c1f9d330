use msnc_core::cogs::{RngCore, SplittableRng};

#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug)]
pub struct WyHash {
    seed: u64,
    state: u64,
}

impl RngCore for WyHash {
    type Seed = [u8; 8];

    #[must_use]
    #[inline]
    fn from_seed(seed: Self::Seed) -> Self {
        let seed = u64::from_le_bytes(seed);

        Self { seed, state: seed }
    }

    #[must_use]
    #[inline]
    fn sample_u64(&mut self) -> u64 {
        // Added SeaHash diffuse for better avalanching
        diffuse(wyhash::wyrng(&mut self.state))
    }
}

impl SplittableRng for WyHash {
    fn split_to_stream(&self, stream: u64) -> Self {
        // The stream is derived from the seed only, so it does not depend on
        // how much randomness has been drawn from `self` so far
        let seed = wyhash::wyhash(&stream.to_le_bytes(), self.seed);

        Self { seed, state: seed }
    }
}

impl WyHash {
    /// # Errors
    ///
    /// Returns a `getrandom::Error` if the operating system could not
    /// provide any entropy.
    pub fn from_entropy() -> Result<Self, getrandom::Error> {
        let mut seed = <Self as RngCore>::Seed::default();

        getrandom::getrandom(&mut seed)?;

        Ok(Self::from_seed(seed))
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

const fn diffuse(mut x: u64) -> u64 {
    // These are derived from the PCG RNG's round. The shift is chosen by the
    // higher bits, which means that changing those flips the lower bits,
    // which scatters upwards because of the multiplication.

    x = x.wrapping_mul(0x6eed_0e9d_a4d9_4a4f);

    let a = x >> 32;
    let b = x >> 60;

    x ^= a >> b;

    x = x.wrapping_mul(0x6eed_0e9d_a4d9_4a4f);

    x
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroUsize;

    use msnc_core::cogs::{RngCore, RngSampler, SeedableRng, SplittableRng};
    use msnc_core_bond::PositiveF64;

    use super::WyHash;

    #[test]
    fn streams_are_reproducible() {
        let rng = WyHash::seed_from_u64(42);

        let mut used = rng.clone();
        for _ in 0..100 {
            let _ = used.sample_u64();
        }

        let mut a = rng.split_to_stream(7);
        let mut b = used.split_to_stream(7);
        let mut c = rng.split_to_stream(8);

        let a = (0..16).map(|_| a.sample_u64()).collect::<Vec<_>>();
        let b = (0..16).map(|_| b.sample_u64()).collect::<Vec<_>>();
        let c = (0..16).map(|_| c.sample_u64()).collect::<Vec<_>>();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn samples_stay_in_range() {
        let mut rng = WyHash::seed_from_u64(1);
        let length = NonZeroUsize::new(7).unwrap();

        for _ in 0..10_000 {
            assert!(rng.sample_index(length) < 7);

            let (a, b) = rng.sample_index_pair(length);
            assert!(a != b && a < 7 && b < 7);

            let u = rng.sample_uniform_open_closed();
            assert!(u.get() > 0.0_f64 && u.get() <= 1.0_f64);
        }
    }

    #[test]
    fn exponential_mean_matches_rate() {
        let mut rng = WyHash::seed_from_u64(2);
        let lambda = PositiveF64::new(4.0_f64).unwrap();

        let n = 100_000;
        let mean = (0..n)
            .map(|_| rng.sample_exponential(lambda).get())
            .sum::<f64>()
            / f64::from(n);

        assert!((mean - 0.25_f64).abs() < 0.005_f64, "mean {mean} != 0.25");
    }

    #[test]
    fn categorical_skips_zero_weights() {
        let mut rng = WyHash::seed_from_u64(3);

        let mut counts = [0_u32; 4];
        for _ in 0..40_000 {
            counts[rng.sample_categorical(&[0.0, 1.0, 0.0, 3.0])] += 1;
        }

        assert_eq!(counts[0], 0);
        assert_eq!(counts[2], 0);

        let fraction = f64::from(counts[3]) / 40_000.0_f64;
        assert!((fraction - 0.75_f64).abs() < 0.01_f64, "{fraction} != 0.75");
    }
}
