use core::num::NonZeroUsize;

use msnc_core_bond::{ClosedOpenUnitF64, NonNegativeF64, PositiveF64, ZeroExclOneInclF64};

#[allow(clippy::module_name_repetitions)]
pub trait RngCore: Sized + Clone + core::fmt::Debug {
    type Seed: AsMut<[u8]> + Default + Sized;

    #[must_use]
    fn from_seed(seed: Self::Seed) -> Self;

    #[must_use]
    fn sample_u64(&mut self) -> u64;
}

#[allow(clippy::module_name_repetitions)]
pub trait SeedableRng: RngCore {
    #[must_use]
    fn seed_from_u64(mut state: u64) -> Self {
        // Implementation from:
        // https://docs.rs/rand/0.7.3/rand/trait.SeedableRng.html#method.seed_from_u64

        // We use PCG32 to generate a u32 sequence, and copy to the seed
        const MUL: u64 = 6_364_136_223_846_793_005_u64;
        const INC: u64 = 11_634_580_027_462_260_723_u64;

        let mut seed = Self::Seed::default();

        for chunk in seed.as_mut().chunks_mut(4) {
            // We advance the state first (to get away from the input value,
            // in case it has low Hamming Weight).
            state = state.wrapping_mul(MUL).wrapping_add(INC);

            #[allow(clippy::cast_possible_truncation)]
            let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let rot = (state >> 59) as u32;
            let x = xorshifted.rotate_right(rot).to_le_bytes();

            chunk.copy_from_slice(&x[..chunk.len()]);
        }

        Self::from_seed(seed)
    }
}

impl<R: RngCore> SeedableRng for R {}

/// Derives independent generators, e.g. one per simulated locus, such that
/// the derived streams do not depend on the order in which they are used.
#[allow(clippy::module_name_repetitions)]
pub trait SplittableRng: RngCore {
    #[must_use]
    fn split_to_stream(&self, stream: u64) -> Self;
}

#[allow(clippy::module_name_repetitions)]
pub trait RngSampler: RngCore {
    #[must_use]
    #[inline]
    fn sample_uniform_closed_open(&mut self) -> ClosedOpenUnitF64 {
        // http://prng.di.unimi.it -> Generating uniform doubles in the unit interval
        #[allow(clippy::cast_precision_loss)]
        let u01 = ((self.sample_u64() >> 11) as f64) * f64::from_bits(0x3CA0_0000_0000_0000_u64); // 0x1.0p-53

        match ClosedOpenUnitF64::new(u01) {
            Ok(u01) => u01,
            Err(_) => unreachable!("53 bit mantissa sample is in [0, 1)"),
        }
    }

    #[must_use]
    #[inline]
    fn sample_uniform_open_closed(&mut self) -> ZeroExclOneInclF64 {
        #[allow(clippy::cast_precision_loss)]
        let u01 =
            (((self.sample_u64() >> 11) + 1) as f64) * f64::from_bits(0x3CA0_0000_0000_0000_u64); // 0x1.0p-53

        match ZeroExclOneInclF64::new(u01) {
            Ok(u01) => u01,
            Err(_) => unreachable!("shifted 53 bit mantissa sample is in (0, 1]"),
        }
    }

    #[must_use]
    #[inline]
    #[debug_ensures(ret < length.get(), "samples U(0, length - 1)")]
    fn sample_index(&mut self, length: NonZeroUsize) -> usize {
        let u01 = self.sample_uniform_closed_open();

        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let index = (u01.get() * (length.get() as f64)).floor() as usize;

        // Note: Ensure index < length despite usize->f64->usize precision loss
        index.min(length.get() - 1)
    }

    /// Samples two distinct indices in `[0, length)`, uniformly over all
    /// unordered pairs.
    #[must_use]
    #[inline]
    #[debug_requires(length.get() >= 2, "at least two indices to choose from")]
    #[debug_ensures(ret.0 != ret.1, "samples two distinct indices")]
    #[debug_ensures(ret.0 < length.get() && ret.1 < length.get(), "indices are in range")]
    fn sample_index_pair(&mut self, length: NonZeroUsize) -> (usize, usize) {
        let first = self.sample_index(length);

        // length >= 2, so at least one index remains
        let remaining = NonZeroUsize::new(length.get() - 1).unwrap_or(NonZeroUsize::MIN);
        let second = self.sample_index(remaining);

        // Skip over the first index to sample without replacement
        if second >= first {
            (first, second + 1)
        } else {
            (first, second)
        }
    }

    #[must_use]
    #[inline]
    fn sample_exponential(&mut self, lambda: PositiveF64) -> NonNegativeF64 {
        let u01 = self.sample_uniform_open_closed();

        // Inverse transform sample: X = -ln(U(0,1]) / lambda
        let x = -u01.get().ln() / lambda.get();

        // -ln(1.0) = -0.0, which is still non-negative
        NonNegativeF64::new(x).unwrap_or_else(|_| NonNegativeF64::zero())
    }

    /// Samples an index with probability proportional to its weight.
    ///
    /// All weights must be non-negative and at least one must be positive.
    #[must_use]
    #[debug_requires(!weights.is_empty(), "weights is non-empty")]
    #[debug_requires(weights.iter().all(|w| *w >= 0.0_f64), "all weights are non-negative")]
    #[debug_ensures(ret < weights.len(), "returns one of the weighted indices")]
    #[debug_ensures(weights[ret] > 0.0_f64, "never returns a zero-weight index")]
    fn sample_categorical(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut target = self.sample_uniform_closed_open().get() * total;

        let mut last_positive = 0;

        for (i, weight) in weights.iter().copied().enumerate() {
            if weight <= 0.0_f64 {
                continue;
            }

            if target < weight {
                return i;
            }

            target -= weight;
            last_positive = i;
        }

        // Rounding errors may leave a tiny remainder past the last bucket
        last_positive
    }
}

impl<R: RngCore> RngSampler for R {}
