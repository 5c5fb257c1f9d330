use core::{convert::TryFrom, fmt, num::NonZeroUsize};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct PositiveF64Error(f64);

impl fmt::Display for PositiveF64Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} is not positive and finite.", self.0)
    }
}

/// A rate or population size in `(0.0, +inf)`.
#[derive(Copy, Clone, PartialEq, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "f64", into = "f64")]
pub struct PositiveF64(f64);

impl TryFrom<f64> for PositiveF64 {
    type Error = PositiveF64Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PositiveF64> for f64 {
    fn from(value: PositiveF64) -> Self {
        value.0
    }
}

impl fmt::Debug for PositiveF64 {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "PositiveF64(0.0 < {})", self.0)
    }
}

impl PositiveF64 {
    /// # Errors
    ///
    /// Returns `PositiveF64Error` if not `0.0 < value < +inf`
    pub fn new(value: f64) -> Result<Self, PositiveF64Error> {
        if value > 0.0 && value.is_finite() {
            Ok(Self(value))
        } else {
            Err(PositiveF64Error(value))
        }
    }

    #[must_use]
    pub fn one() -> Self {
        Self(1.0_f64)
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// The pairwise coalescence rate `k * (k - 1) / 2` among `k >= 2`
    /// lineages, or `None` if fewer than two lineages can coalesce.
    #[must_use]
    pub fn pairwise_rate(k: usize) -> Option<Self> {
        let k = NonZeroUsize::new(k)?;

        if k.get() < 2 {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let k = k.get() as f64;

        Some(Self(k * (k - 1.0_f64) * 0.5_f64))
    }
}

#[cfg(test)]
mod tests {
    use super::PositiveF64;

    #[test]
    fn pairwise_rate_needs_two_lineages() {
        assert_eq!(PositiveF64::pairwise_rate(0), None);
        assert_eq!(PositiveF64::pairwise_rate(1), None);
        assert_eq!(PositiveF64::pairwise_rate(2), Some(PositiveF64::one()));
        assert_eq!(
            PositiveF64::pairwise_rate(5).map(PositiveF64::get),
            Some(10.0_f64)
        );
    }

    #[test]
    fn infinite_and_nan_are_rejected() {
        assert!(PositiveF64::new(f64::INFINITY).is_err());
        assert!(PositiveF64::new(f64::NAN).is_err());
        assert!(PositiveF64::new(0.0_f64).is_err());
        assert!(PositiveF64::new(f64::MIN_POSITIVE).is_ok());
    }
}
