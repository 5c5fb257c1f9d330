use core::fmt;

use msnc_core_bond::{ClosedUnitF64, NonNegativeF64};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, displaydoc::Display, PartialEq)]
#[allow(clippy::module_name_repetitions)]
/// inheritance correlation must be in [0, 1], got {0}
pub struct InheritanceCorrelationError(pub f64);

/// The probability `r` with which two lineages entering the same hybrid node
/// are forced to follow the same parent edge.
///
/// `r = 0` draws every lineage independently from the inheritance
/// probabilities, `r = 1` sends all lineages of a locus along one parent
/// edge.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct InheritanceCorrelation(ClosedUnitF64);

impl InheritanceCorrelation {
    /// # Errors
    ///
    /// Returns `InheritanceCorrelationError` if not `0.0 <= correlation <= 1.0`
    pub fn new(correlation: f64) -> Result<Self, InheritanceCorrelationError> {
        ClosedUnitF64::new(correlation)
            .map(Self)
            .map_err(|_| InheritanceCorrelationError(correlation))
    }

    #[must_use]
    pub fn independent() -> Self {
        Self(ClosedUnitF64::zero())
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0.get()
    }

    #[must_use]
    pub fn is_independent(self) -> bool {
        self.0 == 0.0_f64
    }

    /// The concentration `alpha = (1 - r) / r` of the Pólya urn that
    /// correlates the lineages, or `None` if `r = 0`.
    #[must_use]
    pub fn concentration(self) -> Option<NonNegativeF64> {
        if self.is_independent() {
            return None;
        }

        NonNegativeF64::new(self.0.one_minus().get() / self.0.get()).ok()
    }
}

impl Default for InheritanceCorrelation {
    fn default() -> Self {
        Self::independent()
    }
}

impl TryFrom<f64> for InheritanceCorrelation {
    type Error = InheritanceCorrelationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InheritanceCorrelation> for f64 {
    fn from(value: InheritanceCorrelation) -> Self {
        value.get()
    }
}

impl fmt::Debug for InheritanceCorrelation {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_tuple("InheritanceCorrelation")
            .field(&self.get())
            .finish()
    }
}

impl fmt::Display for InheritanceCorrelation {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.get(), fmt)
    }
}

#[cfg(test)]
mod tests {
    use super::{InheritanceCorrelation, InheritanceCorrelationError};

    #[test]
    fn rejects_values_outside_the_unit_interval() {
        assert_eq!(
            InheritanceCorrelation::new(1.5_f64),
            Err(InheritanceCorrelationError(1.5_f64))
        );
        assert!(InheritanceCorrelation::new(-0.1_f64).is_err());
        assert!(InheritanceCorrelation::new(f64::NAN).is_err());

        assert_eq!(
            InheritanceCorrelationError(1.5_f64).to_string(),
            "inheritance correlation must be in [0, 1], got 1.5"
        );
    }

    #[test]
    fn concentration_follows_correlation() {
        assert_eq!(InheritanceCorrelation::independent().concentration(), None);
        assert_eq!(
            InheritanceCorrelation::new(0.25_f64)
                .unwrap()
                .concentration()
                .unwrap(),
            3.0_f64
        );
        assert_eq!(
            InheritanceCorrelation::new(1.0_f64)
                .unwrap()
                .concentration()
                .unwrap(),
            0.0_f64
        );
    }
}
