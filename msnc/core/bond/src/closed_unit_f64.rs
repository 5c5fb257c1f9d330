use core::{convert::TryFrom, fmt};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ClosedUnitF64Error(f64);

impl fmt::Display for ClosedUnitF64Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} is not in [0.0, 1.0].", self.0)
    }
}

/// A probability in `[0.0, 1.0]`.
#[derive(Copy, Clone, PartialEq, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "f64", into = "f64")]
pub struct ClosedUnitF64(f64);

// NaN is rejected by the constructor
impl Eq for ClosedUnitF64 {}

impl TryFrom<f64> for ClosedUnitF64 {
    type Error = ClosedUnitF64Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClosedUnitF64> for f64 {
    fn from(value: ClosedUnitF64) -> Self {
        value.0
    }
}

impl fmt::Debug for ClosedUnitF64 {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "ClosedUnitF64(0.0 <= {} <= 1.0)", self.0)
    }
}

impl ClosedUnitF64 {
    /// # Errors
    ///
    /// Returns `ClosedUnitF64Error` if not `0.0 <= value <= 1.0`
    pub fn new(value: f64) -> Result<Self, ClosedUnitF64Error> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ClosedUnitF64Error(value))
        }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self(0.0_f64)
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// The complementary probability `1 - p`.
    #[must_use]
    pub fn one_minus(self) -> Self {
        Self(1.0_f64 - self.0)
    }
}

impl PartialEq<f64> for ClosedUnitF64 {
    fn eq(&self, other: &f64) -> bool {
        self.0.eq(other)
    }
}

#[cfg(test)]
mod tests {
    use super::ClosedUnitF64;

    #[test]
    fn probabilities_stay_in_the_unit_interval() {
        assert!(ClosedUnitF64::new(-0.1_f64).is_err());
        assert!(ClosedUnitF64::new(1.1_f64).is_err());
        assert!(ClosedUnitF64::new(f64::NAN).is_err());

        let p = ClosedUnitF64::new(0.25_f64).unwrap();
        assert_eq!(p.one_minus(), 0.75_f64);
        assert_eq!(ClosedUnitF64::zero().one_minus(), 1.0_f64);
    }
}
