use core::{convert::TryFrom, fmt};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ZeroExclOneInclF64Error(f64);

impl fmt::Display for ZeroExclOneInclF64Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} is not in (0.0, 1.0].", self.0)
    }
}

/// An inheritance probability, or a uniform sample that is safe to take the
/// logarithm of.
#[derive(Copy, Clone, PartialEq, Deserialize, Serialize)]
#[repr(transparent)]
#[serde(try_from = "f64", into = "f64")]
pub struct ZeroExclOneInclF64(f64);

impl TryFrom<f64> for ZeroExclOneInclF64 {
    type Error = ZeroExclOneInclF64Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZeroExclOneInclF64> for f64 {
    fn from(value: ZeroExclOneInclF64) -> Self {
        value.0
    }
}

impl fmt::Debug for ZeroExclOneInclF64 {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "ZeroExclOneInclF64(0.0 < {} <= 1.0)", self.0)
    }
}

impl ZeroExclOneInclF64 {
    /// # Errors
    ///
    /// Returns `ZeroExclOneInclF64Error` if not `0.0 < value <= 1.0`
    pub fn new(value: f64) -> Result<Self, ZeroExclOneInclF64Error> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(ZeroExclOneInclF64Error(value))
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
}

// NaN is rejected by the constructor
impl Eq for ZeroExclOneInclF64 {}

impl PartialEq<f64> for ZeroExclOneInclF64 {
    fn eq(&self, other: &f64) -> bool {
        self.0.eq(other)
    }
}
