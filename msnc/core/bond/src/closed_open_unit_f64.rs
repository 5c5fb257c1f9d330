use core::fmt;

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ClosedOpenUnitF64Error(f64);

impl fmt::Display for ClosedOpenUnitF64Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} is not in [0.0, 1.0).", self.0)
    }
}

/// A uniform sample that can be scaled into an index.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct ClosedOpenUnitF64(f64);

impl fmt::Debug for ClosedOpenUnitF64 {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "ClosedOpenUnitF64(0.0 <= {} < 1.0)", self.0)
    }
}

impl ClosedOpenUnitF64 {
    /// # Errors
    ///
    /// Returns `ClosedOpenUnitF64Error` if not `0.0 <= value < 1.0`
    pub fn new(value: f64) -> Result<Self, ClosedOpenUnitF64Error> {
        if (0.0..1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ClosedOpenUnitF64Error(value))
        }
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::ClosedOpenUnitF64;

    #[test]
    fn rejects_one() {
        assert!(ClosedOpenUnitF64::new(0.0_f64).is_ok());
        assert!(ClosedOpenUnitF64::new(0.999_f64).is_ok());
        assert!(ClosedOpenUnitF64::new(1.0_f64).is_err());
        assert!(ClosedOpenUnitF64::new(f64::NAN).is_err());
    }
}
