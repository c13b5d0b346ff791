//! Weight value object for criteria importance (1 to 5 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Relative importance of a criterion: 1 (minor) to 5 (critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weight(u8);

impl Weight {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a Weight, returning error if outside 1..=5.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range(
                "weight",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ))
        }
    }

    /// Creates a Weight from an arbitrary integer, clamping into 1..=5.
    ///
    /// Used for suggestions coming from loosely typed sources.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a float for score arithmetic.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Weight {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Weight> for u8 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_in_range() {
        for v in 1..=5 {
            assert_eq!(Weight::try_new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn rejects_zero_and_six() {
        assert!(matches!(
            Weight::try_new(0),
            Err(ValidationError::OutOfRange { actual: 0, .. })
        ));
        assert!(Weight::try_new(6).is_err());
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        assert_eq!(Weight::clamped(-4).value(), 1);
        assert_eq!(Weight::clamped(3).value(), 3);
        assert_eq!(Weight::clamped(12).value(), 5);
    }

    #[test]
    fn default_is_middle_of_scale() {
        assert_eq!(Weight::default().value(), 3);
    }

    #[test]
    fn deserializing_out_of_range_fails() {
        assert!(serde_json::from_str::<Weight>("4").is_ok());
        assert!(serde_json::from_str::<Weight>("9").is_err());
    }

    #[test]
    fn displays_as_fraction_of_max() {
        assert_eq!(Weight::try_new(4).unwrap().to_string(), "4/5");
    }
}
