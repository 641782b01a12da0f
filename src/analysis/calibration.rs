//! Pixel-to-centimeter calibration
//!
//! Set once per analyzer and never recomputed afterwards.

use serde::Serialize;

use crate::error::{Result, TrackerError};

/// Established calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    /// Centimeters per pixel
    pub factor: f32,
    /// Pixel height the factor was derived from, if auto-calibrated
    pub reference_height_px: Option<f32>,
}

impl Calibration {
    /// Derive from a person's pixel height and an assumed real height
    ///
    /// Returns `None` unless the pixel height is positive.
    pub fn from_height(person_height_px: f32, assumed_height_cm: f32) -> Option<Self> {
        if person_height_px > 0.0 {
            Some(Self {
                factor: assumed_height_cm / person_height_px,
                reference_height_px: Some(person_height_px),
            })
        } else {
            None
        }
    }

    /// Externally supplied factor; `None` unless finite and positive
    pub fn fixed(factor: f32) -> Option<Self> {
        (factor.is_finite() && factor > 0.0).then_some(Self {
            factor,
            reference_height_px: None,
        })
    }

    /// [`Calibration::fixed`], reporting a bad factor as a config error
    pub(crate) fn try_fixed(factor: f32) -> Result<Self> {
        Self::fixed(factor).ok_or_else(|| {
            TrackerError::InvalidConfig(format!(
                "calibration factor must be finite and positive, got {factor}"
            ))
        })
    }

    pub fn to_cm(&self, pixels: f32) -> f32 {
        pixels * self.factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_height() {
        let cal = Calibration::from_height(270.0, 135.0).unwrap();
        assert_relative_eq!(cal.factor, 0.5);
        assert_eq!(cal.reference_height_px, Some(270.0));
        assert_relative_eq!(cal.to_cm(30.0), 15.0);
    }

    #[test]
    fn test_non_positive_height_is_rejected() {
        assert!(Calibration::from_height(0.0, 135.0).is_none());
        assert!(Calibration::from_height(-12.0, 135.0).is_none());
    }

    #[test]
    fn test_fixed_factor_must_be_positive_and_finite() {
        assert_eq!(Calibration::fixed(0.25).map(|c| c.factor), Some(0.25));
        for factor in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            assert!(Calibration::fixed(factor).is_none(), "{factor}");
            assert!(matches!(
                Calibration::try_fixed(factor),
                Err(TrackerError::InvalidConfig(_))
            ));
        }
    }
}
