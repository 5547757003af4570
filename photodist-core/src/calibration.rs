//! Stereo camera calibration parameters

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::{Error, Result};

/// Operator-adjustable range for both fields of view, in degrees
pub const FOV_RANGE: RangeInclusive<f64> = 1.0..=90.0;

/// Operator-adjustable range for the camera separation
pub const SEPARATION_RANGE: RangeInclusive<f64> = 0.05..=10.0;

/// Session-wide parameters shared by every triangulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StereoCalibration {
    /// Horizontal field of view in degrees
    pub horizontal_fov: f64,
    /// Vertical field of view in degrees
    pub vertical_fov: f64,
    /// Distance between the two camera positions, in output units
    pub separation: f64,
}

impl StereoCalibration {
    pub const DEFAULT_HORIZONTAL_FOV: f64 = 15.0;
    pub const DEFAULT_VERTICAL_FOV: f64 = 15.0;
    pub const DEFAULT_SEPARATION: f64 = 0.3;

    /// Create a calibration, checking every parameter against its range
    pub fn new(horizontal_fov: f64, vertical_fov: f64, separation: f64) -> Result<Self> {
        let calibration = Self {
            horizontal_fov,
            vertical_fov,
            separation,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Check that every parameter lies in its operator-adjustable range
    pub fn validate(&self) -> Result<()> {
        check_range("horizontal FOV", self.horizontal_fov, &FOV_RANGE)?;
        check_range("vertical FOV", self.vertical_fov, &FOV_RANGE)?;
        check_range("separation", self.separation, &SEPARATION_RANGE)?;
        Ok(())
    }
}

impl Default for StereoCalibration {
    fn default() -> Self {
        Self {
            horizontal_fov: Self::DEFAULT_HORIZONTAL_FOV,
            vertical_fov: Self::DEFAULT_VERTICAL_FOV,
            separation: Self::DEFAULT_SEPARATION,
        }
    }
}

fn check_range(name: &str, value: f64, range: &RangeInclusive<f64>) -> Result<()> {
    if !value.is_finite() || !range.contains(&value) {
        return Err(Error::InvalidCalibration(format!(
            "{} must be within {}..={}, got {}",
            name,
            range.start(),
            range.end(),
            value
        )));
    }
    Ok(())
}
