//! Pinhole stereo triangulation
//!
//! Both cameras are assumed to share an image plane orientation and to be
//! separated horizontally by the calibration baseline. A feature seen at pixel
//! columns `x0` (left) and `x1` (right) subtends angles `theta0` and `theta1`
//! from the optical axes; intersecting the two rays gives its depth.

use std::f64::consts::PI;

use crate::{Error, ImageDimensions, PixelPoint, Point3d, Result, StereoCalibration};

/// Calibration combined with the image size it applies to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoRig {
    calibration: StereoCalibration,
    dimensions: ImageDimensions,
    theta_scale: f64,
    phi_scale: f64,
}

impl StereoRig {
    /// Precompute the pixel-to-angle scale factors for one image size
    pub fn new(calibration: StereoCalibration, dimensions: ImageDimensions) -> Result<Self> {
        if dimensions.is_empty() {
            return Err(Error::InvalidData(format!(
                "cannot triangulate against an empty image ({})",
                dimensions
            )));
        }

        let theta_scale = calibration.horizontal_fov / (2.0 * dimensions.width as f64) * (PI / 180.0);
        let phi_scale = calibration.vertical_fov / (2.0 * dimensions.height as f64) * (PI / 180.0);

        Ok(Self {
            calibration,
            dimensions,
            theta_scale,
            phi_scale,
        })
    }

    pub fn calibration(&self) -> &StereoCalibration {
        &self.calibration
    }

    pub fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    /// Tangent of the horizontal angle between the optical axis and pixel column `x`
    pub fn tan_theta(&self, x: i32) -> f64 {
        let (cx, _) = self.dimensions.center();
        ((x as f64 - cx) * self.theta_scale).tan()
    }

    /// Tangent of the vertical angle between the optical axis and pixel row `y`
    pub fn tan_phi(&self, y: i32) -> f64 {
        let (_, cy) = self.dimensions.center();
        ((y as f64 - cy) * self.phi_scale).tan()
    }

    /// Triangulate one feature from its left and right pixel locations.
    ///
    /// Returns `(depth, lateral, vertical)`. Only the left row is used for the
    /// vertical angle. Zero disparity divides by zero and yields a non-finite
    /// depth; callers decide how to report it.
    pub fn triangulate(&self, left: &PixelPoint, right: &PixelPoint) -> Point3d {
        let separation = self.calibration.separation;
        let tan_theta0 = self.tan_theta(left.x);
        let tan_theta1 = self.tan_theta(right.x);
        let tan_phi = self.tan_phi(left.y);

        let depth = separation / (tan_theta1 - tan_theta0) + 0.5 * separation;
        let lateral = depth * tan_theta1;
        let vertical = lateral * tan_phi;

        Point3d::new(depth, lateral, vertical)
    }
}

/// Whether every coordinate of a triangulated position is finite
pub fn is_finite_position(position: &Point3d) -> bool {
    position.coords.iter().all(|c| c.is_finite())
}
