//! Pixel coordinates and image slot identifiers

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// A pixel location in image space
pub type PixelPoint = Point2<i32>;

/// Which of the two stereo photographs a coordinate belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageIndex {
    Left,
    Right,
}

impl ImageIndex {
    /// Both slots in storage order
    pub const BOTH: [ImageIndex; 2] = [ImageIndex::Left, ImageIndex::Right];

    /// Storage slot, 0 for left and 1 for right
    pub fn index(self) -> usize {
        match self {
            ImageIndex::Left => 0,
            ImageIndex::Right => 1,
        }
    }

    /// The opposite photograph
    pub fn other(self) -> Self {
        match self {
            ImageIndex::Left => ImageIndex::Right,
            ImageIndex::Right => ImageIndex::Left,
        }
    }
}

impl TryFrom<usize> for ImageIndex {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            0 => Ok(ImageIndex::Left),
            1 => Ok(ImageIndex::Right),
            other => Err(Error::InvalidData(format!(
                "image index must be 0 or 1, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ImageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageIndex::Left => write!(f, "left"),
            ImageIndex::Right => write!(f, "right"),
        }
    }
}

/// Width and height of a photograph in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions shared by both photographs of a stereo pair.
    ///
    /// Triangulation assumes both cameras produced images of the same size, so
    /// a mismatch is reported instead of silently picking one.
    pub fn common(left: ImageDimensions, right: ImageDimensions) -> Result<Self> {
        if left != right {
            return Err(Error::DimensionMismatch { left, right });
        }
        Ok(left)
    }

    /// Image centre in pixel units
    pub fn center(&self) -> (f64, f64) {
        (0.5 * self.width as f64, 0.5 * self.height as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Euclidean distance between two pixel locations
pub fn pixel_distance(a: &PixelPoint, b: &PixelPoint) -> f64 {
    let dx = (a.x as f64) - (b.x as f64);
    let dy = (a.y as f64) - (b.y as f64);
    (dx * dx + dy * dy).sqrt()
}
