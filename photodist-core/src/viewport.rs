//! Mapping between on-screen panel pixels and photograph pixels
//!
//! Photographs are drawn stretched to fill their panel, so both axes scale
//! independently. Integer arithmetic truncates toward zero in both directions.

use crate::{Error, ImageDimensions, PixelPoint, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportMapping {
    image: ImageDimensions,
    panel: ImageDimensions,
}

impl ViewportMapping {
    pub fn new(image: ImageDimensions, panel: ImageDimensions) -> Result<Self> {
        if image.is_empty() || panel.is_empty() {
            return Err(Error::InvalidData(format!(
                "viewport needs non-empty image and panel, got {} in {}",
                image, panel
            )));
        }
        Ok(Self { image, panel })
    }

    pub fn image(&self) -> ImageDimensions {
        self.image
    }

    pub fn panel(&self) -> ImageDimensions {
        self.panel
    }

    pub fn image_x(&self, panel_x: i32) -> i32 {
        scale(panel_x, self.image.width, self.panel.width)
    }

    pub fn image_y(&self, panel_y: i32) -> i32 {
        scale(panel_y, self.image.height, self.panel.height)
    }

    pub fn panel_x(&self, image_x: i32) -> i32 {
        scale(image_x, self.panel.width, self.image.width)
    }

    pub fn panel_y(&self, image_y: i32) -> i32 {
        scale(image_y, self.panel.height, self.image.height)
    }

    pub fn to_image(&self, panel: PixelPoint) -> PixelPoint {
        PixelPoint::new(self.image_x(panel.x), self.image_y(panel.y))
    }

    pub fn to_panel(&self, image: PixelPoint) -> PixelPoint {
        PixelPoint::new(self.panel_x(image.x), self.panel_y(image.y))
    }

    /// Whether a panel location lies inside the panel
    pub fn contains_panel(&self, panel: PixelPoint) -> bool {
        panel.x >= 0
            && panel.y >= 0
            && (panel.x as i64) < self.panel.width as i64
            && (panel.y as i64) < self.panel.height as i64
    }
}

// i64 keeps `value * numerator` from overflowing for large photographs.
fn scale(value: i32, numerator: u32, denominator: u32) -> i32 {
    (value as i64 * numerator as i64 / denominator as i64) as i32
}
