//! Raster types shared by the codec, the memory analyzer and the comparison methods.
//!
//! Grayscale rasters are plain [`image::GrayImage`] buffers: row-major, one
//! byte per sample. Nothing here owns any state beyond the pixels themselves.

use serde::Serialize;
use std::fmt;

pub use image::GrayImage;

/// A binarized raster produced by the comparison methods.
///
/// Every sample is either [`BINARY_LOW`] or [`BINARY_HIGH`].
pub type BinaryImage = GrayImage;

/// Sample value for "off" pixels in a [`BinaryImage`].
pub const BINARY_LOW: u8 = 0;
/// Sample value for "on" pixels in a [`BinaryImage`].
pub const BINARY_HIGH: u8 = 255;

/// Width and height of a raster in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions of an existing raster.
    pub fn of(image: &GrayImage) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Number of samples, `width × height`.
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// True when either side is zero.
    pub fn is_empty(self) -> bool {
        self.pixel_count() == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_of_image() {
        let img = GrayImage::new(40, 30);
        let dims = Dimensions::of(&img);
        assert_eq!(dims, Dimensions::new(40, 30));
        assert_eq!(dims.pixel_count(), 1200);
        assert!(!dims.is_empty());
    }

    #[test]
    fn zero_side_is_empty() {
        assert!(Dimensions::new(0, 0).is_empty());
        assert!(Dimensions::new(12, 0).is_empty());
        assert!(Dimensions::new(0, 12).is_empty());
    }

    #[test]
    fn pixel_count_does_not_overflow_u32() {
        let dims = Dimensions::new(u32::MAX, 2);
        assert_eq!(dims.pixel_count(), u64::from(u32::MAX) * 2);
    }

    #[test]
    fn display_is_width_by_height() {
        assert_eq!(Dimensions::new(640, 480).to_string(), "640x480");
    }

    #[test]
    fn serializes_as_width_and_height() {
        let value = serde_json::to_value(Dimensions::new(640, 480)).unwrap();
        assert_eq!(value, serde_json::json!({ "width": 640, "height": 480 }));
    }
}
