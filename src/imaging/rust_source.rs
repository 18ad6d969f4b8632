//! Pure Rust image source backed by the `image` crate.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Open + sniff format | `image::ImageReader::open` + `with_guessed_format` |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Reduce to 8-bit luma | `DynamicImage::into_luma8` |
//!
//! Colour and 16-bit inputs are reduced to a single 8-bit channel on load.
//! Anything that fails along the way, including a decoded raster with no
//! pixels, becomes [`SourceError::InvalidImage`].

use super::source::{ImageSource, SourceError};
use crate::types::{Dimensions, GrayImage};
use image::ImageReader;
use log::debug;
use std::path::Path;

/// Loads images from disk with the `image` crate.
pub struct RustSource;

impl RustSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for RustSource {
    fn load(&self, path: &Path) -> Result<GrayImage, SourceError> {
        let reader = ImageReader::open(path)
            .map_err(|e| SourceError::invalid(path, format!("unable to open: {e}")))?
            .with_guessed_format()
            .map_err(|e| SourceError::invalid(path, format!("unable to read: {e}")))?;
        let decoded = reader
            .decode()
            .map_err(|e| SourceError::invalid(path, format!("unable to decode: {e}")))?;

        let channels = decoded.color().channel_count();
        let gray = decoded.into_luma8();
        let dims = Dimensions::of(&gray);
        if dims.is_empty() {
            return Err(SourceError::invalid(path, format!("{dims} image has no pixels")));
        }
        debug!(
            "loaded {} ({dims}, {channels} channel(s) reduced to 8-bit luma)",
            path.display()
        );
        Ok(gray)
    }
}
