//! Shared test utilities for the bitplanes test suite.
//!
//! Synthetic raster builders, a PNG writer for tests that go through the
//! filesystem, and a [`RecordingPresenter`] that captures what the pipeline
//! would have displayed.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let img = checkerboard_image(32, 32, 8);
//! let mut presenter = RecordingPresenter::default();
//! present(&analysis, &mut presenter);
//! assert_eq!(presenter.titles()[0], "Original Grayscale Image");
//! ```

use image::Luma;
use std::path::{Path, PathBuf};

use crate::present::Presenter;
use crate::types::GrayImage;

// =========================================================================
// Raster builders
// =========================================================================

/// Every pixel set to `value`.
pub fn uniform_image(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([value]))
}

/// Diagonal ramp: pixel `(x, y)` holds `(x + y) % 256`.
///
/// Covers every byte value once the image is at least 256 pixels along a
/// diagonal, and changes by one level per step.
pub fn gradient_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x + y) % 256) as u8]))
}

/// Square blocks of 0 and 255, starting with 0 at the top-left.
pub fn checkerboard_image(width: u32, height: u32, block: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let on = ((x / block) + (y / block)) % 2 == 1;
        Luma([if on { 255 } else { 0 }])
    })
}

/// Save `image` as `dir/name` in PNG format and return the path.
pub fn write_png(dir: &Path, name: &str, image: &GrayImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).unwrap();
    path
}

// =========================================================================
// Presenter capture
// =========================================================================

/// One call made on a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Image { title: String, image: GrayImage },
    Gallery { titles: Vec<String>, images: Vec<GrayImage> },
    Report(Vec<String>),
}

/// Presenter that keeps everything it is given, in call order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub shown: Vec<Shown>,
}

impl RecordingPresenter {
    /// Every caption in display order, flattening galleries.
    pub fn titles(&self) -> Vec<String> {
        self.shown
            .iter()
            .flat_map(|s| match s {
                Shown::Image { title, .. } => vec![title.clone()],
                Shown::Gallery { titles, .. } => titles.clone(),
                Shown::Report(_) => vec![],
            })
            .collect()
    }

    /// All report lines in display order.
    pub fn report_lines(&self) -> Vec<String> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Report(lines) => Some(lines.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn show_image(&mut self, image: &GrayImage, title: &str) {
        self.shown.push(Shown::Image {
            title: title.to_string(),
            image: image.clone(),
        });
    }

    fn show_gallery(&mut self, images: &[&GrayImage], titles: &[String]) {
        self.shown.push(Shown::Gallery {
            titles: titles.to_vec(),
            images: images.iter().map(|&i| i.clone()).collect(),
        });
    }

    fn report(&mut self, lines: &[String]) {
        self.shown.push(Shown::Report(lines.to_vec()));
    }
}
