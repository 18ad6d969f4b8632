//! Global binary thresholding.

use crate::types::{BINARY_HIGH, BINARY_LOW, BinaryImage, GrayImage};

/// Binarize `image` with a single global cutoff.
///
/// A sample becomes [`BINARY_HIGH`] when strictly greater than `cutoff`,
/// otherwise [`BINARY_LOW`]. The cutoff value itself maps to low.
pub fn threshold(image: &GrayImage, cutoff: u8) -> BinaryImage {
    let mut out = image.clone();
    for v in out.iter_mut() {
        *v = if *v > cutoff { BINARY_HIGH } else { BINARY_LOW };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_THRESHOLD_CUTOFF;
    use image::Luma;

    fn all_values() -> GrayImage {
        GrayImage::from_fn(256, 1, |x, _| Luma([x as u8]))
    }

    #[test]
    fn high_iff_above_cutoff() {
        let out = threshold(&all_values(), DEFAULT_THRESHOLD_CUTOFF);
        for (x, _, px) in out.enumerate_pixels() {
            let expected = if x > 127 { 255 } else { 0 };
            assert_eq!(px[0], expected, "value {x}");
        }
    }

    #[test]
    fn boundary_values() {
        let img = GrayImage::from_fn(3, 1, |x, _| Luma([126 + x as u8]));
        let out = threshold(&img, 127);
        assert_eq!(out.as_raw(), &vec![0, 0, 255]);
    }

    #[test]
    fn output_is_binary_and_same_shape() {
        let img = crate::test_helpers::gradient_image(33, 7);
        let out = threshold(&img, 127);
        assert_eq!(out.dimensions(), (33, 7));
        assert!(out.iter().all(|&v| v == BINARY_LOW || v == BINARY_HIGH));
    }

    #[test]
    fn extreme_cutoffs() {
        let img = all_values();
        assert!(threshold(&img, 255).iter().all(|&v| v == BINARY_LOW));
        let out = threshold(&img, 0);
        assert_eq!(out.get_pixel(0, 0)[0], BINARY_LOW);
        assert!(out.iter().skip(1).all(|&v| v == BINARY_HIGH));
    }
}
