//! Alternative binarization strategies to contrast with bit-plane slicing.
//!
//! | Method | Function | Fixed parameters |
//! |---|---|---|
//! | Global thresholding | [`threshold`] | cutoff 127 |
//! | Edge detection | [`detect_edges`] | hysteresis 100 / 200 |
//!
//! Both are independent of each other and of the codec. The parameters come
//! from [`AnalysisConfig`], whose defaults are the fixed values above.

mod canny;
mod threshold;

pub use canny::detect_edges;
pub use threshold::threshold;

use crate::config::AnalysisConfig;
use crate::types::{BINARY_HIGH, BinaryImage, GrayImage};
use log::debug;

/// Both comparison outputs for one image, meant to be shown side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub thresholded: BinaryImage,
    pub edges: BinaryImage,
}

/// Run both methods on `image` with the configured parameters.
pub fn compare(image: &GrayImage, config: &AnalysisConfig) -> Comparison {
    let thresholded = threshold(image, config.threshold_cutoff);
    let edges = detect_edges(image, config.edge_low, config.edge_high);
    debug!(
        "threshold > {}: {} high pixels; edges {}/{}: {} edge pixels",
        config.threshold_cutoff,
        count_high(&thresholded),
        config.edge_low,
        config.edge_high,
        count_high(&edges)
    );
    Comparison { thresholded, edges }
}

fn count_high(image: &BinaryImage) -> usize {
    image.iter().filter(|&&v| v == BINARY_HIGH).count()
}
