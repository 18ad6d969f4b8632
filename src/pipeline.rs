//! Per-image orchestration: load, decompose, measure, compare, present.
//!
//! ```text
//! path ──ImageSource──▶ GrayImage ──split──▶ BitPlaneSet ──reconstruct──▶ GrayImage
//!                          │                     │
//!                          │                     └──memory::analyze──▶ MemoryReport
//!                          └──methods::compare──▶ Comparison
//! ```
//!
//! [`analyze_image`] is the pure core and never touches a presenter.
//! [`present`] replays a finished analysis in a fixed order:
//!
//! 1. "Original Grayscale Image"
//! 2. gallery of "Bit Plane 0" .. "Bit Plane 7"
//! 3. "Reconstructed Grayscale Image"
//! 4. the three memory report lines
//! 5. gallery of "Thresholding" and "Edge Detection"
//!
//! ## Batches
//!
//! Each image's pipeline is independent, so the batch functions fan out over
//! the rayon pool and return results in input order.
//!
//! [`run_each`] is the one that presents. It works through the paths one
//! window at a time, a window being as many images as there are worker
//! threads: the window is analyzed in parallel, presented in order, and
//! dropped before the next window is loaded. Memory stays bounded by the
//! window and output starts after the first one. [`run_batch`] keeps every
//! analysis and presents nothing.

use crate::bitplane::{self, BitPlaneSet, PlaneContractViolation};
use crate::config::{self, AnalysisConfig};
use crate::imaging::{ImageSource, SourceError};
use crate::memory::{self, MemoryError, MemoryReport};
use crate::methods::{self, Comparison};
use crate::output;
use crate::present::Presenter;
use crate::types::{Dimensions, GrayImage};
use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ORIGINAL_TITLE: &str = "Original Grayscale Image";
pub const RECONSTRUCTED_TITLE: &str = "Reconstructed Grayscale Image";
pub const THRESHOLD_TITLE: &str = "Thresholding";
pub const EDGES_TITLE: &str = "Edge Detection";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    PlaneContract(#[from] PlaneContractViolation),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Everything computed for one image.
#[derive(Debug, Clone)]
pub struct ImageAnalysis {
    pub original: GrayImage,
    pub planes: BitPlaneSet,
    pub reconstructed: GrayImage,
    pub report: MemoryReport,
    pub comparison: Comparison,
}

impl ImageAnalysis {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::of(&self.original)
    }

    /// Whether reconstruction reproduced the original pixel for pixel.
    pub fn is_lossless(&self) -> bool {
        self.reconstructed == self.original
    }
}

/// Memory figures for one input file, as emitted by `report --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageReport {
    pub path: PathBuf,
    pub dimensions: Dimensions,
    pub report: MemoryReport,
}

/// Split, reconstruct, measure and compare one image.
pub fn analyze_image(
    image: GrayImage,
    config: &AnalysisConfig,
) -> Result<ImageAnalysis, PipelineError> {
    let planes = bitplane::split(&image);
    debug!(
        "split {} into {} planes; set bits per plane: {:?}",
        Dimensions::of(&image),
        planes.len(),
        planes.iter().map(|p| p.ones()).collect::<Vec<_>>()
    );

    let reconstructed = bitplane::reconstruct(planes.planes())?;
    let report = memory::analyze(&image, &planes)?;
    let comparison = methods::compare(&image, config);

    let analysis = ImageAnalysis {
        original: image,
        planes,
        reconstructed,
        report,
        comparison,
    };
    debug!("round trip lossless: {}", analysis.is_lossless());
    Ok(analysis)
}

/// Hand a finished analysis to `presenter` in display order.
pub fn present(analysis: &ImageAnalysis, presenter: &mut dyn Presenter) {
    presenter.show_image(&analysis.original, ORIGINAL_TITLE);

    let planes: Vec<&GrayImage> = analysis.planes.iter().map(|p| p.as_image()).collect();
    let titles: Vec<String> = (0..planes.len())
        .map(|i| format!("Bit Plane {i}"))
        .collect();
    presenter.show_gallery(&planes, &titles);

    presenter.show_image(&analysis.reconstructed, RECONSTRUCTED_TITLE);
    presenter.report(&output::format_memory_report(&analysis.report));

    let comparison = &analysis.comparison;
    presenter.show_gallery(
        &[&comparison.thresholded, &comparison.edges],
        &[THRESHOLD_TITLE.to_string(), EDGES_TITLE.to_string()],
    );
}

/// Load, analyze and present a single image.
pub fn run(
    path: &Path,
    source: &dyn ImageSource,
    config: &AnalysisConfig,
    presenter: &mut dyn Presenter,
) -> Result<ImageAnalysis, PipelineError> {
    let image = source.load(path)?;
    let analysis = analyze_image(image, config)?;
    present(&analysis, presenter);
    Ok(analysis)
}

/// Load, analyze and present every path, in input order.
///
/// Each image is introduced by a header line (`==> 001 name.png (WxH)`).
/// Images that fail are skipped and returned with their error; nothing is
/// presented for them.
pub fn run_each(
    paths: &[PathBuf],
    source: &dyn ImageSource,
    config: &AnalysisConfig,
    presenter: &mut dyn Presenter,
) -> Vec<(PathBuf, PipelineError)> {
    let window = config::effective_threads(&config.processing).max(1);
    let mut failures = Vec::new();

    for (w, chunk) in paths.chunks(window).enumerate() {
        let results: Vec<Result<ImageAnalysis, PipelineError>> = chunk
            .par_iter()
            .map(|path| {
                source
                    .load(path)
                    .map_err(PipelineError::from)
                    .and_then(|image| analyze_image(image, config))
            })
            .collect();

        for (i, (path, result)) in chunk.iter().zip(results).enumerate() {
            match result {
                Ok(analysis) => {
                    let header =
                        output::format_image_header(w * window + i + 1, path, analysis.dimensions());
                    presenter.report(&[format!("==> {header}")]);
                    present(&analysis, presenter);
                }
                Err(e) => failures.push((path.clone(), e)),
            }
        }
    }
    failures
}

/// Load and analyze every path in parallel. Nothing is presented.
///
/// Every analysis is held until the whole batch finishes; use [`run_each`]
/// to display a long list of images.
pub fn run_batch(
    paths: &[PathBuf],
    source: &dyn ImageSource,
    config: &AnalysisConfig,
) -> Vec<(PathBuf, Result<ImageAnalysis, PipelineError>)> {
    paths
        .par_iter()
        .map(|path| {
            let result = source
                .load(path)
                .map_err(PipelineError::from)
                .and_then(|image| analyze_image(image, config));
            (path.clone(), result)
        })
        .collect()
}

/// Memory figures only: load, split and analyze each path in parallel.
pub fn memory_report_batch(
    paths: &[PathBuf],
    source: &dyn ImageSource,
) -> Vec<Result<ImageReport, PipelineError>> {
    paths
        .par_iter()
        .map(|path| -> Result<ImageReport, PipelineError> {
            let image = source.load(path)?;
            let planes = bitplane::split(&image);
            let report = memory::analyze(&image, &planes)?;
            Ok(ImageReport {
                path: path.clone(),
                dimensions: Dimensions::of(&image),
                report,
            })
        })
        .collect()
}
