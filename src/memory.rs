//! Memory footprint of a bit-plane representation versus the dense original.
//!
//! ## Figures
//!
//! | Figure | Formula |
//! |---|---|
//! | Original Image Size | `H × W` bytes (one byte per sample) |
//! | Bit Planes Size | `(H × W) / 8` bytes, integer division |
//! | Reduction | `(original − bit-plane) / original × 100` |
//!
//! ## Caveat
//!
//! The bit-plane figure is the packed size of a **single** plane, eight bits
//! to a byte. All eight planes packed together take exactly as many bytes as
//! the original, i.e. no saving at all. The report still uses the
//! single-plane formula, and
//! [`format_memory_report`](crate::output::format_memory_report) labels the
//! figure as "one packed plane".

use crate::bitplane::BitPlaneSet;
use crate::types::{Dimensions, GrayImage};
use log::debug;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("degenerate dimensions: {0} image has no pixels")]
    DegenerateDimensions(Dimensions),
}

/// Byte-footprint figures for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryReport {
    /// Dense 8-bit encoding, one byte per sample.
    pub original_bytes: u64,
    /// One bit-plane packed eight samples per byte.
    pub bit_plane_bytes: u64,
    /// Share of `original_bytes` saved by `bit_plane_bytes`, in percent.
    pub reduction_percent: f64,
}

impl MemoryReport {
    /// Compute the report for a raster of the given shape.
    pub fn for_dimensions(dims: Dimensions) -> Result<Self, MemoryError> {
        if dims.is_empty() {
            return Err(MemoryError::DegenerateDimensions(dims));
        }
        let original_bytes = dims.pixel_count();
        let bit_plane_bytes = packed_plane_bytes(dims);
        let reduction_percent =
            (original_bytes - bit_plane_bytes) as f64 / original_bytes as f64 * 100.0;
        Ok(Self {
            original_bytes,
            bit_plane_bytes,
            reduction_percent,
        })
    }
}

/// Bytes needed to pack one plane's bits eight to a byte (remainder dropped).
pub fn packed_plane_bytes(dims: Dimensions) -> u64 {
    dims.pixel_count() / 8
}

/// Compute the memory report for `original` and its planes.
pub fn analyze(original: &GrayImage, planes: &BitPlaneSet) -> Result<MemoryReport, MemoryError> {
    let dims = Dimensions::of(original);
    let report = MemoryReport::for_dimensions(dims)?;
    debug!(
        "{dims}: {} bytes dense, {} bytes per packed plane, {} bytes for all {} planes",
        report.original_bytes,
        report.bit_plane_bytes,
        (report.original_bytes * planes.len() as u64).div_ceil(8),
        planes.len()
    );
    Ok(report)
}
