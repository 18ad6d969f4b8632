//! Terminal output formatting for analysis results.
//!
//! # Previews
//!
//! Rasters are drawn as ASCII art. Each character cell averages a block of
//! pixels and picks a glyph from a ten-step ramp:
//!
//! ```text
//!  .:-=+*#%@
//! ^ darkest                 brightest ^
//! ```
//!
//! Intensities are normalized per image between its own minimum and maximum,
//! so a bit-plane holding only 0 and 1 reads as clearly as a full-range
//! image. A cell is twice as tall as it is wide, matching typical terminal
//! fonts.
//!
//! # Galleries
//!
//! ```text
//! Bit Plane 0     Bit Plane 1     Bit Plane 2     Bit Plane 3
//! @ @ @ @ @ @     @@  @@  @@      @@@@    @@@@    @@@@@@@@
//! ...
//! ```
//!
//! Images are laid out left to right, `gallery_columns` per row, each with
//! its caption above it.
//!
//! # Memory Report
//!
//! ```text
//! Original Image Size: 10000 bytes
//! Bit Planes Size: 1250 bytes (one packed plane)
//! Memory Reduction: 87.50%
//! ```
//!
//! # Architecture
//!
//! Every function here is pure and returns `Vec<String>` (or `String`) for
//! testability. Writing is left to [`crate::present`].

use crate::config::PreviewConfig;
use crate::memory::MemoryReport;
use crate::types::{Dimensions, GrayImage};
use std::path::Path;

const RAMP: &[u8] = b" .:-=+*#%@";
const GALLERY_GAP: usize = 2;
const MIN_THUMBNAIL_WIDTH: usize = 4;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Header line for one input image.
///
/// ```text
/// 001 lena.png (512x512)
/// ```
pub fn format_image_header(index: usize, path: &Path, dims: Dimensions) -> String {
    let name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("{} {} ({})", format_index(index), name, dims)
}

/// Caption line placed above a single image.
pub fn format_title(title: &str) -> String {
    format!("== {} ==", title)
}

/// The three report lines.
pub fn format_memory_report(report: &MemoryReport) -> Vec<String> {
    vec![
        format!("Original Image Size: {} bytes", report.original_bytes),
        format!(
            "Bit Planes Size: {} bytes (one packed plane)",
            report.bit_plane_bytes
        ),
        format!("Memory Reduction: {:.2}%", report.reduction_percent),
    ]
}

// ============================================================================
// ASCII rendering
// ============================================================================

/// Span `[start, end)` of the `i`-th of `n` equal slices over `len` pixels.
fn cell_span(i: usize, n: usize, len: u32) -> (u32, u32) {
    let start = (i as u64 * u64::from(len) / n as u64) as u32;
    let end = ((i as u64 + 1) * u64::from(len) / n as u64) as u32;
    (start, end.max(start + 1).min(len))
}

/// Draw `image` at most `columns` characters wide.
///
/// Returns one string per text row; every row has the same length. An empty
/// raster renders as no rows.
pub fn render_ascii(image: &GrayImage, columns: usize) -> Vec<String> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let cols = columns.clamp(1, w as usize);
    let cell_w = f64::from(w) / cols as f64;
    let rows = ((f64::from(h) / (cell_w * 2.0)).round() as usize).clamp(1, h as usize);

    let lo = image.iter().copied().min().unwrap_or(0);
    let hi = image.iter().copied().max().unwrap_or(0);
    let range = f64::from(hi - lo);

    (0..rows)
        .map(|r| {
            let (y0, y1) = cell_span(r, rows, h);
            (0..cols)
                .map(|c| {
                    let (x0, x1) = cell_span(c, cols, w);
                    let mut sum = 0u64;
                    for y in y0..y1 {
                        for x in x0..x1 {
                            sum += u64::from(image.get_pixel(x, y)[0]);
                        }
                    }
                    let count = u64::from((y1 - y0) * (x1 - x0));
                    let mean = sum as f64 / count as f64;
                    let level = if range == 0.0 {
                        0.0
                    } else {
                        (mean - f64::from(lo)) / range
                    };
                    let idx = (level * (RAMP.len() - 1) as f64).round() as usize;
                    RAMP[idx.min(RAMP.len() - 1)] as char
                })
                .collect()
        })
        .collect()
}

/// Join text blocks horizontally, padding each to its own widest line.
pub fn side_by_side(blocks: &[Vec<String>], gap: usize) -> Vec<String> {
    let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = blocks
        .iter()
        .map(|b| b.iter().map(|l| l.chars().count()).max().unwrap_or(0))
        .collect();

    (0..height)
        .map(|row| {
            let mut line = String::new();
            for (i, (block, &width)) in blocks.iter().zip(widths.iter()).enumerate() {
                if i > 0 {
                    line.push_str(&" ".repeat(gap));
                }
                let cell = block.get(row).map(String::as_str).unwrap_or("");
                line.push_str(cell);
                line.push_str(&" ".repeat(width - cell.chars().count()));
            }
            line.trim_end().to_string()
        })
        .collect()
}

/// A single image with its caption.
pub fn render_image(image: &GrayImage, title: &str, preview: &PreviewConfig) -> Vec<String> {
    let mut lines = vec![format_title(title)];
    lines.extend(render_ascii(image, preview.width));
    lines
}

/// Captioned thumbnails laid out `gallery_columns` per row.
///
/// Missing titles leave the caption blank; extra titles are ignored.
pub fn render_gallery(
    images: &[&GrayImage],
    titles: &[String],
    preview: &PreviewConfig,
) -> Vec<String> {
    let per_row = preview.gallery_columns.max(1);
    let thumb_width = (preview.width / per_row).max(MIN_THUMBNAIL_WIDTH);

    let blocks: Vec<Vec<String>> = images
        .iter()
        .enumerate()
        .map(|(i, image)| {
            let title = titles.get(i).map(String::as_str).unwrap_or("");
            let mut block = vec![title.to_string()];
            block.extend(render_ascii(image, thumb_width));
            block
        })
        .collect();

    let mut lines = Vec::new();
    for (row, chunk) in blocks.chunks(per_row).enumerate() {
        if row > 0 {
            lines.push(String::new());
        }
        lines.extend(side_by_side(chunk, GALLERY_GAP));
    }
    lines
}
