//! # Bitplanes
//!
//! Bit-plane analysis for 8-bit grayscale images. An image is sliced into
//! its eight binary bit-planes, rebuilt from them, measured, and contrasted
//! with two other ways of reducing an image to black and white.
//!
//! # Architecture: One Pipeline Per Image
//!
//! ```text
//! 1. Load        path      →  GrayImage       (decode, reduce to 8-bit luma)
//! 2. Split       GrayImage →  8 × BitPlane    (plane i holds bit i)
//! 3. Rebuild     planes    →  GrayImage       (checked, lossless)
//! 4. Measure     image     →  MemoryReport
//! 5. Compare     GrayImage →  threshold + edge map
//! 6. Present     results   →  Presenter       (terminal, or a test recorder)
//! ```
//!
//! Steps 2 to 5 are pure functions over owned rasters. Only step 1 touches
//! the filesystem and only step 6 produces output, each behind a trait, so
//! the whole analysis runs in unit tests without files or a terminal.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`bitplane`] | Split a raster into bit-planes and rebuild it, validating the plane contract |
//! | [`memory`] | Original vs. packed single-plane byte counts and the reduction percentage |
//! | [`methods`] | Global thresholding and Canny-style edge detection |
//! | [`pipeline`] | Per-image orchestration, batch fan-out over rayon |
//! | [`present`] | `Presenter` trait and the ASCII terminal presenter |
//! | [`output`] | Pure text formatting: ASCII previews, galleries, report lines |
//! | [`imaging`] | `ImageSource` trait and the `image`-crate loader |
//! | [`config`] | `bitplanes.toml` loading and validation over stock defaults |
//! | [`types`] | Raster aliases and `Dimensions` |
//!
//! # Design Decisions
//!
//! ## The Memory Figure Is One Plane
//!
//! The reported "Bit Planes Size" is `H·W/8` bytes: a single plane packed at
//! one bit per pixel. All eight planes packed together take exactly as much
//! space as the original. The single-plane figure is kept because it is the
//! number the tool has always reported, and the terminal output labels it
//! "(one packed plane)" so nobody mistakes it for the cost of the full set.
//!
//! ## Validated Reconstruction
//!
//! [`bitplane::reconstruct`] rejects anything other than eight equally sized
//! planes holding only 0 and 1. Accepting wider values would silently wrap
//! when shifted into place; the planes produced by [`bitplane::split`] always
//! pass.
//!
//! ## Explicit Presenter
//!
//! Nothing draws into global state. Callers pass a `&mut dyn Presenter`, so
//! display order is a plain sequence of calls that tests can record and
//! assert on.

pub mod bitplane;
pub mod config;
pub mod imaging;
pub mod memory;
pub mod methods;
pub mod output;
pub mod pipeline;
pub mod present;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
