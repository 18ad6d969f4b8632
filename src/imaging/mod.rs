//! Image acquisition: path in, 8-bit grayscale raster out.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, TIFF, WebP) |
//! | **Channel reduction** | `DynamicImage::into_luma8` |
//!
//! The module is split into:
//! - **Source**: [`ImageSource`] trait + [`SourceError`]
//! - **Rust source**: [`RustSource`], the `image`-crate implementation

pub mod rust_source;
pub mod source;

pub use rust_source::RustSource;
pub use source::{ImageSource, SourceError};
