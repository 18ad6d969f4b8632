//! Image source trait and shared error type.
//!
//! The [`ImageSource`] trait is the one seam between the analysis and the
//! filesystem: given a path, produce an 8-bit grayscale raster or fail. The
//! production implementation is [`RustSource`](super::rust_source::RustSource).

use crate::types::GrayImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("invalid image {}: {reason}", path.display())]
    InvalidImage { path: PathBuf, reason: String },
}

impl SourceError {
    pub fn invalid(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Resolves a path to a non-empty 8-bit grayscale raster.
///
/// `Sync` so a single source can serve a rayon batch.
pub trait ImageSource: Sync {
    fn load(&self, path: &Path) -> Result<GrayImage, SourceError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory source that records every path it is asked for.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockSource {
        pub images: HashMap<PathBuf, GrayImage>,
        pub requests: Mutex<Vec<PathBuf>>,
    }

    impl MockSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_image(mut self, path: impl Into<PathBuf>, image: GrayImage) -> Self {
            self.images.insert(path.into(), image);
            self
        }

        pub fn get_requests(&self) -> Vec<PathBuf> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ImageSource for MockSource {
        fn load(&self, path: &Path) -> Result<GrayImage, SourceError> {
            self.requests.lock().unwrap().push(path.to_path_buf());
            self.images
                .get(path)
                .cloned()
                .ok_or_else(|| SourceError::invalid(path, "no mock image"))
        }
    }

    #[test]
    fn mock_returns_registered_image() {
        let source = MockSource::new().with_image("/a.png", GrayImage::new(3, 2));
        let img = source.load(Path::new("/a.png")).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(source.get_requests(), vec![PathBuf::from("/a.png")]);
    }

    #[test]
    fn mock_unknown_path_is_invalid_image() {
        let source = MockSource::new();
        let err = source.load(Path::new("/missing.png")).unwrap_err();
        assert!(matches!(err, SourceError::InvalidImage { .. }));
        assert_eq!(err.to_string(), "invalid image /missing.png: no mock image");
    }
}
