//! Bit-plane codec: split an 8-bit grayscale image into binary planes and
//! recompose it losslessly.
//!
//! ## Plane Layout
//!
//! ```text
//! pixel 180 = 0b1011_0100
//!
//! plane:  7  6  5  4  3  2  1  0
//! bit:    1  0  1  1  0  1  0  0
//! weight: 128 64 32 16 8  4  2  1
//! ```
//!
//! Plane `i` holds `(pixel >> i) & 1` for every pixel. Index 0 is the least
//! significant bit, index 7 the most significant. Reconstruction depends on
//! this ordering: `pixel = Σ plane[i] << i`.
//!
//! [`split`] is total. [`reconstruct`] validates its input at entry and rejects
//! anything that is not exactly eight equally shaped binary planes, so a
//! malformed set can never wrap around a byte silently.

use crate::types::{Dimensions, GrayImage};
use thiserror::Error;

/// Number of planes in an 8-bit decomposition.
pub const PLANE_COUNT: usize = 8;

/// A plane set that is not eight equally shaped binary planes.
///
/// Every variant means the caller handed [`reconstruct`] something [`split`]
/// would never produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaneContractViolation {
    #[error("plane contract violation: expected 8 planes, got {0}")]
    Count(usize),
    #[error("plane contract violation: plane {index} is {actual}, expected {expected}")]
    Shape {
        index: usize,
        expected: Dimensions,
        actual: Dimensions,
    },
    #[error("plane contract violation: plane {index} holds {value} at ({x}, {y}), planes must be 0 or 1")]
    NonBinary {
        index: usize,
        x: u32,
        y: u32,
        value: u8,
    },
}

/// One binary plane: same shape as its source image, samples in `{0, 1}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPlane {
    pixels: GrayImage,
}

impl BitPlane {
    /// Wrap raw samples as a plane.
    ///
    /// Values are not checked here; [`reconstruct`] validates them.
    pub fn from_image(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::of(&self.pixels)
    }

    /// Sample at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.pixels.get_pixel(x, y)[0]
    }

    /// Number of set samples.
    pub fn ones(&self) -> u64 {
        self.pixels.iter().filter(|&&v| v != 0).count() as u64
    }

    /// Borrow the plane as a raster for display.
    pub fn as_image(&self) -> &GrayImage {
        &self.pixels
    }

    pub fn into_image(self) -> GrayImage {
        self.pixels
    }
}

/// Exactly [`PLANE_COUNT`] planes, least significant first.
///
/// Only [`split`] and [`BitPlaneSet::from_planes`] build one, so a set in hand
/// always satisfies the plane contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPlaneSet {
    planes: Vec<BitPlane>,
}

impl BitPlaneSet {
    /// Validate caller-supplied planes and wrap them as a set.
    pub fn from_planes(planes: Vec<BitPlane>) -> Result<Self, PlaneContractViolation> {
        validate(&planes)?;
        Ok(Self { planes })
    }

    pub fn planes(&self) -> &[BitPlane] {
        &self.planes
    }

    /// Plane for bit `index`, or `None` past the most significant bit.
    pub fn get(&self, index: usize) -> Option<&BitPlane> {
        self.planes.get(index)
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Shared shape of every plane in the set.
    pub fn dimensions(&self) -> Dimensions {
        self.planes
            .first()
            .map(BitPlane::dimensions)
            .unwrap_or(Dimensions::new(0, 0))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BitPlane> {
        self.planes.iter()
    }

    pub fn into_planes(self) -> Vec<BitPlane> {
        self.planes
    }
}

impl<'a> IntoIterator for &'a BitPlaneSet {
    type Item = &'a BitPlane;
    type IntoIter = std::slice::Iter<'a, BitPlane>;

    fn into_iter(self) -> Self::IntoIter {
        self.planes.iter()
    }
}

/// Decompose `image` into its eight bit-planes.
pub fn split(image: &GrayImage) -> BitPlaneSet {
    let planes = (0..PLANE_COUNT)
        .map(|bit| {
            let mut pixels = image.clone();
            for v in pixels.iter_mut() {
                *v = (*v >> bit) & 1;
            }
            BitPlane::from_image(pixels)
        })
        .collect();
    BitPlaneSet { planes }
}

/// Recompose a grayscale image from eight planes.
///
/// Fails with a [`PlaneContractViolation`] unless `planes` holds exactly
/// eight planes of identical shape whose samples are all 0 or 1.
pub fn reconstruct(planes: &[BitPlane]) -> Result<GrayImage, PlaneContractViolation> {
    validate(planes)?;
    let dims = planes[0].dimensions();
    let mut out = GrayImage::new(dims.width, dims.height);
    for (bit, plane) in planes.iter().enumerate() {
        for (dst, &b) in out.iter_mut().zip(plane.pixels.iter()) {
            *dst |= b << bit;
        }
    }
    Ok(out)
}

fn validate(planes: &[BitPlane]) -> Result<(), PlaneContractViolation> {
    if planes.len() != PLANE_COUNT {
        return Err(PlaneContractViolation::Count(planes.len()));
    }
    let expected = planes[0].dimensions();
    for (index, plane) in planes.iter().enumerate() {
        let actual = plane.dimensions();
        if actual != expected {
            return Err(PlaneContractViolation::Shape {
                index,
                expected,
                actual,
            });
        }
        if let Some(pos) = plane.pixels.iter().position(|&v| v > 1) {
            let width = expected.width as usize;
            return Err(PlaneContractViolation::NonBinary {
                index,
                x: (pos % width) as u32,
                y: (pos / width) as u32,
                value: plane.pixels.as_raw()[pos],
            });
        }
    }
    Ok(())
}
