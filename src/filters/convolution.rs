//! N×N convolution with a configurable border policy.
//!
//! The kernel is applied as a correlation (not flipped):
//!
//! ```text
//! out(x, y) = sum k[i][j] * in(x + j - anchor_x, y + i - anchor_y) + bias
//! ```
//!
//! Samples outside the image are resolved with a [`BorderPolicy`], so a
//! kernel larger than the image is always valid, including on 1×1 inputs.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

use super::core::BorderPolicy;
use crate::raster::Raster;

/// Square convolution kernel with anchor and bias.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Array2<f32>,
    anchor: (usize, usize),
    bias: f32,
}

impl Kernel {
    /// Build from row-major weights; the anchor defaults to the centre.
    pub fn from_rows<const N: usize>(rows: [[f32; N]; N]) -> Self {
        assert!(N > 0, "kernel must have at least one weight");
        let weights = Array2::from_shape_fn((N, N), |(i, j)| rows[i][j]);
        Self {
            weights,
            anchor: (N / 2, N / 2),
            bias: 0.0,
        }
    }

    /// Anchor as `(x, y)` inside the kernel window.
    pub fn with_anchor(mut self, x: usize, y: usize) -> Self {
        let size = self.size();
        self.anchor = (x.min(size - 1), y.min(size - 1));
        self
    }

    pub fn with_bias(mut self, bias: f32) -> Self {
        self.bias = bias;
        self
    }

    pub fn size(&self) -> usize {
        self.weights.nrows()
    }

    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    pub fn weight(&self, row: usize, col: usize) -> f32 {
        self.weights[[row, col]]
    }
}

/// Round to nearest and saturate to 0-255.
#[inline]
pub fn saturate_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Convolve a single 8-bit plane, keeping full `f32` precision.
///
/// The result is not clamped, so signed gradients survive for callers that
/// combine several passes.
pub fn convolve_plane(plane: ArrayView2<u8>, kernel: &Kernel, border: BorderPolicy) -> Array2<f32> {
    let (height, width) = plane.dim();
    let size = kernel.size();
    let (ax, ay) = kernel.anchor;
    let fill = match border {
        BorderPolicy::Constant(v) => v as f32,
        _ => 0.0,
    };

    let mut output = Array2::<f32>::zeros((height, width));

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for i in 0..size {
                let sy = border.resolve(y as isize + i as isize - ay as isize, height);
                for j in 0..size {
                    let w = kernel.weights[[i, j]];
                    if w == 0.0 {
                        continue;
                    }
                    let sx = border.resolve(x as isize + j as isize - ax as isize, width);
                    let v = match (sy, sx) {
                        (Some(sy), Some(sx)) => plane[[sy, sx]] as f32,
                        _ => fill,
                    };
                    sum += w * v;
                }
            }
            output[[y, x]] = sum + kernel.bias;
        }
    }

    output
}

/// Convolve each colour channel of an RGBA image; alpha is preserved.
pub fn convolve_rgba(input: ArrayView3<u8>, kernel: &Kernel, border: BorderPolicy) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for c in 0..3 {
        let plane = input.index_axis(Axis(2), c);
        let result = convolve_plane(plane, kernel, border);
        for y in 0..height {
            for x in 0..width {
                output[[y, x, c]] = saturate_u8(result[[y, x]]);
            }
        }
    }
    output
        .index_axis_mut(Axis(2), 3)
        .assign(&input.index_axis(Axis(2), 3));

    output
}

/// Apply `kernel` to a raster with edge replication at the borders.
///
/// # Returns
/// New raster with identical dimensions
pub fn apply(raster: &Raster, kernel: &Kernel) -> Raster {
    apply_with_border(raster, kernel, BorderPolicy::default())
}

pub fn apply_with_border(raster: &Raster, kernel: &Kernel, border: BorderPolicy) -> Raster {
    Raster::from_array_unchecked(convolve_rgba(raster.view(), kernel, border))
}
