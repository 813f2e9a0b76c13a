//! Sobel edge detection.
//!
//! The image is reduced to a luminance plane, convolved with the horizontal
//! and vertical Sobel kernels, and the absolute gradients are blended as
//! `0.5 * |Gx| + 0.5 * |Gy|`. Gradients are kept in `f32` until the final
//! blend so nothing clips early. Output is opaque grayscale: uniform regions
//! come out black.

use ndarray::{Array2, ArrayView2, Zip};

use super::convolution::{convolve_plane, saturate_u8, Kernel};
use super::core::BorderPolicy;
use super::grayscale::{luma_plane, replicate_plane};
use crate::raster::Raster;

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Signed horizontal and vertical gradients of a luminance plane.
pub fn sobel_gradients(plane: ArrayView2<u8>) -> (Array2<f32>, Array2<f32>) {
    let gx = convolve_plane(plane, &Kernel::from_rows(SOBEL_X), BorderPolicy::Replicate);
    let gy = convolve_plane(plane, &Kernel::from_rows(SOBEL_Y), BorderPolicy::Replicate);
    (gx, gy)
}

/// Edge magnitude of a luminance plane.
pub fn sobel_plane(plane: ArrayView2<u8>) -> Array2<u8> {
    let (gx, gy) = sobel_gradients(plane);
    let mut out = Array2::<u8>::zeros(plane.dim());
    Zip::from(&mut out).and(&gx).and(&gy).for_each(|o, &x, &y| {
        *o = saturate_u8(0.5 * x.abs() + 0.5 * y.abs());
    });
    out
}

/// Apply Sobel edge detection to an RGBA raster.
///
/// # Returns
/// Opaque grayscale raster with identical dimensions
pub fn sobel(raster: &Raster) -> Raster {
    let gray = luma_plane(raster.view());
    let edges = sobel_plane(gray.view());
    Raster::from_array_unchecked(replicate_plane(edges.view()))
}
