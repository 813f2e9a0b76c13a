//! Grayscale plane extraction and replication.
//!
//! Luminance-based filters (Sobel, emboss) run on a single-channel copy of the
//! image and then spread the result back over R, G and B for display.
//! Uses ITU-R BT.601 luma coefficients.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

/// ITU-R BT.601 luma coefficients
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Luma of a single RGB triple, rounded to the nearest integer.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let v = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    v.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGBA image to a single luminance plane.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 4)
///
/// # Returns
/// 2D array of shape (height, width); alpha is ignored
pub fn luma_plane(input: ArrayView3<u8>) -> Array2<u8> {
    let (height, width, _) = input.dim();
    Array2::from_shape_fn((height, width), |(y, x)| {
        luma_u8(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]])
    })
}

/// Spread a luminance plane over R, G and B with an opaque alpha.
pub fn replicate_plane(plane: ArrayView2<u8>) -> Array3<u8> {
    let (height, width) = plane.dim();
    Array3::from_shape_fn((height, width, 4), |(y, x, c)| {
        if c == 3 {
            255
        } else {
            plane[[y, x]]
        }
    })
}
