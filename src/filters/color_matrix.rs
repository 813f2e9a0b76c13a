//! Affine 4×5 colour-matrix filter: Gray, Negative, Sepia, Brightness, Contrast.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Row `r` of the matrix computes
//!
//! ```text
//! out[r] = m[r][0]*R + m[r][1]*G + m[r][2]*B + m[r][3]*A + m[r][4]
//! ```
//!
//! on 0-255 channel values. Every output channel is rounded and then
//! saturated to 0-255, never wrapped.

use ndarray::Array3;

use crate::raster::Raster;

/// Luminance weights of the zero-saturation matrix.
const SAT_R: f32 = 0.213;
const SAT_G: f32 = 0.715;
const SAT_B: f32 = 0.072;

/// 4×5 affine colour transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    m: [[f32; 5]; 4],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorMatrix {
    pub const fn from_rows(m: [[f32; 5]; 4]) -> Self {
        Self { m }
    }

    pub fn rows(&self) -> &[[f32; 5]; 4] {
        &self.m
    }

    pub const fn identity() -> Self {
        Self::scale(1.0, 1.0, 1.0, 1.0)
    }

    /// Diagonal matrix with no translation.
    pub const fn scale(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::from_rows([
            [r, 0.0, 0.0, 0.0, 0.0],
            [0.0, g, 0.0, 0.0, 0.0],
            [0.0, 0.0, b, 0.0, 0.0],
            [0.0, 0.0, 0.0, a, 0.0],
        ])
    }

    /// Saturation reduced to zero: every colour row is the same luma sum.
    pub const fn gray() -> Self {
        Self::from_rows([
            [SAT_R, SAT_G, SAT_B, 0.0, 0.0],
            [SAT_R, SAT_G, SAT_B, 0.0, 0.0],
            [SAT_R, SAT_G, SAT_B, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// `255 - in` on colour channels, alpha unchanged.
    pub const fn negative() -> Self {
        Self::from_rows([
            [-1.0, 0.0, 0.0, 0.0, 255.0],
            [0.0, -1.0, 0.0, 0.0, 255.0],
            [0.0, 0.0, -1.0, 0.0, 255.0],
            [0.0, 0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Simplified warm tint: per-channel scale only, no cross terms.
    pub const fn sepia() -> Self {
        Self::scale(1.0, 0.8, 0.5, 1.0)
    }

    /// Adds `value` to R, G and B.
    pub fn brightness(value: i32) -> Self {
        let v = value as f32;
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0, v],
            [0.0, 1.0, 0.0, 0.0, v],
            [0.0, 0.0, 1.0, 0.0, v],
            [0.0, 0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Scales R, G and B by `value + 1` around mid-gray 128.
    pub fn contrast(value: f32) -> Self {
        let scale = value + 1.0;
        let translate = -(128.0 * scale) + 128.0;
        Self::from_rows([
            [scale, 0.0, 0.0, 0.0, translate],
            [0.0, scale, 0.0, 0.0, translate],
            [0.0, 0.0, scale, 0.0, translate],
            [0.0, 0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Transform a single RGBA pixel.
    #[inline]
    pub fn transform(&self, px: [u8; 4]) -> [u8; 4] {
        let input = [px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32];
        let mut out = [0u8; 4];
        for (o, row) in out.iter_mut().zip(self.m.iter()) {
            let v = row[0] * input[0] + row[1] * input[1] + row[2] * input[2] + row[3] * input[3] + row[4];
            *o = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

/// Apply a colour matrix to every pixel.
///
/// # Returns
/// New raster with identical dimensions
pub fn apply(raster: &Raster, matrix: &ColorMatrix) -> Raster {
    let input = raster.view();
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let px = [
                input[[y, x, 0]],
                input[[y, x, 1]],
                input[[y, x, 2]],
                input[[y, x, 3]],
            ];
            let out = matrix.transform(px);
            for c in 0..4 {
                output[[y, x, c]] = out[c];
            }
        }
    }

    Raster::from_array_unchecked(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(px: [u8; 4]) -> Raster {
        Raster::solid(1, 1, px).unwrap()
    }

    #[test]
    fn test_identity_is_noop() {
        let r = Raster::from_fn(3, 2, |x, y| [x as u8 * 40, y as u8 * 90, 7, 128]).unwrap();
        assert_eq!(apply(&r, &ColorMatrix::identity()), r);
    }

    #[test]
    fn test_negative_extremes() {
        let black = apply(&one([0, 0, 0, 255]), &ColorMatrix::negative());
        assert_eq!(black.pixel(0, 0), [255, 255, 255, 255]);

        let white = apply(&one([255, 255, 255, 255]), &ColorMatrix::negative());
        assert_eq!(white.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_negative_keeps_alpha() {
        let out = apply(&one([10, 20, 30, 77]), &ColorMatrix::negative());
        assert_eq!(out.pixel(0, 0), [245, 235, 225, 77]);
    }

    #[test]
    fn test_gray_equalizes_channels() {
        let out = apply(&one([255, 0, 0, 255]), &ColorMatrix::gray());
        // 0.213 * 255 = 54.3
        assert_eq!(out.pixel(0, 0), [54, 54, 54, 255]);

        let out = apply(&one([120, 60, 200, 9]), &ColorMatrix::gray());
        let [r, g, b, a] = out.pixel(0, 0);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 9);
    }

    #[test]
    fn test_sepia_scales_without_cross_terms() {
        let out = apply(&one([200, 200, 200, 255]), &ColorMatrix::sepia());
        assert_eq!(out.pixel(0, 0), [200, 160, 100, 255]);

        let out = apply(&one([0, 100, 0, 255]), &ColorMatrix::sepia());
        assert_eq!(out.pixel(0, 0), [0, 80, 0, 255]);
    }

    #[test]
    fn test_brightness_saturates() {
        let up = apply(&one([250, 100, 0, 255]), &ColorMatrix::brightness(20));
        assert_eq!(up.pixel(0, 0), [255, 120, 20, 255]);

        let down = apply(&one([250, 100, 5, 255]), &ColorMatrix::brightness(-100));
        assert_eq!(down.pixel(0, 0), [150, 0, 0, 255]);
    }

    #[test]
    fn test_contrast_pivots_on_128() {
        let m = ColorMatrix::contrast(1.0);
        // scale 2, translate -128
        assert_eq!(m.transform([128, 64, 200, 255]), [128, 0, 255, 255]);
        assert_eq!(m.transform([100, 150, 10, 3]), [72, 172, 0, 3]);
    }

    #[test]
    fn test_contrast_zero_is_identity() {
        let m = ColorMatrix::contrast(0.0);
        assert_eq!(m.transform([1, 128, 254, 255]), [1, 128, 254, 255]);
    }

    #[test]
    fn test_dimensions_preserved() {
        let r = Raster::solid(5, 3, [1, 2, 3, 4]).unwrap();
        let out = apply(&r, &ColorMatrix::sepia());
        assert_eq!((out.width(), out.height()), (5, 3));
    }
}
