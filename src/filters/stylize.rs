//! Emboss filter.
//!
//! Convolves the luminance plane with a fixed asymmetric 3×3 kernel
//! (weights sum to 2, so flat areas brighten) and replicates the clamped
//! result over R, G and B.

use ndarray::Array2;

use super::convolution::{convolve_plane, saturate_u8, Kernel};
use super::core::BorderPolicy;
use super::grayscale::{luma_plane, replicate_plane};
use crate::raster::Raster;

/// The nine emboss weights, row-major.
pub const EMBOSS_KERNEL: [[f32; 3]; 3] = [[-2.0, -1.0, 0.0], [-1.0, 2.0, 1.0], [0.0, 1.0, 2.0]];

/// Apply the emboss effect to an RGBA raster.
///
/// # Returns
/// Opaque grayscale raster with identical dimensions
pub fn emboss(raster: &Raster) -> Raster {
    let gray = luma_plane(raster.view());
    let sums = convolve_plane(gray.view(), &Kernel::from_rows(EMBOSS_KERNEL), BorderPolicy::Replicate);
    let plane: Array2<u8> = sums.mapv(saturate_u8);
    Raster::from_array_unchecked(replicate_plane(plane.view()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emboss_flat_doubles_luma() {
        // kernel sum is 2
        let r = Raster::solid(3, 3, [60, 60, 60, 255]).unwrap();
        let out = emboss(&r);
        assert_eq!(out.pixel(1, 1), [120, 120, 120, 255]);
        assert_eq!(out.pixel(0, 2), [120, 120, 120, 255]);
    }

    #[test]
    fn test_emboss_flat_bright_saturates() {
        let r = Raster::solid(2, 2, [200, 200, 200, 10]).unwrap();
        let out = emboss(&r);
        assert_eq!(out.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_emboss_is_asymmetric() {
        // single bright pixel in the centre of a dark field
        let r = Raster::from_fn(3, 3, |x, y| {
            if (x, y) == (1, 1) {
                [100, 100, 100, 255]
            } else {
                [0, 0, 0, 255]
            }
        })
        .unwrap();
        let out = emboss(&r);
        // out(x, y) sees the bright pixel through weight k[2-y][2-x]
        assert_eq!(out.pixel(1, 1)[0], 200);
        assert_eq!(out.pixel(2, 2)[0], 0); // k[0][0] = -2
        assert_eq!(out.pixel(0, 0)[0], 200); // k[2][2] = 2
        assert_eq!(out.pixel(0, 1)[0], 100); // k[1][2] = 1
        assert_eq!(out.pixel(2, 1)[0], 0); // k[1][0] = -1
    }

    #[test]
    fn test_emboss_dimensions_single_pixel() {
        let r = Raster::solid(1, 1, [0, 0, 0, 255]).unwrap();
        let out = emboss(&r);
        assert_eq!((out.width(), out.height()), (1, 1));
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);
    }
}
