//! Gaussian blur and the selective "spotlight" blur.
//!
//! The selective blur keeps a sharp circle in the middle of the frame and
//! blurs everything around it: a circular [`Mask`] marks the pixels copied
//! from the original, all other pixels come from a 45×45 Gaussian blur.

use ndarray::{Array3, ArrayView3};

use super::convolution::saturate_u8;
use super::core::{gaussian_kernel_1d, BorderPolicy};
use crate::error::{PhotoError, PhotoResult};
use crate::raster::{Mask, Raster};

/// Kernel size of the background blur.
pub const SPOTLIGHT_KERNEL_SIZE: usize = 45;

/// Mask radius is `width / SPOTLIGHT_RADIUS_DIVISOR`.
pub const SPOTLIGHT_RADIUS_DIVISOR: u32 = 5;

/// Separable Gaussian blur over all four channels.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `size` - Kernel size in taps (odd)
/// * `sigma` - Standard deviation; `<= 0` derives it from `size`
/// * `border` - Policy for samples outside the image
pub fn gaussian_blur_rgba(
    input: ArrayView3<u8>,
    size: usize,
    sigma: f32,
    border: BorderPolicy,
) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let kernel = gaussian_kernel_1d(size, sigma);
    let half = kernel.len() / 2;
    let fill = match border {
        BorderPolicy::Constant(v) => v as f32,
        _ => 0.0,
    };

    // Work in f32 for precision
    let mut temp = Array3::<f32>::zeros((height, width, channels));
    let mut result = Array3::<u8>::zeros((height, width, channels));

    // Horizontal pass
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let v = match border.resolve(x as isize + ki as isize - half as isize, width) {
                        Some(sx) => input[[y, sx, c]] as f32,
                        None => fill,
                    };
                    sum += v * kv;
                }
                temp[[y, x, c]] = sum;
            }
        }
    }

    // Vertical pass
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let v = match border.resolve(y as isize + ki as isize - half as isize, height) {
                        Some(sy) => temp[[sy, x, c]],
                        None => fill,
                    };
                    sum += v * kv;
                }
                result[[y, x, c]] = saturate_u8(sum);
            }
        }
    }

    result
}

/// Gaussian blur with edge replication.
pub fn gaussian_blur(raster: &Raster, size: usize, sigma: f32) -> Raster {
    Raster::from_array_unchecked(gaussian_blur_rgba(
        raster.view(),
        size,
        sigma,
        BorderPolicy::Replicate,
    ))
}

/// Filled circle centred at `(width / 2, height / 2)` with radius
/// `width / 5`; pixels on the circle boundary are included.
pub fn spotlight_mask(width: u32, height: u32) -> Mask {
    let mut mask = Mask::empty(width, height);
    let cx = (width / 2) as i64;
    let cy = (height / 2) as i64;
    let r = (width / SPOTLIGHT_RADIUS_DIVISOR) as i64;
    let r2 = r * r;

    for y in 0..height {
        let dy = y as i64 - cy;
        for x in 0..width {
            let dx = x as i64 - cx;
            if dx * dx + dy * dy <= r2 {
                mask.set(x, y);
            }
        }
    }
    mask
}

/// Take `keep` where the mask is set and `fill` everywhere else.
pub fn composite(keep: &Raster, fill: &Raster, mask: &Mask) -> PhotoResult<Raster> {
    let (w, h) = (keep.width(), keep.height());
    for (mw, mh) in [(fill.width(), fill.height()), (mask.width(), mask.height())] {
        if (mw, mh) != (w, h) {
            return Err(PhotoError::MaskMismatch {
                mask_width: mw,
                mask_height: mh,
                width: w,
                height: h,
            });
        }
    }

    let mut out = fill.clone().into_array();
    copy_masked(&mut out, keep.view(), mask);
    Ok(Raster::from_array_unchecked(out))
}

fn copy_masked(out: &mut Array3<u8>, src: ArrayView3<u8>, mask: &Mask) {
    for (y, row) in mask.view().outer_iter().enumerate() {
        for (x, &m) in row.iter().enumerate() {
            if m == Mask::SET {
                for c in 0..4 {
                    out[[y, x, c]] = src[[y, x, c]];
                }
            }
        }
    }
}

/// Blur everything outside a centred circle, keeping the circle sharp.
pub fn selective_region_blur(raster: &Raster) -> Raster {
    let mask = spotlight_mask(raster.width(), raster.height());
    let blurred = gaussian_blur(raster, SPOTLIGHT_KERNEL_SIZE, 0.0);
    let mut out = blurred.into_array();
    copy_masked(&mut out, raster.view(), &mask);
    Raster::from_array_unchecked(out)
}
