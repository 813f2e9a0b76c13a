//! Core utilities shared by windowed filters.
//!
//! This module provides:
//! - Border policies for samples that fall outside the image
//! - Gaussian kernel generation from a fixed kernel size

/// How to sample coordinates that fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderPolicy {
    /// Repeat the nearest edge pixel: `aaa|abcd|ddd`.
    #[default]
    Replicate,
    /// Mirror without repeating the edge pixel: `dcb|abcd|cba`.
    Reflect101,
    /// Treat outside samples as a constant value.
    Constant(u8),
}

impl BorderPolicy {
    /// Map a possibly out-of-range coordinate into `0..len`.
    ///
    /// Returns `None` for [`BorderPolicy::Constant`] when `i` is outside.
    /// `len` must be non-zero.
    #[inline]
    pub fn resolve(self, i: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if (0..n).contains(&i) {
            return Some(i as usize);
        }
        match self {
            BorderPolicy::Replicate => Some(i.clamp(0, n - 1) as usize),
            BorderPolicy::Reflect101 => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * (n - 1);
                let mut j = i.rem_euclid(period);
                if j >= n {
                    j = period - j;
                }
                Some(j as usize)
            }
            BorderPolicy::Constant(_) => None,
        }
    }
}

/// Sigma derived from a kernel size when none is given:
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
pub fn auto_sigma(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Generate a normalized 1D Gaussian kernel of a fixed size.
///
/// # Arguments
/// * `size` - Number of taps; even sizes are bumped to the next odd size
/// * `sigma` - Standard deviation; `<= 0` derives it from `size`
///
/// # Returns
/// Normalized kernel as Vec<f32>
pub fn gaussian_kernel_1d(size: usize, sigma: f32) -> Vec<f32> {
    let size = size.max(1) | 1;
    if size == 1 {
        return vec![1.0];
    }
    let sigma = if sigma > 0.0 { sigma } else { auto_sigma(size) };
    let half = size / 2;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    // Normalize
    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replicate_clamps() {
        let p = BorderPolicy::Replicate;
        assert_eq!(p.resolve(-3, 5), Some(0));
        assert_eq!(p.resolve(2, 5), Some(2));
        assert_eq!(p.resolve(9, 5), Some(4));
        assert_eq!(p.resolve(-40, 1), Some(0));
    }

    #[test]
    fn test_reflect101_mirrors() {
        let p = BorderPolicy::Reflect101;
        assert_eq!(p.resolve(-1, 5), Some(1));
        assert_eq!(p.resolve(-2, 5), Some(2));
        assert_eq!(p.resolve(5, 5), Some(3));
        assert_eq!(p.resolve(6, 5), Some(2));
        assert_eq!(p.resolve(-7, 2), Some(1));
        assert_eq!(p.resolve(3, 1), Some(0));
    }

    #[test]
    fn test_constant_outside_is_none() {
        let p = BorderPolicy::Constant(9);
        assert_eq!(p.resolve(-1, 5), None);
        assert_eq!(p.resolve(4, 5), Some(4));
    }

    #[test]
    fn test_auto_sigma_for_45() {
        assert!((auto_sigma(45) - 7.1).abs() < 1e-5);
        assert!((auto_sigma(3) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_gaussian_kernel_normalized_and_symmetric() {
        let k = gaussian_kernel_1d(45, 0.0);
        assert_eq!(k.len(), 45);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..22 {
            assert!((k[i] - k[44 - i]).abs() < 1e-7);
        }
        assert!(k[22] > k[21]);
    }

    #[test]
    fn test_gaussian_kernel_even_size_bumped() {
        assert_eq!(gaussian_kernel_1d(4, 1.0).len(), 5);
        assert_eq!(gaussian_kernel_1d(0, 1.0), vec![1.0]);
    }
}
