//! In-memory pixel buffers.
//!
//! A [`Raster`] is an RGBA8 image stored row-major with the origin at the top
//! left, backed by an `ndarray` array of shape `(height, width, 4)`. Filters
//! never mutate a raster in place; they always build a new one, so the
//! original stays available as the reset baseline.
//!
//! A [`Mask`] is a single-channel `(height, width)` buffer whose pixels are
//! either `0` or `255`.

use image::RgbaImage;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

use crate::error::{PhotoError, PhotoResult};

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// RGBA8 image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    data: Array3<u8>,
}

impl Raster {
    /// Build a raster from a flat row-major RGBA buffer.
    ///
    /// Fails when either dimension is zero or when
    /// `pixels.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> PhotoResult<Self> {
        let len = pixels.len();
        let invalid = || PhotoError::InvalidRaster { width, height, len };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let data = Array3::from_shape_vec((height as usize, width as usize, CHANNELS), pixels)
            .map_err(|_| invalid())?;
        Ok(Self { data })
    }

    /// Build a raster from an existing `(height, width, 4)` array.
    pub fn from_array(data: Array3<u8>) -> PhotoResult<Self> {
        let (height, width, channels) = data.dim();
        if width == 0 || height == 0 || channels != CHANNELS {
            return Err(PhotoError::InvalidRaster {
                width: width as u32,
                height: height as u32,
                len: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Wrap an array whose shape was produced by this crate.
    pub(crate) fn from_array_unchecked(data: Array3<u8>) -> Self {
        debug_assert_eq!(data.dim().2, CHANNELS);
        debug_assert!(data.dim().0 > 0 && data.dim().1 > 0);
        Self { data }
    }

    /// A raster where every pixel has the same colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PhotoResult<Self> {
        Self::from_fn(width, height, |_, _| rgba)
    }

    /// A raster whose pixels are produced by `f(x, y)`.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> PhotoResult<Self>
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Decode JPEG or PNG bytes into an RGBA raster.
    pub fn decode(bytes: &[u8]) -> PhotoResult<Self> {
        let img = image::load_from_memory(bytes).map_err(|e| PhotoError::decode(e.to_string()))?;
        Self::from_rgba_image(img.to_rgba8())
    }

    pub fn from_rgba_image(img: RgbaImage) -> PhotoResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            image::Rgba(self.pixel(x, y))
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.data.dim().1 as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.data.dim().0 as u32
    }

    /// RGBA value at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let (x, y) = (x as usize, y as usize);
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        ]
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Flat row-major RGBA bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    /// RGB bytes with alpha dropped, as consumed by codecs without alpha.
    pub fn to_rgb_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / CHANNELS * 3);
        for px in self.data.rows() {
            out.extend_from_slice(&[px[0], px[1], px[2]]);
        }
        out
    }
}

/// Binary single-channel selector; `255` marks a selected pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    data: Array2<u8>,
}

impl Mask {
    pub const SET: u8 = 255;

    /// An all-zero mask.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            data: Array2::zeros((height as usize, width as usize)),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.data.dim().1 as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.data.dim().0 as u32
    }

    #[inline]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.data[[y as usize, x as usize]] == Self::SET
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32) {
        self.data[[y as usize, x as usize]] = Self::SET;
    }

    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v == Self::SET).count()
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.data.view()
    }
}
