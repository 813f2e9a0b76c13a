//! Error types for the decode/encode boundary.
//!
//! Filters are total functions over a valid [`Raster`](crate::raster::Raster)
//! and never return errors. Only construction, decoding, encoding and
//! metadata parsing can fail.

use thiserror::Error;

/// Convenience result type used across photofx.
pub type PhotoResult<T> = Result<T, PhotoError>;

#[derive(Error, Debug)]
pub enum PhotoError {
    /// Input bytes could not be decoded into a raster.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Pixel buffer length does not match `width * height * 4`.
    #[error("invalid raster: {width}x{height} RGBA cannot hold {len} bytes")]
    InvalidRaster { width: u32, height: u32, len: usize },

    /// Mask dimensions differ from the raster it is composited onto.
    #[error("mask is {mask_width}x{mask_height}, raster is {width}x{height}")]
    MaskMismatch {
        mask_width: u32,
        mask_height: u32,
        width: u32,
        height: u32,
    },

    /// The lossy codec rejected the raster.
    #[error("encode failed: {0}")]
    Encode(String),

    /// EXIF container could not be parsed.
    #[error("metadata error: {0}")]
    Metadata(String),
}

impl PhotoError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
