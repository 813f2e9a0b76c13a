//! Size-targeted lossy export.
//!
//! [`SizeTargetedEncoder`] encodes at the highest quality first and lowers the
//! quality in fixed steps until the output fits the byte budget or the quality
//! floor is reached. Hitting the floor while still over budget is not an
//! error: the floor-quality bytes are returned as the best effort.
//!
//! The codec sits behind the [`LossyEncoder`] trait so the search can be
//! driven by any encoder; [`JpegEncoder`] is the production one.

use image::codecs::jpeg;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder};
use log::{debug, warn};

use crate::error::{PhotoError, PhotoResult};
use crate::raster::Raster;

/// Default export budget: 1 MiB.
pub const DEFAULT_TARGET_BYTES: usize = 1_048_576;

/// Lossy encoding quality (0-100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: Quality = Quality(0);
    pub const MAX: Quality = Quality(100);

    pub fn new(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Lower by `step`, never below `floor`.
    pub fn step_down(self, step: u8, floor: Quality) -> Self {
        Self(self.0.saturating_sub(step)).max(floor)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::MAX
    }
}

/// A codec that turns a raster into compressed bytes at a given quality.
pub trait LossyEncoder: Sync {
    fn encode(&self, raster: &Raster, quality: Quality) -> PhotoResult<Vec<u8>>;
}

/// Baseline JPEG via the `image` crate. Alpha is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegEncoder;

impl LossyEncoder for JpegEncoder {
    fn encode(&self, raster: &Raster, quality: Quality) -> PhotoResult<Vec<u8>> {
        // The codec's own floor is 1
        let q = quality.value().max(1);
        let mut bytes = Vec::new();
        jpeg::JpegEncoder::new_with_quality(&mut bytes, q)
            .write_image(
                &raster.to_rgb_vec(),
                raster.width(),
                raster.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| PhotoError::encode(format!("JPEG encode failed at quality {q}: {e}")))?;
        Ok(bytes)
    }
}

/// Optional resize applied before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Downscale {
    #[default]
    None,
    /// Halve the width and keep the aspect ratio.
    Half,
}

impl Downscale {
    pub fn apply(self, raster: &Raster) -> PhotoResult<Raster> {
        match self {
            Downscale::None => Ok(raster.clone()),
            Downscale::Half => {
                let (w, h) = (raster.width(), raster.height());
                let new_w = (w / 2).max(1);
                let new_h = ((new_w as u64 * h as u64 / w as u64) as u32).max(1);
                if (new_w, new_h) == (w, h) {
                    return Ok(raster.clone());
                }
                let resized =
                    imageops::resize(&raster.to_rgba_image(), new_w, new_h, FilterType::Triangle);
                Raster::from_rgba_image(resized)
            }
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub target_bytes: usize,
    pub max_quality: Quality,
    pub min_quality: Quality,
    pub step: u8,
    pub downscale: Downscale,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            target_bytes: DEFAULT_TARGET_BYTES,
            max_quality: Quality::MAX,
            min_quality: Quality::MIN,
            step: 5,
            downscale: Downscale::None,
        }
    }
}

impl EncodeOptions {
    pub fn with_target(target_bytes: usize) -> Self {
        Self {
            target_bytes,
            ..Self::default()
        }
    }

    /// Upper bound on encode attempts: `ceil((max - min) / step) + 1`.
    pub fn max_attempts(&self) -> usize {
        let span = self.max_quality.value().saturating_sub(self.min_quality.value()) as usize;
        let step = self.step.max(1) as usize;
        span.div_ceil(step) + 1
    }
}

/// Result of a size-targeted encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOutcome {
    pub bytes: Vec<u8>,
    pub quality: Quality,
    pub attempts: usize,
    pub within_budget: bool,
}

/// Searches downward in quality until the output fits the byte budget.
#[derive(Debug, Clone, Default)]
pub struct SizeTargetedEncoder<E = JpegEncoder> {
    encoder: E,
    options: EncodeOptions,
}

impl SizeTargetedEncoder<JpegEncoder> {
    pub fn new(options: EncodeOptions) -> Self {
        Self::with_encoder(JpegEncoder, options)
    }
}

impl<E: LossyEncoder> SizeTargetedEncoder<E> {
    pub fn with_encoder(encoder: E, options: EncodeOptions) -> Self {
        Self { encoder, options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode `raster`, returning the bytes only.
    pub fn encode(&self, raster: &Raster) -> PhotoResult<Vec<u8>> {
        Ok(self.encode_detailed(raster)?.bytes)
    }

    /// Encode `raster` and report the chosen quality and attempt count.
    pub fn encode_detailed(&self, raster: &Raster) -> PhotoResult<EncodeOutcome> {
        let opts = &self.options;
        let source = opts.downscale.apply(raster)?;
        let floor = opts.min_quality.min(opts.max_quality);
        let step = opts.step.max(1);

        let mut quality = opts.max_quality;
        let mut attempts = 0;
        loop {
            let bytes = self.encoder.encode(&source, quality)?;
            attempts += 1;
            debug!(
                "encoded {}x{} at quality {}: {} bytes (target {})",
                source.width(),
                source.height(),
                quality.value(),
                bytes.len(),
                opts.target_bytes
            );

            let within_budget = bytes.len() <= opts.target_bytes;
            if within_budget || quality <= floor {
                if !within_budget {
                    warn!(
                        "byte budget {} unreachable, returning {} bytes at quality {}",
                        opts.target_bytes,
                        bytes.len(),
                        quality.value()
                    );
                }
                return Ok(EncodeOutcome {
                    bytes,
                    quality,
                    attempts,
                    within_budget,
                });
            }
            quality = quality.step_down(step, floor);
        }
    }
}

/// Encode as JPEG under `target_bytes` with the default search settings.
pub fn encode_to_budget(raster: &Raster, target_bytes: usize) -> PhotoResult<Vec<u8>> {
    SizeTargetedEncoder::new(EncodeOptions::with_target(target_bytes)).encode(raster)
}
