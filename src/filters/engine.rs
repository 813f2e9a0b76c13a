//! Filter dispatch.
//!
//! [`FilterEngine::apply`] maps a [`FilterKind`] to the filter that implements
//! it. Every call reads the untouched original, never a previous result, so
//! repeated slider events cannot compound and the output depends only on the
//! original and the latest request.

use log::trace;
use rayon::prelude::*;

use super::{blur, color_matrix, edge, stylize};
use super::color_matrix::ColorMatrix;
use crate::raster::Raster;

/// Native brightness slider range.
pub const BRIGHTNESS_RANGE: (i32, i32) = (-100, 100);

/// Contrast slider positions, mapped to 0.00..=1.00.
pub const CONTRAST_STEPS: u32 = 100;

/// A filter request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    Reset,
    Gray,
    Negative,
    Sepia,
    Sobel,
    Emboss,
    Blur,
    Brightness(i32),
    Contrast(f32),
}

impl FilterKind {
    /// Parameterless filters in button order.
    pub const PRESETS: [FilterKind; 7] = [
        FilterKind::Reset,
        FilterKind::Gray,
        FilterKind::Negative,
        FilterKind::Sepia,
        FilterKind::Sobel,
        FilterKind::Emboss,
        FilterKind::Blur,
    ];

    /// Brightness from a slider position, clamped to [`BRIGHTNESS_RANGE`].
    pub fn brightness_from_slider(position: i32) -> Self {
        FilterKind::Brightness(position.clamp(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1))
    }

    /// Contrast from a slider position in `0..=100`.
    pub fn contrast_from_slider(position: u32) -> Self {
        FilterKind::Contrast(position.min(CONTRAST_STEPS) as f32 / CONTRAST_STEPS as f32)
    }

    /// Look up a filter by name; `value` is used by brightness and contrast.
    pub fn parse(name: &str, value: f32) -> Option<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "reset" | "none" | "original" => FilterKind::Reset,
            "gray" | "grey" | "grayscale" => FilterKind::Gray,
            "negative" | "invert" => FilterKind::Negative,
            "sepia" => FilterKind::Sepia,
            "sobel" | "edges" => FilterKind::Sobel,
            "emboss" => FilterKind::Emboss,
            "blur" => FilterKind::Blur,
            "brightness" => FilterKind::Brightness(value.round() as i32),
            "contrast" => FilterKind::Contrast(value),
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Reset => "reset",
            FilterKind::Gray => "gray",
            FilterKind::Negative => "negative",
            FilterKind::Sepia => "sepia",
            FilterKind::Sobel => "sobel",
            FilterKind::Emboss => "emboss",
            FilterKind::Blur => "blur",
            FilterKind::Brightness(_) => "brightness",
            FilterKind::Contrast(_) => "contrast",
        }
    }
}

/// Stateless facade over all filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine;

impl FilterEngine {
    /// Produce a new raster for `kind` from `original`.
    pub fn apply(original: &Raster, kind: FilterKind) -> Raster {
        trace!(
            "applying {} to {}x{} raster",
            kind.name(),
            original.width(),
            original.height()
        );
        match kind {
            FilterKind::Reset => original.clone(),
            FilterKind::Gray => color_matrix::apply(original, &ColorMatrix::gray()),
            FilterKind::Negative => color_matrix::apply(original, &ColorMatrix::negative()),
            FilterKind::Sepia => color_matrix::apply(original, &ColorMatrix::sepia()),
            FilterKind::Brightness(v) => color_matrix::apply(original, &ColorMatrix::brightness(v)),
            FilterKind::Contrast(v) => color_matrix::apply(original, &ColorMatrix::contrast(v)),
            FilterKind::Sobel => edge::sobel(original),
            FilterKind::Emboss => stylize::emboss(original),
            FilterKind::Blur => blur::selective_region_blur(original),
        }
    }

    /// Render several filters from the same original in parallel.
    ///
    /// Output order matches `kinds`.
    pub fn previews(original: &Raster, kinds: &[FilterKind]) -> Vec<Raster> {
        kinds
            .par_iter()
            .map(|&kind| Self::apply(original, kind))
            .collect()
    }
}
