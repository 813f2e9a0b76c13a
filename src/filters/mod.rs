//! Filter modules for the photo pipeline.
//!
//! ## Format
//!
//! Every filter reads an RGBA8 [`Raster`](crate::raster::Raster) of shape
//! (H, W, 4) and returns a new raster of the same size. Luminance-based
//! filters work on an internal single-channel copy and replicate the result
//! over R, G and B.
//!
//! ## Architecture
//!
//! - **Pure** - no filter mutates its input; the original is the reset baseline
//! - **Total** - no filter fails on a valid raster, including 1×1
//! - **Saturating** - channel values are rounded and clamped, never wrapped
//! - **Border-safe** - windowed filters resolve outside samples by edge replication
//!
//! ## Filter Categories
//!
//! - **Colour matrix**: gray, negative, sepia, brightness, contrast
//! - **Convolution**: generic kernel, Sobel edges, emboss
//! - **Blur**: Gaussian, selective spotlight blur

pub mod grayscale;
pub mod color_matrix;
pub mod core;
pub mod convolution;
pub mod edge;
pub mod stylize;
pub mod blur;
pub mod engine;

pub use engine::{FilterEngine, FilterKind};
