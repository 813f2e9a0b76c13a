//! WebAssembly exports for photofx.
//!
//! These functions are exposed to JavaScript via wasm-bindgen and work on
//! flat RGBA byte arrays (length = width * height * 4).

use wasm_bindgen::prelude::*;

use crate::encode::encode_to_budget;
use crate::error::PhotoError;
use crate::filters::{FilterEngine, FilterKind};
use crate::orientation::{normalize, OrientationTag};
use crate::raster::Raster;

fn to_js(err: PhotoError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn raster(data: &[u8], width: u32, height: u32) -> Result<Raster, JsValue> {
    Raster::new(width, height, data.to_vec()).map_err(to_js)
}

/// Apply a named filter.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `kind` - Filter name ("gray", "negative", "sepia", "sobel", "emboss", "blur", ...)
/// * `value` - Slider value for "brightness" and "contrast"
///
/// # Returns
/// Flat array of RGBA bytes with the same dimensions
#[wasm_bindgen]
pub fn apply_filter_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    kind: &str,
    value: f32,
) -> Result<Vec<u8>, JsValue> {
    let kind = FilterKind::parse(kind, value)
        .ok_or_else(|| JsValue::from_str(&format!("unknown filter: {kind}")))?;
    let original = raster(data, width, height)?;
    Ok(FilterEngine::apply(&original, kind).to_vec())
}

/// Rotate upright from a raw EXIF orientation value.
///
/// Width and height are swapped for quarter turns; the caller reads the new
/// dimensions from the original ones.
#[wasm_bindgen]
pub fn normalize_orientation_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    exif_value: u32,
) -> Result<Vec<u8>, JsValue> {
    let original = raster(data, width, height)?;
    Ok(normalize(&original, OrientationTag::from_exif(exif_value)).to_vec())
}

/// Encode as JPEG under `target_bytes`.
#[wasm_bindgen]
pub fn encode_to_budget_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    target_bytes: usize,
) -> Result<Vec<u8>, JsValue> {
    let original = raster(data, width, height)?;
    encode_to_budget(&original, target_bytes).map_err(to_js)
}
