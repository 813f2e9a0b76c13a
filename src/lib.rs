//! photofx
//!
//! On-device photo filter pipeline: orientation normalization, colour-matrix
//! and convolution filters, a selective spotlight blur, and size-targeted
//! JPEG export. Optional Python bindings via PyO3 and WASM bindings for
//! JavaScript.
//!
//! ## Image Format
//! Every stage works on an RGBA8 [`Raster`] of shape (height, width, 4),
//! row-major with the origin at the top left. Decoding and encoding only
//! happen at the boundary ([`Raster::decode`], [`encode`]).
//!
//! ## Pipeline
//! 1. Decode bytes into a [`Raster`] and read the orientation hint.
//! 2. [`orientation::normalize`] rotates it upright exactly once.
//! 3. [`FilterEngine::apply`] renders each requested [`FilterKind`] from that
//!    original, never from a previous result.
//! 4. [`encode::SizeTargetedEncoder`] exports the current selection under a
//!    byte budget (1 MiB by default).
//!
//! [`session::EditSession`] ties the steps together.

pub mod error;
pub mod raster;
pub mod filters;
pub mod orientation;
pub mod encode;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use encode::{EncodeOptions, SizeTargetedEncoder};
pub use error::{PhotoError, PhotoResult};
pub use filters::{FilterEngine, FilterKind};
pub use orientation::OrientationTag;
pub use raster::{Mask, Raster};
pub use session::EditSession;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyBytes;

    use crate::encode::{EncodeOptions, SizeTargetedEncoder, DEFAULT_TARGET_BYTES};
    use crate::error::PhotoError;
    use crate::filters::{FilterEngine, FilterKind};
    use crate::orientation::{normalize, OrientationTag};
    use crate::raster::Raster;

    fn to_py_err(err: PhotoError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn to_raster(image: PyReadonlyArray3<'_, u8>) -> PyResult<Raster> {
        Raster::from_array(image.as_array().to_owned()).map_err(to_py_err)
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Apply a named filter to an RGBA u8 image of shape (H, W, 4).
    ///
    /// `value` is the slider value for "brightness" (-100..100) and
    /// "contrast" (0.0..1.0); other filters ignore it.
    #[pyfunction]
    #[pyo3(signature = (image, kind, value=0.0))]
    pub fn apply_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        kind: &str,
        value: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let kind = FilterKind::parse(kind, value)
            .ok_or_else(|| PyValueError::new_err(format!("unknown filter: {kind}")))?;
        let raster = to_raster(image)?;
        let result = py.allow_threads(|| FilterEngine::apply(&raster, kind));
        Ok(result.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Orientation
    // ========================================================================

    /// Rotate an RGBA u8 image upright from its raw EXIF orientation value.
    #[pyfunction]
    pub fn normalize_orientation<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        exif_value: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let raster = to_raster(image)?;
        let result = normalize(&raster, OrientationTag::from_exif(exif_value));
        Ok(result.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Encode an RGBA u8 image as JPEG under `target_bytes`.
    #[pyfunction]
    #[pyo3(signature = (image, target_bytes=DEFAULT_TARGET_BYTES))]
    pub fn encode_to_budget<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        target_bytes: usize,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let raster = to_raster(image)?;
        let encoder = SizeTargetedEncoder::new(EncodeOptions::with_target(target_bytes));
        let bytes = py
            .allow_threads(|| encoder.encode(&raster))
            .map_err(to_py_err)?;
        Ok(PyBytes::new(py, &bytes))
    }

    #[pymodule]
    pub fn photofx(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;
        m.add_function(wrap_pyfunction!(normalize_orientation, m)?)?;
        m.add_function(wrap_pyfunction!(encode_to_budget, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::photofx;
