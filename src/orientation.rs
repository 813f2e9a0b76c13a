//! Orientation normalization.
//!
//! Camera files store pixels in sensor order plus an EXIF orientation hint.
//! [`normalize`] rotates the raster upright once, before any filter sees it.
//!
//! ## Rotation Direction
//!
//! All rotations are clockwise (CW):
//! - 90° CW: (x, y) -> (H - 1 - y, x), output is H×W
//! - 180°: (x, y) -> (W - 1 - x, H - 1 - y)
//! - 270° CW (90° CCW): (x, y) -> (y, W - 1 - x), output is H×W
//!
//! Mirrored EXIF orientations and unknown values are treated as
//! [`OrientationTag::Undefined`] and leave the raster untouched.

use log::warn;
use ndarray::{s, Array3, ArrayView3};

use crate::raster::Raster;

/// Rotation hint attached to a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationTag {
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
    #[default]
    Undefined,
}

impl OrientationTag {
    /// Map the raw EXIF `Orientation` value (tag 0x0112).
    pub fn from_exif(value: u32) -> Self {
        match value {
            1 => OrientationTag::Normal,
            6 => OrientationTag::Rotate90,
            3 => OrientationTag::Rotate180,
            8 => OrientationTag::Rotate270,
            0 => OrientationTag::Undefined,
            other => {
                warn!("unsupported EXIF orientation {other}, leaving image as is");
                OrientationTag::Undefined
            }
        }
    }

    /// Clockwise rotation needed to display the image upright.
    pub fn degrees(self) -> u32 {
        match self {
            OrientationTag::Rotate90 => 90,
            OrientationTag::Rotate180 => 180,
            OrientationTag::Rotate270 => 270,
            OrientationTag::Normal | OrientationTag::Undefined => 0,
        }
    }
}

/// Rotate `raster` upright according to `tag`.
///
/// Quarter turns swap width and height. Tags without a rotation return a copy.
pub fn normalize(raster: &Raster, tag: OrientationTag) -> Raster {
    let view = raster.view();
    let rotated = match tag.degrees() {
        90 => rotate_90_cw(view),
        180 => rotate_180(view),
        270 => rotate_270_cw(view),
        _ => return raster.clone(),
    };
    Raster::from_array_unchecked(rotated)
}

fn to_standard(view: ArrayView3<u8>) -> Array3<u8> {
    let mut out = Array3::<u8>::zeros(view.dim());
    out.assign(&view);
    out
}

/// Rotate 90 degrees clockwise; output is (W, H, C).
pub fn rotate_90_cw(image: ArrayView3<u8>) -> Array3<u8> {
    // out[i][j] = in[h - 1 - j][i]
    to_standard(image.permuted_axes([1, 0, 2]).slice_move(s![.., ..;-1, ..]))
}

/// Rotate 180 degrees.
pub fn rotate_180(image: ArrayView3<u8>) -> Array3<u8> {
    to_standard(image.slice_move(s![..;-1, ..;-1, ..]))
}

/// Rotate 270 degrees clockwise (90° counter-clockwise); output is (W, H, C).
pub fn rotate_270_cw(image: ArrayView3<u8>) -> Array3<u8> {
    // out[i][j] = in[j][w - 1 - i]
    to_standard(image.permuted_axes([1, 0, 2]).slice_move(s![..;-1, .., ..]))
}

/// Read the orientation tag from a JPEG/TIFF/PNG container.
///
/// Returns [`OrientationTag::Undefined`] when the file carries no EXIF block
/// or no orientation field.
#[cfg(feature = "exif")]
pub fn read_orientation(bytes: &[u8]) -> crate::error::PhotoResult<OrientationTag> {
    use crate::error::PhotoError;
    use exif::{In, Reader, Tag};

    let exif = match Reader::new().read_from_container(&mut std::io::Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(OrientationTag::Undefined),
        Err(e) => return Err(PhotoError::Metadata(e.to_string())),
    };

    let tag = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(OrientationTag::from_exif)
        .unwrap_or_default();
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3×2 raster where every pixel encodes its own coordinates.
    fn coords() -> Raster {
        Raster::from_fn(3, 2, |x, y| [x as u8, y as u8, 0, 255]).unwrap()
    }

    #[test]
    fn test_exif_mapping() {
        assert_eq!(OrientationTag::from_exif(1), OrientationTag::Normal);
        assert_eq!(OrientationTag::from_exif(6), OrientationTag::Rotate90);
        assert_eq!(OrientationTag::from_exif(3), OrientationTag::Rotate180);
        assert_eq!(OrientationTag::from_exif(8), OrientationTag::Rotate270);
        assert_eq!(OrientationTag::from_exif(2), OrientationTag::Undefined);
        assert_eq!(OrientationTag::from_exif(0), OrientationTag::Undefined);
        assert_eq!(OrientationTag::from_exif(42), OrientationTag::Undefined);
    }

    #[test]
    fn test_no_rotation_is_copy() {
        let r = coords();
        assert_eq!(normalize(&r, OrientationTag::Normal), r);
        assert_eq!(normalize(&r, OrientationTag::Undefined), r);
    }

    #[test]
    fn test_rotate_90_swaps_dimensions() {
        let r = coords();
        let out = normalize(&r, OrientationTag::Rotate90);
        assert_eq!((out.width(), out.height()), (2, 3));
        // top-left of the output is the bottom-left of the input
        assert_eq!(out.pixel(0, 0), [0, 1, 0, 255]);
        assert_eq!(out.pixel(1, 0), [0, 0, 0, 255]);
        assert_eq!(out.pixel(1, 2), [2, 0, 0, 255]);
        assert_eq!(out.pixel(0, 2), [2, 1, 0, 255]);
    }

    #[test]
    fn test_rotate_180_mirrors_both_axes() {
        let r = coords();
        let out = normalize(&r, OrientationTag::Rotate180);
        assert_eq!((out.width(), out.height()), (3, 2));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(out.pixel(x, y), r.pixel(2 - x, 1 - y));
            }
        }
    }

    #[test]
    fn test_rotate_270_swaps_dimensions() {
        let r = coords();
        let out = normalize(&r, OrientationTag::Rotate270);
        assert_eq!((out.width(), out.height()), (2, 3));
        // top-left of the output is the top-right of the input
        assert_eq!(out.pixel(0, 0), [2, 0, 0, 255]);
        assert_eq!(out.pixel(1, 0), [2, 1, 0, 255]);
        assert_eq!(out.pixel(0, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn test_quarter_turns_compose() {
        let r = coords();
        let once = normalize(&r, OrientationTag::Rotate90);
        let twice = normalize(&once, OrientationTag::Rotate90);
        assert_eq!(twice, normalize(&r, OrientationTag::Rotate180));
        let back = normalize(&once, OrientationTag::Rotate270);
        assert_eq!(back, r);
    }

    #[test]
    fn test_rotated_buffer_is_row_major() {
        let out = normalize(&coords(), OrientationTag::Rotate90);
        let flat = out.to_vec();
        assert_eq!(&flat[0..4], &[0, 1, 0, 255]);
        assert_eq!(&flat[4..8], &[0, 0, 0, 255]);
    }

    #[cfg(feature = "exif")]
    #[test]
    fn test_read_orientation_without_exif() {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .unwrap();
        assert_eq!(read_orientation(&bytes).unwrap(), OrientationTag::Undefined);
    }
}
