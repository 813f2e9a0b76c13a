//! Editing session: one upright original plus the current selection.
//!
//! The original is fixed at open time (after orientation normalization) and
//! never changes. Each [`EditSession::select`] call replaces the current
//! selection with a fresh render from the original; export encodes whatever
//! is currently selected.

use log::debug;

use crate::encode::{EncodeOptions, EncodeOutcome, SizeTargetedEncoder};
use crate::error::PhotoResult;
use crate::filters::{FilterEngine, FilterKind};
use crate::orientation::{normalize, OrientationTag};
use crate::raster::Raster;

#[derive(Debug, Clone)]
pub struct EditSession {
    original: Raster,
    current: Raster,
    kind: FilterKind,
}

impl EditSession {
    /// Normalize `raster` upright and start a session on it.
    pub fn open(raster: &Raster, orientation: OrientationTag) -> Self {
        let original = normalize(raster, orientation);
        debug!(
            "opened {}x{} session (orientation {:?})",
            original.width(),
            original.height(),
            orientation
        );
        Self {
            current: original.clone(),
            original,
            kind: FilterKind::Reset,
        }
    }

    /// Decode image bytes and open a session on the result.
    pub fn decode(bytes: &[u8], orientation: OrientationTag) -> PhotoResult<Self> {
        Ok(Self::open(&Raster::decode(bytes)?, orientation))
    }

    pub fn original(&self) -> &Raster {
        &self.original
    }

    pub fn current(&self) -> &Raster {
        &self.current
    }

    /// The filter that produced [`current`](Self::current).
    pub fn selected(&self) -> FilterKind {
        self.kind
    }

    /// Render `kind` from the original and make it the current selection.
    pub fn select(&mut self, kind: FilterKind) -> &Raster {
        self.current = FilterEngine::apply(&self.original, kind);
        self.kind = kind;
        &self.current
    }

    pub fn reset(&mut self) -> &Raster {
        self.select(FilterKind::Reset)
    }

    /// Thumbnails for every preset, rendered in parallel.
    pub fn previews(&self) -> Vec<(FilterKind, Raster)> {
        let kinds = FilterKind::PRESETS;
        FilterKind::PRESETS
            .into_iter()
            .zip(FilterEngine::previews(&self.original, &kinds))
            .collect()
    }

    /// Encode the current selection under the configured byte budget.
    pub fn export(&self, options: EncodeOptions) -> PhotoResult<EncodeOutcome> {
        SizeTargetedEncoder::new(options).encode_detailed(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::DEFAULT_TARGET_BYTES;

    fn portrait() -> Raster {
        Raster::from_fn(4, 6, |x, y| [x as u8 * 60, y as u8 * 40, 100, 255]).unwrap()
    }

    #[test]
    fn test_open_normalizes_once() {
        let session = EditSession::open(&portrait(), OrientationTag::Rotate90);
        assert_eq!((session.original().width(), session.original().height()), (6, 4));
        assert_eq!(session.current(), session.original());
        assert_eq!(session.selected(), FilterKind::Reset);
    }

    #[test]
    fn test_select_replaces_current_without_touching_original() {
        let mut session = EditSession::open(&portrait(), OrientationTag::Normal);
        let before = session.original().clone();

        session.select(FilterKind::Negative);
        assert_eq!(session.selected(), FilterKind::Negative);
        assert_ne!(session.current(), &before);
        assert_eq!(session.original(), &before);

        // negative of the negative is computed from the original, not the current
        session.select(FilterKind::Negative);
        assert_ne!(session.current(), &before);

        session.reset();
        assert_eq!(session.current(), &before);
    }

    #[test]
    fn test_repeated_brightness_does_not_compound() {
        let mut session = EditSession::open(&portrait(), OrientationTag::Normal);
        session.select(FilterKind::Brightness(40));
        let once = session.current().clone();
        session.select(FilterKind::Brightness(40));
        assert_eq!(session.current(), &once);
    }

    #[test]
    fn test_previews_cover_presets() {
        let session = EditSession::open(&portrait(), OrientationTag::Normal);
        let previews = session.previews();
        assert_eq!(previews.len(), FilterKind::PRESETS.len());
        assert_eq!(previews[0].0, FilterKind::Reset);
        assert_eq!(&previews[0].1, session.original());
    }

    #[test]
    fn test_export_encodes_current() {
        let mut session = EditSession::open(&portrait(), OrientationTag::Rotate270);
        session.select(FilterKind::Sepia);
        let out = session.export(EncodeOptions::default()).unwrap();
        assert!(out.within_budget);
        assert!(out.bytes.len() <= DEFAULT_TARGET_BYTES);
        let decoded = Raster::decode(&out.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
    }

    #[test]
    fn test_decode_failure_surfaces() {
        assert!(EditSession::decode(b"\x00\x01", OrientationTag::Normal).is_err());
    }
}
