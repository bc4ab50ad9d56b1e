//! Atlas layout types

use crate::font_pipeline::pixels::PixelBuffer;

/// The one-pixel provenance row at the bottom of every atlas.
///
/// It is carried through compilation untouched and appended beneath the
/// recovered foreground and every glyph crop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRow(PixelBuffer);

impl MarkerRow {
    pub(crate) fn new(row: PixelBuffer) -> Self {
        debug_assert_eq!(row.height(), 1);
        Self(row)
    }

    pub fn width(&self) -> usize {
        self.0.width()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.0
    }
}

/// The logical regions of a composite atlas.
#[derive(Debug, Clone)]
pub struct AtlasPlates {
    /// Rendered text plate
    pub foreground: PixelBuffer,
    /// Bare background plate, present only for known-background atlases
    pub background: Option<PixelBuffer>,
    pub marker: MarkerRow,
}

impl AtlasPlates {
    pub fn plate_height(&self) -> usize {
        self.foreground.height()
    }
}
