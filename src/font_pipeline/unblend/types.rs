//! Types for unblending operations

use std::fmt;
use std::str::FromStr;

use crate::font_pipeline::atlas::MarkerRow;
use crate::font_pipeline::common::error::{CompileError, Result};
use crate::font_pipeline::pixels::{PixelBuffer, PixelView, Rect};

/// How the atlas text was composited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Text plate stacked above a plate of the bare background
    KnownBackground,
    /// Text rendered onto a transparent canvas
    RawTransparent,
    /// Text rendered onto pure black
    BlackBackground,
}

impl BlendMode {
    /// Name used in font descriptor files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KnownBackground => "removebg",
            Self::RawTransparent => "raw",
            Self::BlackBackground => "blackbg",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlendMode {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "removebg" | "knownbg" | "known_background" | "knownbackground" => Ok(Self::KnownBackground),
            "raw" | "transparent" | "raw_transparent" | "rawtransparent" => Ok(Self::RawTransparent),
            "blackbg" | "black_background" | "blackbackground" => Ok(Self::BlackBackground),
            _ => Err(CompileError::UnsupportedBlendMode(s.to_string())),
        }
    }
}

/// Unblended plate with the atlas marker row appended as its last row.
#[derive(Debug, Clone)]
pub struct RecoveredForeground {
    image: PixelBuffer,
    plate_height: usize,
}

impl RecoveredForeground {
    pub fn assemble(unblended: PixelBuffer, marker: &MarkerRow) -> Result<Self> {
        let width = unblended.width();
        let plate_height = unblended.height();
        if marker.width() != width {
            return Err(CompileError::MalformedAtlas(format!(
                "marker row width {} does not match plate width {}",
                marker.width(),
                width
            )));
        }

        let mut image = PixelBuffer::new(width, plate_height + 1);
        unblended.copy_to(&mut image, unblended.bounds(), 0, 0)?;
        let row = marker.pixels();
        row.copy_to(&mut image, row.bounds(), 0, plate_height)?;

        Ok(Self { image, plate_height })
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn plate_height(&self) -> usize {
        self.plate_height
    }

    /// The full buffer, marker row included.
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    /// The working rows, marker row excluded.
    pub fn plate(&self) -> PixelView<'_> {
        PixelView::new(&self.image, Rect::new(0, 0, self.width(), self.plate_height))
    }
}
