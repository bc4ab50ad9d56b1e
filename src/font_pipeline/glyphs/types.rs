//! Compiled font template types

use std::collections::BTreeMap;

use serde::Serialize;

use crate::font_pipeline::pixels::PixelBuffer;

/// One ink pixel of a glyph crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InkPixel {
    pub x: u32,
    pub y: u32,
    pub alpha: u8,
}

/// Template for a single character
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphTemplate {
    pub character: char,
    /// Advance width in pixels, always positive
    pub width: u32,
    /// Ink pixels of the crop, row-major, marker row excluded
    pub pixel_mask: Vec<InkPixel>,
    /// `width x (height + 1)` crop of the recovered foreground, marker row last
    pub template: PixelBuffer,
}

/// The compiled font handed to the matcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontTemplate {
    pub baseline_y: i32,
    pub space_width: u32,
    /// Glyph plate height in pixels
    pub height: u32,
    pub threshold: f32,
    pub shadow: bool,
    pub glyphs: BTreeMap<char, GlyphTemplate>,
}

impl FontTemplate {
    pub fn glyph(&self, c: char) -> Option<&GlyphTemplate> {
        self.glyphs.get(&c)
    }

    /// Widest glyph advance, or zero for an empty font.
    pub fn max_width(&self) -> u32 {
        self.glyphs.values().map(|g| g.width).max().unwrap_or(0)
    }
}
