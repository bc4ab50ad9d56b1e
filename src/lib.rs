//! Compiles bitmap font atlases into glyph templates for pixel-matching OCR.

pub mod font_pipeline;
pub mod logger;
