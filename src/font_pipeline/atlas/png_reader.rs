//! PNG atlas reader implementation using the image library.
//!
//! The decoder yields straight (non-premultiplied) RGBA8 samples, which is the
//! precondition the unblending stage relies on. Colorspace chunks (sRGB, gAMA,
//! iCCP) are ignored rather than applied, so sample values reach the pipeline
//! exactly as authored.

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::font_pipeline::atlas::reader::AtlasReader;
use crate::font_pipeline::common::error::{CompileError, Result};
use crate::font_pipeline::pixels::PixelBuffer;

/// Atlas reader that decodes PNG bytes.
pub struct PngAtlasReader;

impl AtlasReader for PngAtlasReader {
    fn read_atlas(&self, data: &[u8]) -> Result<PixelBuffer> {
        debug!("Decoding PNG atlas, {} bytes", data.len());

        let decoded = image::load_from_memory_with_format(data, ImageFormat::Png)
            .map_err(|e| CompileError::DecodeError(e.to_string()))?;

        // Gray, palette and RGB sources all widen to RGBA8 with opaque alpha.
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        debug!("Decoded atlas: {}x{}", width, height);

        PixelBuffer::from_raw(width as usize, height as usize, rgba.into_raw())
    }
}

/// Encodes `buffer` as a PNG file at `path`.
pub fn write_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.data().to_vec(),
    )
    .ok_or(CompileError::InvalidDimensions(buffer.width(), buffer.height()))?;

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| CompileError::OutputWriteError(format!("{}: {}", path.display(), e)))
}
