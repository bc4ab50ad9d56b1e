use tracing::debug;

use crate::font_pipeline::atlas::types::{AtlasPlates, MarkerRow};
use crate::font_pipeline::common::error::{CompileError, Result};
use crate::font_pipeline::pixels::{PixelBuffer, Rect};
use crate::font_pipeline::unblend::BlendMode;

/// Splits a composite atlas into its plates and marker row.
///
/// Single-plate modes use rows `0..H-1` as the foreground. Known-background
/// atlases stack the text plate above an equally tall background plate, so
/// `H` must be odd.
pub fn split(composite: &PixelBuffer, mode: BlendMode) -> Result<AtlasPlates> {
    let width = composite.width();
    let height = composite.height();

    if height == 0 {
        return Err(CompileError::MalformedAtlas(format!(
            "atlas {}x{} has no marker row",
            width, height
        )));
    }
    let working = height - 1;
    let marker = MarkerRow::new(composite.crop(Rect::new(0, working, width, 1))?);

    let plates = match mode {
        BlendMode::KnownBackground => {
            if working % 2 != 0 {
                return Err(CompileError::MalformedAtlas(format!(
                    "known-background atlas height {} must be odd (two equal plates plus a marker row)",
                    height
                )));
            }
            let plate = working / 2;
            if plate == 0 {
                return Err(CompileError::MalformedAtlas(format!(
                    "known-background atlas height {} leaves empty plates",
                    height
                )));
            }
            AtlasPlates {
                foreground: composite.crop(Rect::new(0, 0, width, plate))?,
                background: Some(composite.crop(Rect::new(0, plate, width, plate))?),
                marker,
            }
        }
        BlendMode::RawTransparent | BlendMode::BlackBackground => {
            if working == 0 {
                return Err(CompileError::MalformedAtlas(format!(
                    "atlas height {} leaves an empty plate",
                    height
                )));
            }
            AtlasPlates {
                foreground: composite.crop(Rect::new(0, 0, width, working))?,
                background: None,
                marker,
            }
        }
    };

    debug!(
        mode = ?mode,
        width,
        plate_height = plates.plate_height(),
        "Split atlas"
    );
    Ok(plates)
}
