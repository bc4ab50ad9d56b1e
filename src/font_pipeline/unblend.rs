//! Unblending module
//!
//! Recovers ink opacity from text that was alpha-composited against a known,
//! transparent or black background. The recovered buffer is monochrome: RGB is
//! the font's target color wherever alpha is non-zero.

mod black_background;
mod known_background;
mod transparent;
pub mod types;

#[cfg(test)]
mod tests;

use tracing::{debug, instrument};

use crate::font_pipeline::common::error::{CompileError, Result};
use crate::font_pipeline::pixels::{PixelBuffer, Rgb};

pub use types::{BlendMode, RecoveredForeground};

/// Recovers the foreground of a single plate.
///
/// `background` is required for [`BlendMode::KnownBackground`] and must match
/// the foreground's dimensions; other modes ignore it. The result has the
/// plate's dimensions; [`RecoveredForeground::assemble`] re-attaches the
/// marker row.
#[instrument(skip_all, fields(mode = ?mode, shadow = has_shadow, width = foreground.width(), height = foreground.height()))]
pub fn unblend(
    foreground: &PixelBuffer,
    background: Option<&PixelBuffer>,
    target: Rgb,
    has_shadow: bool,
    mode: BlendMode,
) -> Result<PixelBuffer> {
    let target_n = target.normalized();

    let recovered = match mode {
        BlendMode::KnownBackground => {
            let background = background.ok_or_else(|| {
                CompileError::MalformedAtlas(
                    "known-background unblending needs a background plate".to_string(),
                )
            })?;
            if background.width() != foreground.width() || background.height() != foreground.height() {
                return Err(CompileError::MalformedAtlas(format!(
                    "background plate {}x{} does not match text plate {}x{}",
                    background.width(),
                    background.height(),
                    foreground.width(),
                    foreground.height()
                )));
            }
            map_alpha(foreground, target, |x, y, px| {
                let bg = background.pixel(x, y);
                known_background::decompose(normalize(px), normalize(bg), target_n, has_shadow).ink
            })
        }
        BlendMode::RawTransparent => {
            map_alpha(foreground, target, |_, _, px| transparent::alpha(px, target_n, has_shadow))
        }
        BlendMode::BlackBackground => {
            if has_shadow {
                debug!("Shadow flag has no effect on a black background");
            }
            map_alpha(foreground, target, |_, _, px| black_background::alpha(px, target))
        }
    };

    Ok(recovered)
}

fn normalize(px: [u8; 4]) -> [f32; 3] {
    [
        f32::from(px[0]) / 255.0,
        f32::from(px[1]) / 255.0,
        f32::from(px[2]) / 255.0,
    ]
}

/// Converts a normalized alpha to its 8-bit sample, clamping first.
pub(crate) fn quantize(alpha: f32) -> u8 {
    if alpha.is_nan() {
        return 0;
    }
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn map_alpha<F>(plate: &PixelBuffer, target: Rgb, mut alpha_at: F) -> PixelBuffer
where
    F: FnMut(usize, usize, [u8; 4]) -> f32,
{
    let mut out = PixelBuffer::new(plate.width(), plate.height());
    for y in 0..plate.height() {
        for x in 0..plate.width() {
            let a = quantize(alpha_at(x, y, plate.pixel(x, y)));
            if a > 0 {
                out.set_pixel(x, y, [target.r, target.g, target.b, a]);
            }
        }
    }
    out
}
