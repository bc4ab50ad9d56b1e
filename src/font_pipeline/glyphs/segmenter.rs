use std::collections::BTreeMap;
use std::ops::Range;

use tracing::{debug, instrument, warn};

use crate::font_pipeline::common::error::{CompileError, Result};
use crate::font_pipeline::descriptor::FontDescriptor;
use crate::font_pipeline::glyphs::types::{FontTemplate, GlyphTemplate, InkPixel};
use crate::font_pipeline::pixels::{PixelBuffer, PixelView, Rect};
use crate::font_pipeline::unblend::RecoveredForeground;

const SPACE: char = ' ';

#[inline]
fn is_ink(alpha: u8, threshold: f32) -> bool {
    f32::from(alpha) / 255.0 >= threshold
}

/// Maximal runs of columns that hold at least one ink pixel, left to right.
fn ink_runs(plate: &PixelView<'_>, threshold: f32) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = None;
    for x in 0..plate.width() {
        let inked = plate.column_alpha(x).any(|a| is_ink(a, threshold));
        match (inked, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                runs.push(s..x);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..plate.width());
    }
    runs
}

/// Alpha values this close to the threshold flip with a single quantization
/// step. Unblending premultiplied input shifts exactly these pixels, so they
/// are reported, not rejected.
fn count_edge_noise(plate: &PixelView<'_>, threshold: f32) -> usize {
    let step = 1.0 / 255.0;
    let mut count = 0;
    for x in 0..plate.width() {
        count += plate
            .column_alpha(x)
            .filter(|&a| a > 0 && (f32::from(a) / 255.0 - threshold).abs() < step)
            .count();
    }
    count
}

/// Pairs runs with the non-space characters of `sample`. Returns the first run
/// seen for each character.
fn measure(sample: &str, runs: &[Range<usize>], space_width: u32) -> Result<BTreeMap<char, Range<usize>>> {
    let expected = sample.chars().filter(|&c| c != SPACE).count();
    if expected != runs.len() {
        return Err(CompileError::GlyphCountMismatch {
            expected,
            found: runs.len(),
        });
    }

    let mut measured = BTreeMap::new();
    let mut next = 0;
    let mut after_space = false;
    for c in sample.chars() {
        if c == SPACE {
            after_space = true;
            continue;
        }
        let run = &runs[next];
        if after_space && next > 0 {
            let gap = run.start - runs[next - 1].end;
            if gap < space_width as usize {
                warn!(
                    column = run.start,
                    gap,
                    space_width,
                    "Gap before {:?} is narrower than a space",
                    c
                );
            }
        }
        measured.entry(c).or_insert_with(|| run.clone());
        after_space = false;
        next += 1;
    }
    Ok(measured)
}

fn crop_glyph(recovered: &RecoveredForeground, c: char, start: usize, width: usize, threshold: f32) -> Result<GlyphTemplate> {
    let plate_height = recovered.plate_height();
    let mut template = PixelBuffer::new(width, plate_height + 1);

    // Overrides may reach past the right edge; those columns stay transparent.
    let visible = width.min(recovered.width() - start);
    recovered
        .image()
        .copy_to(&mut template, Rect::new(start, 0, visible, plate_height + 1), 0, 0)?;

    let mut pixel_mask = Vec::new();
    for y in 0..plate_height {
        for x in 0..visible {
            let alpha = template.pixel(x, y)[3];
            if is_ink(alpha, threshold) {
                pixel_mask.push(InkPixel {
                    x: x as u32,
                    y: y as u32,
                    alpha,
                });
            }
        }
    }

    Ok(GlyphTemplate {
        character: c,
        width: width as u32,
        pixel_mask,
        template,
    })
}

/// Segments `recovered` into glyph templates for every character of `descriptor`.
#[instrument(skip_all, fields(width = recovered.width(), height = recovered.plate_height()))]
pub fn build(recovered: &RecoveredForeground, descriptor: &FontDescriptor) -> Result<FontTemplate> {
    let threshold = descriptor.threshold();
    let plate = recovered.plate();

    let runs = ink_runs(&plate, threshold);
    debug!(runs = runs.len(), "Located ink runs");

    let noise = count_edge_noise(&plate, threshold);
    if noise > 0 {
        debug!(pixels = noise, "Pixels within one step of the ink threshold");
    }

    let measured = measure(descriptor.sample_text(), &runs, descriptor.space_width())?;
    for c in measured.keys().filter(|c| !descriptor.characters().contains(*c)) {
        debug!("Sample character {:?} is not part of the font, skipping", c);
    }

    let mut glyphs = BTreeMap::new();
    for &c in descriptor.characters() {
        let run = measured.get(&c).ok_or(CompileError::MissingCharacter(c))?;
        let width = match descriptor.width_override(c) {
            Some(w) => {
                debug!(measured = run.len(), width = w, "Width override for {:?}", c);
                w as usize
            }
            None => run.len(),
        };
        glyphs.insert(c, crop_glyph(recovered, c, run.start, width, threshold)?);
    }

    Ok(FontTemplate {
        baseline_y: descriptor.baseline_y(),
        space_width: descriptor.space_width(),
        height: recovered.plate_height() as u32,
        threshold,
        shadow: descriptor.has_shadow(),
        glyphs,
    })
}
