//! Transparent-canvas recovery.
//!
//! Text drawn onto a transparent canvas keeps its coverage in the alpha
//! channel. When a black shadow is drawn too, the stored color is the
//! coverage-weighted mix `(a T + s 0) / (a + s)` and its brightness relative to
//! `T` gives the ink's share of the coverage.

const MIN_TARGET: f32 = 1e-6;

pub(super) fn alpha(px: [u8; 4], target: [f32; 3], shadow: bool) -> f32 {
    let coverage = f32::from(px[3]) / 255.0;
    if !shadow {
        return coverage;
    }

    let tt = target[0] * target[0] + target[1] * target[1] + target[2] * target[2];
    if tt < MIN_TARGET {
        // Black ink and a black shadow are the same thing.
        return coverage;
    }

    let color = [
        f32::from(px[0]) / 255.0,
        f32::from(px[1]) / 255.0,
        f32::from(px[2]) / 255.0,
    ];
    let share = (color[0] * target[0] + color[1] * target[1] + color[2] * target[2]) / tt;
    coverage * share.clamp(0.0, 1.0)
}
