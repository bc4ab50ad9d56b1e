use crate::font_pipeline::pixels::Rgb;

/// Over black, `Cf = a T`, so the brightest channel ratio is the opacity.
pub(super) fn alpha(px: [u8; 4], target: Rgb) -> f32 {
    let peak = target.max_channel();
    if peak == 0 {
        return 0.0;
    }
    let observed = px[0].max(px[1]).max(px[2]);
    (f32::from(observed) / f32::from(peak)).min(1.0)
}
