use approx::assert_abs_diff_eq;

use super::{black_background, known_background, transparent};
use crate::font_pipeline::atlas::{MarkerRow, split};
use crate::font_pipeline::common::error::CompileError;
use crate::font_pipeline::pixels::{PixelBuffer, Rgb};
use crate::font_pipeline::unblend::{BlendMode, RecoveredForeground, unblend};

const LEVELS: [f32; 3] = [0.0, 0.5, 1.0];

fn solid(width: usize, height: usize, rgba: [u8; 4]) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            buf.set_pixel(x, y, rgba);
        }
    }
    buf
}

fn colors() -> impl Iterator<Item = [f32; 3]> {
    LEVELS
        .into_iter()
        .flat_map(|r| LEVELS.into_iter().flat_map(move |g| LEVELS.into_iter().map(move |b| [r, g, b])))
}

#[test]
fn test_known_background_decomposition_is_clamped() {
    for shadow in [false, true] {
        for composite in colors() {
            for background in colors() {
                for target in colors() {
                    let d = known_background::decompose(composite, background, target, shadow);
                    assert!((0.0..=1.0).contains(&d.ink), "{composite:?} {background:?} {target:?}: {d:?}");
                    assert!((0.0..=1.0).contains(&d.shadow));
                    assert!(d.ink + d.shadow <= 1.0 + 1e-6);
                }
            }
        }
    }
}

#[test]
fn test_other_modes_are_clamped() {
    for composite in colors() {
        let px = [
            (composite[0] * 255.0) as u8,
            (composite[1] * 255.0) as u8,
            (composite[2] * 255.0) as u8,
            (composite[2] * 255.0) as u8,
        ];
        for target in colors() {
            let t = Rgb::new((target[0] * 255.0) as u8, (target[1] * 255.0) as u8, (target[2] * 255.0) as u8);
            let black = black_background::alpha(px, t);
            assert!((0.0..=1.0).contains(&black));
            for shadow in [false, true] {
                let raw = transparent::alpha(px, target, shadow);
                assert!((0.0..=1.0).contains(&raw));
            }
        }
    }
}

#[test]
fn test_known_background_identity() {
    let target = [0.8, 0.6, 0.2];
    for composite in colors() {
        let d = known_background::decompose(composite, target, target, false);
        assert_eq!(d.ink, 0.0);
    }

    let target = Rgb::new(200, 150, 50);
    let plate = solid(3, 2, [17, 99, 230, 255]);
    let background = solid(3, 2, [200, 150, 50, 255]);
    let out = unblend(&plate, Some(&background), target, false, BlendMode::KnownBackground).unwrap();
    assert!(out.data().chunks_exact(4).all(|px| px[3] == 0));
}

#[test]
fn test_known_background_partial_coverage() {
    // 25% white ink over a mid-gray background.
    let background = [0.4, 0.4, 0.4];
    let target = [1.0, 1.0, 1.0];
    let composite = [0.55, 0.55, 0.55];
    let d = known_background::decompose(composite, background, target, false);
    assert_abs_diff_eq!(d.ink, 0.25, epsilon = 1e-4);
}

#[test]
fn test_known_background_separates_shadow() {
    // Half red ink, a quarter black shadow, over white.
    let background = [1.0, 1.0, 1.0];
    let target = [1.0, 0.0, 0.0];
    let composite = [0.75, 0.25, 0.25];

    let d = known_background::decompose(composite, background, target, true);
    assert_abs_diff_eq!(d.ink, 0.5, epsilon = 1e-4);
    assert_abs_diff_eq!(d.shadow, 0.25, epsilon = 1e-4);

    // Ignoring the shadow lets it leak into the ink estimate.
    let naive = known_background::decompose(composite, background, target, false);
    assert!((naive.ink - 0.5).abs() > 0.05);

    // Pure shadow carries no ink.
    let d = known_background::decompose([0.6, 0.6, 0.6], background, target, true);
    assert_abs_diff_eq!(d.ink, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(d.shadow, 0.4, epsilon = 1e-4);
}

#[test]
fn test_known_background_requires_matching_plate() {
    let plate = solid(4, 2, [0, 0, 0, 255]);
    let result = unblend(&plate, None, Rgb::WHITE, false, BlendMode::KnownBackground);
    assert!(matches!(result, Err(CompileError::MalformedAtlas(_))));

    let background = solid(3, 2, [0, 0, 0, 255]);
    let result = unblend(&plate, Some(&background), Rgb::WHITE, false, BlendMode::KnownBackground);
    assert!(matches!(result, Err(CompileError::MalformedAtlas(_))));
}

#[test]
fn test_black_background_saturation() {
    let target = Rgb::new(255, 200, 0);
    let alpha = black_background::alpha([255, 200, 0, 255], target);
    assert_abs_diff_eq!(alpha, 1.0, epsilon = 1e-3);

    let alpha = black_background::alpha([0, 0, 0, 255], target);
    assert_abs_diff_eq!(alpha, 0.0, epsilon = 1e-3);

    assert_eq!(black_background::alpha([90, 90, 90, 255], Rgb::BLACK), 0.0);

    let plate = solid(2, 2, [255, 200, 0, 255]);
    let out = unblend(&plate, None, target, false, BlendMode::BlackBackground).unwrap();
    assert_eq!(out.pixel(1, 1), [255, 200, 0, 255]);
}

#[test]
fn test_black_background_ignores_supplied_plate() {
    let plate = solid(2, 1, [128, 128, 128, 255]);
    let unrelated = solid(5, 5, [255, 255, 255, 255]);
    let out = unblend(&plate, Some(&unrelated), Rgb::WHITE, true, BlendMode::BlackBackground).unwrap();
    assert_eq!(out.pixel(0, 0), [255, 255, 255, 128]);
}

#[test]
fn test_transparent_uses_coverage() {
    let target = [1.0, 1.0, 0.0];
    assert_abs_diff_eq!(transparent::alpha([255, 255, 0, 128], target, false), 128.0 / 255.0);

    // Shadowed: color is half as bright as the ink, so half the coverage is ink.
    let alpha = transparent::alpha([128, 128, 0, 255], target, true);
    assert_abs_diff_eq!(alpha, 0.502, epsilon = 1e-3);

    // Fully transparent pixels never carry ink.
    assert_eq!(transparent::alpha([255, 255, 0, 0], target, true), 0.0);
}

#[test]
fn test_recovered_rgb_is_target_color() {
    let mut plate = PixelBuffer::new(3, 1);
    plate.set_pixel(0, 0, [10, 200, 30, 255]);
    plate.set_pixel(1, 0, [10, 200, 30, 0]);
    plate.set_pixel(2, 0, [90, 90, 90, 64]);
    let target = Rgb::new(40, 220, 60);

    let out = unblend(&plate, None, target, false, BlendMode::RawTransparent).unwrap();
    assert_eq!(out.pixel(0, 0), [40, 220, 60, 255]);
    assert_eq!(out.pixel(1, 0), [0, 0, 0, 0]);
    assert_eq!(out.pixel(2, 0), [40, 220, 60, 64]);
}

#[test]
fn test_assemble_appends_marker_row() {
    let mut composite = solid(4, 3, [255, 255, 255, 255]);
    composite.set_pixel(2, 2, [255, 0, 0, 255]);
    let plates = split(&composite, BlendMode::BlackBackground).unwrap();
    let unblended = unblend(&plates.foreground, None, Rgb::WHITE, false, BlendMode::BlackBackground).unwrap();

    let recovered = RecoveredForeground::assemble(unblended, &plates.marker).unwrap();
    assert_eq!(recovered.plate_height(), 2);
    assert_eq!(recovered.image().height(), 3);
    assert_eq!(recovered.image().pixel(2, 2), [255, 0, 0, 255]);
    assert_eq!(recovered.plate().height(), 2);

    let narrow = MarkerRow::new(PixelBuffer::new(3, 1));
    let result = RecoveredForeground::assemble(PixelBuffer::new(4, 2), &narrow);
    assert!(matches!(result, Err(CompileError::MalformedAtlas(_))));
}

#[test]
fn test_blend_mode_names() {
    assert_eq!("removebg".parse::<BlendMode>().unwrap(), BlendMode::KnownBackground);
    assert_eq!("RAW".parse::<BlendMode>().unwrap(), BlendMode::RawTransparent);
    assert_eq!("black_background".parse::<BlendMode>().unwrap(), BlendMode::BlackBackground);
    assert_eq!(BlendMode::KnownBackground.to_string(), "removebg");

    let result = "multiply".parse::<BlendMode>();
    assert!(matches!(result, Err(CompileError::UnsupportedBlendMode(ref m)) if m == "multiply"));
}
