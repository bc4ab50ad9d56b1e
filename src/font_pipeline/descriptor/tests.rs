use std::path::Path;

use crate::font_pipeline::common::error::CompileError;
use crate::font_pipeline::descriptor::{FontDescriptor, FontDescriptorBuilder, FontMeta};
use crate::font_pipeline::pixels::Rgb;
use crate::font_pipeline::unblend::BlendMode;

const META: &str = r#"{
    "basey": 10,
    "spacewidth": 4,
    "treshold": 0.5,
    "color": [255, 200, 0],
    "shadow": true,
    "chars": "AB!",
    "seconds": "AB !A",
    "img": "atlas.png",
    "bonus": { "!": 3 },
    "unblendmode": "removebg"
}"#;

fn assert_invalid(source: &str) {
    let result = FontDescriptor::from_json(source);
    assert!(
        matches!(result, Err(CompileError::InvalidDescriptor(_))),
        "expected InvalidDescriptor for {source}, got {result:?}"
    );
}

#[test]
fn test_parse_full_meta() {
    let descriptor = FontDescriptor::from_json(META).unwrap();

    assert_eq!(descriptor.baseline_y(), 10);
    assert_eq!(descriptor.space_width(), 4);
    assert_eq!(descriptor.threshold(), 0.5);
    assert_eq!(descriptor.target_color(), Rgb::new(255, 200, 0));
    assert!(descriptor.has_shadow());
    assert_eq!(descriptor.characters(), &['A', 'B', '!']);
    assert_eq!(descriptor.sample_text(), "AB !A");
    assert_eq!(descriptor.width_override('!'), Some(3));
    assert_eq!(descriptor.width_override('A'), None);
    assert_eq!(descriptor.blend_mode(), BlendMode::KnownBackground);
    assert_eq!(descriptor.image(), Some(Path::new("atlas.png")));
}

#[test]
fn test_parse_minimal_meta() {
    let descriptor = FontDescriptor::from_json(
        r#"{"basey": 0, "spacewidth": 2, "threshold": 1.0, "color": [0, 0, 0],
            "chars": "x", "seconds": "x", "unblendmode": "raw"}"#,
    )
    .unwrap();

    assert!(!descriptor.has_shadow());
    assert!(descriptor.width_overrides().is_empty());
    assert_eq!(descriptor.image(), None);
    assert_eq!(descriptor.blend_mode(), BlendMode::RawTransparent);
}

#[test]
fn test_missing_required_field() {
    let meta: serde_json::Value = serde_json::from_str(META).unwrap();
    for field in ["basey", "spacewidth", "treshold", "color", "chars", "seconds", "unblendmode"] {
        let mut partial = meta.clone();
        partial.as_object_mut().unwrap().remove(field);
        let result = FontDescriptor::from_json(&partial.to_string());
        match result {
            Err(CompileError::InvalidDescriptor(msg)) => assert!(msg.contains(field), "{msg}"),
            other => panic!("expected InvalidDescriptor for missing {field}, got {other:?}"),
        }
    }
}

#[test]
fn test_out_of_range_values() {
    assert_invalid(&META.replace("\"treshold\": 0.5", "\"treshold\": 1.5"));
    assert_invalid(&META.replace("\"treshold\": 0.5", "\"treshold\": -0.1"));
    assert_invalid(&META.replace("\"chars\": \"AB!\"", "\"chars\": \"\""));
    assert_invalid(&META.replace("\"chars\": \"AB!\"", "\"chars\": \"ABA\""));
    assert_invalid(&META.replace("\"chars\": \"AB!\"", "\"chars\": \"A B\""));
    assert_invalid(&META.replace("\"seconds\": \"AB !A\"", "\"seconds\": \"   \""));
    assert_invalid(&META.replace("{ \"!\": 3 }", "{ \"!\": 0 }"));
    assert_invalid(&META.replace("{ \"!\": 3 }", "{ \"!\": -2 }"));
    assert_invalid(&META.replace("{ \"!\": 3 }", "{ \"!!\": 3 }"));
    assert_invalid(&META.replace("[255, 200, 0]", "[255, 200]"));
    assert_invalid("not json");
}

#[test]
fn test_unsupported_blend_mode() {
    let result = FontDescriptor::from_json(&META.replace("removebg", "screen"));
    assert!(matches!(result, Err(CompileError::UnsupportedBlendMode(ref m)) if m == "screen"));
}

fn complete_builder(chars: &str, sample: &str) -> FontDescriptorBuilder {
    FontDescriptor::builder()
        .characters(chars)
        .sample_text(sample)
        .threshold(0.5)
        .target_color(Rgb::WHITE)
        .baseline_y(0)
        .space_width(3)
        .blend_mode(BlendMode::BlackBackground)
}

#[test]
fn test_sample_text_coverage_is_not_validated_here() {
    // Coverage is checked during segmentation, where the failing glyph is known.
    assert!(complete_builder("ABC", "AB").build().is_ok());
}

#[test]
fn test_builder_optional_fields() {
    let descriptor = complete_builder("0123456789", "0123456789").build().unwrap();

    assert!(!descriptor.has_shadow());
    assert!(descriptor.width_overrides().is_empty());
    assert_eq!(descriptor.image(), None);

    let result = complete_builder("A", "A").threshold(f32::NAN).build();
    assert!(matches!(result, Err(CompileError::InvalidDescriptor(_))));
}

#[test]
fn test_builder_requires_fields() {
    let cases: [(&str, FontDescriptorBuilder); 5] = [
        (
            "threshold",
            FontDescriptor::builder()
                .characters("A")
                .sample_text("A")
                .target_color(Rgb::WHITE)
                .baseline_y(0)
                .space_width(3)
                .blend_mode(BlendMode::BlackBackground),
        ),
        (
            "target color",
            FontDescriptor::builder()
                .characters("A")
                .sample_text("A")
                .threshold(0.5)
                .baseline_y(0)
                .space_width(3)
                .blend_mode(BlendMode::BlackBackground),
        ),
        (
            "baseline",
            FontDescriptor::builder()
                .characters("A")
                .sample_text("A")
                .threshold(0.5)
                .target_color(Rgb::WHITE)
                .space_width(3)
                .blend_mode(BlendMode::BlackBackground),
        ),
        (
            "space width",
            FontDescriptor::builder()
                .characters("A")
                .sample_text("A")
                .threshold(0.5)
                .target_color(Rgb::WHITE)
                .baseline_y(0)
                .blend_mode(BlendMode::BlackBackground),
        ),
        (
            "blend mode",
            FontDescriptor::builder()
                .characters("A")
                .sample_text("A")
                .threshold(0.5)
                .target_color(Rgb::WHITE)
                .baseline_y(0)
                .space_width(3),
        ),
    ];

    for (field, builder) in cases {
        match builder.build() {
            Err(CompileError::InvalidDescriptor(msg)) => assert!(msg.contains(field), "{msg}"),
            other => panic!("expected InvalidDescriptor without {field}, got {other:?}"),
        }
    }
}

#[test]
fn test_meta_try_from() {
    let meta = FontMeta::from_json(META).unwrap();
    assert_eq!(meta.bonus.get("!"), Some(&3));
    let descriptor = FontDescriptor::try_from(meta).unwrap();
    assert_eq!(descriptor.characters().len(), 3);
}
