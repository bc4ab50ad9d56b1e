//! Validated font descriptor

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::font_pipeline::common::error::{CompileError, Result};
use crate::font_pipeline::descriptor::meta::FontMeta;
use crate::font_pipeline::pixels::Rgb;
use crate::font_pipeline::unblend::BlendMode;

/// Configuration for compiling one font. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    baseline_y: i32,
    space_width: u32,
    threshold: f32,
    target_color: Rgb,
    has_shadow: bool,
    characters: Vec<char>,
    sample_text: String,
    width_overrides: BTreeMap<char, u32>,
    blend_mode: BlendMode,
    image: Option<PathBuf>,
}

impl FontDescriptor {
    pub fn builder() -> FontDescriptorBuilder {
        FontDescriptorBuilder::default()
    }

    /// Parses and validates a fontmeta JSON document.
    pub fn from_json(source: &str) -> Result<Self> {
        FontMeta::from_json(source)?.into_descriptor()
    }

    /// Vertical offset of the text baseline inside the glyph plate
    pub fn baseline_y(&self) -> i32 {
        self.baseline_y
    }

    pub fn space_width(&self) -> u32 {
        self.space_width
    }

    /// Minimum normalized alpha for a pixel to count as ink
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn target_color(&self) -> Rgb {
        self.target_color
    }

    pub fn has_shadow(&self) -> bool {
        self.has_shadow
    }

    pub fn characters(&self) -> &[char] {
        &self.characters
    }

    pub fn sample_text(&self) -> &str {
        &self.sample_text
    }

    pub fn width_overrides(&self) -> &BTreeMap<char, u32> {
        &self.width_overrides
    }

    pub fn width_override(&self, c: char) -> Option<u32> {
        self.width_overrides.get(&c).copied()
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Atlas path named by the descriptor, relative to the descriptor file
    pub fn image(&self) -> Option<&Path> {
        self.image.as_deref()
    }
}

/// Builder for FontDescriptor
#[derive(Default)]
pub struct FontDescriptorBuilder {
    baseline_y: Option<i32>,
    space_width: Option<u32>,
    threshold: Option<f32>,
    target_color: Option<Rgb>,
    has_shadow: Option<bool>,
    characters: Option<String>,
    sample_text: Option<String>,
    width_overrides: BTreeMap<char, u32>,
    blend_mode: Option<BlendMode>,
    image: Option<PathBuf>,
}

impl FontDescriptorBuilder {
    pub fn baseline_y(mut self, baseline_y: i32) -> Self {
        self.baseline_y = Some(baseline_y);
        self
    }

    pub fn space_width(mut self, space_width: u32) -> Self {
        self.space_width = Some(space_width);
        self
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn target_color(mut self, color: Rgb) -> Self {
        self.target_color = Some(color);
        self
    }

    pub fn shadow(mut self, enable: bool) -> Self {
        self.has_shadow = Some(enable);
        self
    }

    pub fn characters(mut self, characters: impl Into<String>) -> Self {
        self.characters = Some(characters.into());
        self
    }

    pub fn sample_text(mut self, text: impl Into<String>) -> Self {
        self.sample_text = Some(text.into());
        self
    }

    pub fn width_override(mut self, c: char, width: u32) -> Self {
        self.width_overrides.insert(c, width);
        self
    }

    pub fn blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = Some(mode);
        self
    }

    pub fn image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    pub fn build(self) -> Result<FontDescriptor> {
        let invalid = |msg: String| CompileError::InvalidDescriptor(msg);

        let threshold = self
            .threshold
            .ok_or_else(|| invalid("no threshold given".to_string()))?;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(invalid(format!("threshold {} is outside [0, 1]", threshold)));
        }

        let characters: Vec<char> = self
            .characters
            .ok_or_else(|| invalid("no character set given".to_string()))?
            .chars()
            .collect();
        if characters.is_empty() {
            return Err(invalid("character set is empty".to_string()));
        }
        let mut seen = BTreeSet::new();
        for &c in &characters {
            if c.is_whitespace() {
                return Err(invalid(format!(
                    "character set contains whitespace {:?}; spaces are described by the space width",
                    c
                )));
            }
            if !seen.insert(c) {
                return Err(invalid(format!("character {:?} is listed twice", c)));
            }
        }

        let sample_text = self
            .sample_text
            .ok_or_else(|| invalid("no sample text given".to_string()))?;
        if sample_text.chars().all(|c| c == ' ') {
            return Err(invalid("sample text has no glyphs".to_string()));
        }

        if let Some((c, _)) = self.width_overrides.iter().find(|(_, w)| **w == 0) {
            return Err(invalid(format!("width override for {:?} must be positive", c)));
        }

        let blend_mode = self
            .blend_mode
            .ok_or_else(|| invalid("no blend mode given".to_string()))?;
        let target_color = self
            .target_color
            .ok_or_else(|| invalid("no target color given".to_string()))?;
        let baseline_y = self
            .baseline_y
            .ok_or_else(|| invalid("no baseline given".to_string()))?;
        let space_width = self
            .space_width
            .ok_or_else(|| invalid("no space width given".to_string()))?;

        Ok(FontDescriptor {
            baseline_y,
            space_width,
            threshold,
            target_color,
            has_shadow: self.has_shadow.unwrap_or(false),
            characters,
            sample_text,
            width_overrides: self.width_overrides,
            blend_mode,
            image: self.image,
        })
    }
}
