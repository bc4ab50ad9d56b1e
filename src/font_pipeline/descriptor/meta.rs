//! On-disk font descriptor ("fontmeta") document.
//!
//! ```json
//! { "basey": 10, "spacewidth": 4, "treshold": 0.5, "color": [255, 255, 255],
//!   "shadow": false, "chars": "AB", "seconds": "AB", "bonus": { "A": 6 },
//!   "unblendmode": "blackbg" }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::font_pipeline::common::error::{CompileError, Result};
use crate::font_pipeline::descriptor::types::FontDescriptor;
use crate::font_pipeline::pixels::Rgb;

/// The descriptor exactly as written, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FontMeta {
    pub basey: Option<i32>,
    pub spacewidth: Option<u32>,
    #[serde(alias = "threshold")]
    pub treshold: Option<f32>,
    pub color: Option<Rgb>,
    #[serde(default)]
    pub shadow: bool,
    pub chars: Option<String>,
    pub seconds: Option<String>,
    pub img: Option<PathBuf>,
    /// Advance width overrides keyed by single-character strings
    #[serde(default)]
    pub bonus: BTreeMap<String, i64>,
    pub unblendmode: Option<String>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| CompileError::InvalidDescriptor(format!("missing required field `{}`", field)))
}

impl FontMeta {
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| CompileError::InvalidDescriptor(e.to_string()))
    }

    pub fn into_descriptor(self) -> Result<FontDescriptor> {
        let mut builder = FontDescriptor::builder()
            .baseline_y(required(self.basey, "basey")?)
            .space_width(required(self.spacewidth, "spacewidth")?)
            .threshold(required(self.treshold, "treshold")?)
            .target_color(required(self.color, "color")?)
            .shadow(self.shadow)
            .characters(required(self.chars, "chars")?)
            .sample_text(required(self.seconds, "seconds")?)
            .blend_mode(required(self.unblendmode, "unblendmode")?.parse()?);

        if let Some(img) = self.img {
            builder = builder.image(img);
        }

        for (key, width) in self.bonus {
            let mut chars = key.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(CompileError::InvalidDescriptor(format!(
                        "width override key {:?} must be a single character",
                        key
                    )));
                }
            };
            let width = u32::try_from(width).map_err(|_| {
                CompileError::InvalidDescriptor(format!("width override for {:?} is out of range: {}", c, width))
            })?;
            builder = builder.width_override(c, width);
        }

        builder.build()
    }
}

impl TryFrom<FontMeta> for FontDescriptor {
    type Error = CompileError;

    fn try_from(meta: FontMeta) -> Result<Self> {
        meta.into_descriptor()
    }
}
