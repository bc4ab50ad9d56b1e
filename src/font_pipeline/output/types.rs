//! Compile configuration types

use std::path::PathBuf;

/// Suffix of font descriptor files.
pub const DESCRIPTOR_SUFFIX: &str = ".fontmeta.json";

/// Suffix of compiled templates written next to their descriptor.
pub const TEMPLATE_SUFFIX: &str = ".font.json";

/// Configuration for font compilation
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// Replaces [`DESCRIPTOR_SUFFIX`] to locate the atlas when the descriptor names none
    pub image_suffix: String,
    /// Indent the encoded template
    pub pretty_output: bool,
    /// Also write the recovered foreground as a PNG here, for inspecting unblending
    pub dump_unblended: Option<PathBuf>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            image_suffix: ".data.png".to_string(),
            pretty_output: false,
            dump_unblended: None,
        }
    }
}

impl CompileConfig {
    pub fn builder() -> CompileConfigBuilder {
        CompileConfigBuilder::default()
    }
}

/// Builder for CompileConfig
#[derive(Default)]
pub struct CompileConfigBuilder {
    image_suffix: Option<String>,
    pretty_output: Option<bool>,
    dump_unblended: Option<Option<PathBuf>>,
}

impl CompileConfigBuilder {
    pub fn image_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.image_suffix = Some(suffix.into());
        self
    }

    pub fn pretty_output(mut self, enable: bool) -> Self {
        self.pretty_output = Some(enable);
        self
    }

    pub fn dump_unblended(mut self, path: Option<PathBuf>) -> Self {
        self.dump_unblended = Some(path);
        self
    }

    pub fn build(self) -> CompileConfig {
        let default = CompileConfig::default();
        CompileConfig {
            image_suffix: self.image_suffix.unwrap_or(default.image_suffix),
            pretty_output: self.pretty_output.unwrap_or(default.pretty_output),
            dump_unblended: self.dump_unblended.unwrap_or(default.dump_unblended),
        }
    }
}
