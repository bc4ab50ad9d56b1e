use std::io::Write;

use crate::font_pipeline::common::error::Result;
use crate::font_pipeline::glyphs::FontTemplate;
use crate::font_pipeline::output::types::CompileConfig;

pub trait TemplateWriter {
    fn write_template(&self, template: &FontTemplate, output: &mut dyn Write, config: &CompileConfig) -> Result<()>;
}
