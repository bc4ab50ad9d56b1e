use std::io::Write;

use tracing::debug;

use crate::font_pipeline::common::error::{CompileError, Result};
use crate::font_pipeline::glyphs::FontTemplate;
use crate::font_pipeline::output::types::CompileConfig;
use crate::font_pipeline::output::writer::TemplateWriter;

pub struct JsonTemplateWriter;

impl TemplateWriter for JsonTemplateWriter {
    fn write_template(&self, template: &FontTemplate, output: &mut dyn Write, config: &CompileConfig) -> Result<()> {
        debug!("Encoding font template with {} glyphs", template.glyphs.len());

        let buffer = if config.pretty_output {
            serde_json::to_vec_pretty(template)
        } else {
            serde_json::to_vec(template)
        }
        .map_err(|e| CompileError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("Template encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
