use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::font_pipeline::{
    atlas::{self, AtlasReader, PngAtlasReader},
    common::error::{CompileError, Result},
    descriptor::FontDescriptor,
    glyphs::{self, FontTemplate},
    output::{CompileConfig, JsonTemplateWriter, TemplateWriter, types::{DESCRIPTOR_SUFFIX, TEMPLATE_SUFFIX}},
    pixels::PixelBuffer,
    unblend::{self, RecoveredForeground},
};

pub struct FontCompilePipeline<R: AtlasReader, W: TemplateWriter> {
    reader: R,
    writer: W,
    config: CompileConfig,
}

impl FontCompilePipeline<PngAtlasReader, JsonTemplateWriter> {
    pub fn new(config: CompileConfig) -> Self {
        Self {
            reader: PngAtlasReader,
            writer: JsonTemplateWriter,
            config,
        }
    }
}

impl<R: AtlasReader, W: TemplateWriter> FontCompilePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: CompileConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Runs split, unblend and segmentation on an already decoded atlas.
    #[instrument(skip_all, fields(mode = %descriptor.blend_mode(), width = composite.width(), height = composite.height()))]
    pub fn compile_image(&self, composite: &PixelBuffer, descriptor: &FontDescriptor) -> Result<FontTemplate> {
        let plates = {
            let _span = tracing::info_span!("split_atlas").entered();
            atlas::split(composite, descriptor.blend_mode())?
        };

        let recovered = {
            let _span = tracing::info_span!("unblend", plate_height = plates.plate_height()).entered();
            let unblended = unblend::unblend(
                &plates.foreground,
                plates.background.as_ref(),
                descriptor.target_color(),
                descriptor.has_shadow(),
                descriptor.blend_mode(),
            )?;
            RecoveredForeground::assemble(unblended, &plates.marker)?
        };

        let template = {
            let _span = tracing::info_span!("segment_glyphs").entered();
            glyphs::build(&recovered, descriptor)?
        };

        // Only a successful compile leaves a dump behind.
        if let Some(path) = &self.config.dump_unblended {
            atlas::write_png(recovered.image(), path)?;
            debug!(path = %path.display(), "Wrote recovered foreground");
        }

        info!(
            glyphs = template.glyphs.len(),
            height = template.height,
            "Font compiled"
        );
        Ok(template)
    }

    #[instrument(skip(self, descriptor, input_data, output), fields(input_size = input_data.len()))]
    pub fn compile(&self, descriptor: &FontDescriptor, input_data: &[u8], output: &mut dyn Write) -> Result<FontTemplate> {
        info!("Starting font compilation");

        let composite = {
            let _span = tracing::info_span!("decode_atlas").entered();
            self.reader.read_atlas(input_data)?
        };

        let template = self.compile_image(&composite, descriptor)?;

        {
            let _span = tracing::info_span!("encode_template").entered();
            self.writer.write_template(&template, output, &self.config)?;
        }

        Ok(template)
    }

    /// Atlas location for a descriptor file: the descriptor's own `img`
    /// (relative to the descriptor's directory), else the descriptor path with
    /// its suffix swapped for the configured image suffix.
    pub fn atlas_path(&self, meta_path: &Path, descriptor: &FontDescriptor) -> PathBuf {
        if let Some(image) = descriptor.image() {
            return match meta_path.parent() {
                Some(dir) => dir.join(image),
                None => image.to_path_buf(),
            };
        }

        meta_path.with_file_name(format!("{}{}", descriptor_stem(meta_path), self.config.image_suffix))
    }

    /// Default template location for a descriptor file: `chat.fontmeta.json`
    /// compiles to `chat.font.json` beside it.
    pub fn template_path(&self, meta_path: &Path) -> PathBuf {
        meta_path.with_file_name(format!("{}{}", descriptor_stem(meta_path), TEMPLATE_SUFFIX))
    }

    #[instrument(skip(self, meta_path, output_path))]
    pub fn compile_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, meta_path: P, output_path: Q) -> Result<FontTemplate> {
        let meta_path = meta_path.as_ref();
        let output_path = output_path.as_ref();

        let descriptor = {
            let _span = tracing::info_span!("load_descriptor").entered();
            let source = std::fs::read_to_string(meta_path).map_err(|e| {
                CompileError::InputReadError(format!("{}: {}", meta_path.display(), e))
            })?;
            FontDescriptor::from_json(&source)?
        };

        let image_path = self.atlas_path(meta_path, &descriptor);
        info!(
            descriptor = %meta_path.display(),
            atlas = %image_path.display(),
            output = %output_path.display(),
            "Compiling font"
        );

        let input_data = {
            let _span = tracing::info_span!("read_atlas_file").entered();
            std::fs::read(&image_path).map_err(|e| {
                CompileError::InputReadError(format!("{}: {}", image_path.display(), e))
            })?
        };

        // Encode before touching the output so a failed compile leaves no file behind.
        let mut encoded = Vec::new();
        let template = self.compile(&descriptor, &input_data, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            let mut output_file = std::fs::File::create(output_path).map_err(|e| {
                CompileError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
            output_file.write_all(&encoded)?;
        }

        Ok(template)
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CompileConfig) {
        self.config = config;
    }
}

/// File name of `meta_path` without the descriptor suffix (or a bare `.json`).
fn descriptor_stem(meta_path: &Path) -> String {
    let name = meta_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_suffix(DESCRIPTOR_SUFFIX)
        .or_else(|| name.strip_suffix(".json"))
        .unwrap_or(&name)
        .to_string()
}
