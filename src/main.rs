use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ocr_fontc::font_pipeline::{CompileConfig, FontCompilePipeline};
use ocr_fontc::logger;

use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(about = "Compile an OCR font atlas and its descriptor into glyph templates")]
struct Args {
    /// Font descriptor (`*.fontmeta.json`)
    #[arg(value_name = "FONTMETA")]
    meta: PathBuf,

    /// Output template path [default: descriptor name with `.font.json`]
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Log at debug level, including per-stage timings
    #[arg(short, long)]
    verbose: bool,

    /// Indent the JSON template
    #[arg(long)]
    pretty: bool,

    /// Also write the recovered foreground as a PNG
    #[arg(long, value_name = "PNG")]
    dump_unblended: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_with_default(if args.verbose { "debug" } else { logger::DEFAULT_FILTER });

    let config = CompileConfig::builder()
        .pretty_output(args.pretty)
        .dump_unblended(args.dump_unblended)
        .build();
    let pipeline = FontCompilePipeline::new(config);
    let output_path = args
        .output
        .unwrap_or_else(|| pipeline.template_path(&args.meta));

    info!("Font compiler initialized");
    info!("Atlas suffix: {}", pipeline.config().image_suffix);
    if let Some(dump) = &pipeline.config().dump_unblended {
        info!("Dumping recovered foreground to {}", dump.display());
    }

    match pipeline.compile_file(&args.meta, &output_path) {
        Ok(font) => {
            info!(
                "Compiled {} glyphs into {}",
                font.glyphs.len(),
                output_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Compilation failed: {}", e);
            Err(e).with_context(|| format!("compiling {}", args.meta.display()))
        }
    }
}
