//! Font compilation pipeline module
//!
//! This module turns a font descriptor and its composite atlas image into a
//! glyph template database, with separate modules for pixel storage, atlas
//! decoding and splitting, unblending, glyph segmentation and template output.

pub mod pixels;
pub mod atlas;
pub mod unblend;
pub mod descriptor;
pub mod glyphs;
pub mod output;
pub mod conversions;
pub mod common;

pub use common::{
    CompileError,
    Result,
};

pub use pixels::{
    PixelBuffer,
    PixelView,
    Rect,
    Rgb,
};

pub use atlas::{
    AtlasPlates,
    AtlasReader,
    MarkerRow,
    PngAtlasReader,
};

pub use unblend::{
    BlendMode,
    RecoveredForeground,
};

pub use descriptor::{
    FontDescriptor,
    FontDescriptorBuilder,
    FontMeta,
};

pub use glyphs::{
    FontTemplate,
    GlyphTemplate,
    InkPixel,
};

pub use output::{
    CompileConfig,
    CompileConfigBuilder,
    TemplateWriter,
    JsonTemplateWriter,
};

pub use conversions::{
    FontCompilePipeline,
};
