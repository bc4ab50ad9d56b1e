use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Invalid font descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Malformed atlas: {0}")]
    MalformedAtlas(String),

    #[error("Unsupported blend mode: {0:?}")]
    UnsupportedBlendMode(String),

    #[error("Glyph count mismatch: sample text expects {expected} glyphs, found {found} ink runs")]
    GlyphCountMismatch { expected: usize, found: usize },

    #[error("Character {0:?} never matched an ink run in the sample text")]
    MissingCharacter(char),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Region {width}x{height} at ({x}, {y}) is outside a {bounds_width}x{bounds_height} buffer")]
    RegionOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        bounds_width: usize,
        bounds_height: usize,
    },

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode atlas image: {0}")]
    DecodeError(String),

    #[error("Failed to encode font template: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CompileError>;
