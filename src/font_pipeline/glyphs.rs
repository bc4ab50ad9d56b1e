//! Glyph segmentation module
//!
//! Slices a recovered foreground into per-character templates by locating
//! ink runs and pairing them with the descriptor's sample text.

mod segmenter;
pub mod types;


pub use segmenter::build;
pub use types::{FontTemplate, GlyphTemplate, InkPixel};
