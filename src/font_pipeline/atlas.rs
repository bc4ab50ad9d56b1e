//! Atlas module
//!
//! Decoding of the composite atlas image and its split into the plates the
//! unblending stage consumes.

mod reader;
mod png_reader;
mod splitter;
pub mod types;


pub use reader::AtlasReader;
pub use png_reader::{PngAtlasReader, write_png};
pub use splitter::split;
pub use types::{AtlasPlates, MarkerRow};
