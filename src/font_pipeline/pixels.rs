//! Pixel storage module
//!
//! Owned RGBA buffers, read-only sub-rectangle views and the color type
//! shared by every pipeline stage.

mod buffer;
pub mod color;


pub use buffer::{PixelBuffer, PixelView, Rect};
pub use color::Rgb;
