//! Pipeline conversions module
//!
//! This module contains the orchestration that turns a descriptor and its
//! atlas into an encoded font template.

mod font_compile;


pub use font_compile::FontCompilePipeline;
