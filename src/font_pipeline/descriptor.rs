//! Font descriptor module
//!
//! Loading and validation of the per-font configuration that drives
//! unblending and segmentation.

mod meta;
pub mod types;

#[cfg(test)]
mod tests;

pub use meta::FontMeta;
pub use types::{FontDescriptor, FontDescriptorBuilder};
