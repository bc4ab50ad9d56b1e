//! Template output module
//!
//! Encoding of compiled font templates and the compile configuration.

mod writer;
mod json_template_writer;
pub mod types;

pub use writer::TemplateWriter;
pub use json_template_writer::JsonTemplateWriter;
pub use types::{CompileConfig, CompileConfigBuilder};
