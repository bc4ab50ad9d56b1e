//! Common utilities module
//!
//! This module contains shared utilities used across the font pipeline.

pub mod error;

pub use error::{CompileError, Result};
