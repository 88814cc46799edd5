//! Response handling module.
//!
//! This module provides the [`ResponseFormat`] trait for type-safe response
//! parsing, with a JSON implementation and one for empty responses.

mod format;

pub use format::{EmptyFormat, JsonFormat, ResponseFormat};
