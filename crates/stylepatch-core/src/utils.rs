//! Utility functions for formatter implementations.

pub mod lines;

// Re-export commonly used utilities for formatter implementations
#[doc(inline)]
pub use lines::{byte_offset, char_at, insert_at, remove_at, reported_line, split_lines, with_line};
