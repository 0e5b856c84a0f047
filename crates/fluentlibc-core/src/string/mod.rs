//! String operations.
//!
//! Implements the fluentlibc string helpers as safe Rust operating on slices.

pub mod prefix;
pub mod str;

// Re-export commonly used functions.
pub use prefix::str_has_prefix;
pub use str::{strlen, strnlen};
