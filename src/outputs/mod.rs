//! Digest rendering.
//!
//! - [`markdown`]: the text document returned by both query operations
//! - [`json`]: structured form of the same digest for `--json` and HTTP clients

pub mod json;
pub mod markdown;
