//! Field schema registry
//!
//! Static per-form tables that map logical field names to page, position,
//! font and render mode, validated once at startup.

mod field;
mod registry;
mod tables;

pub use field::*;
pub use registry::*;
