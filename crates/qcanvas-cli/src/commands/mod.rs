//! CLI command implementations.

pub mod common;
pub mod gates;
pub mod simulate;
pub mod version;
