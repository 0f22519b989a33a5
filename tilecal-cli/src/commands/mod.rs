//! CLI command implementations.

pub mod common;
pub mod estimate;
pub mod levels;
pub mod providers;
pub mod sequence;
