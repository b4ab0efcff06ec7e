//! CLI command implementations

pub mod completions;
pub mod resolve;
pub mod validate;
