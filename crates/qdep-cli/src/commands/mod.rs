//! CLI command implementations.

pub mod build;
pub mod common;
pub mod get;
pub mod graph;
pub mod plan;
pub mod version;
