//! CLI command implementations.

pub mod post;
