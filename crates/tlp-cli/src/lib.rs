//! Worklog poster CLI library.
//!
//! This crate provides the CLI interface for the worklog poster.

mod cli;
pub mod commands;
mod config;

pub use cli::Cli;
pub use config::Config;
