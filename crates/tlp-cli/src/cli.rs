//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Post logged time to a Jira-compatible tracker.
///
/// Reads a JSON array of time entries, groups them by the ticket mentioned
/// in each note, and creates one worklog per ticket.
#[derive(Debug, Parser)]
#[command(name = "tlp", version, about, long_about = None)]
pub struct Cli {
    /// JSON array of time entries. Read from stdin when omitted.
    pub input: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
