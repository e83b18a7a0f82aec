use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tlp_cli::commands::post;
use tlp_cli::{Cli, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    // An unparsable ticket pattern is a startup error, caught before any input is read.
    let matcher = config.ticket_matcher()?;

    let input = match cli.input {
        Some(input) => input,
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?,
    };

    post::run(&mut std::io::stdout(), &input, &matcher, &config)
}
