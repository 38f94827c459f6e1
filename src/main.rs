use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tipout::cli::{runner, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging on stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color || cli.json || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    runner::run(cli)
}
