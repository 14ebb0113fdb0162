use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use sa_cli::commands::report;
use sa_cli::{Cli, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support; skipped events warn by default
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    // Logs go to stderr so the report on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut keywords = config.keywords();
    if let Some(shift) = &cli.shift_keyword {
        keywords.shift.clone_from(shift);
    }
    if let Some(crunch) = &cli.crunch_keyword {
        keywords.crunch.clone_from(crunch);
    }

    let mut stdout = std::io::stdout().lock();
    report::run(&mut stdout, &cli.path_to_ics, &keywords, cli.json)
}
