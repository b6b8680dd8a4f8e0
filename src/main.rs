//! Portfolio analysis CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use folio_config::{load_config, AppConfig};
use folio_monitor::setup_logging;
use std::path::Path;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // validate-config reports its own load errors; other commands fall back
    // to defaults when the file is absent
    let config = match cli.command {
        Commands::ValidateConfig => AppConfig::default(),
        _ if !cli.config.exists() => AppConfig::default(),
        _ => load_config(&cli.config)
            .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?,
    };
    config.validate()?;

    // Setup logging
    let log_level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json_logs = cli.json_logs || config.logging.is_json();
    let _log_guard = setup_logging(
        &log_level,
        json_logs,
        config.logging.file.as_deref().map(Path::new),
    )?;
    debug!(config = %cli.config.display(), "Configuration loaded");

    // Execute command
    match cli.command {
        Commands::Value(args) => cli::commands::value::run(args, &config, cli.output).await,
        Commands::Signals(args) => cli::commands::signals::run(args, cli.output).await,
        Commands::Benchmark(args) => {
            cli::commands::benchmark::run(args, &config, cli.output).await
        }
        Commands::Order(args) => cli::commands::order::run(args, &config, cli.output).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
