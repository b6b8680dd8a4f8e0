//! Validate configuration command.

use anyhow::Result;
use folio_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    let problems = config.problems();
    if !problems.is_empty() {
        for problem in &problems {
            println!("  - {}", problem);
        }
        anyhow::bail!("Configuration has {} problem(s)", problems.len());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Account: {}", config.account.account_id);
    println!("Initial capital: {}", config.account.initial_capital);
    println!("Buying power: {}", config.account.effective_buying_power());
    for holding in &config.benchmarks {
        println!(
            "Benchmark: {} ({} shares, {} invested)",
            holding.instrument, holding.shares, holding.invested
        );
    }

    Ok(())
}
