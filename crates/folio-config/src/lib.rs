//! Configuration management.

mod settings;

pub use settings::{AccountSettings, AppConfig, AppSettings, ConfigProblem, LoggingConfig};

use config::{Config, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables prefixed `FOLIO` override the file, with `__`
/// separating nested keys (`FOLIO__ACCOUNT__INITIAL_CAPITAL=2500`).
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("FOLIO")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Parse configuration from TOML text, without environment overrides.
pub fn parse_config(toml: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}
