//! Configuration structures.

use folio_core::types::Usd;
use folio_core::{FolioError, FolioResult};
use folio_valuation::{default_holdings, BenchmarkHolding};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub account: AccountSettings,
    #[serde(default = "default_holdings")]
    pub benchmarks: Vec<BenchmarkHolding>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            logging: LoggingConfig::default(),
            account: AccountSettings::default(),
            benchmarks: default_holdings(),
        }
    }
}

/// A semantic problem in an otherwise well-formed configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    #[error("Initial capital must be positive")]
    NonPositiveInitialCapital,

    #[error("Unknown log format '{0}' (expected pretty or json)")]
    UnknownLogFormat(String),

    #[error("Benchmark {0} has no invested amount")]
    EmptyBenchmark(String),

    #[error("Benchmark {0} is listed more than once")]
    DuplicateBenchmark(String),
}

impl AppConfig {
    /// Check values serde cannot: positive capital, known log format,
    /// usable and unique benchmarks.
    pub fn problems(&self) -> Vec<ConfigProblem> {
        let mut problems = Vec::new();

        if self.account.initial_capital <= Usd::ZERO {
            problems.push(ConfigProblem::NonPositiveInitialCapital);
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            problems.push(ConfigProblem::UnknownLogFormat(self.logging.format.clone()));
        }

        let mut seen = HashSet::new();
        for holding in &self.benchmarks {
            if holding.invested <= Usd::ZERO {
                problems.push(ConfigProblem::EmptyBenchmark(holding.instrument.clone()));
            }
            if !seen.insert(holding.instrument.to_ascii_uppercase()) {
                problems.push(ConfigProblem::DuplicateBenchmark(holding.instrument.clone()));
            }
        }

        problems
    }

    /// Fail with every problem joined into one configuration error.
    pub fn validate(&self) -> FolioResult<()> {
        let problems = self.problems();
        if problems.is_empty() {
            return Ok(());
        }
        let joined = problems
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(FolioError::Config(joined))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "folio".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Also write logs to this file
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

/// Account defaults used when inputs do not supply them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSettings {
    pub account_id: String,
    /// Capital the portfolio started with; portfolio return is measured
    /// against it
    pub initial_capital: Usd,
    pub cash: Usd,
    pub buying_power: Usd,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            account_id: "default".to_string(),
            initial_capital: Usd::new(dec!(1000)),
            cash: Usd::ZERO,
            buying_power: Usd::ZERO,
        }
    }
}

impl AccountSettings {
    /// Buying power, falling back to cash when none is configured.
    pub fn effective_buying_power(&self) -> Usd {
        if self.buying_power > Usd::ZERO {
            self.buying_power
        } else {
            self.cash
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.app.name, "folio");
        assert_eq!(config.account.initial_capital, Usd::new(dec!(1000)));
        assert_eq!(config.benchmarks, default_holdings());
        assert!(config.problems().is_empty());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.benchmarks.len(), 2);
        assert_eq!(config.benchmarks[0].instrument, "IWM");
        assert!(config.problems().is_empty());
    }

    #[test]
    fn test_parse_full_file() {
        let config = parse_config(
            r#"
            [app]
            name = "folio"
            environment = "test"

            [logging]
            level = "debug"
            format = "json"

            [account]
            account_id = "acct-1"
            initial_capital = 2500
            cash = 500.25

            [[benchmarks]]
            instrument = "QQQ"
            invested = 2500
            shares = 5.1
            "#,
        )
        .unwrap();

        assert!(config.logging.is_json());
        assert_eq!(config.account.account_id, "acct-1");
        assert_eq!(config.account.initial_capital, Usd::new(dec!(2500)));
        assert_eq!(config.account.cash, Usd::new(dec!(500.25)));
        assert_eq!(config.account.effective_buying_power(), Usd::new(dec!(500.25)));
        assert_eq!(config.benchmarks.len(), 1);
        assert_eq!(config.benchmarks[0].shares, dec!(5.1));
    }

    #[test]
    fn test_problems() {
        let mut config = AppConfig::default();
        config.account.initial_capital = Usd::ZERO;
        config.logging.format = "xml".to_string();
        config.benchmarks = vec![
            BenchmarkHolding::new("SPY", Usd::ZERO, dec!(1)),
            BenchmarkHolding::new("spy", Usd::new(dec!(100)), dec!(1)),
        ];

        assert_eq!(
            config.problems(),
            vec![
                ConfigProblem::NonPositiveInitialCapital,
                ConfigProblem::UnknownLogFormat("xml".to_string()),
                ConfigProblem::EmptyBenchmark("SPY".to_string()),
                ConfigProblem::DuplicateBenchmark("spy".to_string()),
            ]
        );

        let err = config.validate().unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error: Initial capital must be positive; "));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = parse_config(&text).unwrap();

        assert_eq!(parsed.account.initial_capital, config.account.initial_capital);
        assert_eq!(parsed.benchmarks, config.benchmarks);
    }
}
