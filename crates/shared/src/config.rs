//! Application configuration management.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Prefix of environment variables overriding configuration keys.
pub const ENV_PREFIX: &str = "FXWALLET";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Settlement configuration.
    #[serde(default)]
    pub settlement: SettlementConfig,
    /// Data file locations.
    #[serde(default)]
    pub files: FilesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settlement configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Reserved code of the pivot currency.
    #[serde(default = "default_pivot_currency")]
    pub pivot_currency: String,
    /// Decimal places kept on converted amounts and balances.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            pivot_currency: default_pivot_currency(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_pivot_currency() -> String {
    "usd".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Data file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Rate table (JSON object keyed by currency code).
    #[serde(default = "default_rates_path")]
    pub rates_path: PathBuf,
    /// Users and wallets (JSON array).
    #[serde(default = "default_users_path")]
    pub users_path: PathBuf,
    /// Conversion requests, one per line.
    #[serde(default = "default_transactions_path")]
    pub transactions_path: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            rates_path: default_rates_path(),
            users_path: default_users_path(),
            transactions_path: default_transactions_path(),
        }
    }
}

fn default_rates_path() -> PathBuf {
    PathBuf::from("data/fx_rates.json")
}

fn default_users_path() -> PathBuf {
    PathBuf::from("data/users.json")
}

fn default_transactions_path() -> PathBuf {
    PathBuf::from("data/transactions.txt")
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "fxwallet=info".to_string()
}

impl AppConfig {
    /// Loads configuration from `config/` and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Loads `default`, then `{RUN_MODE}` from `config_dir`, then
    /// `FXWALLET__SECTION__KEY` environment variables. Missing files are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed.
    pub fn load_from(config_dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let default_file = config_dir.join("default");
        let mode_file = config_dir.join(&run_mode);

        let config = config::Config::builder()
            .add_source(config::File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&mode_file.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
