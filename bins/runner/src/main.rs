//! fxwallet batch runner
//!
//! Settles every request of the transactions file against the users file,
//! rewriting the users file after each settled conversion.

mod batch;
mod report;
mod summary;

use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fxwallet_shared::{AppConfig, AppError, LoggingConfig};

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().map_err(AppError::from)?;

    // Initialize tracing
    init_tracing(&config.logging)?;

    info!(
        pivot = %config.settlement.pivot_currency,
        decimal_places = config.settlement.decimal_places,
        "Starting application"
    );

    let exit_code = match batch::run(&config) {
        Ok(summary) => {
            summary.log();
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            ExitCode::from(err.exit_code())
        }
    };

    info!("Shutting down");
    Ok(exit_code)
}

/// Installs the global subscriber. `RUST_LOG` wins over `logging.filter`.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .with_context(|| format!("Invalid log filter '{}'", logging.filter))?;

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer()).try_init()?;
    }
    Ok(())
}
