//! The batch loop: load, settle every request in order, persist.

use tracing::{error, info, warn};

use fxwallet_core::settlement::{Outcome, SettlementPipeline};
use fxwallet_shared::{AppConfig, AppError, AppResult};
use fxwallet_store::{FeedLine, RateRepository, StoreError, TransactionFeed, UserRepository};

use crate::report;
use crate::summary::RunSummary;

/// Processes the whole transactions file.
///
/// The users file is rewritten after every settled request, so an aborted
/// run keeps every settlement made before the failure.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if a file cannot be read or written and
/// [`AppError::Settlement`] if the pipeline reports a broken contract.
pub fn run(config: &AppConfig) -> AppResult<RunSummary> {
    let rates = RateRepository::new(&config.files.rates_path)
        .load(&config.settlement.pivot_currency)
        .map_err(storage_error)?;
    let users = UserRepository::new(&config.files.users_path);
    let mut directory = users.load().map_err(storage_error)?;
    info!(
        currencies = rates.len(),
        users = directory.len(),
        "Loaded rates and users"
    );

    let pipeline = SettlementPipeline::new(config.settlement.decimal_places);
    let feed = TransactionFeed::open(&config.files.transactions_path).map_err(storage_error)?;
    let mut summary = RunSummary::default();

    for line in feed {
        let FeedLine {
            line_number,
            request,
        } = line.map_err(storage_error)?;

        let outcome = pipeline
            .process(&request, &rates, &mut directory)
            .map_err(|err| {
                error!(line = line_number, code = err.error_code(), request = %request, "{err}");
                AppError::Settlement(format!("line {line_number}: {err}"))
            })?;

        let message = report::render(&request, &outcome);
        match &outcome {
            Outcome::Settled(settlement) => {
                info!(line = line_number, user = %settlement.user, "{message}");
                users.save(&directory).map_err(storage_error)?;
            }
            Outcome::Rejected { reason } => {
                warn!(line = line_number, reason = reason.code(), "{message}");
            }
        }
        summary.record(&outcome);
    }

    Ok(summary)
}

fn storage_error(err: StoreError) -> AppError {
    AppError::Storage(err.to_string())
}
