//! Settlement pipeline: validation → conversion → wallet mutation.
//!
//! Per request: `Received → Validating → Rejected(reason)` or
//! `Received → Validating → Converting → Settling → Settled`. Both end
//! states are terminal; a rejected request is never retried.
//!
//! The pipeline owns no state. The caller owns the rate table and the user
//! directory and passes them into every call, which also makes requests
//! settle strictly in submission order.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::SettlementError;
use super::rejection::RejectionReason;
use super::request::{ConversionRequest, RawRequest};
use super::validation::{ValidationChain, check_component_count};
use crate::currency::{ConversionEngine, MONEY_DECIMAL_PLACES, RateTable};
use crate::wallet::{BalanceChange, UserDirectory};

/// Details of an applied conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    /// Wallet owner.
    pub user: String,
    /// Debited currency.
    pub from_currency: String,
    /// Credited currency.
    pub to_currency: String,
    /// Amount removed from the FROM balance, as requested.
    pub amount_debited: Decimal,
    /// Amount added to the TO balance, rounded.
    pub amount_credited: Decimal,
    /// FROM balance after settlement, `None` if the entry was pruned.
    pub remaining_from_balance: Option<Decimal>,
    /// TO balance after settlement.
    pub new_to_balance: Decimal,
}

/// Result of processing one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The conversion was applied to the user's wallet.
    Settled(Settlement),
    /// The request was skipped.
    Rejected {
        /// The first failing check.
        reason: RejectionReason,
    },
}

impl Outcome {
    /// Returns true if a wallet changed and state should be persisted.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Rejected { reason } => Some(*reason),
            Self::Settled(_) => None,
        }
    }

    /// The settlement details, if any.
    #[must_use]
    pub fn settlement(&self) -> Option<&Settlement> {
        match self {
            Self::Settled(settlement) => Some(settlement),
            Self::Rejected { .. } => None,
        }
    }
}

impl From<RejectionReason> for Outcome {
    fn from(reason: RejectionReason) -> Self {
        Self::Rejected { reason }
    }
}

/// Public entry point for settling conversion requests.
#[derive(Debug, Clone, Copy)]
pub struct SettlementPipeline {
    chain: ValidationChain,
    engine: ConversionEngine,
}

impl Default for SettlementPipeline {
    fn default() -> Self {
        Self::new(MONEY_DECIMAL_PLACES)
    }
}

impl SettlementPipeline {
    /// Creates a pipeline rounding amounts and balances to `decimal_places`.
    #[must_use]
    pub const fn new(decimal_places: u32) -> Self {
        Self {
            chain: ValidationChain,
            engine: ConversionEngine::new(decimal_places),
        }
    }

    /// Processes a tokenized request.
    ///
    /// Business-rule violations come back as `Ok(Outcome::Rejected)`.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError`] only when the rate table or directory
    /// contradicts a check that already passed. The wallet is unchanged in
    /// that case.
    pub fn process(
        &self,
        raw: &RawRequest,
        rates: &RateTable,
        directory: &mut UserDirectory,
    ) -> Result<Outcome, SettlementError> {
        match check_component_count(raw) {
            Ok(request) => self.process_request(&request, rates, directory),
            Err(reason) => Ok(reason.into()),
        }
    }

    /// Processes a request whose four fields are already separated.
    ///
    /// # Errors
    ///
    /// See [`SettlementPipeline::process`].
    pub fn process_request(
        &self,
        request: &ConversionRequest,
        rates: &RateTable,
        directory: &mut UserDirectory,
    ) -> Result<Outcome, SettlementError> {
        // 1. Validate
        let validated = match self.chain.validate(request, directory, rates) {
            Ok(validated) => validated,
            Err(reason) => return Ok(reason.into()),
        };

        // 2. Convert
        let credited = self.engine.convert(
            validated.amount,
            validated.from_currency,
            validated.to_currency,
            rates,
        )?;

        // 3. Settle
        let user = directory
            .get_mut(validated.user)
            .ok_or_else(|| SettlementError::UserVanished {
                name: validated.user_name.to_string(),
            })?;
        let BalanceChange {
            debited_balance,
            credited_balance,
        } = user.wallet_mut().settle(
            validated.from_currency,
            validated.amount,
            validated.to_currency,
            credited,
            self.engine.decimal_places(),
        )?;

        Ok(Outcome::Settled(Settlement {
            user: validated.user_name.to_string(),
            from_currency: validated.from_currency.to_string(),
            to_currency: validated.to_currency.to_string(),
            amount_debited: validated.amount,
            amount_credited: credited,
            remaining_from_balance: debited_balance,
            new_to_balance: credited_balance,
        }))
    }
}
