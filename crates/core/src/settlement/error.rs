//! Fatal settlement errors.
//!
//! These never describe a bad request. They mean the rate table or user
//! directory broke the contract the validation chain relied on, and the
//! caller is expected to abort the run.

use thiserror::Error;

use crate::currency::ConversionError;
use crate::wallet::WalletError;

/// Errors that abort settlement of a validated request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// Conversion failed for a validated pair.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Wallet arithmetic failed.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// A resolved user disappeared from the directory.
    #[error("User {name} vanished from the directory during settlement")]
    UserVanished {
        /// Name the request resolved to.
        name: String,
    },
}

impl SettlementError {
    /// Returns the error code for logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Conversion(ConversionError::MissingRate { .. }) => "MISSING_RATE",
            Self::Conversion(ConversionError::Overflow { .. }) | Self::Wallet(WalletError::Overflow { .. }) => {
                "ARITHMETIC_OVERFLOW"
            }
            Self::Wallet(WalletError::NegativeBalance { .. }) => "NEGATIVE_BALANCE",
            Self::UserVanished { .. } => "USER_VANISHED",
        }
    }
}
