//! Wallet and directory error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by wallet construction or settlement arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// A loaded balance is negative.
    #[error("Balance for {currency} cannot be negative: {balance}")]
    NegativeBalance {
        /// Currency code of the offending entry.
        currency: String,
        /// The negative balance.
        balance: Decimal,
    },

    /// Balance arithmetic overflowed; the wallet was left untouched.
    #[error("Balance overflow on {currency}")]
    Overflow {
        /// Currency whose balance overflowed.
        currency: String,
    },
}

/// Errors raised while assembling a user directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// Two users share the same name.
    #[error("Duplicate user name: {0}")]
    DuplicateUser(String),
}
