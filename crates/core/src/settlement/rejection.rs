//! Rejection taxonomy for conversion requests.
//!
//! A rejection is an expected outcome: the request is skipped and the run
//! continues. Variants are listed in the order the validation chain checks
//! them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a request was not settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    /// The request does not have exactly four components.
    #[error("Transaction does not have exactly 4 components as required")]
    MalformedRequest,

    /// No user with the requested name.
    #[error("User not found")]
    UserNotFound,

    /// The FROM and TO currencies are identical.
    #[error("Both the FROM and TO currencies are the same")]
    SameCurrency,

    /// One or both currencies are neither the pivot nor quoted.
    #[error("One or both of the currencies is invalid")]
    InvalidCurrency,

    /// The amount is not a number.
    #[error("Amount to convert is not a valid number")]
    MalformedAmount,

    /// The amount is zero or negative.
    #[error("Amount to convert is less than or equal to 0")]
    NonPositiveAmount,

    /// The user's wallet has no balance in the FROM currency.
    #[error("User does not have the FROM currency")]
    CurrencyNotHeld,

    /// The FROM balance is smaller than the amount.
    #[error("User has insufficient amount of the FROM currency")]
    InsufficientBalance,
}

impl RejectionReason {
    /// Every reason, in validation order.
    pub const ALL: [Self; 8] = [
        Self::MalformedRequest,
        Self::UserNotFound,
        Self::SameCurrency,
        Self::InvalidCurrency,
        Self::MalformedAmount,
        Self::NonPositiveAmount,
        Self::CurrencyNotHeld,
        Self::InsufficientBalance,
    ];

    /// Stable identifier for logs and summaries.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedRequest => "MALFORMED_REQUEST",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SameCurrency => "SAME_CURRENCY",
            Self::InvalidCurrency => "INVALID_CURRENCY",
            Self::MalformedAmount => "MALFORMED_AMOUNT",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::CurrencyNotHeld => "CURRENCY_NOT_HELD",
            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
        }
    }

    /// Returns true if the rejection depends on the user's wallet contents
    /// rather than on the shape of the request.
    #[must_use]
    pub const fn is_balance_related(&self) -> bool {
        matches!(self, Self::CurrencyNotHeld | Self::InsufficientBalance)
    }
}
