//! Monetary rounding policy.
//!
//! Every amount written to a wallet passes through [`round_money`]. The
//! strategy is banker's rounding (round half to even). Rounding happens
//! before any zero check, so a balance that only reaches zero after rounding
//! is still pruned.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Number of decimal places kept on wallet balances and converted amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounding strategy applied to every stored amount.
pub const MONEY_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Rounds a value to `decimal_places` using banker's rounding.
///
/// - 0.125 → 0.12 (nearest even)
/// - 0.135 → 0.14 (nearest even)
#[must_use]
pub fn round_money(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, MONEY_ROUNDING)
}
