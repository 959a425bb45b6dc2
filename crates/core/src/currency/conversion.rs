//! Currency conversion through the pivot currency.
//!
//! CRITICAL: Routing and rounding rules:
//! - Currency → pivot uses the source currency's inverse rate
//! - Pivot → currency uses the target currency's rate
//! - Currency → currency goes through the pivot (two hops, no intermediate rounding)
//! - Only the final amount is rounded, with banker's rounding

use rust_decimal::Decimal;
use thiserror::Error;

use super::rate_table::RateTable;
use super::rounding::{MONEY_DECIMAL_PLACES, round_money};

/// Conversion failures. These indicate a broken caller contract (the
/// currencies were supposed to be validated first), never a bad request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A validated currency has no quote in the rate table.
    #[error("No rate quoted for {currency}")]
    MissingRate {
        /// The currency without a quote.
        currency: String,
    },

    /// Decimal arithmetic overflowed.
    #[error("Arithmetic overflow converting {amount} {from} to {to}")]
    Overflow {
        /// Amount being converted.
        amount: Decimal,
        /// Source currency.
        from: String,
        /// Target currency.
        to: String,
    },
}

/// Computes destination amounts from source amounts via the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionEngine {
    decimal_places: u32,
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new(MONEY_DECIMAL_PLACES)
    }
}

impl ConversionEngine {
    /// Creates an engine rounding results to `decimal_places`.
    #[must_use]
    pub const fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    /// Decimal places applied to converted amounts.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Converts `amount` of `from` into `to`.
    ///
    /// Both currencies must already be known to `rates` and differ.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use fxwallet_core::currency::{ConversionEngine, RateEntry, RateTable};
    ///
    /// let rates = RateTable::new("usd", [("gbp".to_string(), RateEntry::new(dec!(0.85), dec!(1.17)))]).unwrap();
    /// let engine = ConversionEngine::default();
    ///
    /// assert_eq!(engine.convert(dec!(40), "usd", "gbp", &rates).unwrap(), dec!(34.00));
    /// assert_eq!(engine.convert(dec!(10), "gbp", "usd", &rates).unwrap(), dec!(11.70));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] if a non-pivot currency has no quote or
    /// the multiplication overflows.
    pub fn convert(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        rates: &RateTable,
    ) -> Result<Decimal, ConversionError> {
        let converted = if rates.is_pivot(to) {
            Self::to_pivot(amount, from, to, rates)?
        } else if rates.is_pivot(from) {
            Self::from_pivot(amount, from, to, rates)?
        } else {
            let in_pivot = Self::to_pivot(amount, from, to, rates)?;
            Self::from_pivot(in_pivot, from, to, rates)?
        };

        Ok(round_money(converted, self.decimal_places))
    }

    fn to_pivot(
        amount: Decimal,
        from: &str,
        to: &str,
        rates: &RateTable,
    ) -> Result<Decimal, ConversionError> {
        let entry = rates
            .lookup(from)
            .ok_or_else(|| ConversionError::MissingRate {
                currency: from.to_string(),
            })?;
        Self::scale(amount, entry.inverse_rate, from, to)
    }

    fn from_pivot(
        amount: Decimal,
        from: &str,
        to: &str,
        rates: &RateTable,
    ) -> Result<Decimal, ConversionError> {
        let entry = rates.lookup(to).ok_or_else(|| ConversionError::MissingRate {
            currency: to.to_string(),
        })?;
        Self::scale(amount, entry.rate, from, to)
    }

    fn scale(amount: Decimal, rate: Decimal, from: &str, to: &str) -> Result<Decimal, ConversionError> {
        amount
            .checked_mul(rate)
            .ok_or_else(|| ConversionError::Overflow {
                amount,
                from: from.to_string(),
                to: to.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::RateEntry;
    use rust_decimal_macros::dec;

    fn rates() -> RateTable {
        RateTable::new(
            "usd",
            [
                ("eur".to_string(), RateEntry::new(dec!(1.015), dec!(0.985))),
                ("gbp".to_string(), RateEntry::new(dec!(0.854), dec!(1.17))),
                ("jpy".to_string(), RateEntry::new(dec!(142.32), dec!(0.007))),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_convert_to_pivot_uses_inverse_rate() {
        // 100 gbp * 1.17 = 117 usd
        let result = ConversionEngine::default().convert(dec!(100), "gbp", "usd", &rates());
        assert_eq!(result.unwrap(), dec!(117.00));
    }

    #[test]
    fn test_convert_from_pivot_uses_rate() {
        // 40 usd * 0.854 = 34.16 gbp
        let result = ConversionEngine::default().convert(dec!(40), "usd", "gbp", &rates());
        assert_eq!(result.unwrap(), dec!(34.16));
    }

    #[test]
    fn test_convert_cross_currency_goes_through_pivot() {
        // 88 eur * 0.985 = 86.68 usd; 86.68 * 0.854 = 74.02472 -> 74.02 gbp
        let result = ConversionEngine::default().convert(dec!(88.0), "eur", "gbp", &rates());
        assert_eq!(result.unwrap(), dec!(74.02));
    }

    #[test]
    fn test_cross_currency_intermediate_not_rounded() {
        // 10.01 eur * 0.985 = 9.85985 usd; 9.85985 * 142.32 = 1403.253852 -> 1403.25 jpy
        // (rounding the pivot hop to 9.86 first would give 1403.28)
        let result = ConversionEngine::default().convert(dec!(10.01), "eur", "jpy", &rates());
        assert_eq!(result.unwrap(), dec!(1403.25));
    }

    #[test]
    fn test_convert_custom_precision() {
        let result = ConversionEngine::new(4).convert(dec!(88.0), "eur", "gbp", &rates());
        assert_eq!(result.unwrap(), dec!(74.0247));
    }

    #[test]
    fn test_missing_rate_is_an_error() {
        let result = ConversionEngine::default().convert(dec!(1), "chf", "usd", &rates());
        assert_eq!(
            result.unwrap_err(),
            ConversionError::MissingRate {
                currency: "chf".to_string()
            }
        );

        let result = ConversionEngine::default().convert(dec!(1), "eur", "chf", &rates());
        assert!(matches!(result, Err(ConversionError::MissingRate { currency }) if currency == "chf"));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let result = ConversionEngine::default().convert(Decimal::MAX, "usd", "jpy", &rates());
        assert!(matches!(result, Err(ConversionError::Overflow { .. })));
    }
}
