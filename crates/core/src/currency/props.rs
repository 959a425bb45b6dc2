//! Property-based tests for pivot conversion.
//!
//! - Round trip through the pivot returns the original amount within rounding tolerance
//! - Converted amounts always carry at most two decimal places
//! - Conversion is deterministic and positive for positive inputs

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::conversion::ConversionEngine;
use super::rate_table::{RateEntry, RateTable};

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive pivot rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn single_currency_table(rate: Decimal) -> RateTable {
    let entry = RateEntry::from_rate(rate).expect("strategy never yields zero");
    RateTable::new("usd", [("xxx".to_string(), entry)]).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* currency and positive amount, converting to the pivot and back
    /// SHALL return the original amount, off by at most the two rounding steps.
    #[test]
    fn prop_round_trip_through_pivot(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let rates = single_currency_table(rate);
        let engine = ConversionEngine::default();

        let in_pivot = engine.convert(amount, "xxx", "usd", &rates).unwrap();
        let back = engine.convert(in_pivot, "usd", "xxx", &rates).unwrap();

        // half a cent lost on the first hop is scaled by `rate` on the way back
        let tolerance = rate * dec!(0.005) + dec!(0.01);
        prop_assert!(
            (back - amount).abs() <= tolerance,
            "{} -> {} -> {} exceeds tolerance {}",
            amount, in_pivot, back, tolerance
        );
    }

    /// *For any* amount and rate, the converted amount SHALL have at most
    /// 2 decimal places.
    #[test]
    fn prop_convert_rounds_to_2_decimals(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let rates = single_currency_table(rate);
        let result = ConversionEngine::default()
            .convert(amount, "usd", "xxx", &rates)
            .unwrap();
        prop_assert_eq!(result, result.round_dp(2));
    }

    /// *For any* inputs, converting twice SHALL produce the same result.
    #[test]
    fn prop_convert_is_deterministic(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let rates = single_currency_table(rate);
        let engine = ConversionEngine::default();
        prop_assert_eq!(
            engine.convert(amount, "xxx", "usd", &rates).unwrap(),
            engine.convert(amount, "xxx", "usd", &rates).unwrap()
        );
    }

    /// *For any* positive amount and rate, the unrounded result SHALL be positive,
    /// so the rounded one is never negative.
    #[test]
    fn prop_convert_never_negative(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let rates = single_currency_table(rate);
        let result = ConversionEngine::default()
            .convert(amount, "usd", "xxx", &rates)
            .unwrap();
        prop_assert!(result >= Decimal::ZERO);
    }
}
