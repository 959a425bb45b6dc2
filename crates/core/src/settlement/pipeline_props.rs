//! Property-based tests for the settlement pipeline.
//!
//! - Rejections of every kind never change any wallet, however often they are replayed
//! - Converting exactly the held balance always settles and prunes the entry
//! - Earlier validation failures always win over later ones

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::pipeline::SettlementPipeline;
use super::rejection::RejectionReason;
use super::request::{ConversionRequest, RawRequest};
use crate::currency::{RateEntry, RateTable};
use crate::wallet::{User, UserDirectory, Wallet};

const CURRENCIES: [&str; 4] = ["usd", "eur", "gbp", "jpy"];

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

fn balance() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn currency() -> impl Strategy<Value = &'static str> {
    prop::sample::select(CURRENCIES.to_vec())
}

fn directory(code: &str, held: Decimal) -> UserDirectory {
    let wallet = Wallet::from_balances([(code, held)]).unwrap();
    UserDirectory::new(vec![User::with_wallet("Alice", wallet)]).unwrap()
}

/// A request failing exactly one check, for a wallet holding only `held` of `from`.
fn invalid_line(
    kind: usize,
    from: &str,
    to: &str,
    held: Decimal,
    extra: Decimal,
) -> (String, RejectionReason) {
    match kind {
        0 => (format!("Alice {from} {to}"), RejectionReason::MalformedRequest),
        1 => (format!("Nobody {from} {to} 1"), RejectionReason::UserNotFound),
        2 => (format!("Alice {from} {from} 1"), RejectionReason::SameCurrency),
        3 => (format!("Alice {from} xyz 1"), RejectionReason::InvalidCurrency),
        4 => (format!("Alice {from} {to} 1_0"), RejectionReason::MalformedAmount),
        5 => (format!("Alice {from} {to} -{extra}"), RejectionReason::NonPositiveAmount),
        6 => (format!("Alice {to} {from} 1"), RejectionReason::CurrencyNotHeld),
        _ => (
            format!("Alice {from} {to} {}", held + extra),
            RejectionReason::InsufficientBalance,
        ),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* invalid request, replaying it SHALL keep returning the same
    /// rejection with no state drift.
    #[test]
    fn prop_rejection_is_idempotent(
        kind in 0usize..8,
        from in currency(),
        to in currency(),
        held in balance(),
        extra_cents in 1i64..1_000_000i64,
        replays in 1usize..5,
    ) {
        prop_assume!(from != to);
        let mut directory = directory(from, held);
        let before = directory.clone();
        let (line, expected) = invalid_line(kind, from, to, held, Decimal::new(extra_cents, 2));
        let request = RawRequest::tokenize(&line);
        let pipeline = SettlementPipeline::default();

        for _ in 0..replays {
            let outcome = pipeline.process(&request, &rates(), &mut directory).unwrap();
            prop_assert_eq!(outcome.rejection(), Some(expected));
            prop_assert_eq!(&directory, &before);
        }
    }

    /// *For any* held balance, converting all of it SHALL settle and remove
    /// the FROM entry.
    #[test]
    fn prop_full_conversion_prunes_source(
        from in currency(),
        to in currency(),
        held in balance(),
    ) {
        prop_assume!(from != to);
        let mut directory = directory(from, held);
        let request = ConversionRequest::new("Alice", from, to, held);

        let outcome = SettlementPipeline::default()
            .process_request(&request, &rates(), &mut directory)
            .unwrap();

        prop_assert!(outcome.is_settled());
        let wallet = directory.find("Alice").unwrap().wallet();
        prop_assert!(wallet.balance(from).is_none());
        prop_assert!(wallet.iter().all(|(_, amount)| !amount.is_zero()));
    }

    /// *For any* unknown user, the rejection SHALL be `UserNotFound` even if
    /// the currencies are identical or invalid and the amount is malformed.
    #[test]
    fn prop_user_not_found_wins(
        from in "[a-z]{3}",
        same in any::<bool>(),
        amount in "[a-z0-9.-]{1,6}",
    ) {
        let to = if same { from.clone() } else { "gbp".to_string() };
        let line = format!("Nobody {from} {to} {amount}");
        let mut directory = directory("usd", dec!(10));

        let outcome = SettlementPipeline::default()
            .process(&RawRequest::tokenize(&line), &rates(), &mut directory)
            .unwrap();

        prop_assert_eq!(outcome.rejection(), Some(RejectionReason::UserNotFound));
    }
}
