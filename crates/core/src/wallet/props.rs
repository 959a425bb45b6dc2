//! Property-based tests for wallet settlement.
//!
//! - Debiting the whole balance removes the entry
//! - Any other remainder stays, with the rounded value
//! - A failed settlement never changes the wallet

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balances::Wallet;

/// Strategy to generate two-decimal balances (0.01 to 1,000,000.00).
fn balance() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* balance, debiting exactly that balance SHALL remove the entry.
    #[test]
    fn prop_full_debit_prunes_entry(
        held in balance(),
        credit in balance(),
    ) {
        let mut wallet = Wallet::from_balances([("eur", held)]).unwrap();
        let change = wallet.settle("eur", held, "gbp", credit, 2).unwrap();

        prop_assert_eq!(change.debited_balance, None);
        prop_assert!(wallet.balance("eur").is_none());
        prop_assert_eq!(wallet.balance("gbp"), Some(credit));
    }

    /// *For any* partial debit, the entry SHALL remain with `held - debit`.
    #[test]
    fn prop_partial_debit_keeps_remainder(
        held in balance(),
        debit_cents in 1i64..100_000_000i64,
    ) {
        let debit = Decimal::new(debit_cents, 2);
        prop_assume!(debit < held);

        let mut wallet = Wallet::from_balances([("eur", held)]).unwrap();
        wallet.settle("eur", debit, "usd", Decimal::ONE, 2).unwrap();

        prop_assert_eq!(wallet.balance("eur"), Some(held - debit));
    }

    /// *For any* settlement, no zero-valued entry SHALL remain.
    #[test]
    fn prop_no_zero_entries_after_settlement(
        held in balance(),
        debit_millis in 1i64..1_000_000_000i64,
        credit in balance(),
    ) {
        let debit = Decimal::new(debit_millis, 3);
        prop_assume!(debit <= held);

        let mut wallet = Wallet::from_balances([("eur", held)]).unwrap();
        wallet.settle("eur", debit, "gbp", credit, 2).unwrap();

        prop_assert!(wallet.iter().all(|(_, amount)| !amount.is_zero()));
    }
}
