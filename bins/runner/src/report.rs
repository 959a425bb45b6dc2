//! One human-readable line per processed request.

use rust_decimal::Decimal;

use fxwallet_core::currency::{MONEY_DECIMAL_PLACES, round_money};
use fxwallet_core::settlement::{Outcome, RawRequest, RejectionReason, Settlement};

/// Renders the log line for `outcome`.
///
/// Rejections are rendered from the raw fields, since a rejected request may
/// not have all four of them.
pub fn render(raw: &RawRequest, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Settled(settlement) => render_settlement(settlement),
        Outcome::Rejected { reason } => render_rejection(raw, *reason),
    }
}

fn render_settlement(settlement: &Settlement) -> String {
    format!(
        "Valid Transaction: Success! Converted {}{} to {}{} for {}.",
        settlement.from_currency,
        format_amount(settlement.amount_debited),
        settlement.to_currency,
        format_amount(settlement.amount_credited),
        settlement.user,
    )
}

fn render_rejection(raw: &RawRequest, reason: RejectionReason) -> String {
    let user = raw.user_name().unwrap_or_default();
    let from = raw.from_currency().unwrap_or_default();

    let detail = match reason {
        RejectionReason::UserNotFound => format!("User called {user} not found"),
        RejectionReason::CurrencyNotHeld => format!("{user} does not have {from} (FROM currency)"),
        RejectionReason::InsufficientBalance => {
            format!("{user} has insufficient amount of {from} (FROM currency)")
        }
        other => other.to_string(),
    };
    format!("Skipped Transaction: {detail}.")
}

/// Two decimals at most, no trailing zeros (`88`, `74.02`, `34.1`).
pub fn format_amount(amount: Decimal) -> String {
    round_money(amount, MONEY_DECIMAL_PLACES).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_settlement() {
        let outcome = Outcome::Settled(Settlement {
            user: "Alice".to_string(),
            from_currency: "eur".to_string(),
            to_currency: "gbp".to_string(),
            amount_debited: dec!(88.0),
            amount_credited: dec!(74.02),
            remaining_from_balance: None,
            new_to_balance: dec!(74.02),
        });
        let raw = RawRequest::tokenize("Alice eur gbp 88.0");

        assert_eq!(
            render(&raw, &outcome),
            "Valid Transaction: Success! Converted eur88 to gbp74.02 for Alice."
        );
    }

    #[rstest]
    #[case::insufficient(
        "Alice eur gbp 100",
        RejectionReason::InsufficientBalance,
        "Skipped Transaction: Alice has insufficient amount of eur (FROM currency)."
    )]
    #[case::not_held(
        "Bob jpy usd 5",
        RejectionReason::CurrencyNotHeld,
        "Skipped Transaction: Bob does not have jpy (FROM currency)."
    )]
    #[case::malformed(
        "Alice eur",
        RejectionReason::MalformedRequest,
        "Skipped Transaction: Transaction does not have exactly 4 components as required."
    )]
    #[case::blank_line(
        "",
        RejectionReason::MalformedRequest,
        "Skipped Transaction: Transaction does not have exactly 4 components as required."
    )]
    #[case::invalid_currency(
        "Alice xyz gbp 1",
        RejectionReason::InvalidCurrency,
        "Skipped Transaction: One or both of the currencies is invalid."
    )]
    #[case::non_positive(
        "Alice eur gbp -1",
        RejectionReason::NonPositiveAmount,
        "Skipped Transaction: Amount to convert is less than or equal to 0."
    )]
    #[case::user_not_found(
        "Carol eur gbp 1",
        RejectionReason::UserNotFound,
        "Skipped Transaction: User called Carol not found."
    )]
    #[case::same_currency(
        "Alice usd usd 1",
        RejectionReason::SameCurrency,
        "Skipped Transaction: Both the FROM and TO currencies are the same."
    )]
    #[case::malformed_amount(
        "Alice eur gbp ten",
        RejectionReason::MalformedAmount,
        "Skipped Transaction: Amount to convert is not a valid number."
    )]
    fn test_render_rejection(
        #[case] line: &str,
        #[case] reason: RejectionReason,
        #[case] expected: &str,
    ) {
        let raw = RawRequest::tokenize(line);
        assert_eq!(render(&raw, &reason.into()), expected);
    }

    #[rstest]
    #[case(dec!(88.0), "88")]
    #[case(dec!(34.10), "34.1")]
    #[case(dec!(1403.254), "1403.25")]
    #[case(dec!(0.005), "0")]
    fn test_format_amount(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_amount(amount), expected);
    }
}
