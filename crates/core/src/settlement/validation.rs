//! Business rule validation for conversion requests.
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. Exactly four components
//! 2. User exists
//! 3. FROM and TO currencies differ
//! 4. FROM, then TO, is the pivot or a quoted currency
//! 5. Amount is a number
//! 6. Amount is positive
//! 7. User holds a nonzero FROM balance
//! 8. FROM balance covers the amount
//!
//! Later checks rely on earlier ones (a currency check may name the user,
//! the balance checks need the resolved wallet), so the order is part of the
//! contract. No check mutates anything.

use rust_decimal::Decimal;

use super::rejection::RejectionReason;
use super::request::{ConversionRequest, RawRequest, RequestAmount};
use crate::currency::RateTable;
use crate::wallet::{User, UserDirectory, UserSlot, Wallet};

/// A request that passed every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest<'r> {
    /// Directory slot of the wallet owner.
    pub user: UserSlot,
    /// Owner name as requested.
    pub user_name: &'r str,
    /// Currency to debit.
    pub from_currency: &'r str,
    /// Currency to credit.
    pub to_currency: &'r str,
    /// Positive amount of the FROM currency.
    pub amount: Decimal,
}

/// The ordered check sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationChain;

impl ValidationChain {
    /// Runs check 1 on a tokenized request, then the rest of the chain.
    ///
    /// # Errors
    ///
    /// Returns the first failing check's [`RejectionReason`].
    pub fn validate_raw(
        &self,
        raw: &RawRequest,
        directory: &UserDirectory,
        rates: &RateTable,
    ) -> Result<ConversionRequest, RejectionReason> {
        let request = check_component_count(raw)?;
        self.validate(&request, directory, rates)?;
        Ok(request)
    }

    /// Runs checks 2 to 8 on a request whose shape is already known.
    ///
    /// # Errors
    ///
    /// Returns the first failing check's [`RejectionReason`].
    pub fn validate<'r>(
        &self,
        request: &'r ConversionRequest,
        directory: &UserDirectory,
        rates: &RateTable,
    ) -> Result<ValidatedRequest<'r>, RejectionReason> {
        let from = request.from_currency.as_str();
        let to = request.to_currency.as_str();

        let slot = resolve_user(directory, &request.user_name)?;
        check_distinct_currencies(from, to)?;
        check_known_currency(rates, from)?;
        check_known_currency(rates, to)?;
        check_amount_parsed(&request.amount)?;
        check_positive_amount(&request.amount)?;

        let wallet = directory
            .get(slot)
            .map(User::wallet)
            .ok_or(RejectionReason::UserNotFound)?;
        let balance = check_currency_held(wallet, from)?;
        let amount = check_sufficient_balance(balance, &request.amount)?;

        Ok(ValidatedRequest {
            user: slot,
            user_name: &request.user_name,
            from_currency: from,
            to_currency: to,
            amount,
        })
    }
}

/// Check 1: the request has exactly four components.
pub fn check_component_count(raw: &RawRequest) -> Result<ConversionRequest, RejectionReason> {
    ConversionRequest::from_raw(raw)
}

/// Check 2: the user exists.
pub fn resolve_user(directory: &UserDirectory, name: &str) -> Result<UserSlot, RejectionReason> {
    directory.resolve(name).ok_or(RejectionReason::UserNotFound)
}

/// Check 3: the currencies differ (case-sensitive).
pub fn check_distinct_currencies(from: &str, to: &str) -> Result<(), RejectionReason> {
    if from == to {
        return Err(RejectionReason::SameCurrency);
    }
    Ok(())
}

/// Check 4: the currency is the pivot or quoted in the table.
pub fn check_known_currency(rates: &RateTable, code: &str) -> Result<(), RejectionReason> {
    if !rates.is_known(code) {
        return Err(RejectionReason::InvalidCurrency);
    }
    Ok(())
}

/// Check 5: the amount is a number.
///
/// Numbers too large for a balance pass; they fail at check 8.
pub fn check_amount_parsed(amount: &RequestAmount) -> Result<(), RejectionReason> {
    if let RequestAmount::Malformed(_) = amount {
        return Err(RejectionReason::MalformedAmount);
    }
    Ok(())
}

/// Check 6: the amount is strictly positive.
pub fn check_positive_amount(amount: &RequestAmount) -> Result<(), RejectionReason> {
    if !amount.is_positive() {
        return Err(RejectionReason::NonPositiveAmount);
    }
    Ok(())
}

/// Check 7: the wallet holds a nonzero balance in `currency`.
///
/// The pivot currency follows the same rule as any other.
pub fn check_currency_held(wallet: &Wallet, currency: &str) -> Result<Decimal, RejectionReason> {
    wallet
        .balance(currency)
        .filter(|balance| !balance.is_zero())
        .ok_or(RejectionReason::CurrencyNotHeld)
}

/// Check 8: the balance covers the amount. Returns the amount to settle.
///
/// An out-of-range amount exceeds every balance.
pub fn check_sufficient_balance(
    balance: Decimal,
    amount: &RequestAmount,
) -> Result<Decimal, RejectionReason> {
    match amount {
        RequestAmount::Parsed(value) if *value <= balance => Ok(*value),
        _ => Err(RejectionReason::InsufficientBalance),
    }
}
