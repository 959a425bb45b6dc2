//! Per-user multi-currency balances.
//!
//! Invariants:
//! - Balances are never negative (checked on load, guaranteed by validation before settlement)
//! - A balance that reaches exactly zero during settlement is removed in the same operation
//!   (this covers a fresh credit that rounds to zero as well as a full debit)

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::WalletError;
use crate::currency::round_money;

/// Mapping from currency code to balance.
///
/// Serializes as a plain JSON object (`{"eur": 88.0}`); deserialization
/// rejects negative balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Decimal>", into = "BTreeMap<String, Decimal>")]
pub struct Wallet {
    balances: BTreeMap<String, Decimal>,
}

/// Balances left behind by a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChange {
    /// Remaining balance of the debited currency, `None` if it was pruned.
    pub debited_balance: Option<Decimal>,
    /// New balance of the credited currency.
    pub credited_balance: Decimal,
}

impl Wallet {
    /// Creates an empty wallet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a wallet from existing balances.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::NegativeBalance`] for any negative entry.
    pub fn from_balances<I, S>(balances: I) -> Result<Self, WalletError>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (currency, balance) in balances {
            let currency = currency.into();
            if balance < Decimal::ZERO {
                return Err(WalletError::NegativeBalance { currency, balance });
            }
            map.insert(currency, balance);
        }
        Ok(Self { balances: map })
    }

    /// Balance held in `currency`, if there is an entry for it.
    #[must_use]
    pub fn balance(&self, currency: &str) -> Option<Decimal> {
        self.balances.get(currency).copied()
    }

    /// Returns true if the wallet holds a nonzero balance in `currency`.
    #[must_use]
    pub fn holds(&self, currency: &str) -> bool {
        self.balance(currency).is_some_and(|balance| !balance.is_zero())
    }

    /// Number of currency entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns true if the wallet has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Iterates over `(currency, balance)` pairs ordered by currency code.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.balances.iter().map(|(code, balance)| (code.as_str(), *balance))
    }

    /// Applies a conversion: credits `to`, debits `from`, prunes `from` at zero.
    ///
    /// Both resulting balances are rounded to `decimal_places` before they
    /// are stored, and the zero check runs on the rounded value. Nothing is
    /// written unless both new balances could be computed.
    ///
    /// `from` and `to` must differ; sufficiency is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::Overflow`] if either balance overflows.
    pub fn settle(
        &mut self,
        from: &str,
        debit: Decimal,
        to: &str,
        credit: Decimal,
        decimal_places: u32,
    ) -> Result<BalanceChange, WalletError> {
        // 1. Compute both sides before touching the map
        let credited_balance = self
            .balance(to)
            .unwrap_or(Decimal::ZERO)
            .checked_add(credit)
            .map(|balance| round_money(balance, decimal_places))
            .ok_or_else(|| WalletError::Overflow {
                currency: to.to_string(),
            })?;

        let debited_balance = self
            .balance(from)
            .unwrap_or(Decimal::ZERO)
            .checked_sub(debit)
            .map(|balance| round_money(balance, decimal_places))
            .ok_or_else(|| WalletError::Overflow {
                currency: from.to_string(),
            })?;

        // 2. Credit the target currency (creates the entry on first credit).
        // A new entry whose credit rounds to nothing is not kept either.
        if credited_balance.is_zero() {
            self.balances.remove(to);
        } else {
            self.balances.insert(to.to_string(), credited_balance);
        }

        // 3. Debit the source currency, pruning it at exactly zero
        if debited_balance.is_zero() {
            self.balances.remove(from);
            Ok(BalanceChange {
                debited_balance: None,
                credited_balance,
            })
        } else {
            self.balances.insert(from.to_string(), debited_balance);
            Ok(BalanceChange {
                debited_balance: Some(debited_balance),
                credited_balance,
            })
        }
    }
}

impl TryFrom<BTreeMap<String, Decimal>> for Wallet {
    type Error = WalletError;

    fn try_from(balances: BTreeMap<String, Decimal>) -> Result<Self, Self::Error> {
        Self::from_balances(balances)
    }
}

impl From<Wallet> for BTreeMap<String, Decimal> {
    fn from(wallet: Wallet) -> Self {
        wallet.balances
    }
}
