//! Exchange rate table quoted against a single pivot currency.
//!
//! Every entry states how many units of a currency one pivot unit buys
//! (`rate`) and how many pivot units one unit of the currency buys
//! (`inverse_rate`). The pivot itself never appears as an entry; it is
//! recognised by its reserved code.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default reserved code of the pivot currency.
pub const DEFAULT_PIVOT_CURRENCY: &str = "usd";

/// Errors raised while building a [`RateTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateTableError {
    /// A rate or inverse rate is zero or negative.
    #[error("Rates for {currency} must be strictly positive")]
    NonPositiveRate {
        /// The offending table key.
        currency: String,
    },

    /// The pivot currency was supplied as a table entry.
    #[error("Pivot currency {currency} cannot be a rate table entry")]
    PivotInTable {
        /// The pivot code.
        currency: String,
    },
}

/// One currency quoted against the pivot.
///
/// Only `rate` and `inverse_rate` take part in conversion; the remaining
/// fields are descriptive and carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    /// Display code (e.g. "EUR").
    #[serde(default)]
    pub code: String,
    /// ISO 4217 alphabetic code.
    #[serde(default)]
    pub alpha_code: String,
    /// ISO 4217 numeric code.
    #[serde(default)]
    pub numeric_code: String,
    /// Display name (e.g. "Euro").
    #[serde(default)]
    pub name: String,
    /// Units of this currency per one pivot unit.
    pub rate: Decimal,
    /// Pivot units per one unit of this currency.
    pub inverse_rate: Decimal,
    /// Quote timestamp as published by the rate source.
    #[serde(default)]
    pub date: String,
}

impl RateEntry {
    /// Creates an entry with empty metadata.
    #[must_use]
    pub fn new(rate: Decimal, inverse_rate: Decimal) -> Self {
        Self {
            code: String::new(),
            alpha_code: String::new(),
            numeric_code: String::new(),
            name: String::new(),
            rate,
            inverse_rate,
            date: String::new(),
        }
    }

    /// Creates an entry whose inverse rate is the exact reciprocal of `rate`.
    ///
    /// Returns `None` when `rate` is zero.
    #[must_use]
    pub fn from_rate(rate: Decimal) -> Option<Self> {
        Decimal::ONE
            .checked_div(rate)
            .map(|inverse_rate| Self::new(rate, inverse_rate))
    }

    /// Attaches descriptive metadata.
    #[must_use]
    pub fn with_metadata(
        mut self,
        code: impl Into<String>,
        numeric_code: impl Into<String>,
        name: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        self.code = code.into();
        self.alpha_code.clone_from(&self.code);
        self.numeric_code = numeric_code.into();
        self.name = name.into();
        self.date = date.into();
        self
    }

    /// Parses the quote date (RFC 2822, e.g. "Tue, 13 Sep 2022 11:55:01 GMT").
    #[must_use]
    pub fn quoted_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc2822(&self.date).ok()
    }

    fn has_positive_rates(&self) -> bool {
        self.rate > Decimal::ZERO && self.inverse_rate > Decimal::ZERO
    }
}

/// Read-only lookup from currency code to its pivot quote.
#[derive(Debug, Clone)]
pub struct RateTable {
    pivot: String,
    entries: HashMap<String, RateEntry>,
}

impl RateTable {
    /// Builds a table, enforcing the entry invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RateTableError`] if an entry has a non-positive rate or if
    /// the pivot code appears among the entries.
    pub fn new<I>(pivot: impl Into<String>, entries: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (String, RateEntry)>,
    {
        let pivot = pivot.into();
        let mut table = HashMap::new();

        for (code, entry) in entries {
            if code == pivot {
                return Err(RateTableError::PivotInTable { currency: code });
            }
            if !entry.has_positive_rates() {
                return Err(RateTableError::NonPositiveRate { currency: code });
            }
            table.insert(code, entry);
        }

        Ok(Self {
            pivot,
            entries: table,
        })
    }

    /// The reserved pivot code.
    #[must_use]
    pub fn pivot(&self) -> &str {
        &self.pivot
    }

    /// Returns true if `code` is the pivot currency.
    #[must_use]
    pub fn is_pivot(&self, code: &str) -> bool {
        self.pivot == code
    }

    /// Returns true if `code` is the pivot or a table entry.
    #[must_use]
    pub fn is_known(&self, code: &str) -> bool {
        self.is_pivot(code) || self.entries.contains_key(code)
    }

    /// Looks up the quote for a non-pivot currency.
    #[must_use]
    pub fn lookup(&self, code: &str) -> Option<&RateEntry> {
        self.entries.get(code)
    }

    /// Number of quoted currencies (the pivot is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no currency besides the pivot is quoted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over quoted currency codes in no particular order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
