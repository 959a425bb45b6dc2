//! Conversion requests as handed to the pipeline.
//!
//! A [`RawRequest`] is the tokenized form (any number of fields). A
//! [`ConversionRequest`] has exactly the four expected fields, with the
//! amount already classified as a number, a number out of range, or
//! malformed text. Parse failures are carried rather than reported so the
//! validation chain can report them at their fixed position, after the user
//! and currency checks.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::rejection::RejectionReason;

/// Number of fields in a well-formed request.
pub const REQUEST_FIELD_COUNT: usize = 4;

/// A tokenized request: `user from to amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    fields: Vec<String>,
}

impl RawRequest {
    /// Wraps already-split fields.
    #[must_use]
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Splits a text line on whitespace.
    #[must_use]
    pub fn tokenize(line: &str) -> Self {
        Self::new(line.split_whitespace().map(str::to_string).collect())
    }

    /// All fields.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The user name field, if present.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.fields.first().map(String::as_str)
    }

    /// The FROM currency field, if present.
    #[must_use]
    pub fn from_currency(&self) -> Option<&str> {
        self.fields.get(1).map(String::as_str)
    }

    /// The TO currency field, if present.
    #[must_use]
    pub fn to_currency(&self) -> Option<&str> {
        self.fields.get(2).map(String::as_str)
    }
}

impl fmt::Display for RawRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join(" "))
    }
}

/// Order of magnitude of the largest power of ten a `Decimal` can hold.
const MAX_MAGNITUDE: i64 = 28;

/// Order of magnitude of the finest step a `Decimal` can hold.
const MIN_MAGNITUDE: i64 = -28;

/// The amount field of a request, sign not yet checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAmount {
    /// A well-formed number.
    Parsed(Decimal),
    /// A well-formed number too large for any balance. Only its sign takes
    /// part in validation; it always fails the balance checks.
    OutOfRange {
        /// Sign of the number.
        positive: bool,
    },
    /// Text that is not a number, kept for reporting. Rejected at check 5,
    /// after the user and currency checks.
    Malformed(String),
}

impl RequestAmount {
    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]`, where either side of
    /// the point may be empty but not both.
    ///
    /// Digit separators, `NaN` and `Infinity` are malformed. Nonzero values
    /// below the finest representable step keep their sign at that step.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let Some((negative, digits, point)) = split_number(text.trim()) else {
            return Self::Malformed(text.to_string());
        };

        let trimmed = digits.trim_start_matches('0');
        let leading_zeros = i64::try_from(digits.len() - trimmed.len()).unwrap_or(i64::MAX);
        let significand = trimmed.trim_end_matches('0');
        if significand.is_empty() {
            return Self::Parsed(Decimal::ZERO);
        }

        let point = point.saturating_sub(leading_zeros);
        let magnitude = point.saturating_sub(1);
        if magnitude > MAX_MAGNITUDE {
            return Self::OutOfRange {
                positive: !negative,
            };
        }

        let finest = Decimal::new(1, 28);
        let value = if magnitude < MIN_MAGNITUDE {
            finest
        } else {
            match Decimal::from_str(&plain_decimal(significand, point)) {
                Ok(value) if value.is_zero() => finest,
                Ok(value) => value,
                Err(_) => {
                    return Self::OutOfRange {
                        positive: !negative,
                    };
                }
            }
        };
        Self::Parsed(if negative { -value } else { value })
    }

    /// Returns true if the amount is a number greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Parsed(value) => *value > Decimal::ZERO,
            Self::OutOfRange { positive } => *positive,
            Self::Malformed(_) => false,
        }
    }
}

/// Splits a number into its sign, all mantissa digits and the position of
/// the decimal point within them (exponent applied).
fn split_number(text: &str) -> Option<(bool, String, i64)> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], parse_exponent(&unsigned[at + 1..])?),
        None => (unsigned, 0),
    };

    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if !is_digits(integer) || !is_digits(fraction) {
        return None;
    }

    let point = i64::try_from(integer.len())
        .unwrap_or(i64::MAX)
        .saturating_add(exponent);
    Some((negative, format!("{integer}{fraction}"), point))
}

fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !is_digits(digits) {
        return None;
    }
    let value = digits.bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -value } else { value })
}

fn is_digits(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

/// Writes `significand` with the decimal point at `point` and no exponent.
fn plain_decimal(significand: &str, point: i64) -> String {
    if point <= 0 {
        let zeros = usize::try_from(point.unsigned_abs()).unwrap_or_default();
        return format!("0.{}{significand}", "0".repeat(zeros));
    }
    let point = usize::try_from(point).unwrap_or(usize::MAX);
    if point >= significand.len() {
        format!("{significand}{}", "0".repeat(point - significand.len()))
    } else {
        format!("{}.{}", &significand[..point], &significand[point..])
    }
}

/// A request with all four fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Name of the wallet owner.
    pub user_name: String,
    /// Currency to convert from.
    pub from_currency: String,
    /// Currency to convert to.
    pub to_currency: String,
    /// Amount of the FROM currency.
    pub amount: RequestAmount,
}

impl ConversionRequest {
    /// Creates a request with an already-parsed amount.
    #[must_use]
    pub fn new(
        user_name: impl Into<String>,
        from_currency: impl Into<String>,
        to_currency: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
            amount: RequestAmount::Parsed(amount),
        }
    }

    /// Builds a request from tokenized fields.
    ///
    /// # Errors
    ///
    /// Returns [`RejectionReason::MalformedRequest`] unless there are exactly
    /// four fields.
    pub fn from_raw(raw: &RawRequest) -> Result<Self, RejectionReason> {
        match raw.fields() {
            [user_name, from_currency, to_currency, amount] => Ok(Self {
                user_name: user_name.clone(),
                from_currency: from_currency.clone(),
                to_currency: to_currency.clone(),
                amount: RequestAmount::parse(amount),
            }),
            _ => Err(RejectionReason::MalformedRequest),
        }
    }
}
