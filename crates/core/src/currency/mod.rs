//! Pivot-currency exchange rates and conversion.

pub mod conversion;
pub mod rate_table;
pub mod rounding;

#[cfg(test)]
mod props;

pub use conversion::{ConversionEngine, ConversionError};
pub use rate_table::{DEFAULT_PIVOT_CURRENCY, RateEntry, RateTable, RateTableError};
pub use rounding::{MONEY_DECIMAL_PLACES, round_money};
