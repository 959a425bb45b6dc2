//! Rate table repository.
//!
//! The rates file is a JSON object keyed by currency code:
//!
//! ```json
//! {
//!   "eur": {
//!     "code": "EUR", "alphaCode": "EUR", "numericCode": "978",
//!     "name": "Euro", "rate": 1.015, "inverseRate": 0.985,
//!     "date": "Tue, 4 Jul 2023 11:55:01 GMT"
//!   }
//! }
//! ```
//!
//! Only `rate` and `inverseRate` are required. The pivot currency has no
//! entry.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use fxwallet_core::currency::{RateEntry, RateTable};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Read-only access to the rates file.
#[derive(Debug, Clone)]
pub struct RateRepository {
    path: PathBuf,
}

impl RateRepository {
    /// Creates a repository over `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the rates file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the rate table with `pivot` as the reference currency.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or is not valid JSON
    /// - A rate is not positive
    /// - The file quotes the pivot currency
    pub fn load(&self, pivot: &str) -> StoreResult<RateTable> {
        let file = File::open(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let entries: BTreeMap<String, RateEntry> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StoreError::json(&self.path, e))?;

        let table = RateTable::new(pivot, entries)?;
        debug!(
            path = %self.path.display(),
            pivot = %pivot,
            currencies = table.len(),
            "Loaded rate table"
        );
        Ok(table)
    }
}
