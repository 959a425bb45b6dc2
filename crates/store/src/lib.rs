//! File storage for fxwallet.
//!
//! This crate provides:
//! - The rate table repository (`fx_rates.json`)
//! - The user repository (`users.json`), rewritten after every settlement
//! - The transaction feed (`transactions.txt`), one request per line

pub mod error;
pub mod feed;
pub mod repositories;

pub use error::{StoreError, StoreResult};
pub use feed::{FeedLine, TransactionFeed};
pub use repositories::{RateRepository, UserRepository};
