//! Core business logic for fxwallet.
//!
//! This crate contains pure business logic with ZERO file system or logging
//! dependencies. Rate tables, wallets, validation rules and settlement live
//! here; loading, persisting and rendering are the caller's job.
//!
//! # Modules
//!
//! - `currency` - Pivot-currency rate table, conversion and rounding
//! - `wallet` - User wallets, zero-balance pruning and the user directory
//! - `settlement` - Validation chain and settlement pipeline

pub mod currency;
pub mod settlement;
pub mod wallet;
