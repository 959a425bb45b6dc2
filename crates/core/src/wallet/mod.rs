//! User wallets and the directory that owns them.

pub mod balances;
pub mod directory;
pub mod error;
pub mod user;

#[cfg(test)]
mod props;

pub use balances::{BalanceChange, Wallet};
pub use directory::{UserDirectory, UserSlot};
pub use error::{DirectoryError, WalletError};
pub use user::User;
