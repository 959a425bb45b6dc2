//! Wallet owners.

use serde::{Deserialize, Serialize};

use super::balances::Wallet;

/// A named user owning exactly one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    name: String,
    #[serde(default)]
    wallet: Wallet,
}

impl User {
    /// Creates a user with an empty wallet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_wallet(name, Wallet::new())
    }

    /// Creates a user owning `wallet`.
    #[must_use]
    pub fn with_wallet(name: impl Into<String>, wallet: Wallet) -> Self {
        Self {
            name: name.into(),
            wallet,
        }
    }

    /// The user's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The user's wallet.
    #[must_use]
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Mutable access for settlement.
    pub fn wallet_mut(&mut self) -> &mut Wallet {
        &mut self.wallet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_user_record() {
        let user: User =
            serde_json::from_str(r#"{"name": "Alice", "wallet": {"usd": 40.0}}"#).unwrap();
        assert_eq!(user.name(), "Alice");
        assert_eq!(user.wallet().balance("usd"), Some(dec!(40)));
    }

    #[test]
    fn test_missing_wallet_defaults_to_empty() {
        let user: User = serde_json::from_str(r#"{"name": "Bob"}"#).unwrap();
        assert!(user.wallet().is_empty());
    }
}
