//! Lookup of wallet owners by name.

use std::collections::HashSet;

use super::error::DirectoryError;
use super::user::User;

/// Position of a user inside a [`UserDirectory`].
///
/// Slots stay valid for the directory's lifetime because users are never
/// added or removed while requests are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserSlot(usize);

/// The users taking part in a run, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Builds a directory, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateUser`] if two users share a name.
    pub fn new(users: Vec<User>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(users.len());
        for user in &users {
            if !seen.insert(user.name()) {
                return Err(DirectoryError::DuplicateUser(user.name().to_string()));
            }
        }
        Ok(Self { users })
    }

    /// Finds the slot of the user called `name` (exact, case-sensitive).
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<UserSlot> {
        self.users
            .iter()
            .position(|user| user.name() == name)
            .map(UserSlot)
    }

    /// Finds the user called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&User> {
        self.resolve(name).and_then(|slot| self.get(slot))
    }

    /// The user at `slot`.
    #[must_use]
    pub fn get(&self, slot: UserSlot) -> Option<&User> {
        self.users.get(slot.0)
    }

    /// Mutable access to the user at `slot`.
    pub fn get_mut(&mut self, slot: UserSlot) -> Option<&mut User> {
        self.users.get_mut(slot.0)
    }

    /// All users in load order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true if there are no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
