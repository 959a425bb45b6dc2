//! User repository.
//!
//! The users file is a JSON array of `{"name": ..., "wallet": {code: balance}}`
//! records. Array order is preserved across load and save.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use fxwallet_core::wallet::{User, UserDirectory};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Read/write access to the users file.
#[derive(Debug, Clone)]
pub struct UserRepository {
    path: PathBuf,
}

impl UserRepository {
    /// Creates a repository over `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the users file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every user and wallet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON,
    /// contains a negative balance or names a user twice.
    pub fn load(&self) -> StoreResult<UserDirectory> {
        let file = File::open(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let users: Vec<User> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StoreError::json(&self.path, e))?;

        let directory = UserDirectory::new(users)?;
        debug!(path = %self.path.display(), users = directory.len(), "Loaded users");
        Ok(directory)
    }

    /// Writes the whole directory back.
    ///
    /// The content goes to a sibling temporary file first and is renamed
    /// over the target, so a crash never leaves a half-written file.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    pub fn save(&self, directory: &UserDirectory) -> StoreResult<()> {
        let staging = self.staging_path();

        let file = File::create(&staging).map_err(|e| StoreError::io(&staging, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, directory.users())
            .map_err(|e| StoreError::json(&staging, e))?;
        writer.write_all(b"\n").map_err(|e| StoreError::io(&staging, e))?;
        writer
            .into_inner()
            .map_err(|e| StoreError::io(&staging, e.into_error()))?
            .sync_all()
            .map_err(|e| StoreError::io(&staging, e))?;

        if let Err(err) = fs::rename(&staging, &self.path) {
            fs::remove_file(&staging).ok();
            return Err(StoreError::io(&self.path, err));
        }
        debug!(path = %self.path.display(), users = directory.len(), "Saved users");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "users.json".into(), |name| name.to_string_lossy());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}
