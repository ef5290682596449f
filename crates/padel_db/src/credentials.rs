//! Persisted login credentials.

use crate::error::DbError;
use chrono::{DateTime, NaiveDateTime, Utc};
use padel_config::StorageConfig;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Tokens returned by a successful login, plus the account email.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub access_token_expiration: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub refresh_token_expiration: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
}

impl Credentials {
    /// Expirations are `YYYY-MM-DDTHH:MM:SS` in UTC. Anything unparseable
    /// counts as expired.
    pub fn access_token_expired(&self, now: DateTime<Utc>) -> bool {
        match NaiveDateTime::parse_from_str(self.access_token_expiration.trim(), EXPIRATION_FORMAT) {
            Ok(expiration) => now.naive_utc() > expiration,
            Err(_) => true,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Reads and writes `credentials.json` in the configuration directory.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(storage: &StorageConfig) -> Self {
        Self::new(storage.credentials_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nobody has logged in yet.
    pub fn load(&self) -> Result<Option<Credentials>, DbError> {
        if !self.path.exists() {
            return Ok(None);
        }
        if self.path.is_dir() {
            return Err(DbError::ConfigError(format!(
                "credentials path is a directory: {}",
                self.path.display()
            )));
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Writes the credentials readable by the owner only.
    pub fn save(&self, credentials: &Credentials) -> Result<(), DbError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        let mut content = serde_json::to_string_pretty(credentials)?;
        content.push('\n');
        file.write_all(content.as_bytes())?;
        debug!("Saved credentials to {}", self.path.display());
        Ok(())
    }

    /// Deletes the credentials file; a missing file is not an error.
    pub fn clear(&self) -> Result<(), DbError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
