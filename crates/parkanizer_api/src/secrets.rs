use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParkanizerError;

/// The token pair persisted between invocations so that interactive login
/// can be skipped while the refresh cookie is still accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSecrets {
    /// Bearer token sent in the `Authorization` header.
    pub bearer_token: String,
    /// Value of the `refresh_token` cookie.
    pub refresh_cookie: String,
}

/// On-disk JSON store for [`SessionSecrets`].
///
/// A missing or unreadable file is reported as an error; callers treat that
/// as "no stored session" and fall back to credential login.
pub struct SecretsStore {
    path: PathBuf,
}

impl SecretsStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted token pair.
    pub fn load(&self) -> Result<SessionSecrets, ParkanizerError> {
        let raw = fs::read(&self.path).map_err(|e| {
            ParkanizerError::SecretsStore(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;
        serde_json::from_slice(&raw).map_err(|e| {
            ParkanizerError::SecretsStore(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Persist the token pair, overwriting any previous value.
    pub fn save(&self, secrets: &SessionSecrets) -> Result<(), ParkanizerError> {
        let raw = serde_json::to_vec_pretty(secrets).map_err(|e| {
            ParkanizerError::SecretsStore(format!("Failed to serialize secrets: {}", e))
        })?;
        fs::write(&self.path, raw).map_err(|e| {
            ParkanizerError::SecretsStore(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!("Stored session secrets at {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_secrets() {
        let dir = tempfile::tempdir().unwrap();
        let store = SecretsStore::new(dir.path().join("session_secrets.json"));

        let secrets = SessionSecrets {
            bearer_token: "bearer-abc".to_string(),
            refresh_cookie: "refresh-xyz".to_string(),
        };
        store.save(&secrets).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, secrets);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SecretsStore::new(dir.path().join("absent.json"));

        assert!(store.load().is_err());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session_secrets.json");
        fs::write(&path, b"not json at all").unwrap();

        let store = SecretsStore::new(path);
        assert!(store.load().is_err());
    }

    #[test]
    fn save_overwrites_previous_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = SecretsStore::new(dir.path().join("session_secrets.json"));

        store
            .save(&SessionSecrets {
                bearer_token: "old".to_string(),
                refresh_cookie: "old".to_string(),
            })
            .unwrap();
        store
            .save(&SessionSecrets {
                bearer_token: "new".to_string(),
                refresh_cookie: "new".to_string(),
            })
            .unwrap();

        assert_eq!(store.load().unwrap().bearer_token, "new");
    }
}
