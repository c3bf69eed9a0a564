//! Directory-backed key/value storage.

use std::{
    io::{self, ErrorKind},
    path::PathBuf,
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Key holding the full proposal list.
pub const PROPOSALS_KEY: &str = "proposals";

/// Key holding the selected theme name.
pub const THEME_KEY: &str = "ui.theme";

#[derive(Debug, Error)]
pub enum LocalStorageError {
    #[error("failed to access local storage at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("local storage key `{key}` holds malformed data")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode local storage key `{key}`")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A directory where each key is stored as `<key>.json`.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so readers never observe a partially written document.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    /// Open the storage directory, creating it when missing.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, LocalStorageError> {
        let dir = dir.into();

        fs::create_dir_all(&dir)
            .await
            .map_err(|source| LocalStorageError::Io {
                path: dir.clone(),
                source,
            })?;

        Ok(Self { dir })
    }

    /// Read and decode the value stored under `key`, if any.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LocalStorageError> {
        let path = self.path_for(key);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(LocalStorageError::Io { path, source }),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| LocalStorageError::Decode {
                key: key.to_owned(),
                source,
            })
    }

    /// Encode `value` and store it under `key`, replacing any previous value.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), LocalStorageError> {
        let encoded =
            serde_json::to_vec_pretty(value).map_err(|source| LocalStorageError::Encode {
                key: key.to_owned(),
                source,
            })?;

        let path = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));

        fs::write(&staging, encoded)
            .await
            .map_err(|source| LocalStorageError::Io {
                path: staging.clone(),
                source,
            })?;

        fs::rename(&staging, &path)
            .await
            .map_err(|source| LocalStorageError::Io {
                path: path.clone(),
                source,
            })?;

        debug!(key, path = %path.display(), "wrote local storage key");

        Ok(())
    }

    /// Remove the value stored under `key`. Missing keys are ignored.
    pub async fn remove(&self, key: &str) -> Result<(), LocalStorageError> {
        let path = self.path_for(key);

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(LocalStorageError::Io { path, source }),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn missing_keys_read_as_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = LocalStorage::open(dir.path()).await?;

        assert_eq!(storage.get::<Value>(PROPOSALS_KEY).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn set_then_get_returns_value() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = LocalStorage::open(dir.path()).await?;

        storage.set(THEME_KEY, "glass").await?;

        assert_eq!(
            storage.get::<String>(THEME_KEY).await?,
            Some("glass".to_string())
        );
        assert!(dir.path().join("ui.theme.json").exists());
        assert!(!dir.path().join(".ui.theme.json.tmp").exists());

        Ok(())
    }

    #[tokio::test]
    async fn malformed_documents_are_reported() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = LocalStorage::open(dir.path()).await?;

        std::fs::write(dir.path().join("proposals.json"), "{not json")?;

        let result = storage.get::<Value>(PROPOSALS_KEY).await;

        assert!(
            matches!(result, Err(LocalStorageError::Decode { .. })),
            "expected decode error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_is_idempotent() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = LocalStorage::open(dir.path()).await?;

        storage.set(PROPOSALS_KEY, &json!([])).await?;
        storage.remove(PROPOSALS_KEY).await?;
        storage.remove(PROPOSALS_KEY).await?;

        assert_eq!(storage.get::<Value>(PROPOSALS_KEY).await?, None);

        Ok(())
    }
}
