//! Persisted UI preferences.

use grantboard::themes::Theme;

use crate::local::storage::{LocalStorage, LocalStorageError, THEME_KEY};

#[derive(Debug, Clone)]
pub struct LocalPreferences {
    storage: LocalStorage,
}

impl LocalPreferences {
    #[must_use]
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// The stored theme, or the default when none or an unknown one is stored.
    pub async fn theme(&self) -> Result<Theme, LocalStorageError> {
        let stored = self.storage.get::<String>(THEME_KEY).await?;

        Ok(stored.as_deref().map(Theme::from_stored).unwrap_or_default())
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), LocalStorageError> {
        self.storage.set(THEME_KEY, theme.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn theme_defaults_to_modern() -> TestResult {
        let dir = tempfile::tempdir()?;
        let preferences = LocalPreferences::new(LocalStorage::open(dir.path()).await?);

        assert_eq!(preferences.theme().await?, Theme::Modern);

        Ok(())
    }

    #[tokio::test]
    async fn theme_round_trips_through_storage() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = LocalStorage::open(dir.path()).await?;

        LocalPreferences::new(storage.clone())
            .set_theme(Theme::Neu)
            .await?;

        assert_eq!(LocalPreferences::new(storage).theme().await?, Theme::Neu);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_stored_theme_falls_back() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = LocalStorage::open(dir.path()).await?;

        storage.set(THEME_KEY, "vaporwave").await?;

        assert_eq!(LocalPreferences::new(storage).theme().await?, Theme::Modern);

        Ok(())
    }
}
