use std::sync::Arc;

use lingua_core::model::{UserSettings, UserSettingsDraft};

use crate::app_state_service::AppStateStore;
use crate::error::SettingsServiceError;

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<AppStateStore>,
}

impl SettingsService {
    #[must_use]
    pub fn new(store: Arc<AppStateStore>) -> Self {
        Self { store }
    }

    /// Current settings, e.g. to seed an edit form.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if the state store is unavailable.
    pub fn load(&self) -> Result<UserSettings, SettingsServiceError> {
        Ok(self.store.settings()?)
    }

    /// Validate the draft and replace the stored settings with it.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError::Invalid` for blank fields (nothing is
    /// stored), or `SettingsServiceError::State` if saving fails.
    pub async fn save(
        &self,
        draft: UserSettingsDraft,
    ) -> Result<UserSettings, SettingsServiceError> {
        let settings = draft.validate()?;
        self.store.update_settings(settings.clone()).await?;
        Ok(settings)
    }
}
