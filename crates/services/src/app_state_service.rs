use std::sync::{Arc, Mutex, MutexGuard};

use lingua_core::Clock;
use lingua_core::model::{AgentSettings, AppState, Message, MessageId, MessagePatch, UserSettings};
use storage::repository::{AppStateRecord, AppStateRepository, StorageError};
use tracing::{debug, warn};

use crate::error::AppStateError;

/// Key the snapshot is stored under.
pub const STORAGE_KEY: &str = "language-learning-storage";

/// Single owner of settings and the chat transcript.
///
/// Every mutation is mirrored to the repository as a full snapshot. The
/// in-memory lock is never held across an await.
pub struct AppStateStore {
    clock: Clock,
    repo: Arc<dyn AppStateRepository>,
    state: Mutex<AppState>,
}

impl AppStateStore {
    /// Restore the last saved snapshot, or start from `defaults`.
    ///
    /// A snapshot that cannot be decoded is ignored and `defaults` are used;
    /// it is overwritten by the next write. Replies left streaming by a
    /// previous run are closed with whatever text they had.
    ///
    /// # Errors
    ///
    /// Returns `AppStateError` if the repository itself fails.
    pub async fn load(
        clock: Clock,
        repo: Arc<dyn AppStateRepository>,
        defaults: AppState,
    ) -> Result<Self, AppStateError> {
        let restored = match repo.load_state(STORAGE_KEY).await {
            Ok(Some(record)) => record.into_state().map(Some),
            Ok(None) => Ok(None),
            Err(err) => Err(err),
        };
        let state = match restored {
            Ok(Some(mut state)) => {
                let closed = state.transcript.close_interrupted();
                if closed > 0 {
                    warn!(closed, "closed replies interrupted by a previous run");
                }
                debug!(messages = state.transcript.len(), "restored saved state");
                state
            }
            Ok(None) => defaults,
            Err(StorageError::Serialization(reason)) => {
                warn!(%reason, "saved state unreadable, starting from defaults");
                defaults
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            clock,
            repo,
            state: Mutex::new(state),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, AppState>, AppStateError> {
        self.state.lock().map_err(|_| AppStateError::Poisoned)
    }

    /// # Errors
    ///
    /// Returns `AppStateError::Poisoned` if a writer panicked.
    pub fn snapshot(&self) -> Result<AppState, AppStateError> {
        Ok(self.lock()?.clone())
    }

    /// # Errors
    ///
    /// Returns `AppStateError::Poisoned` if a writer panicked.
    pub fn settings(&self) -> Result<UserSettings, AppStateError> {
        Ok(self.lock()?.settings.clone())
    }

    /// # Errors
    ///
    /// Returns `AppStateError::Poisoned` if a writer panicked.
    pub fn agent(&self) -> Result<AgentSettings, AppStateError> {
        Ok(self.lock()?.agent.clone())
    }

    /// # Errors
    ///
    /// Returns `AppStateError::Poisoned` if a writer panicked.
    pub fn messages(&self) -> Result<Vec<Message>, AppStateError> {
        Ok(self.lock()?.transcript.messages().to_vec())
    }

    /// Mutate state in memory only. Call `persist` to mirror it.
    ///
    /// # Errors
    ///
    /// Returns `AppStateError::Poisoned` if a writer panicked.
    pub fn modify<T>(&self, f: impl FnOnce(&mut AppState) -> T) -> Result<T, AppStateError> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    /// Write the current state as the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AppStateError` if the repository rejects the write.
    pub async fn persist(&self) -> Result<(), AppStateError> {
        let record = AppStateRecord::from_state(&*self.lock()?);
        self.repo
            .save_state(STORAGE_KEY, &record, self.clock.now())
            .await?;
        Ok(())
    }

    /// Replace the settings record wholesale and persist.
    ///
    /// # Errors
    ///
    /// Returns `AppStateError` if persisting fails; the in-memory change stays.
    pub async fn update_settings(&self, settings: UserSettings) -> Result<(), AppStateError> {
        self.modify(|state| state.update_settings(settings))?;
        self.persist().await
    }

    /// Patch the message with `id` in memory.
    ///
    /// Returns the updated message, or `None` when no message has that id.
    ///
    /// # Errors
    ///
    /// Returns `AppStateError::Poisoned` if a writer panicked.
    pub fn patch_message(
        &self,
        id: MessageId,
        patch: &MessagePatch,
    ) -> Result<Option<Message>, AppStateError> {
        self.modify(|state| state.update_message(id, patch).cloned())
    }
}
