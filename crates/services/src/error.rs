//! Shared error types for the services crate.

use thiserror::Error;

use lingua_core::model::{MessageError, SettingsError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors raised while talking to the remote agent service.
///
/// The `Display` text is what the learner sees in the failed reply.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AgentError {
    #[error("agent request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("agent transport failed: {0}")]
    Transport(String),
}

/// Errors emitted by `AppStateStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppStateError {
    #[error("state lock poisoned")]
    Poisoned,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ChatService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatError {
    #[error(transparent)]
    Input(#[from] MessageError),
    #[error("a reply is still streaming")]
    ReplyInFlight,
    #[error(transparent)]
    State(#[from] AppStateError),
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Invalid(#[from] SettingsError),
    #[error(transparent)]
    State(#[from] AppStateError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    State(#[from] AppStateError),
}
