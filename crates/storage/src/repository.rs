use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lingua_core::model::{
    AgentSettings, AppState, Author, Message, MessageId, Transcript, UserSettings,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

fn ser<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Persisted shape of the whole client state.
///
/// Stored as one JSON document under a fixed key. There is no version field:
/// a payload that no longer matches this shape fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStateRecord {
    pub agent_settings: AgentSettingsRecord,
    pub settings: UserSettingsRecord,
    pub messages: Vec<MessageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettingsRecord {
    pub agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsRecord {
    pub name: String,
    pub native_language: String,
    pub target_language: String,
    pub proficiency_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: MessageId,
    pub content: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_streaming: Option<bool>,
}

impl MessageRecord {
    #[must_use]
    pub fn from_message(message: &Message) -> Self {
        // User messages never stream, so the flag is only written for replies.
        let is_streaming = match message.author() {
            Author::User => None,
            Author::System => Some(message.is_streaming()),
        };
        Self {
            id: message.id(),
            content: message.content().to_owned(),
            author: message.author().as_str().to_owned(),
            is_streaming,
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for an unknown author tag.
    pub fn into_message(self) -> Result<Message, StorageError> {
        let author: Author = self.author.parse().map_err(ser)?;
        Ok(Message::from_persisted(
            self.id,
            author,
            self.content,
            self.is_streaming.unwrap_or(false),
        ))
    }
}

impl AppStateRecord {
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        let settings = &state.settings;
        Self {
            agent_settings: AgentSettingsRecord {
                agent: state.agent.agent().to_owned(),
            },
            settings: UserSettingsRecord {
                name: settings.name().to_owned(),
                native_language: settings.native_language().to_owned(),
                target_language: settings.target_language().to_owned(),
                proficiency_level: settings.proficiency_level().to_owned(),
            },
            messages: state
                .transcript
                .messages()
                .iter()
                .map(MessageRecord::from_message)
                .collect(),
        }
    }

    /// Convert the record back into domain state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for a blank agent id or an unknown
    /// message author. Profile fields are restored as stored.
    pub fn into_state(self) -> Result<AppState, StorageError> {
        let agent = AgentSettings::new(self.agent_settings.agent).map_err(ser)?;
        let settings = UserSettings::from_persisted(
            self.settings.name,
            self.settings.native_language,
            self.settings.target_language,
            self.settings.proficiency_level,
        );
        let messages = self
            .messages
            .into_iter()
            .map(MessageRecord::into_message)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AppState::new(agent, settings, Transcript::from_messages(messages)))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if JSON encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(ser)
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the payload is not a valid record.
    pub fn from_json(payload: &str) -> Result<Self, StorageError> {
        serde_json::from_str(payload).map_err(ser)
    }
}

//
// ─── REPOSITORIES ──────────────────────────────────────────────────────────────
//

/// Key-value store for full state snapshots. Writes replace the previous
/// snapshot under the same key.
#[async_trait]
pub trait AppStateRepository: Send + Sync {
    /// Fetch the snapshot stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails or the payload cannot be decoded.
    async fn load_state(&self, key: &str) -> Result<Option<AppStateRecord>, StorageError>;

    /// Store `record` under `key`, replacing any previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    async fn save_state(
        &self,
        key: &str,
        record: &AppStateRecord,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Snapshots are kept as encoded JSON so loads go through the same decoding
/// path as the `SQLite` adapter.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    snapshots: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppStateRepository for InMemoryRepository {
    async fn load_state(&self, key: &str) -> Result<Option<AppStateRecord>, StorageError> {
        let guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(key)
            .map(String::as_str)
            .map(AppStateRecord::from_json)
            .transpose()
    }

    async fn save_state(
        &self,
        key: &str,
        record: &AppStateRecord,
        _saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let payload = record.to_json()?;
        let mut guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), payload);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub app_state: Arc<dyn AppStateRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let app_state: Arc<dyn AppStateRepository> = Arc::new(InMemoryRepository::new());
        Self { app_state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::model::{ChatInput, StreamUpdate, UserSettingsDraft};
    use lingua_core::time::fixed_now;

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        state.update_settings(
            UserSettingsDraft {
                name: "Ana".into(),
                native_language: "Spanish".into(),
                target_language: "English".into(),
                proficiency_level: "B2".into(),
            }
            .validate()
            .unwrap(),
        );
        let turn = state
            .transcript
            .begin_turn(&ChatInput::parse("How do I say hello?").unwrap());
        state
            .transcript
            .apply_update(turn.reply_id, &StreamUpdate::done("You say *hello*."));
        state
    }

    #[tokio::test]
    async fn round_trips_state_through_json() {
        let repo = InMemoryRepository::new();
        let state = sample_state();
        let record = AppStateRecord::from_state(&state);

        repo.save_state("k", &record, fixed_now()).await.unwrap();
        let loaded = repo.load_state("k").await.unwrap().unwrap();
        assert_eq!(loaded, record);
        assert_eq!(loaded.into_state().unwrap(), state);
    }

    #[tokio::test]
    async fn missing_key_loads_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_state("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn last_write_wins() {
        let repo = InMemoryRepository::new();
        let first = AppStateRecord::from_state(&AppState::default());
        let second = AppStateRecord::from_state(&sample_state());

        repo.save_state("k", &first, fixed_now()).await.unwrap();
        repo.save_state("k", &second, fixed_now()).await.unwrap();
        assert_eq!(repo.load_state("k").await.unwrap(), Some(second));
    }

    #[test]
    fn json_uses_camel_case_and_omits_user_streaming_flag() {
        let record = AppStateRecord::from_state(&sample_state());
        let json = record.to_json().unwrap();
        assert!(json.contains("\"nativeLanguage\":\"Spanish\""));
        assert!(json.contains("\"agentSettings\":{\"agent\":\"agent\"}"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let messages = value["messages"].as_array().unwrap();
        assert!(messages[0].get("isStreaming").is_none());
        assert_eq!(messages[1]["isStreaming"], serde_json::Value::Bool(false));
    }

    #[test]
    fn blank_profile_fields_load_as_stored() {
        let mut record = AppStateRecord::from_state(&sample_state());
        record.settings.name = String::new();
        let state = record.into_state().unwrap();
        assert_eq!(state.settings.name(), "");
        assert_eq!(state.settings.native_language(), "Spanish");
    }

    #[test]
    fn unknown_author_fails_to_load() {
        let mut record = AppStateRecord::from_state(&sample_state());
        record.messages[0].author = "robot".into();
        assert!(matches!(
            record.into_state(),
            Err(StorageError::Serialization(_))
        ));
    }
}
