#![forbid(unsafe_code)]

pub mod agent;
pub mod app_services;
pub mod app_state_service;
pub mod chat_service;
pub mod dashboard_service;
pub mod error;
pub mod settings_service;

pub use lingua_core::Clock;

pub use agent::{AgentApi, AgentConfig, ChatAgent, ChunkStream, HttpAgentApi, RunRequest};
pub use app_services::AppServices;
pub use app_state_service::{AppStateStore, STORAGE_KEY};
pub use chat_service::{ChatService, PendingReply};
pub use dashboard_service::{DashboardService, sample_snapshot};
pub use error::{
    AgentError, AppServicesError, AppStateError, ChatError, SettingsServiceError,
};
pub use settings_service::SettingsService;
