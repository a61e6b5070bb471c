use std::sync::Arc;

use lingua_core::Clock;
use lingua_core::model::{AgentSettings, AppState};
use storage::repository::Storage;

use crate::agent::{AgentApi, AgentConfig, ChatAgent, HttpAgentApi};
use crate::app_state_service::AppStateStore;
use crate::chat_service::ChatService;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::settings_service::SettingsService;

/// Assembles app-facing services over one state store.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<AppStateStore>,
    chat: Arc<ChatService>,
    settings: Arc<SettingsService>,
    dashboard: DashboardService,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP agent client.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or state loading fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        agent: &AgentConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let api: Arc<dyn AgentApi> = Arc::new(HttpAgentApi::new(agent));
        Self::from_parts(&storage, clock, api, &agent.assistant_id).await
    }

    /// Build services over any storage and agent transport.
    ///
    /// `default_agent` is used only when no snapshot exists yet.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the saved state cannot be loaded.
    pub async fn from_parts(
        storage: &Storage,
        clock: Clock,
        api: Arc<dyn AgentApi>,
        default_agent: &str,
    ) -> Result<Self, AppServicesError> {
        let defaults = AppState {
            agent: AgentSettings::new(default_agent).unwrap_or_default(),
            ..AppState::default()
        };
        let store = Arc::new(
            AppStateStore::load(clock, Arc::clone(&storage.app_state), defaults).await?,
        );
        let agent = Arc::new(ChatAgent::new(api));
        let chat = Arc::new(ChatService::new(agent, Arc::clone(&store)));
        let settings = Arc::new(SettingsService::new(Arc::clone(&store)));

        Ok(Self {
            store,
            chat,
            settings,
            dashboard: DashboardService::new(),
        })
    }

    #[must_use]
    pub fn store(&self) -> Arc<AppStateStore> {
        Arc::clone(&self.store)
    }

    #[must_use]
    pub fn chat(&self) -> Arc<ChatService> {
        Arc::clone(&self.chat)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardService {
        self.dashboard
    }
}
