use std::sync::Arc;

use services::{AppServices, AppStateStore, ChatService, DashboardService, SettingsService};

/// Services the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn store(&self) -> Arc<AppStateStore>;
    fn chat(&self) -> Arc<ChatService>;
    fn settings(&self) -> Arc<SettingsService>;
    fn dashboard(&self) -> DashboardService;
}

impl UiApp for AppServices {
    fn store(&self) -> Arc<AppStateStore> {
        AppServices::store(self)
    }

    fn chat(&self) -> Arc<ChatService> {
        AppServices::chat(self)
    }

    fn settings(&self) -> Arc<SettingsService> {
        AppServices::settings(self)
    }

    fn dashboard(&self) -> DashboardService {
        AppServices::dashboard(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    store: Arc<AppStateStore>,
    chat: Arc<ChatService>,
    settings: Arc<SettingsService>,
    dashboard: DashboardService,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            store: app.store(),
            chat: app.chat(),
            settings: app.settings(),
            dashboard: app.dashboard(),
        }
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

// Provided by the composition root (`crates/app`) or the test harness.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
