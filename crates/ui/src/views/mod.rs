mod chat;
mod dashboard;
mod settings;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use chat::{ChatIntent, ChatSession, ChatView};
pub use dashboard::DashboardView;
pub use settings::{SettingsDialog, SettingsIntent};
pub use state::{SaveState, ViewError};
