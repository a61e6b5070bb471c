use std::env;

use lingua_core::model::DEFAULT_AGENT_ID;

pub const DEFAULT_AGENT_URL: &str = "http://localhost:2024";

/// Where the agent service lives and which assistant to address by default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentConfig {
    pub base_url: String,
    pub assistant_id: String,
}

impl AgentConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, assistant_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            assistant_id: assistant_id.into(),
        }
    }

    /// Reads `LINGUA_AGENT_URL` and `LINGUA_AGENT_ID`, falling back to the
    /// local development server.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("LINGUA_AGENT_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AGENT_URL.into());
        let assistant_id = env::var("LINGUA_AGENT_ID")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AGENT_ID.into());
        Self {
            base_url,
            assistant_id,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_AGENT_URL, DEFAULT_AGENT_ID)
    }
}
