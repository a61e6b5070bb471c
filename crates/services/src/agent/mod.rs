mod api;
mod chunk;
mod client;
mod config;
mod http;
mod sse;

pub use api::{AgentApi, ChunkStream, RunInput, RunMessage, RunRequest};
pub use chunk::partial_text;
pub use client::ChatAgent;
pub use config::{AgentConfig, DEFAULT_AGENT_URL};
pub use http::HttpAgentApi;
pub use sse::{SseDecoder, SseEvent};
