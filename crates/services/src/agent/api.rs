use async_trait::async_trait;
use futures::stream::BoxStream;
use lingua_core::model::ThreadId;
use serde::Serialize;
use serde_json::Value;

use crate::error::AgentError;

/// Raw chunks of a streamed run, in arrival order.
pub type ChunkStream = BoxStream<'static, Result<Value, AgentError>>;

/// Transport for the remote agent service.
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Open a new conversation thread.
    ///
    /// # Errors
    ///
    /// Returns `AgentError` if the request fails or the service rejects it.
    async fn create_thread(&self) -> Result<ThreadId, AgentError>;

    /// Start a run on `thread_id` and stream its output.
    ///
    /// # Errors
    ///
    /// Returns `AgentError` if the run cannot be started. Failures after the
    /// stream is open arrive as `Err` items.
    async fn stream_run(
        &self,
        thread_id: &ThreadId,
        request: RunRequest,
    ) -> Result<ChunkStream, AgentError>;
}

/// Body of a streamed run request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunRequest {
    pub assistant_id: String,
    pub input: RunInput,
    pub stream_mode: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunInput {
    pub messages: Vec<RunMessage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunMessage {
    pub role: &'static str,
    pub content: String,
}

impl RunRequest {
    /// A single user turn streamed in `messages` mode.
    #[must_use]
    pub fn user_message(assistant_id: &str, content: &str) -> Self {
        Self {
            assistant_id: assistant_id.to_string(),
            input: RunInput {
                messages: vec![RunMessage {
                    role: "user",
                    content: content.to_string(),
                }],
            },
            stream_mode: "messages",
        }
    }
}
