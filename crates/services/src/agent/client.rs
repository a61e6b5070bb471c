use std::sync::{Arc, Mutex};

use futures::StreamExt;
use lingua_core::model::{StreamUpdate, ThreadId};
use tracing::{error, trace};

use super::api::{AgentApi, RunRequest};
use super::chunk::partial_text;
use crate::error::AgentError;

/// Streaming chat client bound to one conversation thread.
///
/// The thread is created lazily on the first message and reused afterwards.
pub struct ChatAgent {
    api: Arc<dyn AgentApi>,
    thread: Mutex<Option<ThreadId>>,
}

impl ChatAgent {
    #[must_use]
    pub fn new(api: Arc<dyn AgentApi>) -> Self {
        Self {
            api,
            thread: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn thread_id(&self) -> Option<ThreadId> {
        self.thread.lock().ok().and_then(|guard| guard.clone())
    }

    /// Send `input` to `assistant_id` and report progress through `on_stream`.
    ///
    /// Emits `StreamUpdate::Stream { done: false }` for every chunk carrying
    /// AI text, then exactly one terminal update: `done: true` with the last
    /// text seen, or `StreamUpdate::Error` if anything failed along the way.
    /// Chunks of any other shape are skipped.
    pub async fn send_message<F>(&self, assistant_id: &str, input: &str, mut on_stream: F)
    where
        F: FnMut(StreamUpdate),
    {
        if let Err(err) = self.run(assistant_id, input, &mut on_stream).await {
            error!(error = %err, "agent run failed");
            on_stream(StreamUpdate::error(err.to_string()));
        }
    }

    async fn run<F>(
        &self,
        assistant_id: &str,
        input: &str,
        on_stream: &mut F,
    ) -> Result<(), AgentError>
    where
        F: FnMut(StreamUpdate),
    {
        let thread_id = self.ensure_thread().await?;
        let mut chunks = self
            .api
            .stream_run(&thread_id, RunRequest::user_message(assistant_id, input))
            .await?;

        let mut content = String::new();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            let Some(text) = partial_text(&chunk) else {
                trace!(%chunk, "skipping chunk without ai content");
                continue;
            };
            content = text;
            on_stream(StreamUpdate::partial(content.clone()));
        }

        on_stream(StreamUpdate::done(content));
        Ok(())
    }

    async fn ensure_thread(&self) -> Result<ThreadId, AgentError> {
        if let Some(thread_id) = self.thread_id() {
            return Ok(thread_id);
        }

        let thread_id = self.api.create_thread().await?;
        if let Ok(mut guard) = self.thread.lock() {
            *guard = Some(thread_id.clone());
        }
        Ok(thread_id)
    }
}
