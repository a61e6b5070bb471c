use async_trait::async_trait;
use futures::{StreamExt, future, stream};
use lingua_core::model::ThreadId;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::api::{AgentApi, ChunkStream, RunRequest};
use super::config::AgentConfig;
use super::sse::{SseDecoder, SseEvent};
use crate::error::AgentError;

/// `AgentApi` over HTTP against a LangGraph-style server.
#[derive(Clone)]
pub struct HttpAgentApi {
    client: Client,
    base_url: String,
}

impl HttpAgentApi {
    #[must_use]
    pub fn new(config: &AgentConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: &AgentConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct ThreadResponse {
    thread_id: String,
}

#[async_trait]
impl AgentApi for HttpAgentApi {
    async fn create_thread(&self) -> Result<ThreadId, AgentError> {
        let response = self
            .client
            .post(self.url("threads"))
            .json(&json!({}))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AgentError::HttpStatus(response.status()));
        }

        let body: ThreadResponse = response.json().await?;
        debug!(thread_id = %body.thread_id, "created agent thread");
        Ok(ThreadId::new(body.thread_id))
    }

    async fn stream_run(
        &self,
        thread_id: &ThreadId,
        request: RunRequest,
    ) -> Result<ChunkStream, AgentError> {
        let url = self.url(&format!("threads/{thread_id}/runs/stream"));
        debug!(%thread_id, assistant_id = %request.assistant_id, "starting agent run");

        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AgentError::HttpStatus(response.status()));
        }

        let chunks = response
            .bytes_stream()
            .scan(SseDecoder::new(), |decoder, item| {
                let batch: Vec<Result<serde_json::Value, AgentError>> = match item {
                    Ok(bytes) => decoder
                        .push(&bytes)
                        .into_iter()
                        .map(SseEvent::into_chunk)
                        .map(Ok)
                        .collect(),
                    Err(err) => vec![Err(AgentError::from(err))],
                };
                future::ready(Some(stream::iter(batch)))
            })
            .flatten()
            .boxed();

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let api = HttpAgentApi::new(&AgentConfig::new("http://localhost:2024/", "agent"));
        assert_eq!(api.url("threads"), "http://localhost:2024/threads");
    }
}
