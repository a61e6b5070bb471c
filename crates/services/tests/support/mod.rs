#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use lingua_core::model::ThreadId;
use serde_json::{Value, json};
use services::{AgentApi, AgentError, ChunkStream, RunRequest};

/// One scripted stream item: a chunk, or a transport failure message.
pub type Scripted = Result<Value, String>;

/// `AgentApi` that replays canned runs and records what it was asked.
#[derive(Default)]
pub struct ScriptedApi {
    pub fail_thread: Option<String>,
    runs: Mutex<VecDeque<Vec<Scripted>>>,
    threads_created: AtomicUsize,
    requests: Mutex<Vec<(ThreadId, RunRequest)>>,
}

impl ScriptedApi {
    pub fn with_runs(runs: Vec<Vec<Scripted>>) -> Self {
        Self {
            runs: Mutex::new(runs.into()),
            ..Self::default()
        }
    }

    pub fn failing_thread(message: &str) -> Self {
        Self {
            fail_thread: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn threads_created(&self) -> usize {
        self.threads_created.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(ThreadId, RunRequest)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentApi for ScriptedApi {
    async fn create_thread(&self) -> Result<ThreadId, AgentError> {
        if let Some(message) = self.fail_thread.as_ref() {
            return Err(AgentError::Transport(message.clone()));
        }
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst);
        Ok(ThreadId::new(format!("thread-{n}")))
    }

    async fn stream_run(
        &self,
        thread_id: &ThreadId,
        request: RunRequest,
    ) -> Result<ChunkStream, AgentError> {
        self.requests
            .lock()
            .unwrap()
            .push((thread_id.clone(), request));
        let items = self.runs.lock().unwrap().pop_front().unwrap_or_default();
        Ok(stream::iter(items.into_iter().map(|item| item.map_err(AgentError::Transport))).boxed())
    }
}

pub fn ai(content: &str) -> Scripted {
    Ok(json!({
        "event": "messages/partial",
        "data": [{ "content": content, "type": "ai" }]
    }))
}

pub fn metadata() -> Scripted {
    Ok(json!({ "event": "metadata", "data": { "run_id": "run-1" } }))
}
