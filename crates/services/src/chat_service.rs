use std::sync::Arc;

use futures::StreamExt;
use futures::channel::mpsc;
use lingua_core::model::{ChatInput, Message, MessageId, StreamUpdate};
use tracing::warn;

use crate::agent::ChatAgent;
use crate::app_state_service::AppStateStore;
use crate::error::ChatError;

/// A submitted message whose reply has not been streamed yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingReply {
    pub input: ChatInput,
    pub user_id: MessageId,
    pub reply_id: MessageId,
}

/// Ties the streaming client to the transcript.
#[derive(Clone)]
pub struct ChatService {
    agent: Arc<ChatAgent>,
    store: Arc<AppStateStore>,
}

impl ChatService {
    #[must_use]
    pub fn new(agent: Arc<ChatAgent>, store: Arc<AppStateStore>) -> Self {
        Self { agent, store }
    }

    /// Append the learner's message and an empty streaming reply.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Input` for blank input and `ChatError::ReplyInFlight`
    /// while the previous reply streams (nothing is recorded in either case),
    /// or `ChatError::State` if the transcript cannot be updated or saved.
    pub async fn submit(&self, raw: &str) -> Result<PendingReply, ChatError> {
        let input = ChatInput::parse(raw)?;
        let turn = self
            .store
            .modify(|state| {
                (!state.transcript.is_awaiting_reply())
                    .then(|| state.transcript.begin_turn(&input))
            })?
            .ok_or(ChatError::ReplyInFlight)?;
        self.store.persist().await?;
        Ok(PendingReply {
            input,
            user_id: turn.user_id,
            reply_id: turn.reply_id,
        })
    }

    /// Stream the agent's answer into the pending reply.
    ///
    /// `on_change` sees the reply after every applied update. Saving is best
    /// effort here: a failed write is logged and the next update retries.
    pub async fn stream_reply<F>(&self, pending: &PendingReply, mut on_change: F)
    where
        F: FnMut(&Message),
    {
        let assistant_id = match self.store.agent() {
            Ok(agent) => agent.agent().to_string(),
            Err(err) => {
                self.apply(pending.reply_id, &StreamUpdate::error(err.to_string()), &mut on_change)
                    .await;
                return;
            }
        };

        let (tx, mut rx) = mpsc::unbounded::<StreamUpdate>();
        let produce = self
            .agent
            .send_message(&assistant_id, pending.input.as_str(), move |update| {
                // The receiver outlives this closure, so sending cannot fail.
                let _ = tx.unbounded_send(update);
            });
        let consume = async {
            while let Some(update) = rx.next().await {
                self.apply(pending.reply_id, &update, &mut on_change).await;
            }
        };
        futures::join!(produce, consume);
    }

    /// `submit` followed by `stream_reply`.
    ///
    /// # Errors
    ///
    /// Same as `submit`; streaming failures end up in the reply text instead.
    pub async fn send<F>(&self, raw: &str, on_change: F) -> Result<PendingReply, ChatError>
    where
        F: FnMut(&Message),
    {
        let pending = self.submit(raw).await?;
        self.stream_reply(&pending, on_change).await;
        Ok(pending)
    }

    async fn apply<F>(&self, reply_id: MessageId, update: &StreamUpdate, on_change: &mut F)
    where
        F: FnMut(&Message),
    {
        let updated = match self.store.patch_message(reply_id, &update.to_patch()) {
            Ok(updated) => updated,
            Err(err) => {
                warn!(error = %err, "could not apply stream update");
                return;
            }
        };
        if let Some(message) = updated.as_ref() {
            on_change(message);
        }
        if let Err(err) = self.store.persist().await {
            warn!(error = %err, "could not save transcript");
        }
    }
}
