use crate::model::ids::MessageId;
use crate::model::message::{Author, ChatInput, Message, MessagePatch};
use crate::model::stream::StreamUpdate;

/// Ids of the two records created by one submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    pub user_id: MessageId,
    pub reply_id: MessageId,
}

/// Append-only list of chat messages.
///
/// Records are never removed or reordered; system replies are rewritten in
/// place by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id() == id)
    }

    /// Record the learner's message and an empty streaming reply after it.
    pub fn begin_turn(&mut self, input: &ChatInput) -> Turn {
        let user = Message::user(input);
        let reply = Message::reply_placeholder();
        let turn = Turn {
            user_id: user.id(),
            reply_id: reply.id(),
        };
        self.messages.push(user);
        self.messages.push(reply);
        turn
    }

    /// Returns the patched message, or `None` if no message has this id.
    pub fn apply_patch(&mut self, id: MessageId, patch: &MessagePatch) -> Option<&Message> {
        let message = self.messages.iter_mut().find(|message| message.id() == id)?;
        message.apply(patch);
        Some(message)
    }

    pub fn apply_update(&mut self, id: MessageId, update: &StreamUpdate) -> Option<&Message> {
        self.apply_patch(id, &update.to_patch())
    }

    /// Stop every reply still marked as streaming, keeping its text.
    ///
    /// Returns how many replies were closed.
    pub fn close_interrupted(&mut self) -> usize {
        let patch = MessagePatch {
            content: None,
            is_streaming: Some(false),
        };
        let mut closed = 0;
        for message in self.messages.iter_mut().filter(|message| message.is_streaming()) {
            message.apply(&patch);
            closed += 1;
        }
        closed
    }

    /// True while the newest message is a system reply still streaming.
    #[must_use]
    pub fn is_awaiting_reply(&self) -> bool {
        self.messages
            .last()
            .is_some_and(|last| last.author() == Author::System && last.is_streaming())
    }
}
