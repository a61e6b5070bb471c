use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::ids::MessageId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageError {
    #[error("Message cannot be empty ...")]
    EmptyInput,

    #[error("unknown author: {0}")]
    UnknownAuthor(String),
}

/// Who wrote a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Author {
    User,
    System,
}

impl Author {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Author::User => "user",
            Author::System => "system",
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Author {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Author::User),
            "system" => Ok(Author::System),
            other => Err(MessageError::UnknownAuthor(other.to_string())),
        }
    }
}

/// Text the learner typed, already checked for content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatInput(String);

impl ChatInput {
    /// Accepts any input with at least one non-whitespace character.
    ///
    /// The trimmed text is what gets sent and recorded.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::EmptyInput` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MessageError::EmptyInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One transcript entry.
///
/// System messages start empty and are rewritten in place while a reply
/// streams in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    author: Author,
    content: String,
    is_streaming: bool,
}

/// Partial update for a message. `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessagePatch {
    pub content: Option<String>,
    pub is_streaming: Option<bool>,
}

impl Message {
    #[must_use]
    pub fn user(input: &ChatInput) -> Self {
        Self {
            id: MessageId::new_v4(),
            author: Author::User,
            content: input.as_str().to_string(),
            is_streaming: false,
        }
    }

    /// Empty system message waiting for the first streamed chunk.
    #[must_use]
    pub fn reply_placeholder() -> Self {
        Self {
            id: MessageId::new_v4(),
            author: Author::System,
            content: String::new(),
            is_streaming: true,
        }
    }

    #[must_use]
    pub fn from_persisted(
        id: MessageId,
        author: Author,
        content: String,
        is_streaming: bool,
    ) -> Self {
        Self {
            id,
            author,
            content,
            is_streaming,
        }
    }

    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub fn author(&self) -> Author {
        self.author
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.is_streaming
    }

    pub fn apply(&mut self, patch: &MessagePatch) {
        if let Some(content) = patch.content.as_ref() {
            self.content.clone_from(content);
        }
        if let Some(is_streaming) = patch.is_streaming {
            self.is_streaming = is_streaming;
        }
    }
}
