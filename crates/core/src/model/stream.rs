use crate::model::message::MessagePatch;

/// Notification emitted by the chat client while a reply is produced.
///
/// A run produces zero or more `Stream { done: false }` updates followed by
/// exactly one terminal update: `Stream { done: true }` or `Error`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamUpdate {
    Stream { content: String, done: bool },
    Error { error: String },
}

impl StreamUpdate {
    #[must_use]
    pub fn partial(content: impl Into<String>) -> Self {
        Self::Stream {
            content: content.into(),
            done: false,
        }
    }

    #[must_use]
    pub fn done(content: impl Into<String>) -> Self {
        Self::Stream {
            content: content.into(),
            done: true,
        }
    }

    #[must_use]
    pub fn error(error: impl Into<String>) -> Self {
        Self::Error {
            error: error.into(),
        }
    }

    /// How this update rewrites the reply message.
    #[must_use]
    pub fn to_patch(&self) -> MessagePatch {
        match self {
            StreamUpdate::Stream { content, done } => MessagePatch {
                content: Some(content.clone()),
                is_streaming: Some(!done),
            },
            StreamUpdate::Error { error } => MessagePatch {
                content: Some(error.clone()),
                is_streaming: Some(false),
            },
        }
    }
}
