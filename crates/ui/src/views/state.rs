use services::{ChatError, SettingsServiceError};

/// Error shown inline by a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Input the user can fix; carries the text to show next to it.
    Invalid(String),
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Invalid(message) => message,
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<ChatError> for ViewError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Input(err) => Self::Invalid(err.to_string()),
            ChatError::ReplyInFlight => Self::Invalid(ChatError::ReplyInFlight.to_string()),
            other => {
                tracing::warn!(error = %other, "chat submit failed");
                Self::Unknown
            }
        }
    }
}

impl From<SettingsServiceError> for ViewError {
    fn from(err: SettingsServiceError) -> Self {
        match err {
            SettingsServiceError::Invalid(err) => Self::Invalid(err.to_string()),
            other => {
                tracing::warn!(error = %other, "saving settings failed");
                Self::Unknown
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    Error(ViewError),
}
