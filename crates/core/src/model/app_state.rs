use crate::model::ids::MessageId;
use crate::model::message::{Message, MessagePatch};
use crate::model::settings::{AgentSettings, UserSettings};
use crate::model::transcript::Transcript;

/// Everything the client persists between launches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub agent: AgentSettings,
    pub settings: UserSettings,
    pub transcript: Transcript,
}

impl AppState {
    #[must_use]
    pub fn new(agent: AgentSettings, settings: UserSettings, transcript: Transcript) -> Self {
        Self {
            agent,
            settings,
            transcript,
        }
    }

    /// Replace the settings record wholesale.
    pub fn update_settings(&mut self, settings: UserSettings) {
        self.settings = settings;
    }

    pub fn update_message(&mut self, id: MessageId, patch: &MessagePatch) -> Option<&Message> {
        self.transcript.apply_patch(id, patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::message::ChatInput;
    use crate::model::settings::UserSettingsDraft;

    #[test]
    fn update_settings_drops_previous_values() {
        let mut state = AppState::default();
        let next = UserSettingsDraft {
            name: "Ana".into(),
            native_language: "Spanish".into(),
            target_language: "English".into(),
            proficiency_level: "B2".into(),
        }
        .validate()
        .unwrap();

        state.update_settings(next.clone());
        assert_eq!(state.settings, next);
    }

    #[test]
    fn update_message_merges_patch() {
        let mut state = AppState::default();
        let id = state
            .transcript
            .begin_turn(&ChatInput::parse("Hola").unwrap())
            .reply_id;

        let patch = MessagePatch {
            content: Some("Hola".into()),
            is_streaming: Some(false),
        };
        let updated = state.update_message(id, &patch).unwrap();
        assert_eq!(updated.content(), "Hola");
        assert!(!updated.is_streaming());
    }
}
