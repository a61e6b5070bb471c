use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("native language cannot be empty")]
    EmptyNativeLanguage,

    #[error("target language cannot be empty")]
    EmptyTargetLanguage,

    #[error("proficiency level cannot be empty")]
    EmptyProficiencyLevel,

    #[error("agent id cannot be empty")]
    EmptyAgent,
}

//
// ─── USER SETTINGS ─────────────────────────────────────────────────────────────
//

/// Learner profile shown in the chat and sent nowhere else.
///
/// All fields are free-form labels. Language names are not checked against any
/// code list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSettings {
    name: String,
    native_language: String,
    target_language: String,
    proficiency_level: String,
}

/// Editable buffer for `UserSettings`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserSettingsDraft {
    pub name: String,
    pub native_language: String,
    pub target_language: String,
    pub proficiency_level: String,
}

impl UserSettingsDraft {
    #[must_use]
    pub fn from_settings(settings: &UserSettings) -> Self {
        Self {
            name: settings.name.clone(),
            native_language: settings.native_language.clone(),
            target_language: settings.target_language.clone(),
            proficiency_level: settings.proficiency_level.clone(),
        }
    }

    /// Turn the draft into a complete settings record.
    ///
    /// Values are kept exactly as typed; whitespace only counts against a field
    /// when it is all the field holds. The result never carries anything over
    /// from a previous record.
    ///
    /// # Errors
    ///
    /// Returns the first `SettingsError` for a field that is blank.
    pub fn validate(self) -> Result<UserSettings, SettingsError> {
        Ok(UserSettings {
            name: required(self.name, SettingsError::EmptyName)?,
            native_language: required(self.native_language, SettingsError::EmptyNativeLanguage)?,
            target_language: required(self.target_language, SettingsError::EmptyTargetLanguage)?,
            proficiency_level: required(
                self.proficiency_level,
                SettingsError::EmptyProficiencyLevel,
            )?,
        })
    }

    /// All field errors at once, in form order.
    #[must_use]
    pub fn errors(&self) -> Vec<SettingsError> {
        [
            (&self.name, SettingsError::EmptyName),
            (&self.native_language, SettingsError::EmptyNativeLanguage),
            (&self.target_language, SettingsError::EmptyTargetLanguage),
            (&self.proficiency_level, SettingsError::EmptyProficiencyLevel),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, err)| err)
        .collect()
    }
}

impl UserSettings {
    /// Rebuild settings from storage, verbatim.
    #[must_use]
    pub fn from_persisted(
        name: String,
        native_language: String,
        target_language: String,
        proficiency_level: String,
    ) -> Self {
        Self {
            name,
            native_language,
            target_language,
            proficiency_level,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn native_language(&self) -> &str {
        &self.native_language
    }

    #[must_use]
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    #[must_use]
    pub fn proficiency_level(&self) -> &str {
        &self.proficiency_level
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            name: "You".to_string(),
            native_language: "English".to_string(),
            target_language: "Spanish".to_string(),
            proficiency_level: "Beginner".to_string(),
        }
    }
}

//
// ─── AGENT SETTINGS ────────────────────────────────────────────────────────────
//

pub const DEFAULT_AGENT_ID: &str = "agent";

/// Which remote assistant runs are addressed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentSettings {
    agent: String,
}

impl AgentSettings {
    /// # Errors
    ///
    /// Returns `SettingsError::EmptyAgent` for a blank assistant id.
    pub fn new(agent: impl Into<String>) -> Result<Self, SettingsError> {
        Ok(Self {
            agent: required(agent.into(), SettingsError::EmptyAgent)?,
        })
    }

    #[must_use]
    pub fn agent(&self) -> &str {
        &self.agent
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            agent: DEFAULT_AGENT_ID.to_string(),
        }
    }
}

fn required(value: String, err: SettingsError) -> Result<String, SettingsError> {
    if value.trim().is_empty() {
        return Err(err);
    }
    Ok(value)
}
