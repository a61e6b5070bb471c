use lingua_core::model::{SettingsError, UserSettingsDraft};

/// Form field of the settings dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    Name,
    NativeLanguage,
    TargetLanguage,
    ProficiencyLevel,
}

impl SettingsField {
    pub const ALL: [Self; 4] = [
        Self::Name,
        Self::NativeLanguage,
        Self::TargetLanguage,
        Self::ProficiencyLevel,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::NativeLanguage => "nativeLanguage",
            Self::TargetLanguage => "targetLanguage",
            Self::ProficiencyLevel => "proficiencyLevel",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::NativeLanguage => "Native Language",
            Self::TargetLanguage => "Target Language",
            Self::ProficiencyLevel => "Proficiency Level",
        }
    }

    #[must_use]
    pub fn value(self, draft: &UserSettingsDraft) -> &str {
        match self {
            Self::Name => &draft.name,
            Self::NativeLanguage => &draft.native_language,
            Self::TargetLanguage => &draft.target_language,
            Self::ProficiencyLevel => &draft.proficiency_level,
        }
    }

    pub fn set(self, draft: &mut UserSettingsDraft, value: String) {
        match self {
            Self::Name => draft.name = value,
            Self::NativeLanguage => draft.native_language = value,
            Self::TargetLanguage => draft.target_language = value,
            Self::ProficiencyLevel => draft.proficiency_level = value,
        }
    }

    fn of_error(error: SettingsError) -> Option<Self> {
        match error {
            SettingsError::EmptyName => Some(Self::Name),
            SettingsError::EmptyNativeLanguage => Some(Self::NativeLanguage),
            SettingsError::EmptyTargetLanguage => Some(Self::TargetLanguage),
            SettingsError::EmptyProficiencyLevel => Some(Self::ProficiencyLevel),
            _ => None,
        }
    }
}

/// Inline error text for `field`, if the draft has one.
#[must_use]
pub fn field_error(draft: &UserSettingsDraft, field: SettingsField) -> Option<String> {
    draft
        .errors()
        .into_iter()
        .find(|error| SettingsField::of_error(*error) == Some(field))
        .map(|error| error.to_string())
}
