mod app_state;
mod ids;
pub mod learning;
mod message;
mod settings;
mod stream;
mod transcript;

pub use app_state::AppState;
pub use ids::{MessageId, ParseIdError, ThreadId};
pub use learning::{
    ConceptKind, ConceptMastery, LearningPath, LearningPathTopic, LearningSnapshot, MasteryData,
    PerformanceSample, TimeAnalysis, TopicStatus,
};
pub use message::{Author, ChatInput, Message, MessageError, MessagePatch};
pub use settings::{
    AgentSettings, DEFAULT_AGENT_ID, SettingsError, UserSettings, UserSettingsDraft,
};
pub use stream::StreamUpdate;
pub use transcript::{Transcript, Turn};
