//! Learning progress snapshot rendered by the dashboard.
//!
//! Values are illustrative sample data: nothing here is derived from the
//! chat transcript or persisted between launches.

/// One practice session on the performance trend chart.
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceSample {
    pub session: u32,
    pub performance: f64,
    pub expected_performance: f64,
    pub difficulty: f64,
}

/// Mastery score in `[0, 1]` for a single concept.
#[derive(Clone, Debug, PartialEq)]
pub struct ConceptMastery {
    pub concept: String,
    pub mastery: f64,
}

impl ConceptMastery {
    #[must_use]
    pub fn new(concept: impl Into<String>, mastery: f64) -> Self {
        Self {
            concept: concept.into(),
            mastery: mastery.clamp(0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConceptKind {
    Vocabulary,
    Grammar,
}

/// Mastery per concept, kept in display order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MasteryData {
    pub vocabulary: Vec<ConceptMastery>,
    pub grammar: Vec<ConceptMastery>,
}

impl MasteryData {
    /// Vocabulary first, then grammar.
    pub fn all(&self) -> impl Iterator<Item = (ConceptKind, &ConceptMastery)> {
        self.vocabulary
            .iter()
            .map(|item| (ConceptKind::Vocabulary, item))
            .chain(self.grammar.iter().map(|item| (ConceptKind::Grammar, item)))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimeAnalysis {
    pub concept: String,
    /// Seconds.
    pub average_time: f64,
    pub success_rate: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopicStatus {
    Completed,
    InProgress,
    Pending,
}

impl TopicStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TopicStatus::Completed => "completed",
            TopicStatus::InProgress => "in_progress",
            TopicStatus::Pending => "pending",
        }
    }

    /// Human label: first underscore becomes a space, each word capitalized.
    #[must_use]
    pub fn label(self) -> String {
        self.as_str()
            .replacen('_', " ", 1)
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LearningPathTopic {
    pub name: String,
    pub status: TopicStatus,
    pub score: f64,
}

impl LearningPathTopic {
    /// Rounded percentage, hidden for topics not started yet.
    #[must_use]
    pub fn score_label(&self) -> Option<String> {
        if self.status == TopicStatus::Pending {
            return None;
        }
        Some(format!("{:.0}%", self.score * 100.0))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LearningPath {
    pub current_level: String,
    /// Fraction of the current level completed, `[0, 1]`.
    pub progress: f64,
    pub recent_topics: Vec<LearningPathTopic>,
}

impl LearningPath {
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.progress.clamp(0.0, 1.0) * 100.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LearningSnapshot {
    pub performance_history: Vec<PerformanceSample>,
    pub concept_mastery: MasteryData,
    pub time_analysis: Vec<TimeAnalysis>,
    pub learning_path: LearningPath,
}
