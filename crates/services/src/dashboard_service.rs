use lingua_core::model::{
    ConceptMastery, LearningPath, LearningPathTopic, LearningSnapshot, MasteryData,
    PerformanceSample, TimeAnalysis, TopicStatus,
};
use rand::Rng;

const SESSIONS: u32 = 20;
const TIMED_CONCEPTS: u32 = 10;

const VOCABULARY: [(&str, f64); 5] = [
    ("basic_nouns", 0.8),
    ("basic_verbs", 0.7),
    ("adjectives", 0.6),
    ("adverbs", 0.4),
    ("idioms", 0.3),
];

const GRAMMAR: [(&str, f64); 5] = [
    ("present_simple", 0.9),
    ("past_simple", 0.7),
    ("present_perfect", 0.5),
    ("conditionals", 0.3),
    ("passive_voice", 0.2),
];

/// Supplies the dashboard's sample data.
#[derive(Clone, Copy, Debug, Default)]
pub struct DashboardService;

impl DashboardService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Fresh sample snapshot; random series change on every call.
    #[must_use]
    pub fn snapshot(&self) -> LearningSnapshot {
        sample_snapshot(&mut rand::rng())
    }
}

/// Build a sample snapshot from `rng`.
///
/// Performance and timing series are random; mastery and the learning path
/// are fixed.
pub fn sample_snapshot<R: Rng>(rng: &mut R) -> LearningSnapshot {
    let performance_history = (1..=SESSIONS)
        .map(|session| PerformanceSample {
            session,
            performance: 0.5 + rng.random::<f64>() * 0.3,
            expected_performance: 0.6 + rng.random::<f64>() * 0.2,
            difficulty: 2.0 + rng.random::<f64>() * 2.0,
        })
        .collect();

    let time_analysis = (1..=TIMED_CONCEPTS)
        .map(|index| TimeAnalysis {
            concept: format!("Concept {index}"),
            average_time: rng.random::<f64>() * 100.0 + 50.0,
            success_rate: rng.random::<f64>() * 0.5 + 0.3,
        })
        .collect();

    LearningSnapshot {
        performance_history,
        concept_mastery: MasteryData {
            vocabulary: concepts(&VOCABULARY),
            grammar: concepts(&GRAMMAR),
        },
        time_analysis,
        learning_path: LearningPath {
            current_level: "B1".to_string(),
            progress: 0.65,
            recent_topics: vec![
                topic("Past Perfect", TopicStatus::Completed, 0.85),
                topic("Conditionals", TopicStatus::InProgress, 0.6),
                topic("Modal Verbs", TopicStatus::Pending, 0.0),
            ],
        },
    }
}

fn concepts(table: &[(&str, f64)]) -> Vec<ConceptMastery> {
    table
        .iter()
        .map(|(name, mastery)| ConceptMastery::new(*name, *mastery))
        .collect()
}

fn topic(name: &str, status: TopicStatus, score: f64) -> LearningPathTopic {
    LearningPathTopic {
        name: name.to_string(),
        status,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn series_have_expected_lengths_and_ranges() {
        let snapshot = sample_snapshot(&mut StdRng::seed_from_u64(7));

        assert_eq!(snapshot.performance_history.len(), 20);
        assert_eq!(snapshot.performance_history[0].session, 1);
        assert_eq!(snapshot.performance_history[19].session, 20);
        for sample in &snapshot.performance_history {
            assert!((0.5..0.8).contains(&sample.performance));
            assert!((0.6..0.8).contains(&sample.expected_performance));
            assert!((2.0..4.0).contains(&sample.difficulty));
        }

        assert_eq!(snapshot.time_analysis.len(), 10);
        assert_eq!(snapshot.time_analysis[9].concept, "Concept 10");
        for row in &snapshot.time_analysis {
            assert!((50.0..150.0).contains(&row.average_time));
            assert!((0.3..0.8).contains(&row.success_rate));
        }
    }

    #[test]
    fn mastery_and_path_are_fixed() {
        let snapshot = sample_snapshot(&mut StdRng::seed_from_u64(1));
        let names: Vec<&str> = snapshot
            .concept_mastery
            .grammar
            .iter()
            .map(|c| c.concept.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "present_simple",
                "past_simple",
                "present_perfect",
                "conditionals",
                "passive_voice"
            ]
        );
        assert_eq!(snapshot.concept_mastery.vocabulary[0].mastery, 0.8);
        assert_eq!(snapshot.learning_path.current_level, "B1");
        assert_eq!(snapshot.learning_path.recent_topics.len(), 3);
    }

    #[test]
    fn same_seed_same_snapshot() {
        let a = sample_snapshot(&mut StdRng::seed_from_u64(42));
        let b = sample_snapshot(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
