use lingua_core::model::{ConceptMastery, LearningSnapshot, TopicStatus};

use super::chart_vm::{
    AxisTick, BarRect, ChartFrame, Domain, RadarFrame, bar_rects, polyline_points, radar_axes,
    radar_grid, radar_polygon, x_ticks, y_ticks,
};

const TIME_DOMAIN: Domain = Domain::new(0.0, 150.0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Overview,
    Concepts,
    TimeAnalysis,
    LearningPath,
}

impl DashboardTab {
    pub const ALL: [Self; 4] = [
        Self::Overview,
        Self::Concepts,
        Self::TimeAnalysis,
        Self::LearningPath,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Concepts => "Concepts",
            Self::TimeAnalysis => "Time Analysis",
            Self::LearningPath => "Learning Path",
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Concepts => "concepts",
            Self::TimeAnalysis => "time",
            Self::LearningPath => "path",
        }
    }
}

/// Two series over one x axis, each with its own y domain.
#[derive(Clone, Debug, PartialEq)]
pub struct LineChartVm {
    pub view_box: String,
    pub primary: String,
    pub secondary: String,
    pub x_ticks: Vec<AxisTick>,
    pub left_ticks: Vec<AxisTick>,
    pub right_ticks: Vec<AxisTick>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadarChartVm {
    pub view_box: String,
    pub polygon: String,
    pub grid: Vec<String>,
    pub axes: Vec<AxisTick>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarChartVm {
    pub view_box: String,
    pub bars: Vec<BarRect>,
    pub left_ticks: Vec<AxisTick>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicVm {
    pub name: String,
    pub status_label: String,
    pub status_class: &'static str,
    pub score_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LearningPathVm {
    pub current_level: String,
    /// CSS width for the progress bar fill, e.g. `65%`.
    pub progress_width: String,
    pub topics: Vec<TopicVm>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardVm {
    pub performance: LineChartVm,
    pub mastery: RadarChartVm,
    pub vocabulary: BarChartVm,
    pub grammar: BarChartVm,
    pub time: LineChartVm,
    pub path: LearningPathVm,
}

/// `basic_nouns` -> `basic nouns`.
#[must_use]
pub fn concept_label(concept: &str) -> String {
    concept.replace('_', " ")
}

#[must_use]
pub fn map_dashboard(snapshot: &LearningSnapshot) -> DashboardVm {
    let frame = ChartFrame::LINE;

    let history = &snapshot.performance_history;
    let sessions: Vec<String> = history.iter().map(|item| item.session.to_string()).collect();
    let actual: Vec<f64> = history.iter().map(|item| item.performance).collect();
    let expected: Vec<f64> = history.iter().map(|item| item.expected_performance).collect();
    let performance = LineChartVm {
        view_box: frame.view_box(),
        primary: polyline_points(&actual, Domain::UNIT, frame),
        secondary: polyline_points(&expected, Domain::UNIT, frame),
        x_ticks: x_ticks(&sessions, frame),
        left_ticks: y_ticks(Domain::UNIT, 4, frame, false),
        right_ticks: Vec::new(),
    };

    let radar = RadarFrame::DEFAULT;
    let (labels, values): (Vec<String>, Vec<f64>) = snapshot
        .concept_mastery
        .all()
        .map(|(_, item)| (concept_label(&item.concept), item.mastery))
        .unzip();
    let mastery = RadarChartVm {
        view_box: radar.view_box(),
        polygon: radar_polygon(&values, Domain::UNIT, radar),
        grid: radar_grid(values.len(), 4, radar),
        axes: radar_axes(&labels, radar),
    };

    let times = &snapshot.time_analysis;
    let concepts: Vec<String> = times.iter().map(|item| item.concept.clone()).collect();
    let average: Vec<f64> = times.iter().map(|item| item.average_time).collect();
    let success: Vec<f64> = times.iter().map(|item| item.success_rate).collect();
    let time = LineChartVm {
        view_box: frame.view_box(),
        primary: polyline_points(&average, TIME_DOMAIN, frame),
        secondary: polyline_points(&success, Domain::UNIT, frame),
        x_ticks: x_ticks(&concepts, frame),
        left_ticks: y_ticks(TIME_DOMAIN, 3, frame, false),
        right_ticks: y_ticks(Domain::UNIT, 4, frame, true),
    };

    let path = &snapshot.learning_path;
    let path = LearningPathVm {
        current_level: path.current_level.clone(),
        progress_width: format!("{:.0}%", path.progress_percent()),
        topics: path
            .recent_topics
            .iter()
            .map(|topic| TopicVm {
                name: topic.name.clone(),
                status_label: topic.status.label(),
                status_class: status_class(topic.status),
                score_label: topic.score_label(),
            })
            .collect(),
    };

    DashboardVm {
        performance,
        mastery,
        vocabulary: mastery_bars(&snapshot.concept_mastery.vocabulary),
        grammar: mastery_bars(&snapshot.concept_mastery.grammar),
        time,
        path,
    }
}

fn mastery_bars(items: &[ConceptMastery]) -> BarChartVm {
    let frame = ChartFrame::LINE;
    let items: Vec<(String, f64)> = items
        .iter()
        .map(|item| (concept_label(&item.concept), item.mastery))
        .collect();
    BarChartVm {
        view_box: frame.view_box(),
        bars: bar_rects(&items, Domain::UNIT, frame),
        left_ticks: y_ticks(Domain::UNIT, 4, frame, false),
    }
}

fn status_class(status: TopicStatus) -> &'static str {
    match status {
        TopicStatus::Completed => "topic-status completed",
        TopicStatus::InProgress => "topic-status in-progress",
        TopicStatus::Pending => "topic-status pending",
    }
}
