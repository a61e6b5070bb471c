mod chart_vm;
mod chat_vm;
mod dashboard_vm;
mod markdown_vm;
mod settings_vm;

pub use chart_vm::{AxisTick, BarRect};
pub use chat_vm::{MessageBody, MessageVm, TUTOR_LABEL, map_messages};
pub use dashboard_vm::{
    BarChartVm, DashboardTab, DashboardVm, LearningPathVm, LineChartVm, RadarChartVm, TopicVm,
    concept_label, map_dashboard,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use settings_vm::{SettingsField, field_error};
