use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{
    AxisTick, BarChartVm, DashboardTab, LearningPathVm, LineChartVm, RadarChartVm, map_dashboard,
};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboard = ctx.dashboard();
    let vm = use_hook(move || map_dashboard(&dashboard.snapshot()));
    let mut tab = use_signal(DashboardTab::default);

    rsx! {
        div { class: "page dashboard",
            h2 { "Language Learning Progress Dashboard" }

            div { class: "tabs", role: "tablist",
                for item in DashboardTab::ALL {
                    button {
                        key: "{item.id()}",
                        class: if tab() == item { "tab active" } else { "tab" },
                        role: "tab",
                        onclick: move |_| tab.set(item),
                        "{item.label()}"
                    }
                }
            }

            match tab() {
                DashboardTab::Overview => rsx! {
                    div { class: "grid two",
                        Panel { title: "Performance Trend",
                            LineChart {
                                chart: vm.performance.clone(),
                                primary_name: "Actual Performance",
                                secondary_name: "Expected Performance",
                            }
                        }
                        Panel { title: "Concept Mastery Overview",
                            RadarChart { chart: vm.mastery.clone() }
                        }
                    }
                },
                DashboardTab::Concepts => rsx! {
                    div { class: "grid two",
                        Panel { title: "Vocabulary Mastery",
                            BarChart { chart: vm.vocabulary.clone(), series: "primary" }
                        }
                        Panel { title: "Grammar Mastery",
                            BarChart { chart: vm.grammar.clone(), series: "secondary" }
                        }
                    }
                },
                DashboardTab::TimeAnalysis => rsx! {
                    Panel { title: "Time vs Success Analysis",
                        LineChart {
                            chart: vm.time.clone(),
                            primary_name: "Average Time (seconds)",
                            secondary_name: "Success Rate",
                        }
                    }
                },
                DashboardTab::LearningPath => rsx! {
                    LearningPathPanels { path: vm.path.clone() }
                },
            }
        }
    }
}

#[component]
fn Panel(title: &'static str, children: Element) -> Element {
    rsx! {
        div { class: "card",
            h3 { class: "card-title", "{title}" }
            div { class: "card-body", {children} }
        }
    }
}

#[component]
fn Ticks(ticks: Vec<AxisTick>, anchor: &'static str) -> Element {
    rsx! {
        for tick in ticks {
            text {
                class: "tick",
                x: "{tick.x}",
                y: "{tick.y}",
                text_anchor: anchor,
                "{tick.label}"
            }
        }
    }
}

#[component]
fn LineChart(
    chart: LineChartVm,
    primary_name: &'static str,
    secondary_name: &'static str,
) -> Element {
    rsx! {
        svg { class: "chart", view_box: "{chart.view_box}",
            Ticks { ticks: chart.left_ticks.clone(), anchor: "end" }
            Ticks { ticks: chart.right_ticks.clone(), anchor: "start" }
            Ticks { ticks: chart.x_ticks.clone(), anchor: "middle" }
            polyline { class: "series primary", fill: "none", points: "{chart.primary}" }
            polyline { class: "series secondary", fill: "none", points: "{chart.secondary}" }
        }
        ul { class: "legend",
            li { class: "legend-primary", "{primary_name}" }
            li { class: "legend-secondary", "{secondary_name}" }
        }
    }
}

#[component]
fn RadarChart(chart: RadarChartVm) -> Element {
    rsx! {
        svg { class: "chart radar", view_box: "{chart.view_box}",
            for ring in chart.grid.iter() {
                polygon { class: "radar-grid", fill: "none", points: "{ring}" }
            }
            polygon { class: "series primary radar-area", points: "{chart.polygon}" }
            Ticks { ticks: chart.axes.clone(), anchor: "middle" }
        }
        ul { class: "legend",
            li { class: "legend-primary", "Concept Mastery" }
        }
    }
}

#[component]
fn BarChart(chart: BarChartVm, series: &'static str) -> Element {
    rsx! {
        svg { class: "chart", view_box: "{chart.view_box}",
            Ticks { ticks: chart.left_ticks.clone(), anchor: "end" }
            for bar in chart.bars.iter() {
                rect {
                    class: "bar {series}",
                    x: "{bar.x}",
                    y: "{bar.y}",
                    width: "{bar.width}",
                    height: "{bar.height}",
                }
                text {
                    class: "tick",
                    x: "{bar.label_x}",
                    y: "{bar.label_y}",
                    text_anchor: "middle",
                    "{bar.label}"
                }
            }
        }
    }
}

#[component]
fn LearningPathPanels(path: LearningPathVm) -> Element {
    rsx! {
        div { class: "grid two",
            Panel { title: "Current Progress",
                p { class: "muted", "Current Level" }
                p { class: "level", "{path.current_level}" }
                p { class: "muted", "Level Progress" }
                div { class: "progress",
                    div { class: "progress-fill", style: "width: {path.progress_width}" }
                }
            }
            Panel { title: "Recent Topics",
                for topic in path.topics.iter() {
                    div { class: "topic",
                        div {
                            p { class: "topic-name", "{topic.name}" }
                            p { class: topic.status_class, "{topic.status_label}" }
                        }
                        if let Some(score) = topic.score_label.as_ref() {
                            span { class: "topic-score", "{score}" }
                        }
                    }
                }
            }
        }
    }
}
