//! SVG geometry for the dashboard charts.
//!
//! Everything here works in a fixed viewBox; the stylesheet scales the SVG to
//! its container.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Closed value range mapped onto a chart axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const UNIT: Self = Self::new(0.0, 1.0);

    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` in the domain as a fraction, clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction(self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Plot area inside a `width` x `height` viewBox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ChartFrame {
    pub const LINE: Self = Self {
        width: 600.0,
        height: 300.0,
        padding: 40.0,
    };

    #[must_use]
    pub fn view_box(self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.width - self.padding
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.height - self.padding
    }

    fn plot_width(self) -> f64 {
        self.right() - self.left()
    }

    fn plot_height(self) -> f64 {
        self.bottom() - self.top()
    }

    /// X of the `index`-th of `count` evenly spaced points.
    #[must_use]
    pub fn x_at(self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.left() + self.plot_width() / 2.0;
        }
        self.left() + self.plot_width() * index as f64 / (count - 1) as f64
    }

    /// Y of `value`; larger values sit higher.
    #[must_use]
    pub fn y_at(self, value: f64, domain: Domain) -> f64 {
        self.bottom() - self.plot_height() * domain.fraction(value)
    }
}

/// `points` attribute for an SVG polyline through `values`.
#[must_use]
pub fn polyline_points(values: &[f64], domain: Domain, frame: ChartFrame) -> String {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let x = frame.x_at(index, values.len());
            let y = frame.y_at(*value, domain);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tick label placed along an axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Labels under each point of a series.
#[must_use]
pub fn x_ticks(labels: &[String], frame: ChartFrame) -> Vec<AxisTick> {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| AxisTick {
            label: label.clone(),
            x: frame.x_at(index, labels.len()),
            y: frame.bottom() + 16.0,
        })
        .collect()
}

/// `steps + 1` evenly spaced value labels on the left (or right) edge.
#[must_use]
pub fn y_ticks(domain: Domain, steps: usize, frame: ChartFrame, right: bool) -> Vec<AxisTick> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|step| {
            let value = domain.min + (domain.max - domain.min) * step as f64 / steps as f64;
            AxisTick {
                label: format_tick(value),
                x: if right {
                    frame.right() + 6.0
                } else {
                    frame.left() - 6.0
                },
                y: frame.y_at(value, domain),
            }
        })
        .collect()
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarRect {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Anchor for the category label under the bar.
    pub label_x: f64,
    pub label_y: f64,
}

/// One bar per item, evenly distributed with a gap between bars.
#[must_use]
pub fn bar_rects(items: &[(String, f64)], domain: Domain, frame: ChartFrame) -> Vec<BarRect> {
    if items.is_empty() {
        return Vec::new();
    }
    let slot = frame.plot_width() / items.len() as f64;
    let width = slot * 0.6;
    items
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let y = frame.y_at(*value, domain);
            let x = frame.left() + slot * index as f64 + (slot - width) / 2.0;
            BarRect {
                label: label.clone(),
                value: *value,
                x,
                y,
                width,
                height: frame.bottom() - y,
                label_x: x + width / 2.0,
                label_y: frame.bottom() + 16.0,
            }
        })
        .collect()
}

/// Polar layout for a radar chart; the first axis points straight up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarFrame {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl RadarFrame {
    pub const DEFAULT: Self = Self {
        cx: 200.0,
        cy: 170.0,
        radius: 120.0,
    };

    #[must_use]
    pub fn view_box(self) -> String {
        format!("0 0 {} {}", self.cx * 2.0, self.cy * 2.0)
    }

    fn point(self, index: usize, count: usize, fraction: f64) -> (f64, f64) {
        let angle = TAU * index as f64 / count.max(1) as f64 - FRAC_PI_2;
        let r = self.radius * fraction;
        (self.cx + r * angle.cos(), self.cy + r * angle.sin())
    }
}

/// `points` attribute for a radar polygon over `values`.
#[must_use]
pub fn radar_polygon(values: &[f64], domain: Domain, frame: RadarFrame) -> String {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let (x, y) = frame.point(index, values.len(), domain.fraction(*value));
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Concentric grid rings at each of `levels` equal steps.
#[must_use]
pub fn radar_grid(count: usize, levels: usize, frame: RadarFrame) -> Vec<String> {
    let levels = levels.max(1);
    (1..=levels)
        .map(|level| {
            let fraction = level as f64 / levels as f64;
            (0..count)
                .map(|index| {
                    let (x, y) = frame.point(index, count, fraction);
                    format!("{x:.1},{y:.1}")
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Spoke end points with their labels, pushed slightly past the outer ring.
#[must_use]
pub fn radar_axes(labels: &[String], frame: RadarFrame) -> Vec<AxisTick> {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let (x, y) = frame.point(index, labels.len(), 1.12);
            AxisTick {
                label: label.clone(),
                x,
                y,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: ChartFrame = ChartFrame {
        width: 200.0,
        height: 100.0,
        padding: 0.0,
    };

    #[test]
    fn domain_fraction_clamps_out_of_range_values() {
        let domain = Domain::new(0.0, 150.0);
        assert!((domain.fraction(75.0) - 0.5).abs() < f64::EPSILON);
        assert!((domain.fraction(-10.0)).abs() < f64::EPSILON);
        assert!((domain.fraction(300.0) - 1.0).abs() < f64::EPSILON);
        assert!((Domain::new(1.0, 1.0).fraction(5.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn polyline_spans_the_plot_width() {
        let points = polyline_points(&[0.0, 0.5, 1.0], Domain::UNIT, FRAME);
        assert_eq!(points, "0.0,100.0 100.0,50.0 200.0,0.0");
    }

    #[test]
    fn single_point_is_centered() {
        assert_eq!(polyline_points(&[1.0], Domain::UNIT, FRAME), "100.0,0.0");
        assert_eq!(polyline_points(&[], Domain::UNIT, FRAME), "");
    }

    #[test]
    fn bars_sit_on_the_baseline() {
        let items = vec![("a".to_string(), 1.0), ("b".to_string(), 0.25)];
        let bars = bar_rects(&items, Domain::UNIT, FRAME);
        assert_eq!(bars.len(), 2);
        for bar in &bars {
            assert!((bar.y + bar.height - FRAME.bottom()).abs() < 1e-9);
        }
        assert!((bars[0].height - 100.0).abs() < 1e-9);
        assert!((bars[1].height - 25.0).abs() < 1e-9);
        assert!(bars[0].x + bars[0].width < bars[1].x);
    }

    #[test]
    fn radar_starts_at_twelve_o_clock() {
        let frame = RadarFrame {
            cx: 10.0,
            cy: 10.0,
            radius: 10.0,
        };
        let polygon = radar_polygon(&[1.0, 0.0, 0.0, 0.0], Domain::UNIT, frame);
        let first = polygon.split(' ').next().unwrap_or_default();
        assert_eq!(first, "10.0,0.0");
        assert_eq!(radar_grid(4, 3, frame).len(), 3);
    }

    #[test]
    fn y_ticks_cover_the_domain() {
        let ticks = y_ticks(Domain::new(0.0, 150.0), 3, FRAME, false);
        let labels: Vec<&str> = ticks.iter().map(|tick| tick.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "50", "100", "150"]);
        assert!((ticks[3].y - FRAME.top()).abs() < 1e-9);
    }
}
