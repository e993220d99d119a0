use crate::models::WorkoutType;
use maud::{html, Markup};
use std::collections::BTreeMap;
use std::f64::consts::PI;

pub const FALLBACK_COLOR: &str = "#607d8b";
pub const ACTIVE_COLOR: &str = "#4caf50";
pub const REST_COLOR: &str = "#9e9e9e";

pub fn type_color(kind: &WorkoutType) -> &'static str {
    match kind {
        WorkoutType::Yoga => "#8e24aa",
        WorkoutType::Pilates => "#2196f3",
        WorkoutType::StrengthTraining => "#f44336",
        WorkoutType::Cardio => "#4caf50",
        WorkoutType::Rest => "#9e9e9e",
        WorkoutType::Other(_) => FALLBACK_COLOR,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub count: usize,
    pub color: &'static str,
}

impl Bar {
    pub fn tooltip(&self) -> String {
        format!("{} workout(s)", self.count)
    }
}

/// Horizontal bars, one per workout type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarChart {
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn from_counts(counts: &BTreeMap<String, usize>) -> Self {
        let bars = counts
            .iter()
            .map(|(label, &count)| Bar {
                color: type_color(&WorkoutType::from(label.as_str())),
                label: label.clone(),
                count,
            })
            .collect();
        Self { bars }
    }

    pub fn max_count(&self) -> usize {
        self.bars.iter().map(|bar| bar.count).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: &'static str,
    pub value: usize,
    pub color: &'static str,
    pub percentage: u32,
}

impl Slice {
    pub fn tooltip(&self) -> String {
        format!("{}: {} ({}%)", self.label, self.value, self.percentage)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub slices: [Slice; 2],
}

impl PieChart {
    pub fn active_rest(active: usize, rest: usize) -> Self {
        let total = active + rest;
        Self {
            slices: [
                Slice {
                    label: "Active Days",
                    value: active,
                    color: ACTIVE_COLOR,
                    percentage: percentage(active, total),
                },
                Slice {
                    label: "Rest Days",
                    value: rest,
                    color: REST_COLOR,
                    percentage: percentage(rest, total),
                },
            ],
        }
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|slice| slice.value).sum()
    }
}

/// Share of `total` in whole percent, halves rounding up. An empty total is 0%.
pub fn percentage(value: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (value as f64 / total as f64 * 100.0).round() as u32
}

/// Drawing backend for the dashboard charts.
pub trait ChartService {
    fn draw_bar(&self, chart: &BarChart) -> Markup;
    fn draw_pie(&self, chart: &PieChart) -> Markup;
}

/// Draws charts as inline SVG; tooltips are `<title>` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgChartService;

const BAR_WIDTH: f64 = 600.0;
const BAR_ROW: f64 = 36.0;
const BAR_LABEL_AREA: f64 = 150.0;
const BAR_PADDING: f64 = 12.0;
const PIE_SIZE: f64 = 240.0;
const PIE_RADIUS: f64 = 100.0;

impl ChartService for SvgChartService {
    fn draw_bar(&self, chart: &BarChart) -> Markup {
        if chart.bars.is_empty() {
            return empty_chart("Number of Workouts");
        }

        let height = BAR_PADDING * 2.0 + BAR_ROW * chart.bars.len() as f64;
        let plot_width = BAR_WIDTH - BAR_LABEL_AREA - BAR_PADDING * 3.0;
        let scale = plot_width / chart.max_count().max(1) as f64;

        html! {
            svg class="chart bar-chart" viewBox=(format!("0 0 {BAR_WIDTH} {height}"))
                role="img" aria-label="Number of Workouts" {
                @for (index, bar) in chart.bars.iter().enumerate() {
                    @let y = BAR_PADDING + index as f64 * BAR_ROW;
                    g {
                        title { (bar.tooltip()) }
                        text class="chart-label" x=(fmt(BAR_LABEL_AREA)) y=(fmt(y + BAR_ROW / 2.0 + 4.0))
                            text-anchor="end" { (bar.label) }
                        rect x=(fmt(BAR_LABEL_AREA + BAR_PADDING)) y=(fmt(y + 6.0))
                            width=(fmt(bar.count as f64 * scale)) height=(fmt(BAR_ROW - 12.0))
                            fill=(bar.color) stroke=(bar.color) stroke-width="1" {}
                        text class="chart-value" x=(fmt(BAR_LABEL_AREA + BAR_PADDING * 2.0 + bar.count as f64 * scale))
                            y=(fmt(y + BAR_ROW / 2.0 + 4.0)) { (bar.count) }
                    }
                }
            }
        }
    }

    fn draw_pie(&self, chart: &PieChart) -> Markup {
        let total = chart.total();
        if total == 0 {
            return empty_chart("Active vs Rest Days");
        }

        let center = PIE_SIZE / 2.0;
        let mut start = -PI / 2.0;
        let arcs: Vec<(&Slice, f64, f64)> = chart
            .slices
            .iter()
            .map(|slice| {
                let end = start + slice.value as f64 / total as f64 * 2.0 * PI;
                let arc = (slice, start, end);
                start = end;
                arc
            })
            .collect();

        html! {
            svg class="chart pie-chart" viewBox=(format!("0 0 {PIE_SIZE} {}", PIE_SIZE + 40.0))
                role="img" aria-label="Active vs Rest Days" {
                @for (slice, from, to) in &arcs {
                    @if slice.value == total {
                        circle cx=(fmt(center)) cy=(fmt(center)) r=(fmt(PIE_RADIUS)) fill=(slice.color) {
                            title { (slice.tooltip()) }
                        }
                    } @else if slice.value > 0 {
                        path d=(arc_path(center, *from, *to)) fill=(slice.color)
                            stroke="rgba(0, 0, 0, 0.1)" stroke-width="1" {
                            title { (slice.tooltip()) }
                        }
                    }
                }
                @for (index, slice) in chart.slices.iter().enumerate() {
                    @let x = 20.0 + index as f64 * 110.0;
                    g class="legend" {
                        title { (slice.tooltip()) }
                        rect x=(fmt(x)) y=(fmt(PIE_SIZE + 12.0)) width="12" height="12" fill=(slice.color) {}
                        text class="chart-label" x=(fmt(x + 18.0)) y=(fmt(PIE_SIZE + 22.0)) { (slice.label) }
                    }
                }
            }
        }
    }
}

fn arc_path(center: f64, start: f64, end: f64) -> String {
    let (x1, y1) = (center + PIE_RADIUS * start.cos(), center + PIE_RADIUS * start.sin());
    let (x2, y2) = (center + PIE_RADIUS * end.cos(), center + PIE_RADIUS * end.sin());
    let large_arc = if end - start > PI { 1 } else { 0 };
    format!(
        "M {c} {c} L {} {} A {r} {r} 0 {large_arc} 1 {} {} Z",
        fmt(x1),
        fmt(y1),
        fmt(x2),
        fmt(y2),
        c = fmt(center),
        r = fmt(PIE_RADIUS),
    )
}

fn empty_chart(label: &str) -> Markup {
    html! {
        svg class="chart" viewBox="0 0 600 120" role="img" aria-label=(label) {
            text class="chart-label" x="50%" y="50%" text-anchor="middle" { "No data yet" }
        }
    }
}

fn fmt(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_tooltips_round_half_up() {
        let chart = PieChart::active_rest(5, 3);
        assert_eq!(chart.slices[0].tooltip(), "Active Days: 5 (63%)");
        assert_eq!(chart.slices[1].tooltip(), "Rest Days: 3 (38%)");
    }

    #[test]
    fn empty_pie_reports_zero_percent() {
        let chart = PieChart::active_rest(0, 0);
        assert_eq!(chart.slices[0].percentage, 0);
        assert_eq!(chart.slices[1].percentage, 0);
        let svg = SvgChartService.draw_pie(&chart).into_string();
        assert!(svg.contains("No data yet"));
    }

    #[test]
    fn bar_colors_fall_back_for_unknown_types() {
        let mut counts = BTreeMap::new();
        counts.insert("Yoga".to_string(), 2);
        counts.insert("Climbing".to_string(), 1);
        let chart = BarChart::from_counts(&counts);

        let climbing = chart.bars.iter().find(|bar| bar.label == "Climbing").unwrap();
        let yoga = chart.bars.iter().find(|bar| bar.label == "Yoga").unwrap();
        assert_eq!(climbing.color, FALLBACK_COLOR);
        assert_eq!(yoga.color, "#8e24aa");
        assert_eq!(yoga.tooltip(), "2 workout(s)");
        assert_eq!(chart.max_count(), 2);
    }

    #[test]
    fn svg_bar_chart_has_one_bar_per_type() {
        let mut counts = BTreeMap::new();
        counts.insert("Cardio".to_string(), 4);
        counts.insert("Rest".to_string(), 2);
        counts.insert("<script>".to_string(), 1);
        let svg = SvgChartService
            .draw_bar(&BarChart::from_counts(&counts))
            .into_string();

        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("4 workout(s)"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn single_slice_pie_draws_full_circle() {
        let svg = SvgChartService
            .draw_pie(&PieChart::active_rest(4, 0))
            .into_string();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("Active Days: 4 (100%)"));
        assert!(!svg.contains("<path"));
    }
}
