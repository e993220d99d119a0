use crate::calendar::{build_calendar_at, CalendarYear};
use crate::charts::{BarChart, ChartService, PieChart};
use crate::errors::AppError;
use crate::models::{StatsResponse, WorkoutRecord};
use crate::stats::build_stats_at;
use crate::ui::render_calendar;
use chrono::NaiveDate;
use maud::{html, Markup};
use std::collections::BTreeMap;

pub const WORKOUT_TYPE_CHART: &str = "workout-type-chart";
pub const ACTIVITY_PIE_CHART: &str = "activity-pie-chart";
pub const CALENDAR_HEATMAP: &str = "calendar-heatmap";
pub const TOTAL_WORKOUTS_YTD: &str = "total-workouts-ytd";
pub const WORKOUTS_THIS_WEEK: &str = "workouts-this-week";
pub const CURRENT_STREAK: &str = "current-streak";
pub const TOTAL_HOURS: &str = "total-hours";

pub const REGIONS: [&str; 7] = [
    WORKOUT_TYPE_CHART,
    ACTIVITY_PIE_CHART,
    CALENDAR_HEATMAP,
    TOTAL_WORKOUTS_YTD,
    WORKOUTS_THIS_WEEK,
    CURRENT_STREAK,
    TOTAL_HOURS,
];

/// Regions holding a single number rather than a chart.
pub const STAT_REGIONS: [&str; 4] = [
    TOTAL_WORKOUTS_YTD,
    WORKOUTS_THIS_WEEK,
    CURRENT_STREAK,
    TOTAL_HOURS,
];

/// Somewhere the dashboard's named regions can be written to.
pub trait DisplaySink {
    fn set_markup(&mut self, region: &str, markup: Markup) -> Result<(), AppError>;

    fn set_text(&mut self, region: &str, text: &str) -> Result<(), AppError> {
        self.set_markup(region, html! { (text) })
    }
}

/// Everything the dashboard shows, computed from one record list and one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub stats: StatsResponse,
    pub calendar: CalendarYear,
    pub type_chart: BarChart,
    pub activity_chart: PieChart,
}

impl DashboardView {
    pub fn build_at(today: NaiveDate, records: &[WorkoutRecord]) -> Self {
        let stats = build_stats_at(today, records);
        let type_chart = BarChart::from_counts(&stats.type_distribution);
        let activity_chart = PieChart::active_rest(stats.active_days, stats.rest_days);

        Self {
            calendar: build_calendar_at(today, records),
            stats,
            type_chart,
            activity_chart,
        }
    }

    pub fn apply(
        &self,
        sink: &mut impl DisplaySink,
        charts: &impl ChartService,
    ) -> Result<(), AppError> {
        sink.set_markup(WORKOUT_TYPE_CHART, charts.draw_bar(&self.type_chart))?;
        sink.set_markup(ACTIVITY_PIE_CHART, charts.draw_pie(&self.activity_chart))?;
        sink.set_markup(CALENDAR_HEATMAP, render_calendar(&self.calendar))?;
        sink.set_text(TOTAL_WORKOUTS_YTD, &self.stats.workouts_ytd.to_string())?;
        sink.set_text(WORKOUTS_THIS_WEEK, &self.stats.workouts_this_week.to_string())?;
        sink.set_text(CURRENT_STREAK, &self.stats.current_streak.to_string())?;
        sink.set_text(TOTAL_HOURS, &self.stats.total_hours.to_string())?;
        Ok(())
    }
}

/// Rendered contents of the dashboard page's regions. Regions never written
/// stay empty.
#[derive(Debug, Default)]
pub struct PageRegions {
    filled: BTreeMap<&'static str, String>,
}

impl PageRegions {
    pub fn get(&self, region: &str) -> Option<&str> {
        self.filled.get(region).map(String::as_str)
    }
}

#[cfg(test)]
impl PageRegions {
    pub fn is_empty(&self) -> bool {
        self.filled.is_empty()
    }
}

impl DisplaySink for PageRegions {
    fn set_markup(&mut self, region: &str, markup: Markup) -> Result<(), AppError> {
        let Some(&known) = REGIONS.iter().find(|&&known| known == region) else {
            return Err(AppError::unknown_region(region));
        };
        self.filled.insert(known, markup.into_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::SvgChartService;
    use crate::models::WorkoutType;

    fn record(date: NaiveDate, kind: &str, duration: u32) -> WorkoutRecord {
        WorkoutRecord {
            date,
            workout_type: WorkoutType::from(kind),
            duration,
            notes: None,
        }
    }

    #[test]
    fn view_fills_every_region() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let records = vec![
            record(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(), "Cardio", 90),
            record(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), "Rest", 0),
            record(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), "Yoga", 60),
        ];

        let view = DashboardView::build_at(today, &records);
        let mut regions = PageRegions::default();
        view.apply(&mut regions, &SvgChartService).unwrap();

        for region in REGIONS {
            assert!(regions.get(region).is_some(), "region {region} not filled");
        }
        assert_eq!(regions.get(CURRENT_STREAK), Some("3"));
        assert_eq!(regions.get(TOTAL_HOURS), Some("3"));
        assert_eq!(regions.get(TOTAL_WORKOUTS_YTD), Some("3"));
        assert!(regions.get(ACTIVITY_PIE_CHART).unwrap().contains("Active Days: 2 (67%)"));
    }

    #[test]
    fn unknown_region_is_an_error() {
        let mut regions = PageRegions::default();
        let err = regions.set_text("weekly-average", "1").unwrap_err();
        assert!(err.message.contains("weekly-average"));
        assert!(regions.is_empty());
    }

    #[test]
    fn text_is_escaped() {
        let mut regions = PageRegions::default();
        regions.set_text(TOTAL_HOURS, "<b>").unwrap();
        assert_eq!(regions.get(TOTAL_HOURS), Some("&lt;b&gt;"));
    }
}
