use crate::dates::{self, MONTH_NAMES, WEEKDAY_LABELS};
use crate::models::WorkoutRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Disabled,
    Active,
    Rest,
    Empty,
}

impl DayStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            DayStatus::Disabled => "disabled",
            DayStatus::Active => "active",
            DayStatus::Rest => "rest",
            DayStatus::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub status: DayStatus,
    /// Absent on disabled days.
    pub tooltip: Option<String>,
    /// Entry form target; absent on disabled days.
    pub link: Option<String>,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    pub name: &'static str,
    pub month: u32,
    pub disabled: bool,
    /// Blank cells before day 1 so it lands under its weekday.
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarYear {
    pub year: i32,
    pub weekday_labels: [&'static str; 7],
    pub months: Vec<CalendarMonth>,
}

#[cfg(test)]
impl CalendarYear {
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.months
            .get(date.month0() as usize)
            .and_then(|month| month.days.get(date.day0() as usize))
            .filter(|cell| cell.date == date)
    }
}

/// Builds the twelve months of `today`'s year. Day cells are fully computed
/// here; rendering only maps them to markup.
pub fn build_calendar_at(today: NaiveDate, records: &[WorkoutRecord]) -> CalendarYear {
    let by_date: HashMap<NaiveDate, &WorkoutRecord> =
        records.iter().map(|record| (record.date, record)).collect();
    let year = today.year();

    let months = (1..=12)
        .filter_map(|month| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            let days = (1..=dates::days_in_month(year, month))
                .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
                .map(|date| day_cell(date, today, by_date.get(&date).copied()))
                .collect();

            Some(CalendarMonth {
                name: MONTH_NAMES[month as usize - 1],
                month,
                disabled: month > today.month(),
                leading_blanks: first.weekday().num_days_from_sunday(),
                days,
            })
        })
        .collect();

    CalendarYear {
        year,
        weekday_labels: WEEKDAY_LABELS,
        months,
    }
}

fn day_cell(date: NaiveDate, today: NaiveDate, record: Option<&WorkoutRecord>) -> DayCell {
    if date > today {
        return DayCell {
            date,
            status: DayStatus::Disabled,
            tooltip: None,
            link: None,
        };
    }

    let status = match record {
        Some(record) if record.workout_type.is_rest() => DayStatus::Rest,
        Some(_) => DayStatus::Active,
        None => DayStatus::Empty,
    };

    DayCell {
        date,
        status,
        tooltip: Some(tooltip(date, record)),
        link: Some(entry_link(date, record)),
    }
}

fn tooltip(date: NaiveDate, record: Option<&WorkoutRecord>) -> String {
    let Some(record) = record else {
        return format!("{}\nNo workout logged", dates::iso(date));
    };

    let mut lines = vec![dates::iso(date), record.workout_type.to_string()];
    if record.duration > 0 {
        lines.push(format!("{} minutes", record.duration));
    }
    if let Some(notes) = record.notes() {
        lines.push(format!("Notes: {notes}"));
    }
    lines.join("\n")
}

/// Entry form URL for a day, pre-filled from the existing record if any.
pub fn entry_link(date: NaiveDate, record: Option<&WorkoutRecord>) -> String {
    let mut link = format!("/form?date={}", dates::iso(date));
    if let Some(record) = record {
        link.push_str(&format!(
            "&workout_type={}&duration={}",
            urlencoding::encode(record.workout_type.label()),
            record.duration
        ));
        if let Some(notes) = record.notes() {
            link.push_str(&format!("&notes={}", urlencoding::encode(notes)));
        }
    }
    link
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutType;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, kind: &str, duration: u32, notes: Option<&str>) -> WorkoutRecord {
        WorkoutRecord {
            date,
            workout_type: WorkoutType::from(kind),
            duration,
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn cells_are_classified() {
        let today = day(2024, 3, 10);
        let records = vec![
            record(day(2024, 3, 5), "Rest", 0, None),
            record(day(2024, 3, 6), "Cardio", 30, None),
        ];
        let calendar = build_calendar_at(today, &records);

        assert_eq!(calendar.cell(day(2024, 3, 5)).unwrap().status, DayStatus::Rest);
        assert_eq!(calendar.cell(day(2024, 3, 6)).unwrap().status, DayStatus::Active);
        assert_eq!(calendar.cell(day(2024, 3, 7)).unwrap().status, DayStatus::Empty);
        assert_eq!(calendar.cell(day(2024, 3, 10)).unwrap().status, DayStatus::Empty);
        assert_eq!(calendar.cell(day(2024, 3, 11)).unwrap().status, DayStatus::Disabled);
        assert_eq!(calendar.cell(day(2024, 7, 1)).unwrap().status, DayStatus::Disabled);
    }

    #[test]
    fn future_months_are_disabled() {
        let calendar = build_calendar_at(day(2024, 3, 10), &[]);
        assert_eq!(calendar.months.len(), 12);
        assert!(!calendar.months[2].disabled);
        assert!(calendar.months[3].disabled);
        assert!(calendar.months[11].days.iter().all(|cell| cell.link.is_none()));
    }

    #[test]
    fn grid_is_aligned_to_weekday() {
        let calendar = build_calendar_at(day(2024, 12, 31), &[]);
        // 2024-01-01 was a Monday, 2024-09-01 a Sunday.
        assert_eq!(calendar.months[0].leading_blanks, 1);
        assert_eq!(calendar.months[8].leading_blanks, 0);
        assert_eq!(calendar.months[1].days.len(), 29);
        assert_eq!(calendar.weekday_labels[0], "Sun");
    }

    #[test]
    fn records_outside_the_year_are_ignored() {
        let records = vec![record(day(2023, 3, 5), "Cardio", 30, None)];
        let calendar = build_calendar_at(day(2024, 3, 10), &records);
        assert_eq!(calendar.cell(day(2024, 3, 5)).unwrap().status, DayStatus::Empty);
    }

    #[test]
    fn links_prefill_existing_records() {
        let records = vec![record(day(2024, 3, 6), "Strength Training", 45, Some("legs & core"))];
        let calendar = build_calendar_at(day(2024, 3, 10), &records);

        let logged = calendar.cell(day(2024, 3, 6)).unwrap();
        assert_eq!(
            logged.link.as_deref(),
            Some("/form?date=2024-03-06&workout_type=Strength%20Training&duration=45&notes=legs%20%26%20core")
        );
        assert_eq!(
            logged.tooltip.as_deref(),
            Some("2024-03-06\nStrength Training\n45 minutes\nNotes: legs & core")
        );

        let empty = calendar.cell(day(2024, 3, 7)).unwrap();
        assert_eq!(empty.link.as_deref(), Some("/form?date=2024-03-07"));
    }

    #[test]
    fn rest_tooltip_omits_duration() {
        let records = vec![record(day(2024, 3, 5), "Rest", 0, None)];
        let calendar = build_calendar_at(day(2024, 3, 10), &records);
        let cell = calendar.cell(day(2024, 3, 5)).unwrap();
        assert_eq!(cell.tooltip.as_deref(), Some("2024-03-05\nRest"));
        assert_eq!(
            cell.link.as_deref(),
            Some("/form?date=2024-03-05&workout_type=Rest&duration=0")
        );
    }
}
