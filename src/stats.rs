use crate::dates::{week_start, year_start};
use crate::models::{StatsResponse, WorkoutRecord};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

pub fn build_stats_at(today: NaiveDate, records: &[WorkoutRecord]) -> StatsResponse {
    let (active_days, rest_days) = active_rest_counts(records);

    StatsResponse {
        workouts_ytd: count_since(records, year_start(today)),
        workouts_this_week: count_since(records, week_start(today)),
        current_streak: current_streak(records),
        total_hours: total_hours(records),
        type_distribution: type_distribution(records),
        active_days,
        rest_days,
    }
}

fn count_since(records: &[WorkoutRecord], start: NaiveDate) -> usize {
    records.iter().filter(|record| record.date >= start).count()
}

/// Whole hours, half an hour or more rounds up.
pub fn total_hours(records: &[WorkoutRecord]) -> u64 {
    let minutes: u64 = records
        .iter()
        .map(|record| u64::from(record.effective_duration()))
        .sum();
    (minutes + 30) / 60
}

/// Consecutive days walking back from the most recent record.
///
/// Dates are assumed unique; a repeated date is treated as a gap and ends the
/// run.
pub fn current_streak(records: &[WorkoutRecord]) -> usize {
    let mut sorted: Vec<NaiveDate> = records.iter().map(|record| record.date).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let Some((&first, rest)) = sorted.split_first() else {
        return 0;
    };

    let mut streak = 1;
    let mut last = first;
    for &date in rest {
        let expected = last - Duration::days(1);
        if date != expected {
            break;
        }
        streak += 1;
        last = expected;
    }
    streak
}

pub fn type_distribution(records: &[WorkoutRecord]) -> BTreeMap<String, usize> {
    let mut distribution = BTreeMap::new();
    for record in records {
        *distribution
            .entry(record.workout_type.label().to_string())
            .or_insert(0) += 1;
    }
    distribution
}

pub fn active_rest_counts(records: &[WorkoutRecord]) -> (usize, usize) {
    let rest = records
        .iter()
        .filter(|record| record.workout_type.is_rest())
        .count();
    (records.len() - rest, rest)
}
