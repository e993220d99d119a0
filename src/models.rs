use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkoutType {
    StrengthTraining,
    Cardio,
    Yoga,
    Pilates,
    Rest,
    Other(String),
}

impl WorkoutType {
    pub const KNOWN: [WorkoutType; 5] = [
        WorkoutType::StrengthTraining,
        WorkoutType::Cardio,
        WorkoutType::Yoga,
        WorkoutType::Pilates,
        WorkoutType::Rest,
    ];

    pub fn label(&self) -> &str {
        match self {
            WorkoutType::StrengthTraining => "Strength Training",
            WorkoutType::Cardio => "Cardio",
            WorkoutType::Yoga => "Yoga",
            WorkoutType::Pilates => "Pilates",
            WorkoutType::Rest => "Rest",
            WorkoutType::Other(label) => label,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, WorkoutType::Rest)
    }
}

impl From<String> for WorkoutType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Strength Training" => WorkoutType::StrengthTraining,
            "Cardio" => WorkoutType::Cardio,
            "Yoga" => WorkoutType::Yoga,
            "Pilates" => WorkoutType::Pilates,
            "Rest" => WorkoutType::Rest,
            _ => WorkoutType::Other(label),
        }
    }
}

impl From<&str> for WorkoutType {
    fn from(label: &str) -> Self {
        WorkoutType::from(label.to_string())
    }
}

impl From<WorkoutType> for String {
    fn from(kind: WorkoutType) -> Self {
        kind.label().to_string()
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One dated entry as returned by the backend. At most one exists per date.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkoutRecord {
    pub date: NaiveDate,
    pub workout_type: WorkoutType,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkoutRecord {
    /// Minutes counted towards totals; rest days never contribute.
    pub fn effective_duration(&self) -> u32 {
        if self.workout_type.is_rest() { 0 } else { self.duration }
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkoutsResponse {
    pub success: bool,
    #[serde(default)]
    pub workouts: Vec<WorkoutRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Query string accepted by the entry form. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormParams {
    pub date: Option<String>,
    pub workout_type: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

/// Raw field values posted by the entry form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormFields {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub workout_type: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub notes: String,
}

/// Validated payload forwarded to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutSubmission {
    pub date: String,
    pub workout_type: String,
    pub duration: u32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    pub workouts_ytd: usize,
    pub workouts_this_week: usize,
    pub current_streak: usize,
    pub total_hours: u64,
    pub type_distribution: BTreeMap<String, usize>,
    pub active_days: usize,
    pub rest_days: usize,
}
