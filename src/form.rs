use crate::dates;
use crate::models::{FormFields, FormParams, WorkoutSubmission, WorkoutType};
use chrono::NaiveDate;
use std::fmt;
use std::time::Duration;

/// Substring the backend puts in a fragment when a workout was saved.
pub const SUCCESS_MARKER: &str = "success-message";
pub const REDIRECT_TARGET: &str = "/";
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Initial,
    TypeSelected,
    Valid,
    Invalid(ValidationError),
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingDate,
    MissingType,
    InvalidDuration,
}

impl ValidationError {
    pub fn field(self) -> &'static str {
        match self {
            ValidationError::MissingDate => "workout-date",
            ValidationError::MissingType => "workout-type",
            ValidationError::InvalidDuration => "workout-duration",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ValidationError::MissingDate => "Please select a date",
            ValidationError::MissingType => "Please select a workout type",
            ValidationError::InvalidDuration => "Please enter a valid duration",
        };
        f.write_str(message)
    }
}

/// The entry form's field values plus where it stands in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub date: String,
    pub workout_type: String,
    pub duration: String,
    pub notes: String,
    pub duration_visible: bool,
    pub phase: FormPhase,
}

impl EntryForm {
    /// Form as first shown: the `date` parameter or yesterday, then any
    /// pre-filled fields with the type-change rules applied.
    pub fn load(params: &FormParams, today: NaiveDate) -> Self {
        let date = params
            .date
            .as_deref()
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| dates::iso(dates::yesterday(today)));

        let mut form = Self {
            date,
            workout_type: String::new(),
            duration: params.duration.clone().unwrap_or_default(),
            notes: params.notes.clone().unwrap_or_default(),
            duration_visible: true,
            phase: FormPhase::Initial,
        };

        if let Some(kind) = params.workout_type.as_deref() {
            form.select_type(kind);
        }
        form
    }

    /// Form as posted back by the browser.
    pub fn from_fields(fields: FormFields) -> Self {
        let mut form = Self {
            date: fields.date.trim().to_string(),
            workout_type: String::new(),
            duration: fields.duration,
            notes: fields.notes,
            duration_visible: true,
            phase: FormPhase::Initial,
        };
        form.select_type(&fields.workout_type);
        form
    }

    pub fn select_type(&mut self, kind: &str) {
        self.workout_type = kind.trim().to_string();
        if self.is_rest() {
            self.duration_visible = false;
            self.duration = "0".to_string();
        } else {
            self.duration_visible = true;
            if self.duration.trim() == "0" {
                self.duration.clear();
            }
        }
        self.phase = FormPhase::TypeSelected;
    }

    pub fn is_rest(&self) -> bool {
        WorkoutType::from(self.workout_type.as_str()).is_rest()
    }

    /// Checks the fields in display order and stops at the first problem.
    pub fn validate(&mut self) -> Result<WorkoutSubmission, ValidationError> {
        let result = self.check();
        self.phase = match &result {
            Ok(_) => FormPhase::Valid,
            Err(err) => FormPhase::Invalid(*err),
        };
        result
    }

    fn check(&self) -> Result<WorkoutSubmission, ValidationError> {
        if self.date.trim().is_empty() {
            return Err(ValidationError::MissingDate);
        }
        if self.workout_type.is_empty() {
            return Err(ValidationError::MissingType);
        }

        let duration = if self.is_rest() {
            0
        } else {
            match self.duration.trim().parse::<u32>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => return Err(ValidationError::InvalidDuration),
            }
        };

        Ok(WorkoutSubmission {
            date: self.date.trim().to_string(),
            workout_type: self.workout_type.clone(),
            duration,
            notes: self.notes.clone(),
        })
    }

    /// Records the backend's reply. Returns the pending redirect when the
    /// reply signals success.
    pub fn record_response(&mut self, fragment: &str) -> Option<Redirect> {
        if !fragment.contains(SUCCESS_MARKER) {
            return None;
        }
        self.phase = FormPhase::Submitted;
        Some(Redirect::to_dashboard())
    }
}

/// One-shot navigation scheduled after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub target: &'static str,
    pub delay: Duration,
}

impl Redirect {
    pub fn to_dashboard() -> Self {
        Self {
            target: REDIRECT_TARGET,
            delay: REDIRECT_DELAY,
        }
    }
}
