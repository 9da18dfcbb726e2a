use serde::{Deserialize, Serialize};
use crate::error::{Result, TimetableError};
use crate::schedule::Subject;
use crate::schedule::slot_utils::parse_start_time;

pub const WEEKDAYS: [&str; 6] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

pub const MIN_DAYS: usize = 5;
pub const MAX_DAYS: usize = 6;
pub const MIN_PERIODS: usize = 5;
pub const MAX_PERIODS: usize = 10;
pub const MIN_DURATION: u32 = 30;
pub const MAX_DURATION: u32 = 90;
pub const MAX_SUBJECTS: usize = 20;

/// Settings for one timetable generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    pub num_days: usize,
    /// Total periods per day, lunch included
    pub periods_per_day: usize,
    /// Lunch break comes after this many periods (1-based position of the lunch period)
    pub lunch_period: usize,
    pub period_duration: u32,
    /// School start time, "HH:MM" 24-hour
    pub start_time: String,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        TimetableConfig {
            num_days: 5,
            periods_per_day: 7,
            lunch_period: 4,
            period_duration: 45,
            start_time: "09:00".to_string(),
        }
    }
}

/// Allowed ranges, sent to the web page so it can build its inputs
#[derive(Debug, Clone, Serialize)]
pub struct ConfigBounds {
    pub num_days: (usize, usize),
    pub periods_per_day: (usize, usize),
    pub period_duration: (u32, u32),
    pub max_subjects: usize,
}

impl Default for ConfigBounds {
    fn default() -> Self {
        ConfigBounds {
            num_days: (MIN_DAYS, MAX_DAYS),
            periods_per_day: (MIN_PERIODS, MAX_PERIODS),
            period_duration: (MIN_DURATION, MAX_DURATION),
            max_subjects: MAX_SUBJECTS,
        }
    }
}

impl TimetableConfig {
    /// Checks every setting against its allowed range
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DAYS..=MAX_DAYS).contains(&self.num_days) {
            return Err(TimetableError::InvalidConfig(format!(
                "number of working days must be between {} and {}",
                MIN_DAYS, MAX_DAYS
            )));
        }
        if !(MIN_PERIODS..=MAX_PERIODS).contains(&self.periods_per_day) {
            return Err(TimetableError::InvalidConfig(format!(
                "periods per day must be between {} and {}",
                MIN_PERIODS, MAX_PERIODS
            )));
        }
        if self.lunch_period < 2 || self.lunch_period + 1 > self.periods_per_day {
            return Err(TimetableError::LunchOutOfRange {
                lunch_period: self.lunch_period,
                periods_per_day: self.periods_per_day,
            });
        }
        if !(MIN_DURATION..=MAX_DURATION).contains(&self.period_duration) {
            return Err(TimetableError::InvalidConfig(format!(
                "period duration must be between {} and {} minutes",
                MIN_DURATION, MAX_DURATION
            )));
        }
        parse_start_time(&self.start_time)?;
        Ok(())
    }

    pub fn days(&self) -> Vec<String> {
        WEEKDAYS
            .iter()
            .take(self.num_days)
            .map(|d| d.to_string())
            .collect()
    }

    /// 0-based lunch period index
    pub fn lunch_index(&self) -> usize {
        self.lunch_period.saturating_sub(1)
    }

    pub fn total_cells(&self) -> usize {
        self.num_days * self.periods_per_day
    }

    /// Trims subject entries, drops the ones without a name and checks the rest
    pub fn prepare_subjects(&self, subjects: Vec<Subject>) -> Result<Vec<Subject>> {
        let prepared: Vec<Subject> = subjects
            .into_iter()
            .map(|s| Subject::new(s.name.trim(), s.teacher.trim(), s.weekly_slots))
            .filter(|s| !s.name.is_empty())
            .collect();

        if prepared.is_empty() {
            return Err(TimetableError::NoSubjects);
        }
        if prepared.len() > MAX_SUBJECTS {
            return Err(TimetableError::InvalidConfig(format!(
                "at most {} subjects are supported, got {}",
                MAX_SUBJECTS,
                prepared.len()
            )));
        }

        let max_slots = self.total_cells();
        for (idx, subject) in prepared.iter().enumerate() {
            if subject.weekly_slots < 1 || subject.weekly_slots > max_slots {
                return Err(TimetableError::InvalidSubject {
                    row: idx + 1,
                    message: format!(
                        "{} needs {} weekly periods; allowed range is 1 to {}",
                        subject.name, subject.weekly_slots, max_slots
                    ),
                });
            }
        }

        Ok(prepared)
    }
}
