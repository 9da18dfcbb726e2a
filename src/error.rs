use thiserror::Error;

/// Result type used throughout the generator
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Everything that can stop a timetable from being generated or exported
#[derive(Error, Debug)]
pub enum TimetableError {
    /// Start time is not a 24-hour "HH:MM" value
    #[error("Invalid start time '{0}': expected HH:MM (24-hour)")]
    InvalidStartTime(String),

    #[error("Please input at least one subject")]
    NoSubjects,

    #[error("Lunch period {lunch_period} must leave at least one period before and after it (periods per day: {periods_per_day})")]
    LunchOutOfRange {
        lunch_period: usize,
        periods_per_day: usize,
    },

    /// Any other setting outside its allowed bounds, or inputs that disagree with each other
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid subject on row {row}: {message}")]
    InvalidSubject { row: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TimetableError {
    /// True when the error was caused by what the user submitted rather than the environment
    pub fn is_input_error(&self) -> bool {
        !matches!(self, TimetableError::Io(_) | TimetableError::Csv(_))
    }
}
