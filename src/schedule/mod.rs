pub mod types;
pub mod slot_utils;
pub mod assigner;

pub use types::{Cell, CellKind, DayColumn, Subject, Timetable, UnplacedSubject, FREE_PERIOD_LABEL, LUNCH_LABEL};
pub use slot_utils::generate_time_slots;
pub use assigner::generate_timetable;

use rand::Rng;
use crate::config::TimetableConfig;
use crate::error::Result;

/// Validates the request, builds the period labels and assigns the subjects
pub fn build_timetable<R: Rng + ?Sized>(
    config: &TimetableConfig,
    subjects: Vec<Subject>,
    rng: &mut R,
) -> Result<Timetable> {
    config.validate()?;
    let subjects = config.prepare_subjects(subjects)?;

    let period_times = generate_time_slots(&config.start_time, config.periods_per_day, config.period_duration)?;
    generate_timetable(
        &subjects,
        &config.days(),
        config.periods_per_day,
        config.lunch_index(),
        &period_times,
        rng,
    )
}
