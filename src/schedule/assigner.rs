use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use crate::error::{Result, TimetableError};
use super::types::{Cell, DayColumn, Subject, Timetable, UnplacedSubject};

/// Entry of the assignment pool: a subject occurrence or padding
#[derive(Debug, Clone)]
enum PoolEntry<'a> {
    Subject(&'a Subject),
    Free,
}

/// Places every subject's weekly periods into random non-lunch cells of the week
///
/// # Arguments
/// * `subjects` - Subjects in input order; duplicates are independent entries
/// * `days` - Day names, one column each
/// * `periods_per_day` - Number of periods in a day, lunch included
/// * `lunch_idx` - 0-based lunch period, same for every day
/// * `period_times` - One time label per period
/// * `rng` - Source of randomness for the slot shuffle
///
/// Cells left over after all subjects are placed become free periods. If demand exceeds
/// the available cells, the tail of the assignment pool is dropped and reported in
/// `Timetable::unplaced`.
pub fn generate_timetable<R: Rng + ?Sized>(
    subjects: &[Subject],
    days: &[String],
    periods_per_day: usize,
    lunch_idx: usize,
    period_times: &[String],
    rng: &mut R,
) -> Result<Timetable> {
    check_grid(days, periods_per_day, lunch_idx, period_times)?;

    let mut grid: Vec<Vec<Cell>> = days
        .iter()
        .map(|_| {
            let mut cells = vec![Cell::Empty; periods_per_day];
            cells[lunch_idx] = Cell::Lunch;
            cells
        })
        .collect();

    // (day index, period index) for every non-lunch cell
    let mut free_slots: Vec<(usize, usize)> = (0..days.len())
        .flat_map(|day| {
            (0..periods_per_day)
                .filter(move |&period| period != lunch_idx)
                .map(move |period| (day, period))
        })
        .collect();

    let mut pool: Vec<PoolEntry> = subjects
        .iter()
        .flat_map(|s| std::iter::repeat(PoolEntry::Subject(s)).take(s.weekly_slots))
        .collect();

    let capacity = free_slots.len();
    let demand = pool.len();
    if capacity > demand {
        pool.extend(std::iter::repeat(PoolEntry::Free).take(capacity - demand));
    }
    debug!(
        "Assignment pool: {} subject periods, {} cells available, {} free periods",
        demand,
        capacity,
        capacity.saturating_sub(demand)
    );

    free_slots.shuffle(rng);

    for (&(day, period), entry) in free_slots.iter().zip(pool.iter()) {
        grid[day][period] = match entry {
            PoolEntry::Subject(s) => Cell::Subject {
                name: s.name.clone(),
                teacher: s.teacher.clone(),
            },
            PoolEntry::Free => Cell::Free,
        };
    }

    let unplaced = collect_unplaced(pool.get(capacity..).unwrap_or(&[]));
    if !unplaced.is_empty() {
        let dropped: usize = unplaced.iter().map(|u| u.periods).sum();
        warn!(
            "Weekly demand of {} periods exceeds the {} available cells; {} periods were not placed",
            demand, capacity, dropped
        );
    }

    info!(
        "Generated timetable: {} days x {} periods, {} subjects",
        days.len(),
        periods_per_day,
        subjects.len()
    );

    let columns = days
        .iter()
        .cloned()
        .zip(grid)
        .map(|(day, cells)| DayColumn { day, cells })
        .collect();

    Ok(Timetable {
        period_times: period_times.to_vec(),
        columns,
        unplaced,
    })
}

fn check_grid(days: &[String], periods_per_day: usize, lunch_idx: usize, period_times: &[String]) -> Result<()> {
    if days.is_empty() {
        return Err(TimetableError::InvalidConfig("at least one day is required".to_string()));
    }
    if periods_per_day == 0 {
        return Err(TimetableError::InvalidConfig("periods per day must be positive".to_string()));
    }
    // Lunch must leave at least one period before and after it
    if lunch_idx == 0 || lunch_idx + 1 >= periods_per_day {
        return Err(TimetableError::InvalidConfig(format!(
            "lunch index {} is outside 1..={} for {} periods per day",
            lunch_idx,
            periods_per_day.saturating_sub(2),
            periods_per_day
        )));
    }
    if period_times.len() != periods_per_day {
        return Err(TimetableError::InvalidConfig(format!(
            "expected {} period time labels, got {}",
            periods_per_day,
            period_times.len()
        )));
    }
    Ok(())
}

/// Groups the dropped tail of the pool by subject, keeping first-seen order
fn collect_unplaced(dropped: &[PoolEntry]) -> Vec<UnplacedSubject> {
    let mut unplaced: Vec<UnplacedSubject> = Vec::new();
    for entry in dropped {
        if let PoolEntry::Subject(s) = entry {
            match unplaced.iter_mut().find(|u| u.name == s.name && u.teacher == s.teacher) {
                Some(existing) => existing.periods += 1,
                None => unplaced.push(UnplacedSubject {
                    name: s.name.clone(),
                    teacher: s.teacher.clone(),
                    periods: 1,
                }),
            }
        }
    }
    unplaced
}
