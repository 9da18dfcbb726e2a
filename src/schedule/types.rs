use std::fmt;
use serde::{Serialize, Deserialize};

pub const LUNCH_LABEL: &str = "🍱 Lunch Break";
pub const FREE_PERIOD_LABEL: &str = "Free Period";

/// A subject that needs a number of periods every week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    #[serde(default)]
    pub teacher: String,
    pub weekly_slots: usize,
}

impl Subject {
    pub fn new(name: impl Into<String>, teacher: impl Into<String>, weekly_slots: usize) -> Self {
        Subject {
            name: name.into(),
            teacher: teacher.into(),
            weekly_slots,
        }
    }
}

/// What a single (day, period) cell of the timetable holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Lunch,
    Subject { name: String, teacher: String },
    Free,
    /// Never written by the assigner; only left over if the pool ran dry
    Empty,
}

/// Cell category, used by the web page for colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Lunch,
    Subject,
    Free,
    Empty,
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Lunch => CellKind::Lunch,
            Cell::Subject { .. } => CellKind::Subject,
            Cell::Free => CellKind::Free,
            Cell::Empty => CellKind::Empty,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Lunch => f.write_str(LUNCH_LABEL),
            Cell::Subject { name, teacher } if teacher.is_empty() => f.write_str(name),
            Cell::Subject { name, teacher } => write!(f, "{}\n({})", name, teacher),
            Cell::Free => f.write_str(FREE_PERIOD_LABEL),
            Cell::Empty => Ok(()),
        }
    }
}

/// All cells of one day, ordered by period index
#[derive(Debug, Clone)]
pub struct DayColumn {
    pub day: String,
    pub cells: Vec<Cell>,
}

/// Demand that did not fit into the week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnplacedSubject {
    pub name: String,
    pub teacher: String,
    pub periods: usize,
}

/// A generated week: time labels down the side, one column per day
#[derive(Debug, Clone)]
pub struct Timetable {
    pub period_times: Vec<String>,
    pub columns: Vec<DayColumn>,
    pub unplaced: Vec<UnplacedSubject>,
}

impl Timetable {
    pub fn periods_per_day(&self) -> usize {
        self.period_times.len()
    }

    pub fn day_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.day.as_str()).collect()
    }

    /// Header row: "Period Time" followed by each day name
    pub fn header(&self) -> Vec<String> {
        std::iter::once("Period Time".to_string())
            .chain(self.columns.iter().map(|c| c.day.clone()))
            .collect()
    }

    /// One row per period: the time label followed by each day's cell text
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.period_times
            .iter()
            .enumerate()
            .map(|(idx, time)| {
                let mut row = Vec::with_capacity(self.columns.len() + 1);
                row.push(time.clone());
                for column in &self.columns {
                    row.push(column.cells.get(idx).map(|c| c.to_string()).unwrap_or_default());
                }
                row
            })
            .collect()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.columns.iter().flat_map(|c| c.cells.iter())
    }

    pub fn count_kind(&self, kind: CellKind) -> usize {
        self.cells().filter(|c| c.kind() == kind).count()
    }

    /// How many cells hold the given subject/teacher pair
    pub fn count_subject(&self, name: &str, teacher: &str) -> usize {
        self.cells()
            .filter(|c| matches!(c, Cell::Subject { name: n, teacher: t } if n == name && t == teacher))
            .count()
    }
}
