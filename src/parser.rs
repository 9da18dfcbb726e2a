use csv::{Reader, ReaderBuilder};
use log::{debug, info};
use std::io;
use std::path::Path;
use crate::error::{Result, TimetableError};
use crate::schedule::Subject;

/// Parses a weekly period count; blank or non-numeric cells are errors
fn parse_slots(value: &str, row: usize) -> Result<usize> {
    value.trim().parse().map_err(|_| TimetableError::InvalidSubject {
        row,
        message: format!("weekly periods '{}' is not a whole number", value.trim()),
    })
}

/// Loads the subject list from a CSV file
///
/// Expected columns: subject name, teacher name, weekly periods. Columns are found by
/// header text and fall back to positions 0, 1 and 2.
/// Rows without a subject name are skipped.
pub fn load_subjects<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Subject>> {
    let path = csv_path.as_ref();
    info!("Loading subjects from {}", path.display());
    let reader = Reader::from_path(path)?;
    collect_subjects(reader)
}

/// Same as `load_subjects`, reading from any source
pub fn read_subjects<R: io::Read>(source: R) -> Result<Vec<Subject>> {
    let reader = ReaderBuilder::new().flexible(true).from_reader(source);
    collect_subjects(reader)
}

fn collect_subjects<R: io::Read>(mut reader: Reader<R>) -> Result<Vec<Subject>> {
    let headers = reader.headers()?.clone();
    let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

    let subject_col = lower.iter().position(|h| h.contains("subject")).unwrap_or(0);
    let teacher_col = lower.iter().position(|h| h.contains("teacher")).unwrap_or(1);
    let slots_col = lower
        .iter()
        .position(|h| h.contains("period") || h.contains("slot"))
        .unwrap_or(2);

    let mut subjects = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // header is row 1
        let row = idx + 2;

        let name = record.get(subject_col).unwrap_or("").trim().to_string();
        if name.is_empty() {
            debug!("Skipping row {} without a subject name", row);
            continue;
        }
        let teacher = record.get(teacher_col).unwrap_or("").trim().to_string();
        let weekly_slots = parse_slots(record.get(slots_col).unwrap_or(""), row)?;

        subjects.push(Subject { name, teacher, weekly_slots });
    }

    info!("Loaded {} subjects", subjects.len());
    Ok(subjects)
}
