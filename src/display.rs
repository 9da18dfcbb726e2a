use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::error::Result;
use crate::schedule::Timetable;

pub const DEFAULT_EXPORT_FILE: &str = "timetable_with_timings.csv";

/// Single-line form of a cell, for the terminal
fn flatten(text: &str) -> String {
    text.replace('\n', " ")
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Renders the timetable as an aligned text table
pub fn render_table(timetable: &Timetable) -> String {
    let header = timetable.header();
    let rows: Vec<Vec<String>> = timetable
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|cell| flatten(cell)).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| pad(cell, width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(&header));
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

/// Prints the timetable and any demand that did not fit
pub fn print_timetable(timetable: &Timetable) {
    println!("\n=== Weekly Timetable ===");
    print!("{}", render_table(timetable));

    if !timetable.unplaced.is_empty() {
        println!("\n⚠️  Not enough free cells; unplaced periods:");
        for subject in &timetable.unplaced {
            if subject.teacher.is_empty() {
                println!("  - {}: {}", subject.name, subject.periods);
            } else {
                println!("  - {} ({}): {}", subject.name, subject.teacher, subject.periods);
            }
        }
    }
}

/// Writes the timetable as CSV: a "Period Time" column followed by one column per day
pub fn write_timetable_csv<W: Write>(timetable: &Timetable, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(timetable.header())?;
    for row in timetable.rows() {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV export as UTF-8 bytes, for downloads
pub fn timetable_csv_bytes(timetable: &Timetable) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_timetable_csv(timetable, &mut buf)?;
    Ok(buf)
}

pub fn write_timetable_to_file<P: AsRef<Path>>(timetable: &Timetable, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_timetable_csv(timetable, file)
}
