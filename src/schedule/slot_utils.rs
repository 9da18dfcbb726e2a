use chrono::{Duration, NaiveTime};
use log::trace;
use crate::error::{Result, TimetableError};

/// Parses a 24-hour "HH:MM" start time
pub fn parse_start_time(time_str: &str) -> Result<NaiveTime> {
    // chrono skips whitespace before numeric fields; surrounding spaces are not a time
    if time_str.trim() != time_str {
        return Err(TimetableError::InvalidStartTime(time_str.to_string()));
    }
    NaiveTime::parse_from_str(time_str, "%H:%M")
        .map_err(|_| TimetableError::InvalidStartTime(time_str.to_string()))
}

/// Formats a time as 12-hour clock with AM/PM (e.g. "01:30 PM")
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Builds one "start - end" label per period
/// Period 1 starts at start_time, every following period starts where the previous one ended.
/// Times wrap past midnight; only the clock time is shown.
pub fn generate_time_slots(start_time: &str, num_periods: usize, duration_mins: u32) -> Result<Vec<String>> {
    let mut start = parse_start_time(start_time)?;
    let step = Duration::minutes(i64::from(duration_mins));

    let mut labels = Vec::with_capacity(num_periods);
    for _ in 0..num_periods {
        // NaiveTime addition wraps at midnight
        let end = start + step;
        labels.push(format!("{} - {}", format_clock(start), format_clock(end)));
        start = end;
    }

    trace!("Generated {} period labels starting at {}", labels.len(), start_time);
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_label_starts_at_given_time() {
        let labels = generate_time_slots("09:00", 7, 45).unwrap();
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[0], "09:00 AM - 09:45 AM");
        assert_eq!(labels[1], "09:45 AM - 10:30 AM");
        assert_eq!(labels[6], "01:30 PM - 02:15 PM");
    }

    #[test]
    fn labels_are_contiguous() {
        let labels = generate_time_slots("08:10", 10, 50).unwrap();
        for pair in labels.windows(2) {
            let prev_end = pair[0].split(" - ").nth(1).unwrap();
            let next_start = pair[1].split(" - ").next().unwrap();
            assert_eq!(prev_end, next_start);
        }
    }

    #[test]
    fn wraps_past_midnight() {
        let labels = generate_time_slots("23:00", 3, 40).unwrap();
        assert_eq!(labels, vec![
            "11:00 PM - 11:40 PM",
            "11:40 PM - 12:20 AM",
            "12:20 AM - 01:00 AM",
        ]);
    }

    #[test]
    fn zero_periods_gives_no_labels() {
        assert!(generate_time_slots("09:00", 0, 45).unwrap().is_empty());
    }

    #[test]
    fn rejects_unparseable_start() {
        for bad in ["", "9am", "25:00", "09:60", "09-00", " 09:00", "09:00 "] {
            match generate_time_slots(bad, 5, 45) {
                Err(TimetableError::InvalidStartTime(s)) => assert_eq!(s, bad),
                other => panic!("expected InvalidStartTime for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn accepts_single_digit_hour() {
        let labels = generate_time_slots("9:05", 1, 30).unwrap();
        assert_eq!(labels, vec!["09:05 AM - 09:35 AM"]);
    }
}
