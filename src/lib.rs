pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod schedule;
pub mod web;

pub use config::TimetableConfig;
pub use error::{Result, TimetableError};
pub use schedule::{build_timetable, Subject, Timetable};
