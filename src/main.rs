use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use timetable_generator::config::TimetableConfig;
use timetable_generator::display::{print_timetable, write_timetable_to_file, DEFAULT_EXPORT_FILE};
use timetable_generator::parser::load_subjects;
use timetable_generator::schedule::build_timetable;
use timetable_generator::web;

#[derive(Parser)]
#[command(name = "timetable-generator", about = "Weekly school timetable generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a timetable from a subject CSV and export it
    Generate {
        /// CSV with subject, teacher and weekly periods columns
        #[arg(short, long)]
        subjects: PathBuf,
        #[arg(long, default_value_t = 5)]
        days: usize,
        /// Periods per day, lunch included
        #[arg(long, default_value_t = 7)]
        periods: usize,
        /// Lunch break after this period (1-based)
        #[arg(long, default_value_t = 4)]
        lunch_after: usize,
        /// Period duration in minutes
        #[arg(long, default_value_t = 45)]
        duration: u32,
        /// School start time, HH:MM
        #[arg(long, default_value = "09:00")]
        start: String,
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
        /// Fix the shuffle for a reproducible layout
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve the timetable form over HTTP
    Web {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Web { host, port } => {
            println!("Access the site at {}", web::site_url(&host, port));
            web::start_server(&host, port, TimetableConfig::default()).await?;
        }
        Command::Generate { subjects, days, periods, lunch_after, duration, start, output, seed } => {
            let config = TimetableConfig {
                num_days: days,
                periods_per_day: periods,
                lunch_period: lunch_after,
                period_duration: duration,
                start_time: start,
            };
            let subjects = load_subjects(&subjects)?;

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let timetable = build_timetable(&config, subjects, &mut rng)?;

            print_timetable(&timetable);
            write_timetable_to_file(&timetable, &output)?;
            println!("\n✅ Timetable saved to {}", output.display());
        }
    }

    Ok(())
}
