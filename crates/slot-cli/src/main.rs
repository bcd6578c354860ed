//! `slots` CLI -- search bookable calendar slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Search with a JSON request (stdin → stdout)
//! echo '{"calendarIds":["48cadf26-975e-11e5-b9c2-c8e0eb18c1e9"],"duration":15,
//!        "periodToSearch":"2019-04-23T10:00:00Z/2019-04-23T11:00:00Z"}' \
//!   | slots search --data-dir ./calendars
//!
//! # Same request as flags, response written to a file
//! slots search --data-dir ./calendars \
//!   --calendar-id 48cadf26-975e-11e5-b9c2-c8e0eb18c1e9 \
//!   --duration 15 --period 2019-04-23T10:00:00Z/2019-04-23T11:00:00Z \
//!   -o slots.json
//!
//! # List the calendars found in the data directory
//! SLOTS_DATA_DIR=./calendars slots calendars
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` for per-calendar detail.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slot_engine::{AvailabilityEngine, AvailabilityRequest, CalendarStore};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find free, fixed-duration slots in calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataDir {
    /// Directory of `<calendar-uuid>.json` calendar files
    #[arg(long, env = "SLOTS_DATA_DIR")]
    data_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Search free slots for one or more calendars
    Search {
        #[command(flatten)]
        data: DataDir,
        /// Request JSON file (reads from stdin if omitted and no flags are given)
        #[arg(short, long, conflicts_with_all = ["calendar_id", "duration", "period"])]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Calendar id to search (repeatable)
        #[arg(long = "calendar-id", requires_all = ["duration", "period"])]
        calendar_id: Vec<String>,
        /// Slot length in minutes
        #[arg(long, allow_negative_numbers = true)]
        duration: Option<i64>,
        /// Search period as `<start>/<end>` RFC 3339 instants
        #[arg(long)]
        period: Option<String>,
    },
    /// List known calendars and their appointment counts
    Calendars {
        #[command(flatten)]
        data: DataDir,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            data,
            input,
            output,
            calendar_id,
            duration,
            period,
        } => {
            let store = load_store(&data.data_dir)?;

            let request = if calendar_id.is_empty() && duration.is_none() && period.is_none() {
                let json = read_input(input.as_deref())?;
                serde_json::from_str::<AvailabilityRequest>(&json)
                    .context("Failed to parse availability request JSON")?
            } else {
                AvailabilityRequest {
                    calendar_ids: calendar_id,
                    duration,
                    period_to_search: period,
                }
            };
            debug!(calendars = request.calendar_ids.len(), "searching");

            let response = AvailabilityEngine::new(store)
                .search(&request)
                .context("Invalid availability request")?;
            let pretty = serde_json::to_string_pretty(&response)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Calendars { data } => {
            let store = load_store(&data.data_dir)?;
            for id in store.calendar_ids() {
                let count = store.appointment_count(&id).unwrap_or_default();
                println!("{}  {} appointments", id, count);
            }
        }
    }

    Ok(())
}

fn load_store(dir: &Path) -> Result<CalendarStore> {
    CalendarStore::from_dir(dir)
        .with_context(|| format!("Failed to load calendars from {}", dir.display()))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
