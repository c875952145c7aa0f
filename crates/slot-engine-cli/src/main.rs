//! `slots` CLI — compute bookable appointment slots from a JSON snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Candidate slots for a date (snapshot on stdin)
//! slots generate --date 2026-03-16 --now 2026-03-16T08:00:00Z < snapshot.json
//!
//! # Effective open intervals for a date
//! slots resolve --date 2026-03-16 -i snapshot.json
//!
//! # Dates with open time in a range
//! slots dates --from 2026-03-01 --to 2026-03-31 -i snapshot.json
//!
//! # Check a candidate window against the snapshot's bookings
//! slots check --start 2026-03-16T10:00:00Z --end 2026-03-16T10:30:00Z -i snapshot.json
//! ```
//!
//! Settings come from `slots.toml` (or `--config`) and `SLOTS_*` environment
//! variables; logs go to stderr, filtered by `RUST_LOG`.

mod settings;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use slot_engine::conflict::{find_conflicts, Buffers};
use slot_engine::snapshot::Snapshot;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "slots", version, about = "Appointment slot computation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to ./slots.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate candidate time slots for a date
    Generate {
        /// Calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Reference instant for minimum notice (RFC 3339; defaults to the current time)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Slot length in minutes (defaults to the event type's duration)
        #[arg(long)]
        duration: Option<u32>,
        /// Only print available slots
        #[arg(long)]
        available_only: bool,
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the effective open intervals for a date
    Resolve {
        #[arg(long)]
        date: NaiveDate,
        #[arg(short, long)]
        input: Option<String>,
    },
    /// List dates in a range that have open time
    Dates {
        /// First date (inclusive)
        #[arg(long)]
        from: NaiveDate,
        /// Last date (inclusive)
        #[arg(long)]
        to: NaiveDate,
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Check a window against the snapshot's bookings and busy periods
    Check {
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long)]
        end: DateTime<Utc>,
        /// Buffer before existing bookings (defaults to the event type's)
        #[arg(long)]
        buffer_before: Option<u32>,
        /// Buffer after existing bookings (defaults to the event type's)
        #[arg(long)]
        buffer_after: Option<u32>,
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    init_tracing(&settings.log_level);
    tracing::debug!(?settings, "settings loaded");

    match cli.command {
        Commands::Generate {
            date,
            now,
            duration,
            available_only,
            input,
        } => {
            let snapshot = read_snapshot(input.as_deref())?;
            let availability = snapshot.availability(&settings.timezone, settings.dst_policy)?;
            let event_type = snapshot.event_type()?;
            // The only wall-clock read; the engine itself takes `now` as input.
            let now = now.unwrap_or_else(Utc::now);
            let duration = duration.unwrap_or(event_type.duration_minutes);

            let mut slots = slot_engine::generate_time_slots(
                date,
                duration,
                &availability,
                &snapshot.blocking_bookings(),
                event_type,
                now,
            )
            .context("Failed to generate time slots")?;
            if available_only {
                slots.retain(|s| s.available);
            }
            print_json(&slots)?;
        }
        Commands::Resolve { date, input } => {
            let snapshot = read_snapshot(input.as_deref())?;
            let availability = snapshot.availability(&settings.timezone, settings.dst_policy)?;
            print_json(&availability.intervals_on(date))?;
        }
        Commands::Dates { from, to, input } => {
            let snapshot = read_snapshot(input.as_deref())?;
            let dates = slot_engine::scan_available_dates(from, to, &snapshot.slots, &snapshot.overrides);
            print_json(&dates)?;
        }
        Commands::Check {
            start,
            end,
            buffer_before,
            buffer_after,
            input,
        } => {
            let snapshot = read_snapshot(input.as_deref())?;
            let defaults = snapshot.event_type.as_ref().map(Buffers::from).unwrap_or_default();
            let buffers = Buffers::new(
                buffer_before.unwrap_or(defaults.before_minutes),
                buffer_after.unwrap_or(defaults.after_minutes),
            );

            let bookings = snapshot.blocking_bookings();
            let conflicts = find_conflicts(start, end, &bookings, buffers);
            if conflicts.is_empty() {
                println!("free");
            } else {
                println!("conflict");
                for c in &conflicts {
                    println!("  {} ({} min overlap)", c.booking.id, c.overlap_minutes);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_snapshot(path: Option<&str>) -> Result<Snapshot> {
    let json = read_input(path)?;
    Snapshot::from_json(&json).context("Failed to parse snapshot")
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

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
