use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tournament_core::{ScheduleRequest, SimulationOptions};

use crate::config::{ScheduleDefaults, SimulationDefaults};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tournament operations: schedule, simulate and report")]
pub struct Cli {
    /// TOML file with command defaults
    #[arg(long, global = true, env = "TOURNAMENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Generate a round-robin schedule
    Schedule(ScheduleArgs),
    /// Simulate results for pending matches
    Simulate(SimulateArgs),
    /// Print the event overview
    Report {
        /// Path to event JSON
        input: PathBuf,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ScheduleArgs {
    /// Path to event JSON
    pub input: PathBuf,
    /// Stage label to apply
    #[arg(long)]
    pub stage: Option<String>,
    /// Start datetime (ISO format)
    #[arg(long, value_parser = parse_datetime)]
    pub start: NaiveDateTime,
    /// Match duration in minutes
    #[arg(long)]
    pub match_duration: Option<i64>,
    /// Maximum matches per calendar day
    #[arg(long, allow_negative_numbers = true)]
    pub matches_per_day: Option<i64>,
    /// Best-of value for every generated match
    #[arg(long)]
    pub best_of: Option<u32>,
    /// Venue ids to rotate through (default: every venue of the event)
    #[arg(long, num_args = 0..)]
    pub venues: Option<Vec<String>>,
    /// Where to write the updated event JSON
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl ScheduleArgs {
    /// Build the scheduler request, falling back to configured defaults
    pub fn to_request(&self, defaults: &ScheduleDefaults) -> ScheduleRequest {
        ScheduleRequest {
            stage: self.stage.clone().unwrap_or_else(|| defaults.stage.clone()),
            start_time: self.start,
            match_duration_minutes: self.match_duration.unwrap_or(defaults.match_duration_minutes),
            matches_per_day: self.matches_per_day.unwrap_or(defaults.matches_per_day),
            best_of: self.best_of.unwrap_or(defaults.best_of),
            venue_ids: self.venues.clone(),
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SimulateArgs {
    /// Path to event JSON
    pub input: PathBuf,
    /// Random seed for deterministic results
    #[arg(long)]
    pub seed: Option<u64>,
    /// Where to write the updated event JSON
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl SimulateArgs {
    pub fn to_options(&self, defaults: &SimulationDefaults) -> SimulationOptions {
        SimulationOptions {
            seed: self.seed.or(defaults.seed),
        }
    }
}

/// Parse an ISO 8601 date or datetime. Offsets are dropped, keeping local time.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("Invalid datetime format: {value}"))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
