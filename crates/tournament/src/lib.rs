//! Tournament operations CLI
//!
//! Loads an event file, generates round-robin schedules, simulates pending
//! matches and prints an overview report.
//!
//! # Usage
//!
//! ```bash
//! # Build a group stage starting Monday morning
//! cargo run -p tournament -- schedule data/sample_event.json \
//!     --start 2024-07-01T09:00:00 --output event.json
//!
//! # Simulate it with a fixed seed and print the report
//! cargo run -p tournament -- simulate event.json --seed 42 --output event.json
//! cargo run -p tournament -- report event.json
//! ```

pub mod cli;
pub mod config;
pub mod report;
pub mod repository;

use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use tracing::info;

use tournament_core::{build_round_robin, simulate_matches};

use crate::cli::{Cli, Command, ScheduleArgs, SimulateArgs};
use crate::config::TournamentConfig;
use crate::report::format_event_overview;
use crate::repository::TournamentRepository;

pub fn run(cli: Cli) -> Result<()> {
    let config = TournamentConfig::load_or_default(cli.config.as_deref())?;
    match cli.command {
        Command::Schedule(args) => handle_schedule(&args, &config),
        Command::Simulate(args) => handle_simulate(&args, &config),
        Command::Report { input } => handle_report(&input, &config),
    }
}

pub fn handle_schedule(args: &ScheduleArgs, config: &TournamentConfig) -> Result<()> {
    let mut repo = TournamentRepository::from_json(&args.input)?;
    let request = args.to_request(&config.schedule);
    let matches = build_round_robin(repo.event(), &request)?;
    let generated = matches.len();
    info!(stage = %request.stage, matches = generated, "schedule generated");
    repo.upsert_matches(matches);

    match &args.output {
        Some(output) => repo.save_json(output)?,
        None => println!("Generated {generated} matches."),
    }
    Ok(())
}

pub fn handle_simulate(args: &SimulateArgs, config: &TournamentConfig) -> Result<()> {
    let mut repo = TournamentRepository::from_json(&args.input)?;
    let options = args.to_options(&config.simulation);
    let pending = repo.list_matches().iter().filter(|m| m.is_pending()).count();
    let simulated = simulate_matches(repo.event(), &options)?;
    info!(simulated = pending, seed = ?options.seed, "simulation finished");
    repo.upsert_matches(simulated);

    match &args.output {
        Some(output) => repo.save_json(output)?,
        None => println!("Simulation completed. Run the report command to view updated standings."),
    }
    Ok(())
}

pub fn handle_report(input: &Path, config: &TournamentConfig) -> Result<()> {
    let repo = TournamentRepository::from_json(input)?;
    let now = Utc::now().naive_utc();
    let report = format_event_overview(repo.event(), &config.report, now)?;
    println!("{report}");
    Ok(())
}
