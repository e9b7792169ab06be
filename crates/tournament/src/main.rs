//! Tournament CLI
//!
//! Schedule, simulate and report on tournament events.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tournament::cli::Cli;

fn main() {
    setup_logging();
    let cli = Cli::parse();
    tournament::run(cli).unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
