//! CLI defaults loaded from a TOML file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::report::ReportOptions;

/// Defaults for the `schedule` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleDefaults {
    pub stage: String,
    pub match_duration_minutes: i64,
    pub matches_per_day: i64,
    pub best_of: u32,
}

impl Default for ScheduleDefaults {
    fn default() -> Self {
        Self {
            stage: "Group".to_string(),
            match_duration_minutes: 60,
            matches_per_day: 4,
            best_of: 3,
        }
    }
}

/// Defaults for the `simulate` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationDefaults {
    pub seed: Option<u64>,
}

/// Tournament configuration
///
/// Every section is optional; missing keys fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub schedule: ScheduleDefaults,
    pub simulation: SimulationDefaults,
    pub report: ReportOptions,
}

impl TournamentConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Built-in defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse TOML")
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
