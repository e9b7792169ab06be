//! Plain-text event overview

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tournament_core::{
    compute_standings, suggest_highlight_matches, Event, Result, TeamPerformance,
    DEFAULT_HIGHLIGHT_THRESHOLD,
};

/// Report sizing and highlight settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Maximum number of upcoming matches listed
    pub upcoming_limit: usize,
    /// Maximum number of close matchups listed
    pub highlight_limit: usize,
    pub highlight_threshold: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            upcoming_limit: 10,
            highlight_limit: 5,
            highlight_threshold: DEFAULT_HIGHLIGHT_THRESHOLD,
        }
    }
}

/// Generate the event overview: teams, upcoming schedule, standings and
/// predicted close matchups. Matches scheduled at or after `now` count as
/// upcoming.
pub fn format_event_overview(
    event: &Event,
    options: &ReportOptions,
    now: NaiveDateTime,
) -> Result<String> {
    let standings = compute_standings(event)?;
    let highlights = suggest_highlight_matches(event, options.highlight_threshold)?;

    let mut lines = Vec::new();
    lines.push(format!(
        "Event: {} ({} to {})",
        event.name, event.start_date, event.end_date
    ));
    lines.push(format!("Teams ({} total):", event.teams.len()));
    let mut teams: Vec<_> = event.teams.values().collect();
    teams.sort_by(|a, b| a.name.cmp(&b.name));
    for team in teams {
        lines.push(format!(
            "  - {} [{}] | Avg Rating: {:.1}",
            team.name,
            team.id,
            team.average_rating()
        ));
    }

    lines.push(String::new());
    lines.push("Upcoming Schedule:".to_string());
    let upcoming: Vec<_> = event
        .matches
        .iter()
        .filter(|m| m.scheduled_time >= now)
        .collect();
    for m in upcoming.iter().take(options.upcoming_limit) {
        lines.push(format!(
            "  {} | {} vs {} (Stage: {}, Round: {})",
            m.scheduled_time.format("%Y-%m-%dT%H:%M:%S"),
            event.team(&m.team_one_id)?.name,
            event.team(&m.team_two_id)?.name,
            m.stage,
            m.round_number
        ));
    }
    if upcoming.is_empty() {
        lines.push("  No remaining scheduled matches.".to_string());
    }

    lines.push(String::new());
    lines.push("Standings:".to_string());
    if standings.iter().any(|p| p.matches_played > 0) {
        lines.extend(standings_table(event, &standings)?);
    } else {
        lines.push("  No completed matches yet.".to_string());
    }

    if !highlights.is_empty() {
        lines.push(String::new());
        lines.push("Predicted Close Matchups:".to_string());
        for m in highlights.iter().take(options.highlight_limit) {
            lines.push(format!(
                "  {} vs {} on {} (Stage {})",
                event.team(&m.team_one_id)?.name,
                event.team(&m.team_two_id)?.name,
                m.scheduled_time.date(),
                m.stage
            ));
        }
    }

    Ok(lines.join("\n"))
}

fn standings_table(event: &Event, standings: &[TeamPerformance]) -> Result<Vec<String>> {
    let mut rows = vec![format!(
        "  {:<28} {:>2}  {:>2}  {:>2}  {:>5}  {:>5}",
        "Team", "W", "L", "T", "Games", "Win%"
    )];
    for perf in standings {
        rows.push(format!(
            "  {:<28} {:>2}  {:>2}  {:>2}  {:>+5}  {:>5.1}",
            event.team(&perf.team_id)?.name,
            perf.wins,
            perf.losses,
            perf.ties,
            perf.game_difference(),
            perf.win_rate() * 100.0
        ));
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
