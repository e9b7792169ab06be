//! Round-robin schedule generation
//!
//! Pairings come from the circle method: one team stays anchored while the
//! others rotate around it, so every pair meets exactly once and nobody plays
//! twice in a round. Pairings are then laid out on the calendar, packing at
//! most `matches_per_day` matches into each day.

use chrono::{Days, Duration, NaiveDateTime};
use tracing::{debug, info};

use crate::error::{Result, TournamentError};
use crate::models::{Event, Match};

/// A team and its opponent for one round. `None` means the team has the bye.
pub type Pairing = (String, Option<String>);

/// Parameters for one round-robin run
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRequest {
    /// Stage label stamped on every generated match
    pub stage: String,
    /// First match slot; later days reuse its wall-clock time
    pub start_time: NaiveDateTime,
    pub match_duration_minutes: i64,
    /// Values below one are treated as one
    pub matches_per_day: i64,
    pub best_of: u32,
    /// Venues to rotate through (`None` or empty = every event venue)
    pub venue_ids: Option<Vec<String>>,
}

impl ScheduleRequest {
    pub fn new(stage: &str, start_time: NaiveDateTime) -> Self {
        Self {
            stage: stage.to_string(),
            start_time,
            match_duration_minutes: 60,
            matches_per_day: 4,
            best_of: 3,
            venue_ids: None,
        }
    }
}

/// Generate the pairings of every round using the circle method.
///
/// An odd number of teams is padded with a bye slot; whoever meets the bye
/// is reported with a `None` opponent for that round.
pub fn round_robin_rounds(team_ids: &[String]) -> Vec<Vec<Pairing>> {
    let mut slots: Vec<Option<&String>> = team_ids.iter().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    if slots.len() < 2 {
        return Vec::new();
    }

    let n = slots.len();
    let half = n / 2;
    let mut rounds = Vec::with_capacity(n - 1);

    for _ in 0..n - 1 {
        let mut pairings = Vec::with_capacity(half);
        for i in 0..half {
            match (slots[i], slots[n - 1 - i]) {
                (Some(one), Some(two)) => pairings.push((one.clone(), Some(two.clone()))),
                (Some(team), None) | (None, Some(team)) => pairings.push((team.clone(), None)),
                (None, None) => {}
            }
        }
        rounds.push(pairings);

        // Slot 0 stays put, the last slot moves to position 1
        slots[1..].rotate_right(1);
    }

    rounds
}

/// Generate a round-robin schedule for every team in the event.
///
/// Returns pending matches in round order. Fewer than two teams yields an
/// empty schedule. A requested venue the event does not know is an error.
pub fn build_round_robin(event: &Event, request: &ScheduleRequest) -> Result<Vec<Match>> {
    let team_ids: Vec<String> = event.teams.keys().cloned().collect();
    if team_ids.len() < 2 {
        info!(teams = team_ids.len(), "not enough teams for a round robin");
        return Ok(Vec::new());
    }

    let venues = resolve_venues(event, request)?;
    let match_duration = Duration::try_minutes(request.match_duration_minutes)
        .ok_or(TournamentError::TimeOverflow(request.start_time))?;
    let matches_per_day = request.matches_per_day.max(1);
    let slug = stage_slug(&request.stage);

    let mut schedule = Vec::new();
    let mut current_time = request.start_time;
    let mut scheduled_today = 0;
    let mut match_counter = 1usize;

    for (round_index, pairings) in round_robin_rounds(&team_ids).into_iter().enumerate() {
        let round_number = round_index as u32 + 1;
        debug!(round = round_number, pairings = pairings.len(), "scheduling round");

        for (team_one_id, team_two_id) in pairings {
            let Some(team_two_id) = team_two_id else {
                debug!(round = round_number, team = %team_one_id, "bye");
                continue;
            };

            let venue_id = venues[(match_counter - 1) % venues.len()].clone();
            schedule.push(Match {
                id: format!("{slug}-r{round_number:02}-m{match_counter:03}"),
                stage: request.stage.clone(),
                round_number,
                team_one_id,
                team_two_id,
                scheduled_time: current_time,
                best_of: request.best_of,
                venue_id,
                result: None,
            });
            scheduled_today += 1;
            match_counter += 1;

            if scheduled_today >= matches_per_day {
                scheduled_today = 0;
                current_time = next_day_at(request.start_time, current_time)?;
            } else {
                current_time = current_time
                    .checked_add_signed(match_duration)
                    .ok_or(TournamentError::TimeOverflow(current_time))?;
            }
        }
    }

    info!(
        stage = %request.stage,
        teams = team_ids.len(),
        matches = schedule.len(),
        "round robin scheduled"
    );
    Ok(schedule)
}

fn resolve_venues(event: &Event, request: &ScheduleRequest) -> Result<Vec<Option<String>>> {
    let venues: Vec<Option<String>> = match request.venue_ids.as_deref() {
        Some(ids) if !ids.is_empty() => ids
            .iter()
            .map(|id| event.venue(id).map(|v| Some(v.id.clone())))
            .collect::<Result<_>>()?,
        _ => event.venues.keys().cloned().map(Some).collect(),
    };

    if venues.is_empty() {
        return Ok(vec![None]);
    }
    Ok(venues)
}

/// Same wall-clock time as `start`, on the calendar day after `current`
fn next_day_at(start: NaiveDateTime, current: NaiveDateTime) -> Result<NaiveDateTime> {
    current
        .date()
        .checked_add_days(Days::new(1))
        .map(|day| day.and_time(start.time()))
        .ok_or(TournamentError::TimeOverflow(current))
}

fn stage_slug(stage: &str) -> String {
    stage.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
