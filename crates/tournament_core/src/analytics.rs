//! Standings and schedule analytics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::elo::expected_team_score;
use crate::error::{Result, TournamentError};
use crate::models::{Event, Match};

/// Matches whose win probabilities differ by at most this much are highlights
pub const DEFAULT_HIGHLIGHT_THRESHOLD: f64 = 0.1;

/// Aggregated record of one team over completed matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPerformance {
    pub team_id: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub games_won: u32,
    pub games_lost: u32,
}

impl TeamPerformance {
    pub fn new(team_id: &str) -> Self {
        Self {
            team_id: team_id.to_string(),
            ..Default::default()
        }
    }

    pub fn game_difference(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }

    /// Share of matches won (0.0 when nothing has been played)
    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        self.wins as f64 / self.matches_played as f64
    }

    fn ranking_key(&self) -> (u32, i64, u32) {
        (self.wins, self.game_difference(), self.games_won)
    }
}

/// Standings over the event's own matches
pub fn compute_standings(event: &Event) -> Result<Vec<TeamPerformance>> {
    compute_standings_for(event, &event.matches)
}

/// Standings over the given matches.
///
/// Every event team gets a record, even without completed matches. Pending
/// matches are ignored. Sorted by wins, then game difference, then games won,
/// all descending; equal keys keep team order.
pub fn compute_standings_for(event: &Event, matches: &[Match]) -> Result<Vec<TeamPerformance>> {
    let mut records: BTreeMap<&str, TeamPerformance> = event
        .teams
        .keys()
        .map(|id| (id.as_str(), TeamPerformance::new(id)))
        .collect();

    for m in matches {
        let Some(result) = &m.result else {
            continue;
        };

        let one = record_mut(&mut records, &m.team_one_id)?;
        one.matches_played += 1;
        one.games_won += result.team_one_score;
        one.games_lost += result.team_two_score;

        let two = record_mut(&mut records, &m.team_two_id)?;
        two.matches_played += 1;
        two.games_won += result.team_two_score;
        two.games_lost += result.team_one_score;

        if result.is_tie() {
            record_mut(&mut records, &m.team_one_id)?.ties += 1;
            record_mut(&mut records, &m.team_two_id)?.ties += 1;
        } else if result.winner_id == m.team_one_id {
            record_mut(&mut records, &m.team_one_id)?.wins += 1;
            record_mut(&mut records, &m.team_two_id)?.losses += 1;
        } else {
            record_mut(&mut records, &m.team_two_id)?.wins += 1;
            record_mut(&mut records, &m.team_one_id)?.losses += 1;
        }
    }

    let mut standings: Vec<TeamPerformance> = records.into_values().collect();
    standings.sort_by(|a, b| b.ranking_key().cmp(&a.ranking_key()));
    Ok(standings)
}

fn record_mut<'a>(
    records: &'a mut BTreeMap<&str, TeamPerformance>,
    team_id: &str,
) -> Result<&'a mut TeamPerformance> {
    records
        .get_mut(team_id)
        .ok_or_else(|| TournamentError::TeamNotFound(team_id.to_string()))
}

/// Average opponent rating for each team across all of the event's matches.
///
/// Pending and completed matches both count. Teams with no matches get 0.0.
pub fn strength_of_schedule(event: &Event) -> Result<BTreeMap<String, f64>> {
    let mut opponents: BTreeMap<&str, Vec<f64>> = event
        .teams
        .keys()
        .map(|id| (id.as_str(), Vec::new()))
        .collect();

    for m in &event.matches {
        let team_one = event.team(&m.team_one_id)?;
        let team_two = event.team(&m.team_two_id)?;
        if let Some(ratings) = opponents.get_mut(team_one.id.as_str()) {
            ratings.push(team_two.average_rating());
        }
        if let Some(ratings) = opponents.get_mut(team_two.id.as_str()) {
            ratings.push(team_one.average_rating());
        }
    }

    Ok(opponents
        .into_iter()
        .map(|(id, ratings)| {
            let average = if ratings.is_empty() {
                0.0
            } else {
                ratings.iter().sum::<f64>() / ratings.len() as f64
            };
            (id.to_string(), average)
        })
        .collect())
}

/// Matches predicted to be close: `|p_one - p_two| <= threshold`.
///
/// Useful for broadcast priority. Keeps the event's match order.
pub fn suggest_highlight_matches(event: &Event, threshold: f64) -> Result<Vec<&Match>> {
    let mut highlights = Vec::new();
    for m in &event.matches {
        let (p_one, p_two) = expected_team_score(event, &m.team_one_id, &m.team_two_id)?;
        if (p_one - p_two).abs() <= threshold {
            highlights.push(m);
        }
    }
    Ok(highlights)
}

#[cfg(test)]
#[path = "analytics_tests.rs"]
mod analytics_tests;
