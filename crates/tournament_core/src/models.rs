//! Tournament data model: players, teams, venues, matches and the event
//! aggregate that owns them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::error::{Result, TournamentError};

/// Free-form key/value annotations carried through untouched
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// A competitor listed on a team roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Skill rating on the Elo scale
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl Player {
    pub fn new(id: &str, name: &str, rating: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            rating,
            role: default_role(),
            status: None,
        }
    }
}

/// Team competing in the event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Team {
    pub fn new(id: &str, name: &str, players: Vec<Player>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            players,
            region: None,
            metadata: Metadata::new(),
        }
    }

    /// Mean rating of the roster, 0.0 for an empty roster
    pub fn average_rating(&self) -> f64 {
        if self.players.is_empty() {
            return 0.0;
        }
        let total: f64 = self.players.iter().map(|p| p.rating).sum();
        total / self.players.len() as f64
    }
}

/// Physical or virtual location hosting a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Venue {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            capacity: None,
            timezone: default_timezone(),
            metadata: Metadata::new(),
        }
    }
}

/// Outcome of a completed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Filled from the owning match when loaded from an event file
    #[serde(default)]
    pub match_id: String,
    pub winner_id: String,
    /// Games won by team one
    pub team_one_score: u32,
    /// Games won by team two
    pub team_two_score: u32,
    #[serde(default)]
    pub concluded_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MatchResult {
    pub fn is_tie(&self) -> bool {
        self.team_one_score == self.team_two_score
    }
}

/// Scheduled or completed match between two teams
///
/// A match is pending until a result is attached. The transition is one-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    #[serde(default = "default_stage")]
    pub stage: String,
    #[serde(default = "default_round")]
    pub round_number: u32,
    pub team_one_id: String,
    pub team_two_id: String,
    pub scheduled_time: NaiveDateTime,
    #[serde(default = "default_best_of")]
    pub best_of: u32,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub result: Option<MatchResult>,
}

impl Match {
    pub fn involves_team(&self, team_id: &str) -> bool {
        self.team_one_id == team_id || self.team_two_id == team_id
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.result.is_none()
    }

    /// The other side of the match, if `team_id` plays in it
    pub fn opponent_of(&self, team_id: &str) -> Option<&str> {
        if self.team_one_id == team_id {
            Some(self.team_two_id.as_str())
        } else if self.team_two_id == team_id {
            Some(self.team_one_id.as_str())
        } else {
            None
        }
    }

    fn sort_key(&self) -> (&str, u32, NaiveDateTime) {
        (self.stage.as_str(), self.round_number, self.scheduled_time)
    }
}

/// Root aggregate for one tournament
///
/// Teams and venues are owned here and referenced from matches by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub teams: BTreeMap<String, Team>,
    pub venues: BTreeMap<String, Venue>,
    pub matches: Vec<Match>,
    pub metadata: Metadata,
}

impl Event {
    pub fn new(id: &str, name: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            start_date,
            end_date,
            teams: BTreeMap::new(),
            venues: BTreeMap::new(),
            matches: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// Insert a team, returning the one it replaced
    pub fn add_team(&mut self, team: Team) -> Option<Team> {
        self.teams.insert(team.id.clone(), team)
    }

    /// Insert a venue, returning the one it replaced
    pub fn add_venue(&mut self, venue: Venue) -> Option<Venue> {
        self.venues.insert(venue.id.clone(), venue)
    }

    pub fn add_match(&mut self, m: Match) {
        self.matches.push(m);
    }

    pub fn team(&self, team_id: &str) -> Result<&Team> {
        self.teams
            .get(team_id)
            .ok_or_else(|| TournamentError::TeamNotFound(team_id.to_string()))
    }

    pub fn venue(&self, venue_id: &str) -> Result<&Venue> {
        self.venues
            .get(venue_id)
            .ok_or_else(|| TournamentError::VenueNotFound(venue_id.to_string()))
    }

    /// Merge matches into the event.
    ///
    /// A match whose id already exists replaces the stored one, anything else
    /// is appended. The merged list is then stably ordered by
    /// `(stage, round_number, scheduled_time)`.
    pub fn upsert_matches<I>(&mut self, matches: I)
    where
        I: IntoIterator<Item = Match>,
    {
        let mut merged = std::mem::take(&mut self.matches);
        let mut index: HashMap<String, usize> = HashMap::with_capacity(merged.len());
        for (i, m) in merged.iter().enumerate() {
            index.entry(m.id.clone()).or_insert(i);
        }

        for m in matches {
            match index.get(&m.id) {
                Some(&i) => merged[i] = m,
                None => {
                    index.insert(m.id.clone(), merged.len());
                    merged.push(m);
                }
            }
        }

        merged.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        self.matches = merged;
    }

    /// Attach results to their matches. Returns how many were applied.
    pub fn record_results<I>(&mut self, results: I) -> usize
    where
        I: IntoIterator<Item = MatchResult>,
    {
        let index: HashMap<String, usize> = self
            .matches
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.clone(), i))
            .collect();

        let mut applied = 0;
        for result in results {
            match index.get(&result.match_id) {
                Some(&i) => {
                    self.matches[i].result = Some(result);
                    applied += 1;
                }
                None => warn!(match_id = %result.match_id, "skipping result for unknown match"),
            }
        }
        applied
    }

    /// Check that every match references teams and venues owned by the event
    /// and that attached results are consistent with the series.
    pub fn validate(&self) -> Result<()> {
        for m in &self.matches {
            if m.round_number == 0 {
                return Err(TournamentError::InvalidMatch {
                    match_id: m.id.clone(),
                    reason: "round_number must be at least 1",
                });
            }
            if m.best_of == 0 {
                return Err(TournamentError::InvalidMatch {
                    match_id: m.id.clone(),
                    reason: "best_of must be at least 1",
                });
            }
            self.team(&m.team_one_id)?;
            self.team(&m.team_two_id)?;
            if m.team_one_id == m.team_two_id {
                return Err(TournamentError::DuplicateTeam {
                    match_id: m.id.clone(),
                    team_id: m.team_one_id.clone(),
                });
            }
            if let Some(venue_id) = &m.venue_id {
                self.venue(venue_id)?;
            }
            if let Some(result) = &m.result {
                if !m.involves_team(&result.winner_id) {
                    return Err(TournamentError::InvalidWinner {
                        match_id: m.id.clone(),
                        winner_id: result.winner_id.clone(),
                    });
                }
                let (winner_games, loser_games) = if result.winner_id == m.team_one_id {
                    (result.team_one_score, result.team_two_score)
                } else {
                    (result.team_two_score, result.team_one_score)
                };
                if winner_games < loser_games {
                    return Err(TournamentError::ScoreMismatch {
                        match_id: m.id.clone(),
                        winner_id: result.winner_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn default_role() -> String {
    "player".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_stage() -> String {
    "Main".to_string()
}

fn default_round() -> u32 {
    1
}

fn default_best_of() -> u32 {
    1
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod models_tests;
