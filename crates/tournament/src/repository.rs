//! JSON storage for events

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use tournament_core::{Event, Match, MatchResult, Metadata, Team, Venue};

/// On-disk layout of an event file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventDocument {
    event: EventHeader,
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    teams: Vec<Team>,
    #[serde(default)]
    venues: Vec<Venue>,
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventHeader {
    id: String,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// Loads and stores tournament data
#[derive(Debug, Clone)]
pub struct TournamentRepository {
    event: Event,
}

impl TournamentRepository {
    pub fn new(event: Event) -> Self {
        Self { event }
    }

    /// Load an event from a JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?;
        let repo = Self::from_json_str(&contents)
            .with_context(|| format!("Failed to load event from {}", path.display()))?;
        info!(
            path = %path.display(),
            teams = repo.event.teams.len(),
            venues = repo.event.venues.len(),
            matches = repo.event.matches.len(),
            "event loaded"
        );
        Ok(repo)
    }

    /// Parse an event document.
    ///
    /// Every match must reference teams and venues present in the document.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let document: EventDocument =
            serde_json::from_str(contents).context("Failed to parse event JSON")?;
        let event = event_from_document(document);
        event.validate()?;
        Ok(Self { event })
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&document_from_event(&self.event))
            .context("Failed to serialize event")
    }

    /// Save the event to a JSON file
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write event file {}", path.display()))?;
        info!(path = %path.display(), matches = self.event.matches.len(), "event saved");
        Ok(())
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }

    pub fn into_event(self) -> Event {
        self.event
    }

    pub fn list_teams(&self) -> impl Iterator<Item = &Team> {
        self.event.teams.values()
    }

    pub fn list_venues(&self) -> impl Iterator<Item = &Venue> {
        self.event.venues.values()
    }

    pub fn list_matches(&self) -> &[Match] {
        &self.event.matches
    }

    /// Replace matches with the same id or append new ones
    pub fn upsert_matches(&mut self, matches: Vec<Match>) {
        self.event.upsert_matches(matches);
    }

    /// Attach results to known matches, returning how many were applied
    pub fn record_results(&mut self, results: Vec<MatchResult>) -> usize {
        self.event.record_results(results)
    }
}

fn event_from_document(document: EventDocument) -> Event {
    let mut teams = BTreeMap::new();
    for team in document.teams {
        if let Some(previous) = teams.insert(team.id.clone(), team) {
            warn!(team_id = %previous.id, "duplicate team id, keeping the last entry");
        }
    }

    let mut venues = BTreeMap::new();
    for venue in document.venues {
        if let Some(previous) = venues.insert(venue.id.clone(), venue) {
            warn!(venue_id = %previous.id, "duplicate venue id, keeping the last entry");
        }
    }

    let matches = document
        .matches
        .into_iter()
        .map(|mut m| {
            if let Some(result) = m.result.as_mut() {
                result.match_id = m.id.clone();
            }
            m
        })
        .collect();

    Event {
        id: document.event.id,
        name: document.event.name,
        start_date: document.event.start_date,
        end_date: document.event.end_date,
        teams,
        venues,
        matches,
        metadata: document.metadata,
    }
}

fn document_from_event(event: &Event) -> EventDocument {
    EventDocument {
        event: EventHeader {
            id: event.id.clone(),
            name: event.name.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
        },
        metadata: event.metadata.clone(),
        teams: event.teams.values().cloned().collect(),
        venues: event.venues.values().cloned().collect(),
        matches: event.matches.clone(),
    }
}
