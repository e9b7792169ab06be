//! Error types shared by the tournament engines

use thiserror::Error;

/// Errors raised when an event references data it does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    #[error("team not found: {0}")]
    TeamNotFound(String),

    #[error("venue not found: {0}")]
    VenueNotFound(String),

    #[error("match {match_id} pairs team {team_id} against itself")]
    DuplicateTeam { match_id: String, team_id: String },

    #[error("result for match {match_id} names {winner_id}, who is not playing in it")]
    InvalidWinner { match_id: String, winner_id: String },

    #[error("result for match {match_id} names {winner_id} as winner but the score says otherwise")]
    ScoreMismatch { match_id: String, winner_id: String },

    #[error("invalid match {match_id}: {reason}")]
    InvalidMatch { match_id: String, reason: &'static str },

    /// Advancing the schedule clock left the representable date range.
    #[error("schedule time overflow after {0}")]
    TimeOverflow(chrono::NaiveDateTime),
}

pub type Result<T> = std::result::Result<T, TournamentError>;
