//! Elo-style win probabilities from team strength

use crate::error::Result;
use crate::models::Event;

/// Rating gap at which the stronger side is expected to score 10:1
pub const ELO_SCALE: f64 = 400.0;

/// Calculate expected scores for A against B.
///
/// Returns `(p_a, p_b)` with `p_b = 1 - p_a`. Equal ratings give `(0.5, 0.5)`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> (f64, f64) {
    let p_a = 1.0 / (1.0 + 10.0_f64.powf((rating_b - rating_a) / ELO_SCALE));
    (p_a, 1.0 - p_a)
}

/// Expected scores for two teams of an event, based on their average ratings
pub fn expected_team_score(
    event: &Event,
    team_one_id: &str,
    team_two_id: &str,
) -> Result<(f64, f64)> {
    let team_one = event.team(team_one_id)?;
    let team_two = event.team(team_two_id)?;
    Ok(expected_score(team_one.average_rating(), team_two.average_rating()))
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
