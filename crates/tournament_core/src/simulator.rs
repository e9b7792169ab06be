//! Series simulation for pending matches
//!
//! Each game of a best-of-N series is a single draw against the Elo expected
//! score of team one. The series ends as soon as one side has a majority.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::elo::expected_team_score;
use crate::error::Result;
use crate::models::{Event, Match, MatchResult};

/// Minutes of play credited per game when stamping `concluded_at`
pub const MINUTES_PER_GAME: i64 = 45;

/// Configuration for a simulation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationOptions {
    /// Seed for reproducible runs (None = seeded from entropy)
    pub seed: Option<u64>,
}

impl SimulationOptions {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Simulate every pending match of the event
pub fn simulate_matches(event: &Event, options: &SimulationOptions) -> Result<Vec<Match>> {
    simulate_matches_from(event, &event.matches, options)
}

/// Simulate the given matches against the event's teams
pub fn simulate_matches_from(
    event: &Event,
    matches: &[Match],
    options: &SimulationOptions,
) -> Result<Vec<Match>> {
    let mut rng = options.rng();
    simulate_with_rng(event, matches, &mut rng)
}

/// Simulate matches drawing from an explicit random stream.
///
/// Completed matches are returned unchanged. The output has the same order
/// as the input.
pub fn simulate_with_rng<R: Rng + ?Sized>(
    event: &Event,
    matches: &[Match],
    rng: &mut R,
) -> Result<Vec<Match>> {
    let mut simulated = Vec::with_capacity(matches.len());
    let mut played = 0;

    for m in matches {
        if m.has_result() {
            simulated.push(m.clone());
            continue;
        }

        let (win_probability, _) = expected_team_score(event, &m.team_one_id, &m.team_two_id)?;
        let result = simulate_series(m, win_probability, rng);
        debug!(
            match_id = %m.id,
            win_probability,
            score = %format!("{}-{}", result.team_one_score, result.team_two_score),
            winner = %result.winner_id,
            "series simulated"
        );

        simulated.push(Match {
            result: Some(result),
            ..m.clone()
        });
        played += 1;
    }

    info!(matches = matches.len(), simulated = played, "simulation complete");
    Ok(simulated)
}

/// Play out one series and build its result
fn simulate_series<R: Rng + ?Sized>(m: &Match, win_probability: f64, rng: &mut R) -> MatchResult {
    let (mut team_one_wins, mut team_two_wins) = play_series(m.best_of, win_probability, rng);

    let winner_id = if team_one_wins == team_two_wins {
        let team_one_takes_it = rng.gen::<f64>() < 0.5;
        // Best-of-1 keeps its scoreline; longer series credit the deciding game
        if m.best_of != 1 {
            if team_one_takes_it {
                team_one_wins += 1;
            } else {
                team_two_wins += 1;
            }
        }
        if team_one_takes_it {
            m.team_one_id.clone()
        } else {
            m.team_two_id.clone()
        }
    } else if team_one_wins > team_two_wins {
        m.team_one_id.clone()
    } else {
        m.team_two_id.clone()
    };

    MatchResult {
        match_id: m.id.clone(),
        winner_id,
        team_one_score: team_one_wins,
        team_two_score: team_two_wins,
        concluded_at: Duration::try_minutes(MINUTES_PER_GAME * i64::from(m.best_of))
            .and_then(|played| m.scheduled_time.checked_add_signed(played)),
        notes: None,
    }
}

/// Race to `best_of / 2 + 1` game wins. Returns `(team_one_wins, team_two_wins)`.
pub fn play_series<R: Rng + ?Sized>(best_of: u32, win_probability: f64, rng: &mut R) -> (u32, u32) {
    let required_wins = best_of / 2 + 1;
    let mut wins_one = 0;
    let mut wins_two = 0;

    while wins_one < required_wins && wins_two < required_wins {
        if rng.gen::<f64>() < win_probability {
            wins_one += 1;
        } else {
            wins_two += 1;
        }
    }

    (wins_one, wins_two)
}

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod simulator_tests;
