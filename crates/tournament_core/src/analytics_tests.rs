use super::*;
use crate::models::{MatchResult, Player, Team};
use crate::scheduler::{build_round_robin, ScheduleRequest};
use crate::simulator::{simulate_matches_from, SimulationOptions};
use chrono::{NaiveDate, NaiveDateTime};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 7, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn event_with(teams: &[(&str, Vec<f64>)]) -> Event {
    let mut event = Event::new("E1", "Summer Showdown 2024", start().date(), start().date());
    for (id, ratings) in teams {
        let players = ratings
            .iter()
            .enumerate()
            .map(|(i, r)| Player::new(&format!("{id}-p{i}"), "P", *r))
            .collect();
        event.add_team(Team::new(id, id, players));
    }
    event
}

fn played(id: &str, one: &str, two: &str, score: (u32, u32), winner: &str) -> Match {
    Match {
        id: id.to_string(),
        stage: "Groups".to_string(),
        round_number: 1,
        team_one_id: one.to_string(),
        team_two_id: two.to_string(),
        scheduled_time: start(),
        best_of: 3,
        venue_id: None,
        result: Some(MatchResult {
            match_id: id.to_string(),
            winner_id: winner.to_string(),
            team_one_score: score.0,
            team_two_score: score.1,
            concluded_at: None,
            notes: None,
        }),
    }
}

fn four_team_event() -> Event {
    event_with(&[
        ("T1", vec![1500.0]),
        ("T2", vec![1500.0]),
        ("T3", vec![1500.0]),
        ("T4", vec![1500.0]),
    ])
}

#[test]
fn test_standings_order_by_wins() {
    let event = four_team_event();
    let mut request = ScheduleRequest::new("Groups", start());
    request.matches_per_day = 3;
    request.best_of = 1;
    let mut matches = build_round_robin(&event, &request).unwrap();

    // Alternate winners deterministically
    for (i, m) in matches.iter_mut().enumerate() {
        let (winner, score) = if i % 2 == 0 {
            (m.team_one_id.clone(), (1, 0))
        } else {
            (m.team_two_id.clone(), (0, 1))
        };
        m.result = Some(MatchResult {
            match_id: m.id.clone(),
            winner_id: winner,
            team_one_score: score.0,
            team_two_score: score.1,
            concluded_at: None,
            notes: None,
        });
    }

    let standings = compute_standings_for(&event, &matches).unwrap();
    assert_eq!(standings.len(), 4);
    assert!(standings.windows(2).all(|w| w[0].wins >= w[1].wins));
    let total_wins: u32 = standings.iter().map(|p| p.wins).sum();
    assert_eq!(total_wins, 6);
    assert!(standings.iter().all(|p| p.matches_played == 3));
}

#[test]
fn test_standings_tie_breaks() {
    let event = four_team_event();
    let matches = vec![
        // T1 and T2 both finish 1-1, T2 with the better game difference
        played("m1", "T1", "T3", (2, 1), "T1"),
        played("m2", "T1", "T4", (0, 2), "T4"),
        played("m3", "T2", "T3", (2, 0), "T2"),
        played("m4", "T2", "T4", (1, 2), "T4"),
    ];

    let standings = compute_standings_for(&event, &matches).unwrap();
    let order: Vec<_> = standings.iter().map(|p| p.team_id.as_str()).collect();
    assert_eq!(order, vec!["T4", "T2", "T1", "T3"]);

    let t2 = &standings[1];
    assert_eq!((t2.wins, t2.losses, t2.games_won, t2.games_lost), (1, 1, 3, 2));
    assert_eq!(t2.game_difference(), 1);
    assert!((t2.win_rate() - 0.5).abs() < 1e-12);
}

#[test]
fn test_standings_games_won_breaks_equal_difference() {
    let event = event_with(&[
        ("A", vec![1500.0]),
        ("B", vec![1500.0]),
        ("C", vec![1500.0]),
        ("D", vec![1500.0]),
    ]);
    let matches = vec![
        played("m1", "A", "C", (2, 1), "A"),
        played("m2", "B", "D", (3, 2), "B"),
    ];

    let standings = compute_standings_for(&event, &matches).unwrap();
    assert_eq!(standings[0].team_id, "B");
    assert_eq!(standings[1].team_id, "A");
}

#[test]
fn test_equal_scores_count_as_ties() {
    let event = four_team_event();
    let matches = vec![played("m1", "T1", "T2", (1, 1), "T1")];

    let standings = compute_standings_for(&event, &matches).unwrap();
    let t1 = standings.iter().find(|p| p.team_id == "T1").unwrap();
    let t2 = standings.iter().find(|p| p.team_id == "T2").unwrap();
    assert_eq!((t1.ties, t1.wins, t1.losses), (1, 0, 0));
    assert_eq!((t2.ties, t2.wins, t2.losses), (1, 0, 0));
}

#[test]
fn test_pending_matches_are_ignored() {
    let event = four_team_event();
    let mut open = played("m1", "T1", "T2", (2, 0), "T1");
    open.result = None;

    let standings = compute_standings_for(&event, &[open]).unwrap();
    assert!(standings.iter().all(|p| *p == TeamPerformance::new(&p.team_id)));
    assert!(standings.iter().all(|p| p.win_rate() == 0.0));
}

#[test]
fn test_standings_are_idempotent() {
    let event = four_team_event();
    let mut request = ScheduleRequest::new("Groups", start());
    request.best_of = 3;
    let matches = build_round_robin(&event, &request).unwrap();
    let options = SimulationOptions::seeded(42);
    let simulated = simulate_matches_from(&event, &matches, &options).unwrap();

    let first = compute_standings_for(&event, &simulated).unwrap();
    let second = compute_standings_for(&event, &simulated).unwrap();
    assert_eq!(first, second);
    for w in first.windows(2) {
        assert!(w[0].ranking_key() >= w[1].ranking_key());
    }
}

#[test]
fn test_standings_unknown_team() {
    let event = four_team_event();
    let matches = vec![played("m1", "T1", "X", (2, 0), "T1")];
    let err = compute_standings_for(&event, &matches).unwrap_err();
    assert_eq!(err, TournamentError::TeamNotFound("X".to_string()));
}

#[test]
fn test_strength_of_schedule() {
    let mut event = event_with(&[
        ("T1", vec![1400.0, 1600.0]),
        ("T2", vec![1800.0]),
        ("T3", vec![1200.0]),
        ("T4", vec![]),
    ]);
    let mut open = played("m2", "T1", "T3", (0, 0), "T1");
    open.result = None;
    event.add_match(played("m1", "T1", "T2", (2, 1), "T1"));
    event.add_match(open);

    let sos = strength_of_schedule(&event).unwrap();
    assert_eq!(sos.len(), 4);
    assert!((sos["T1"] - 1500.0).abs() < 1e-9);
    assert!((sos["T2"] - 1500.0).abs() < 1e-9);
    assert!((sos["T3"] - 1500.0).abs() < 1e-9);
    assert_eq!(sos["T4"], 0.0);
}

#[test]
fn test_strength_of_schedule_covers_every_team() {
    let event = four_team_event();
    let sos = strength_of_schedule(&event).unwrap();
    let keys: Vec<_> = sos.keys().cloned().collect();
    assert_eq!(keys, vec!["T1", "T2", "T3", "T4"]);
    assert!(sos.values().all(|&v| v == 0.0));
}

#[test]
fn test_highlights_keep_close_matches_in_order() {
    let mut event = event_with(&[
        ("T1", vec![1500.0]),
        ("T2", vec![1510.0]),
        ("T3", vec![1900.0]),
        ("T4", vec![1495.0]),
    ]);
    let mut close_late = played("m3", "T2", "T4", (0, 0), "T2");
    close_late.result = None;
    event.add_match(played("m1", "T1", "T2", (2, 0), "T1"));
    event.add_match(played("m2", "T1", "T3", (0, 2), "T3"));
    event.add_match(close_late);

    let highlights = suggest_highlight_matches(&event, DEFAULT_HIGHLIGHT_THRESHOLD).unwrap();
    let ids: Vec<_> = highlights.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m3"]);

    let none = suggest_highlight_matches(&event, 0.0).unwrap();
    assert!(none.is_empty());

    let all = suggest_highlight_matches(&event, 1.0).unwrap();
    assert_eq!(all.len(), 3);
}
