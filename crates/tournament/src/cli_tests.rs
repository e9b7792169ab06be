use super::*;
use clap::Parser;

#[test]
fn test_parse_datetime_formats() {
    let expected = NaiveDate::from_ymd_opt(2024, 7, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    assert_eq!(parse_datetime("2024-07-01T09:00:00"), Ok(expected));
    assert_eq!(parse_datetime("2024-07-01T09:00"), Ok(expected));
    assert_eq!(parse_datetime("2024-07-01 09:00:00"), Ok(expected));
    assert_eq!(parse_datetime("2024-07-01T09:00:00+02:00"), Ok(expected));
    assert_eq!(
        parse_datetime("2024-07-01"),
        Ok(expected.date().and_hms_opt(0, 0, 0).unwrap())
    );
    assert!(parse_datetime("next tuesday").is_err());
}

#[test]
fn test_schedule_command_uses_defaults() {
    let cli = Cli::try_parse_from([
        "tournament",
        "schedule",
        "event.json",
        "--start",
        "2024-07-01T09:00:00",
        "--best-of",
        "5",
    ])
    .unwrap();

    let Command::Schedule(args) = cli.command else {
        panic!("expected schedule command");
    };
    let request = args.to_request(&ScheduleDefaults::default());
    assert_eq!(request.stage, "Group");
    assert_eq!(request.best_of, 5);
    assert_eq!(request.matches_per_day, 4);
    assert_eq!(request.match_duration_minutes, 60);
    assert_eq!(request.venue_ids, None);
}

#[test]
fn test_schedule_command_with_venues() {
    let cli = Cli::try_parse_from([
        "tournament",
        "schedule",
        "event.json",
        "--start",
        "2024-07-01T09:00:00",
        "--venues",
        "V1",
        "V2",
        "--matches-per-day",
        "-1",
    ])
    .unwrap();

    let Command::Schedule(args) = cli.command else {
        panic!("expected schedule command");
    };
    assert_eq!(args.venues, Some(vec!["V1".to_string(), "V2".to_string()]));
    assert_eq!(args.matches_per_day, Some(-1));
}

#[test]
fn test_schedule_requires_start() {
    assert!(Cli::try_parse_from(["tournament", "schedule", "event.json"]).is_err());
}

#[test]
fn test_simulate_seed_overrides_config() {
    let cli = Cli::try_parse_from(["tournament", "simulate", "event.json", "--seed", "7"]).unwrap();
    let Command::Simulate(args) = cli.command else {
        panic!("expected simulate command");
    };
    let defaults = SimulationDefaults { seed: Some(42) };
    assert_eq!(args.to_options(&defaults).seed, Some(7));

    let cli = Cli::try_parse_from(["tournament", "simulate", "event.json"]).unwrap();
    let Command::Simulate(args) = cli.command else {
        panic!("expected simulate command");
    };
    assert_eq!(args.to_options(&defaults).seed, Some(42));
}

#[test]
fn test_report_command() {
    let args = ["tournament", "--config", "ops.toml", "report", "event.json"];
    let cli = Cli::try_parse_from(args).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("ops.toml")));
    assert_eq!(
        cli.command,
        Command::Report {
            input: PathBuf::from("event.json")
        }
    );
}
