use std::fs;
use std::path::PathBuf;

use chrono::NaiveDateTime;

use club_fixtures::config::CoordinatorConfig;
use club_fixtures::coordinator::ScheduleCoordinator;
use club_fixtures::error::ScheduleError;
use club_fixtures::model::{Match, Team, Venue};
use club_fixtures::records::{build_registry, parse_club_data_json, parse_match_date};
use club_fixtures::registry::ScheduleRegistry;
use club_fixtures::schedule::TeamSchedule;
use club_fixtures::temporal::{Countdown, CountdownUnit};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn at(raw: &str) -> NaiveDateTime {
    parse_match_date(raw).expect("valid test date")
}

fn club_registry(loaded_at: &str) -> ScheduleRegistry {
    let data = parse_club_data_json(&read_fixture("club_data.json")).expect("fixture should parse");
    build_registry(&data, at(loaded_at)).expect("registry should build")
}

fn coordinator() -> ScheduleCoordinator {
    ScheduleCoordinator::new(CoordinatorConfig::new(
        vec!["SEN".to_string(), "U9".to_string()],
        Some("SEN".to_string()),
    ))
}

fn gym() -> Venue {
    Venue {
        name: "Gymnase Jean Moulin".to_string(),
        address: "12 rue des Sports".to_string(),
        city: "Lille".to_string(),
    }
}

#[test]
fn snapshot_after_load_shows_next_and_past() {
    let mut registry = club_registry("06/10/2024 10:00");
    let mut coordinator = coordinator();
    let report = coordinator
        .refresh(&mut registry, at("06/10/2024 10:00"))
        .expect("refresh should succeed");

    assert_eq!(report.rolled_over, 0);
    assert!(!report.reload_required);

    let sen = report.team("SEN").expect("seniors snapshot");
    assert!(sen.is_active_calendar);
    assert_eq!(sen.menu_flag_id, "menu-flag-sen");
    assert!(sen.has_next);
    let next = sen.next.as_ref().expect("next match");
    assert_eq!(next.opponents[0].name, "HBC Villeneuve");
    assert_eq!(next.venue.city, "Roubaix");
    // 13 days and 10h30 away.
    assert_eq!(
        sen.next_countdown,
        Some(Countdown {
            amount: 14,
            unit: CountdownUnit::Day
        })
    );
    assert!(!sen.has_second_next);
    assert!(sen.second_next.is_none());
    assert_eq!(sen.past_matches.len(), 3);
    assert!(
        sen.past_matches
            .windows(2)
            .all(|pair| pair[0].start <= pair[1].start)
    );
    assert_eq!(sen.season_label, None);

    let u9 = report.team("U9").expect("u9 snapshot");
    assert!(!u9.is_active_calendar);
    assert_eq!(u9.past_matches.len(), 1);
}

#[test]
fn refresh_rolls_over_an_elapsed_next_match() {
    let mut registry = club_registry("05/10/2024 12:00");
    let mut coordinator = coordinator();

    let during = coordinator
        .refresh(&mut registry, at("05/10/2024 21:00"))
        .expect("refresh should succeed");
    let sen = during.team("SEN").expect("seniors snapshot");
    assert_eq!(during.rolled_over, 0);
    assert_eq!(sen.next.as_ref().map(|m| m.opponents[0].name.as_str()), Some("HBC Nord"));
    assert!(sen.next_countdown.is_some_and(|c| c.is_ongoing()));
    assert!(sen.has_second_next);

    let after = coordinator
        .refresh(&mut registry, at("05/10/2024 22:01"))
        .expect("refresh should succeed");
    let sen = after.team("SEN").expect("seniors snapshot");
    assert_eq!(after.rolled_over, 1);
    assert_eq!(
        sen.next.as_ref().map(|m| m.opponents[0].name.as_str()),
        Some("HBC Villeneuve")
    );
    assert!(!sen.has_second_next);
    assert_eq!(sen.past_matches[0].opponents[0].name, "HBC Nord");
    assert!(
        coordinator
            .logs()
            .iter()
            .any(|line| line.starts_with("[INFO] SEN:"))
    );
}

#[test]
fn refresh_ages_out_every_elapsed_match_and_flags_season_end() {
    let mut registry = club_registry("01/09/2024 00:00");
    let mut coordinator = coordinator();
    let report = coordinator
        .refresh(&mut registry, at("20/10/2024 00:00"))
        .expect("refresh should succeed");

    assert_eq!(report.rolled_over, 6);
    let sen = report.team("SEN").expect("seniors snapshot");
    assert!(!sen.has_next);
    assert!(sen.next.is_none());
    assert_eq!(sen.past_matches.len(), 4);
    assert_eq!(sen.past_matches[0].opponents[0].name, "HBC Villeneuve");
    assert_eq!(sen.season_label.as_deref(), Some("2024"));
}

#[test]
fn unknown_team_key_fails_the_refresh() {
    let mut registry = club_registry("06/10/2024 10:00");
    let mut coordinator = ScheduleCoordinator::new(CoordinatorConfig::club_defaults());
    let err = coordinator
        .refresh(&mut registry, at("06/10/2024 10:00"))
        .expect_err("U11M has no data");
    assert_eq!(err, ScheduleError::UnknownTeamKey("U11M".to_string()));
}

#[test]
fn unknown_venue_fails_the_refresh() {
    let mut registry = ScheduleRegistry::new();
    registry.register_venue(1, gym());
    let mut schedule = TeamSchedule::new();
    let now = at("06/10/2024 10:00");
    schedule.add_match(
        Match::new(at("12/10/2024 20:30"), 9, vec![Team::new("HBC Nord")]),
        now,
    );
    schedule.sort_all();
    registry.register_schedule("SEN", schedule);

    let mut coordinator = ScheduleCoordinator::new(CoordinatorConfig::new(
        vec!["SEN".to_string()],
        None,
    ));
    let err = coordinator
        .refresh(&mut registry, now)
        .expect_err("venue 9 is not registered");
    assert_eq!(err, ScheduleError::UnknownVenueKey(9));
}

#[test]
fn stuck_schedule_requires_reload() {
    let now = at("06/10/2024 10:00");
    let mut schedule = TeamSchedule::new();
    for _ in 0..3 {
        schedule.rollover(now);
    }
    assert!(schedule.is_stuck());

    let mut registry = ScheduleRegistry::new();
    registry.register_venue(1, gym());
    registry.register_schedule("SEN", schedule);

    let mut coordinator = ScheduleCoordinator::new(CoordinatorConfig::new(
        vec!["SEN".to_string()],
        Some("SEN".to_string()),
    ));
    let report = coordinator
        .refresh(&mut registry, now)
        .expect("refresh should succeed");

    assert!(report.reload_required);
    assert!(report.team("SEN").is_some_and(|t| t.stuck));
    assert!(
        coordinator
            .logs()
            .iter()
            .any(|line| line.starts_with("[ERROR]"))
    );
}

#[test]
fn sort_data_restores_past_order_after_rollover() {
    let mut registry = club_registry("05/10/2024 12:00");
    let mut coordinator = coordinator();
    coordinator
        .refresh(&mut registry, at("05/10/2024 22:01"))
        .expect("refresh should succeed");

    coordinator
        .sort_data(&mut registry)
        .expect("all teams are registered");
    let sen = registry.lookup_schedule("SEN").expect("seniors schedule");
    let past = sen.past_matches();
    assert!(
        past.iter()
            .zip(past.iter().skip(1))
            .all(|(a, b)| a.start <= b.start)
    );
}
