use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use club_fixtures::clock::{Clock, FixedClock, SystemClock};
use club_fixtures::config::CoordinatorConfig;
use club_fixtures::coordinator::{RefreshReport, ScheduleCoordinator, TeamSnapshot};
use club_fixtures::labels;
use club_fixtures::records;

const DEFAULT_DATA_PATH: &str = "data/matches.json";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let mut json = false;
    let mut data_path = None;
    for arg in env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            data_path = Some(PathBuf::from(arg));
        }
    }
    let data_path = data_path
        .or_else(|| opt_env("CLUB_FIXTURES_DATA").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    let clock: Box<dyn Clock> = match opt_env("CLUB_FIXTURES_NOW") {
        Some(raw) => Box::new(FixedClock::new(
            records::parse_match_date(&raw).context("CLUB_FIXTURES_NOW")?,
        )),
        None => Box::new(SystemClock),
    };
    let now = clock.now();

    let data = records::load_club_data(&data_path)?;
    let mut registry = records::build_registry(&data, now)?;
    let mut coordinator = ScheduleCoordinator::new(CoordinatorConfig::from_env());
    let report = coordinator
        .refresh(&mut registry, now)
        .context("refresh failed")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize report")?
        );
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &RefreshReport) {
    for team in &report.teams {
        print_team(team);
        println!();
    }
    if report.reload_required {
        eprintln!("{}", labels::RELOAD_NOTICE);
    }
}

fn print_team(team: &TeamSnapshot) {
    let badge = team
        .next_countdown
        .as_ref()
        .map(labels::menu_flag_label)
        .unwrap_or_else(|| "-".to_string());
    println!("== {} [{}: {}]", team.team_key, team.menu_flag_id, badge);
    if !team.is_active_calendar {
        return;
    }

    if let Some(next) = &team.next {
        println!("Prochain match");
        print_card(&labels::match_card(next, team.next_countdown.as_ref()));
    }
    if let Some(second) = &team.second_next {
        println!("Match suivant");
        print_card(&labels::match_card(second, team.second_next_countdown.as_ref()));
    }
    if let Some(season) = &team.season_label {
        println!("{}", labels::season_over_notice(season));
    }
    if !team.past_matches.is_empty() {
        println!("Matchs passés");
        for m in &team.past_matches {
            println!("  #{}", labels::match_anchor_id(m.start));
            print_card(&labels::match_card(m, None));
        }
    }
}

fn print_card(lines: &[String; 4]) {
    for line in lines {
        println!("  {line}");
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        if val.trim().is_empty() {
            None
        } else {
            Some(val)
        }
    })
}
