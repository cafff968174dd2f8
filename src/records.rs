use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::model::{Match, Team, Venue};
use crate::registry::ScheduleRegistry;
use crate::schedule::TeamSchedule;

/// Format of the `date` field of a match row, e.g. `05/10/2024 20:30`.
pub const MATCH_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClubData {
    #[serde(default)]
    pub venues: Vec<VenueRecord>,
    /// Match rows keyed by team key (`SEN`, `U9`, ...).
    #[serde(default)]
    pub teams: BTreeMap<String, Vec<MatchRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: String,
    pub venue: u32,
    #[serde(default)]
    pub opponents: Vec<String>,
}

pub fn parse_match_date(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), MATCH_DATE_FORMAT)
        .with_context(|| format!("invalid match date {raw:?} (expected DD/MM/YYYY HH:MM)"))
}

pub fn parse_club_data_json(raw: &str) -> Result<ClubData> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ClubData::default());
    }
    serde_json::from_str(trimmed).context("invalid club data json")
}

pub fn load_club_data(path: &Path) -> Result<ClubData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read club data from {}", path.display()))?;
    parse_club_data_json(&raw)
}

impl MatchRecord {
    pub fn to_match(&self) -> Result<Match> {
        let start = parse_match_date(&self.date)?;
        let opponents = self.opponents.iter().map(Team::new).collect();
        Ok(Match::new(start, self.venue, opponents))
    }
}

impl VenueRecord {
    pub fn to_venue(&self) -> Venue {
        Venue {
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
        }
    }
}

/// Registers every venue and one sorted schedule per team, classifying each
/// match against `now`.
pub fn build_registry(data: &ClubData, now: NaiveDateTime) -> Result<ScheduleRegistry> {
    let mut registry = ScheduleRegistry::new();
    for venue in &data.venues {
        registry.register_venue(venue.id, venue.to_venue());
    }

    for (key, rows) in &data.teams {
        let mut schedule = TeamSchedule::new();
        for (idx, row) in rows.iter().enumerate() {
            let m = row
                .to_match()
                .with_context(|| format!("team {key}: match row {idx}"))?;
            if registry.lookup_venue(m.venue_id).is_err() {
                warn!("team {key}: match row {idx} uses unknown venue {}", m.venue_id);
            }
            schedule.add_match(m, now);
        }
        schedule.sort_all();
        debug!(
            "team {key}: {} upcoming, {} past",
            schedule.future_matches().len(),
            schedule.past_matches().len()
        );
        registry.register_schedule(key.clone(), schedule);
    }

    Ok(registry)
}
