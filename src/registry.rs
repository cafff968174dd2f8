use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ScheduleError;
use crate::model::{Match, MatchWithVenue, Venue};
use crate::schedule::TeamSchedule;

/// Schedules by team key and venues by venue key, filled once at load time.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRegistry {
    schedules: HashMap<String, TeamSchedule>,
    venues: HashMap<u32, Venue>,
}

impl ScheduleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schedule` under `team_key`, replacing any previous one.
    pub fn register_schedule(&mut self, team_key: impl Into<String>, schedule: TeamSchedule) {
        self.schedules.insert(team_key.into(), schedule);
    }

    pub fn lookup_schedule(&self, team_key: &str) -> Result<&TeamSchedule, ScheduleError> {
        self.schedules
            .get(team_key)
            .ok_or_else(|| ScheduleError::UnknownTeamKey(team_key.to_string()))
    }

    pub fn lookup_schedule_mut(
        &mut self,
        team_key: &str,
    ) -> Result<&mut TeamSchedule, ScheduleError> {
        self.schedules
            .get_mut(team_key)
            .ok_or_else(|| ScheduleError::UnknownTeamKey(team_key.to_string()))
    }

    pub fn register_venue(&mut self, venue_id: u32, venue: Venue) {
        self.venues.insert(venue_id, venue);
    }

    pub fn lookup_venue(&self, venue_id: u32) -> Result<&Venue, ScheduleError> {
        self.venues
            .get(&venue_id)
            .ok_or(ScheduleError::UnknownVenueKey(venue_id))
    }

    pub fn resolve(&self, m: &Arc<Match>) -> Result<MatchWithVenue, ScheduleError> {
        let venue = self.lookup_venue(m.venue_id)?;
        Ok(MatchWithVenue::new(m, venue.clone()))
    }

    /// Registered team keys, sorted.
    pub fn team_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.schedules.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn venue_count(&self) -> usize {
        self.venues.len()
    }
}
