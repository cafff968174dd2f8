use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A gym hosting matches. Shared by every team of the club for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub start: NaiveDateTime,
    pub venue_id: u32,
    /// Opposing teams, in the order the fixture lists them.
    pub opponents: Vec<Team>,
}

impl Match {
    pub fn new(start: NaiveDateTime, venue_id: u32, opponents: Vec<Team>) -> Self {
        Self {
            start,
            venue_id,
            opponents,
        }
    }

    pub fn shared(self) -> Arc<Match> {
        Arc::new(self)
    }
}

/// A match joined with the venue it is played at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchWithVenue {
    pub start: NaiveDateTime,
    pub opponents: Vec<Team>,
    pub venue: Venue,
}

impl MatchWithVenue {
    pub fn new(m: &Match, venue: Venue) -> Self {
        Self {
            start: m.start,
            opponents: m.opponents.clone(),
            venue,
        }
    }
}
