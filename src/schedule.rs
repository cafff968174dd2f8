use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};
use log::{debug, error, warn};

use crate::error::{RolloverFault, ScheduleError};
use crate::model::Match;
use crate::temporal;

/// Consecutive rollover faults after which a schedule needs a reload.
pub const STUCK_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    NoUpcomingMatch,
    HasNextOnly,
    HasNextAndSecond,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RolloverOutcome {
    /// The elapsed match, now at the front of the past list.
    Completed(Arc<Match>),
    Faulted {
        fault: RolloverFault,
        attempts_remaining: u32,
    },
    /// Too many consecutive faults; local retry will not help.
    Stuck(RolloverFault),
}

impl RolloverOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RolloverOutcome::Completed(_))
    }

    pub fn is_stuck(&self) -> bool {
        matches!(self, RolloverOutcome::Stuck(_))
    }
}

/// Memoized `future[0]` / `future[1]`.
///
/// Any change to the future list goes through `invalidate` or `promote`.
#[derive(Debug, Clone, Default)]
struct Lookahead {
    next: Option<Arc<Match>>,
    second_next: Option<Arc<Match>>,
}

impl Lookahead {
    fn invalidate(&mut self) {
        self.next = None;
        self.second_next = None;
    }

    // Head popped: what was second becomes first, second is recomputed lazily.
    fn promote(&mut self) {
        self.next = self.second_next.take();
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SeasonYears {
    start: Option<i32>,
    end: Option<i32>,
}

/// Matches of one team split into upcoming and elapsed, with a rolling
/// "next" / "second next" view over the upcoming ones.
#[derive(Debug, Clone, Default)]
pub struct TeamSchedule {
    future: VecDeque<Arc<Match>>,
    past: VecDeque<Arc<Match>>,
    lookahead: Lookahead,
    rollover_failures: u32,
    season: SeasonYears,
}

impl TeamSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files the match as past when its window has already elapsed at `now`,
    /// future otherwise. Call [`TeamSchedule::sort_all`] once loading is done.
    pub fn add_match(&mut self, m: impl Into<Arc<Match>>, now: NaiveDateTime) {
        let m = m.into();
        if temporal::has_window_elapsed(m.start, now) {
            self.past.push_back(m);
        } else {
            self.future.push_back(m);
        }
        self.lookahead.invalidate();
        self.season = SeasonYears::default();
    }

    pub fn sort_all(&mut self) {
        self.future.make_contiguous().sort_by_key(|m| m.start);
        self.past.make_contiguous().sort_by_key(|m| m.start);
        self.lookahead.invalidate();
    }

    pub fn has_next(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn has_second_next(&self) -> bool {
        self.future.len() > 1
    }

    pub fn state(&self) -> ScheduleState {
        match self.future.len() {
            0 => ScheduleState::NoUpcomingMatch,
            1 => ScheduleState::HasNextOnly,
            _ => ScheduleState::HasNextAndSecond,
        }
    }

    pub fn next(&mut self) -> Result<Arc<Match>, ScheduleError> {
        if self.lookahead.next.is_none() {
            self.lookahead.next = self.future.front().cloned();
        }
        self.lookahead.next.clone().ok_or(ScheduleError::EmptySchedule)
    }

    pub fn second_next(&mut self) -> Result<Arc<Match>, ScheduleError> {
        if self.lookahead.second_next.is_none() {
            self.lookahead.second_next = self.future.get(1).cloned();
        }
        self.lookahead
            .second_next
            .clone()
            .ok_or(ScheduleError::EmptySchedule)
    }

    /// Moves the next match to the past list once its window is over.
    ///
    /// The match goes to the *front* of the past list without re-sorting;
    /// call [`TeamSchedule::sort_all`] if chronological past order matters.
    pub fn rollover(&mut self, now: NaiveDateTime) -> RolloverOutcome {
        match self.try_rollover() {
            Ok(done) => {
                self.rollover_failures = 0;
                debug!("rolled over match of {} at {now}", done.start);
                RolloverOutcome::Completed(done)
            }
            Err(fault) => {
                self.rollover_failures = self.rollover_failures.saturating_add(1);
                if self.is_stuck() {
                    error!(
                        "rollover failed {} times in a row ({fault}), reload required",
                        self.rollover_failures
                    );
                    RolloverOutcome::Stuck(fault)
                } else {
                    let attempts_remaining = STUCK_THRESHOLD - self.rollover_failures;
                    warn!("rollover failed at {now}: {fault} ({attempts_remaining} attempts left)");
                    RolloverOutcome::Faulted {
                        fault,
                        attempts_remaining,
                    }
                }
            }
        }
    }

    fn try_rollover(&mut self) -> Result<Arc<Match>, RolloverFault> {
        let head = self.future.front().ok_or(RolloverFault::NoFutureMatch)?;
        if let Some(cached) = &self.lookahead.next
            && !Arc::ptr_eq(cached, head)
        {
            return Err(RolloverFault::StaleLookahead);
        }
        let done = self
            .future
            .pop_front()
            .ok_or(RolloverFault::NoFutureMatch)?;
        self.past.push_front(Arc::clone(&done));
        self.lookahead.promote();
        Ok(done)
    }

    pub fn rollover_failures(&self) -> u32 {
        self.rollover_failures
    }

    pub fn is_stuck(&self) -> bool {
        self.rollover_failures >= STUCK_THRESHOLD
    }

    /// Year of the earliest elapsed match, once no match is left to play.
    pub fn start_year(&mut self) -> Option<i32> {
        if self.has_next() {
            return None;
        }
        if self.season.start.is_none() {
            self.season.start = self.past.iter().map(|m| m.start).min().map(|d| d.year());
        }
        self.season.start
    }

    /// Year of the latest elapsed match, once no match is left to play.
    pub fn end_year(&mut self) -> Option<i32> {
        if self.has_next() {
            return None;
        }
        if self.season.end.is_none() {
            self.season.end = self.past.iter().map(|m| m.start).max().map(|d| d.year());
        }
        self.season.end
    }

    /// `"2024"` or `"2023/2024"` for a finished season, `None` while matches remain.
    pub fn season_label(&mut self) -> Option<String> {
        let start = self.start_year()?;
        let end = self.end_year()?;
        if start == end {
            Some(start.to_string())
        } else {
            Some(format!("{start}/{end}"))
        }
    }

    pub fn future_matches(&self) -> &VecDeque<Arc<Match>> {
        &self.future
    }

    pub fn past_matches(&self) -> &VecDeque<Arc<Match>> {
        &self.past
    }
}
