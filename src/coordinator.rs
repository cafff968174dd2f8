use std::collections::VecDeque;

use chrono::NaiveDateTime;
use log::{error, info, warn};
use serde::Serialize;

use crate::config::CoordinatorConfig;
use crate::error::ScheduleError;
use crate::model::MatchWithVenue;
use crate::registry::ScheduleRegistry;
use crate::schedule::{RolloverOutcome, TeamSchedule};
use crate::temporal::{self, Countdown};

const MAX_LOGS: usize = 200;

/// Read-only view of one team after a refresh, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct TeamSnapshot {
    pub team_key: String,
    pub menu_flag_id: String,
    pub is_active_calendar: bool,
    pub has_next: bool,
    pub next: Option<MatchWithVenue>,
    pub next_countdown: Option<Countdown>,
    pub has_second_next: bool,
    pub second_next: Option<MatchWithVenue>,
    pub second_next_countdown: Option<Countdown>,
    /// Elapsed matches in partition order (see `TeamSchedule::rollover`).
    pub past_matches: Vec<MatchWithVenue>,
    /// Set only once the season is over.
    pub season_label: Option<String>,
    pub stuck: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RefreshReport {
    pub teams: Vec<TeamSnapshot>,
    /// Matches moved to the past list during this pass.
    pub rolled_over: usize,
    /// At least one schedule is stuck; the data must be reloaded.
    pub reload_required: bool,
}

impl RefreshReport {
    pub fn team(&self, team_key: &str) -> Option<&TeamSnapshot> {
        self.teams.iter().find(|t| t.team_key == team_key)
    }
}

/// Drives the time-based rollover of every configured team and collects
/// what the display layer needs.
#[derive(Debug, Clone)]
pub struct ScheduleCoordinator {
    config: CoordinatorConfig,
    logs: VecDeque<String>,
}

impl ScheduleCoordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self {
            config,
            logs: VecDeque::with_capacity(MAX_LOGS),
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn logs(&self) -> &VecDeque<String> {
        &self.logs
    }

    /// Sorts every configured schedule; run once after loading.
    pub fn sort_data(&mut self, registry: &mut ScheduleRegistry) -> Result<(), ScheduleError> {
        for key in &self.config.teams {
            registry.lookup_schedule_mut(key)?.sort_all();
        }
        Ok(())
    }

    pub fn refresh(
        &mut self,
        registry: &mut ScheduleRegistry,
        now: NaiveDateTime,
    ) -> Result<RefreshReport, ScheduleError> {
        let mut report = RefreshReport::default();
        let teams = self.config.teams.clone();

        for key in &teams {
            let schedule = registry.lookup_schedule_mut(key)?;
            let (rolled, stuck) = self.age_out_elapsed(key, schedule, now);
            report.rolled_over += rolled;
            if stuck {
                report.reload_required = true;
            }
            let snapshot = self.snapshot(key, registry, now)?;
            report.teams.push(snapshot);
        }

        if report.reload_required {
            self.push_log("[ERROR] Schedule data is stale, reload required");
        }
        Ok(report)
    }

    // Returns how many matches were rolled over and whether the schedule is stuck.
    fn age_out_elapsed(
        &mut self,
        key: &str,
        schedule: &mut TeamSchedule,
        now: NaiveDateTime,
    ) -> (usize, bool) {
        let mut rolled = 0;
        // Every pass either pops a match or stops.
        while schedule.has_next() {
            let Ok(next) = schedule.next() else {
                break;
            };
            if !temporal::has_window_elapsed(next.start, now) {
                break;
            }
            match schedule.rollover(now) {
                RolloverOutcome::Completed(done) => {
                    rolled += 1;
                    self.push_log(format!("[INFO] {key}: match of {} is over", done.start));
                }
                RolloverOutcome::Faulted {
                    fault,
                    attempts_remaining,
                } => {
                    self.push_log(format!(
                        "[WARN] {key}: rollover failed ({fault}), {attempts_remaining} attempts left"
                    ));
                    break;
                }
                RolloverOutcome::Stuck(fault) => {
                    self.push_log(format!("[ERROR] {key}: rollover stuck ({fault})"));
                    break;
                }
            }
        }
        (rolled, schedule.is_stuck())
    }

    fn snapshot(
        &self,
        key: &str,
        registry: &mut ScheduleRegistry,
        now: NaiveDateTime,
    ) -> Result<TeamSnapshot, ScheduleError> {
        let schedule = registry.lookup_schedule_mut(key)?;
        let has_next = schedule.has_next();
        let has_second_next = schedule.has_second_next();
        let next = if has_next { Some(schedule.next()?) } else { None };
        let second_next = if has_second_next {
            Some(schedule.second_next()?)
        } else {
            None
        };
        let season_label = schedule.season_label();
        let stuck = schedule.is_stuck();
        let past = schedule.past_matches().clone();

        let registry = &*registry;
        let next_countdown = next
            .as_ref()
            .map(|m| temporal::bucketed_countdown(m.start, now));
        let second_next_countdown = second_next
            .as_ref()
            .map(|m| temporal::bucketed_countdown(m.start, now));
        let next = next.map(|m| registry.resolve(&m)).transpose()?;
        let second_next = second_next.map(|m| registry.resolve(&m)).transpose()?;
        let past_matches = past
            .iter()
            .map(|m| registry.resolve(m))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TeamSnapshot {
            team_key: key.to_string(),
            menu_flag_id: self.config.settings_for(key).menu_flag_id,
            is_active_calendar: self.config.is_active_calendar(key),
            has_next,
            next,
            next_countdown,
            has_second_next,
            second_next,
            second_next_countdown,
            past_matches,
            season_label,
            stuck,
        })
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        if msg.starts_with("[ERROR]") {
            error!("{msg}");
        } else if msg.starts_with("[WARN]") {
            warn!("{msg}");
        } else {
            info!("{msg}");
        }
        self.logs.push_back(msg);
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
