use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("no schedule registered for team key {0:?}")]
    UnknownTeamKey(String),
    #[error("no venue registered for venue key {0}")]
    UnknownVenueKey(u32),
    /// A next/second-next query made without checking `has_next`/`has_second_next`.
    #[error("schedule has no such upcoming match")]
    EmptySchedule,
}

/// Internal inconsistency detected while rolling the next match over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RolloverFault {
    #[error("no future match to roll over")]
    NoFutureMatch,
    #[error("cached next match does not match the head of the future list")]
    StaleLookahead,
}
