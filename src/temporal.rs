use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

const MS_PER_MINUTE: i64 = 60_000;
const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 1_440;

/// How long a match counts as "current" after its scheduled start.
pub const MATCH_WINDOW_MINUTES: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOrder {
    Earlier,
    Equal,
    Later,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CountdownUnit {
    Ongoing,
    Minute,
    Hour,
    Day,
}

/// Time left before a kickoff, coarsened to the largest sensible unit.
///
/// `amount` is always 0 for [`CountdownUnit::Ongoing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub amount: i64,
    pub unit: CountdownUnit,
}

impl Countdown {
    pub fn ongoing() -> Self {
        Self {
            amount: 0,
            unit: CountdownUnit::Ongoing,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.unit == CountdownUnit::Ongoing
    }
}

/// Orders `a` relative to `b` at millisecond precision.
pub fn compare(a: NaiveDateTime, b: NaiveDateTime) -> TimeOrder {
    let left = a.and_utc().timestamp_millis();
    let right = b.and_utc().timestamp_millis();
    if left < right {
        TimeOrder::Earlier
    } else if left > right {
        TimeOrder::Later
    } else {
        TimeOrder::Equal
    }
}

pub fn match_window_end(start: NaiveDateTime) -> NaiveDateTime {
    start + Duration::minutes(MATCH_WINDOW_MINUTES)
}

/// True once `now` has reached the end of the match window.
pub fn has_window_elapsed(start: NaiveDateTime, now: NaiveDateTime) -> bool {
    compare(match_window_end(start), now) != TimeOrder::Later
}

pub fn bucketed_countdown(target: NaiveDateTime, now: NaiveDateTime) -> Countdown {
    if compare(target, now) != TimeOrder::Later {
        return Countdown::ongoing();
    }

    let diff_ms = target.and_utc().timestamp_millis() - now.and_utc().timestamp_millis();
    // Rounded up so a pending kickoff never shows as "0 minutes".
    let minutes = ceil_div(diff_ms, MS_PER_MINUTE);

    if minutes >= MINUTES_PER_DAY {
        Countdown {
            amount: ceil_div(minutes, MINUTES_PER_DAY),
            unit: CountdownUnit::Day,
        }
    } else if minutes >= MINUTES_PER_HOUR {
        Countdown {
            amount: ceil_div(minutes, MINUTES_PER_HOUR),
            unit: CountdownUnit::Hour,
        }
    } else {
        Countdown {
            amount: minutes,
            unit: CountdownUnit::Minute,
        }
    }
}

// Only called with a positive numerator.
fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}
