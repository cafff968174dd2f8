use std::cell::Cell;

use chrono::{Duration, Local, NaiveDateTime};

/// Source of "now" for a display refresh.
///
/// The schedule state machine never reads a clock itself; callers read one
/// of these and pass the instant down explicitly.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a given instant, movable by hand.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 5)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    #[test]
    fn system_clock_is_recent() {
        assert!(SystemClock.now().year() >= 2024);
    }

    #[test]
    fn fixed_clock_is_stable_until_moved() {
        let clock = FixedClock::new(at(20, 30));
        assert_eq!(clock.now(), at(20, 30));
        assert_eq!(clock.now(), at(20, 30));

        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now(), at(22, 0));

        clock.set(at(9, 15));
        assert_eq!(clock.now(), at(9, 15));
    }
}
