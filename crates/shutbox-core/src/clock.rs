//! Wall-clock time for event timestamps.

use chrono::{Duration, Local, NaiveDateTime};
use std::cell::Cell;
use std::rc::Rc;

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// The system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
///
/// Each call to `now` returns the current time and then advances it by
/// `tick`, so consecutive events get distinct timestamps.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<NaiveDateTime>,
    tick: Duration,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self::with_tick(start, Duration::zero())
    }

    pub fn with_tick(start: NaiveDateTime, tick: Duration) -> Self {
        Self {
            current: Cell::new(start),
            tick,
        }
    }

    pub fn set(&self, time: NaiveDateTime) {
        self.current.set(time);
    }

    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        let now = self.current.get();
        self.current.set(now + self.tick);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_manual_clock_ticks() {
        let clock = ManualClock::with_tick(at(9, 0), Duration::minutes(5));
        assert_eq!(clock.now(), at(9, 0));
        assert_eq!(clock.now(), at(9, 5));

        clock.set(at(23, 0));
        assert_eq!(clock.now(), at(23, 0));
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(at(12, 0));
        clock.advance(Duration::minutes(10));
        assert_eq!(clock.now(), at(12, 10));
        assert_eq!(clock.now(), at(12, 10));
    }
}
