//! Time sources for stamping chat messages.

use std::cell::Cell;

use chrono::{Duration, Local, NaiveDateTime};

use crate::message::Timestamp;

/// Supplies the current time to the ledger.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_datetime(Local::now().naive_local())
    }
}

/// Deterministic clock that starts at a fixed instant and advances by `step`
/// every time it is read. Used for replay and tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Cell<NaiveDateTime>,
    step: Duration,
}

impl FixedClock {
    pub fn new(start: Timestamp) -> Self {
        Self::with_step(start, Duration::seconds(1))
    }

    pub fn with_step(start: Timestamp, step: Duration) -> Self {
        Self {
            current: Cell::new(start.as_datetime()),
            step,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        let now = self.current.get();
        self.current.set(now + self.step);
        Timestamp::from_datetime(now)
    }
}
