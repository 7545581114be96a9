//! Source of the current local time.

use chrono::{Local, NaiveDateTime};

/// Supplies "now" as a naive local timestamp.
///
/// Session timestamps are stored without a timezone, so the clock works in
/// local naive time as well.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
