//! Per-session visit counting.

use chrono::{NaiveDateTime, Timelike};
use std::sync::Arc;

use crate::domain::clock::Clock;

/// Format of the `last_visit` value kept in the session.
pub const VISIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Visit counter and timestamp to write back into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitState {
    pub visits: i64,
    pub last_visit: String,
}

/// Counts visits to the home page, at most one per elapsed second.
///
/// The stored timestamp is truncated to whole seconds before comparing, so
/// any positive whole-second difference counts as a new visit.
pub struct VisitTracker {
    clock: Arc<dyn Clock>,
}

impl VisitTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Computes the next visit state from the stored session values.
    ///
    /// A missing or zero `visits` counts as 1. A missing or unparsable
    /// `last_visit` defaults to the current time. The clock is read once
    /// for that default and once more for "now".
    pub fn track(&self, visits: Option<i64>, last_visit: Option<&str>) -> VisitState {
        let visits = match visits {
            Some(v) if v != 0 => v,
            _ => 1,
        };

        let parsed = last_visit.and_then(|raw| parse_visit_time(raw).map(|t| (raw.to_string(), t)));
        let (stored, last_visit_time) = match parsed {
            Some(found) => found,
            None => {
                let default_now = self.clock.now();
                (format_visit_time(default_now), truncate_to_second(default_now))
            }
        };

        let now = self.clock.now();

        if (now - last_visit_time).num_seconds() > 0 {
            VisitState {
                visits: visits + 1,
                last_visit: format_visit_time(now),
            }
        } else {
            VisitState {
                visits,
                last_visit: stored,
            }
        }
    }
}

pub fn format_visit_time(time: NaiveDateTime) -> String {
    time.format(VISIT_TIMESTAMP_FORMAT).to_string()
}

/// Parses the whole-second part of a stored timestamp.
fn parse_visit_time(value: &str) -> Option<NaiveDateTime> {
    let seconds = value.get(..19)?;
    NaiveDateTime::parse_from_str(seconds, "%Y-%m-%d %H:%M:%S").ok()
}

fn truncate_to_second(time: NaiveDateTime) -> NaiveDateTime {
    time.with_nanosecond(0).unwrap_or(time)
}
