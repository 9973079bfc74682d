//! Local wall clock.

use chrono::Timelike;
use dial_traits::{TimeOfDay, WallClock};

/// Reads the system's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalWallClock;

impl WallClock for LocalWallClock {
    fn time_of_day(&self) -> TimeOfDay {
        let now = chrono::Local::now();
        // nanosecond() exceeds 1e9 during a leap second
        let micros = (now.nanosecond() / 1_000).min(999_999);
        TimeOfDay::new(now.hour(), now.minute(), now.second(), micros)
    }
}
