use std::thread;
use std::time::Duration;

/// Pacing abstraction: everything that waits goes through `sleep`, so tests
/// can substitute a clock that only records the request.
pub trait Clock {
    fn sleep(&self, d: Duration);
}

/// Real-time clock: `sleep` blocks the thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn sleep(&self, d: Duration) {
        if d.is_zero() {
            return;
        }
        thread::sleep(d);
    }
}

/// Local civil time of day, as read from the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDay {
    /// 0..=23
    pub hour: u32,
    /// 0..=59
    pub minute: u32,
    /// 0..=59 (60 tolerated for leap seconds)
    pub second: u32,
    /// 0..=999_999
    pub micros: u32,
}

impl TimeOfDay {
    pub const fn new(hour: u32, minute: u32, second: u32, micros: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            micros,
        }
    }
}

/// Source of the current local time of day.
pub trait WallClock {
    fn time_of_day(&self) -> TimeOfDay;
}

impl<F: Fn() -> TimeOfDay> WallClock for F {
    fn time_of_day(&self) -> TimeOfDay {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn zero_sleep_returns_immediately() {
        let start = Instant::now();
        MonotonicClock::new().sleep(Duration::ZERO);
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn sleep_blocks_for_at_least_the_request() {
        let start = Instant::now();
        MonotonicClock::new().sleep(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn closure_is_a_wall_clock() {
        let wall = || TimeOfDay::new(13, 5, 7, 250_000);
        assert_eq!(wall.time_of_day().hour, 13);
    }
}
