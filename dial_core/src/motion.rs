//! Easing a hand between two duty-cycles.
//!
//! A move is always [`EASE_STEPS`] equal real-valued increments, paced evenly
//! over the requested duration. Each intermediate value is rounded before it
//! is written.

use std::time::Duration;

use dial_traits::{Clock, PwmChannel};

use crate::error::Result;
use crate::hw_error::map_hw_error;

/// Number of intermediate values per move, independent of duration.
pub const EASE_STEPS: u32 = 50;

/// The sequence of values written during one move.
///
/// Inputs are duty-cycles, so every output stays within `[0, 65535]`.
#[derive(Debug, Clone)]
pub struct Ease {
    current: f64,
    delta: f64,
    remaining: u32,
}

impl Ease {
    pub fn new(start: u16, end: u16) -> Self {
        Self {
            current: f64::from(start),
            delta: (f64::from(end) - f64::from(start)) / f64::from(EASE_STEPS),
            remaining: EASE_STEPS,
        }
    }
}

impl Iterator for Ease {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.current += self.delta;
        Some(self.current.round() as u16)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Ease {}

/// Move `sink` from `start` to `end` over `duration`.
///
/// Sleeps `duration / 50` after every write, including the last.
pub fn ease<C: PwmChannel + ?Sized>(
    start: u16,
    end: u16,
    duration: Duration,
    sink: &mut C,
    clock: &dyn Clock,
) -> Result<()> {
    let step_time = duration / EASE_STEPS;
    for duty in Ease::new(start, end) {
        sink.set_duty_cycle(duty)
            .map_err(|e| map_hw_error(e.as_ref()))?;
        clock.sleep(step_time);
    }
    Ok(())
}
