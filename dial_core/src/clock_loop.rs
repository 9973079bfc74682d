//! Run mode: wall time → per-dial targets → eased hands.

use dial_traits::{Clock, PwmChannel, TimeOfDay};
use tracing::trace;

use crate::calibration::{CalibrationMap, Dial};
use crate::config::MotionCfg;
use crate::error::{DialError, Result};
use crate::hands::Hands;
use crate::interpolate::interpolate;
use crate::motion::ease;

/// Continuous reference values for each dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionalTime {
    /// `[0, 60)`
    pub second: f64,
    /// `[0, 60)`
    pub minute: f64,
    /// `[1, 13)`; midnight and noon read as 12.
    pub hour: f64,
}

impl FractionalTime {
    pub fn from_time_of_day(t: TimeOfDay) -> Self {
        let second = f64::from(t.second) + f64::from(t.micros) / 1_000_000.0;
        let minute = f64::from(t.minute) + second / 60.0;
        let hour12 = match t.hour % 12 {
            0 => 12,
            h => h,
        };
        let hour = f64::from(hour12) + minute / 60.0;
        Self {
            second,
            minute,
            hour,
        }
    }

    pub fn value(&self, dial: Dial) -> f64 {
        match dial {
            Dial::Seconds => self.second,
            Dial::Minutes => self.minute,
            Dial::Hours => self.hour,
        }
    }
}

/// State carried between ticks of the run loop.
#[derive(Debug)]
pub struct ClockLoop {
    map: CalibrationMap,
    /// Duty-cycle each hand was last driven to, indexed by `Dial::index`.
    last_duty: [u16; 3],
    motion: MotionCfg,
}

impl ClockLoop {
    /// Fails with `EmptyAnchorTable` if any dial cannot be driven.
    pub fn new(map: CalibrationMap, motion: MotionCfg) -> std::result::Result<Self, DialError> {
        map.validate_for_run()?;
        Ok(Self {
            map,
            last_duty: [0; 3],
            motion,
        })
    }

    pub fn last_duty(&self) -> [u16; 3] {
        self.last_duty
    }

    pub fn motion(&self) -> MotionCfg {
        self.motion
    }

    /// Target duty-cycles for `now`, in `Dial::ALL` order.
    pub fn targets(&self, now: TimeOfDay) -> std::result::Result<[u16; 3], DialError> {
        let t = FractionalTime::from_time_of_day(now);
        let mut out = [0u16; 3];
        for dial in Dial::ALL {
            out[dial.index()] = interpolate(self.map.table(dial), t.value(dial))
                .ok_or(DialError::EmptyAnchorTable(dial))?;
        }
        Ok(out)
    }

    /// One iteration: compute targets, ease each hand in turn (seconds,
    /// minutes, hours), then remember the targets.
    pub fn tick<C: PwmChannel>(
        &mut self,
        now: TimeOfDay,
        hands: &mut Hands<C>,
        clock: &dyn Clock,
    ) -> Result<[u16; 3]> {
        let targets = self.targets(now)?;
        for dial in Dial::ALL {
            let i = dial.index();
            ease(
                self.last_duty[i],
                targets[i],
                self.motion.ease,
                hands.channel_mut(dial),
                clock,
            )?;
        }
        trace!(
            seconds = targets[0],
            minutes = targets[1],
            hours = targets[2],
            "tick"
        );
        self.last_duty = targets;
        Ok(targets)
    }

    /// Pause between ticks.
    pub fn pause(&self, clock: &dyn Clock) {
        clock.sleep(self.motion.tick);
    }
}
