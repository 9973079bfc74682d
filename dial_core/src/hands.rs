//! The three actuator channels, passed explicitly into both modes.

use dial_traits::PwmChannel;

use crate::calibration::Dial;
use crate::error::Result;
use crate::hw_error::map_hw_error;

pub struct Hands<C> {
    pub seconds: C,
    pub minutes: C,
    pub hours: C,
}

impl<C: PwmChannel> Hands<C> {
    pub fn new(seconds: C, minutes: C, hours: C) -> Self {
        Self {
            seconds,
            minutes,
            hours,
        }
    }

    pub fn channel_mut(&mut self, dial: Dial) -> &mut C {
        match dial {
            Dial::Seconds => &mut self.seconds,
            Dial::Minutes => &mut self.minutes,
            Dial::Hours => &mut self.hours,
        }
    }

    /// Write one duty-cycle to the hand for `dial`.
    pub fn set(&mut self, dial: Dial, duty: u16) -> Result<()> {
        self.channel_mut(dial)
            .set_duty_cycle(duty)
            .map_err(|e| map_hw_error(e.as_ref()))?;
        Ok(())
    }
}
