pub mod clock;

pub use clock::{Clock, MonotonicClock, TimeOfDay, WallClock};

/// One actuator output. Duty-cycle is the full 16-bit range, 0 = off.
pub trait PwmChannel {
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

impl<T: PwmChannel + ?Sized> PwmChannel for Box<T> {
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).set_duty_cycle(duty)
    }
}

/// Operator key events understood by the calibration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Confirm,
    Skip,
    FineIncrement,
    FineDecrement,
    CoarseIncrement,
    CoarseDecrement,
}

pub trait KeyInput {
    /// Wait at most `timeout` for the next key event.
    ///
    /// Returns `Ok(None)` when nothing (or nothing recognised) arrived in time.
    fn poll(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<Option<KeyEvent>, Box<dyn std::error::Error + Send + Sync>>;
}
