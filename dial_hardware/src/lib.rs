//! Hardware backends for the dial clock: simulated channels, the PCA9685
//! PWM controller and the terminal key source.
pub mod error;
pub mod keys;
pub mod pca9685;
#[cfg(unix)]
pub mod terminal;
#[cfg(unix)]
pub mod util;

use dial_traits::PwmChannel;
use std::cell::Cell;
use std::rc::Rc;

pub use keys::KeyDecoder;
#[cfg(all(feature = "hardware", target_os = "linux"))]
pub use pca9685::{Pca9685, Pca9685Channel};
#[cfg(unix)]
pub use terminal::{RawModeGuard, TerminalKeys};

/// Simulated PWM channel. Remembers the last duty-cycle written.
pub struct SimulatedChannel {
    name: &'static str,
    duty: Rc<Cell<u16>>,
}

impl SimulatedChannel {
    pub fn new(name: &'static str) -> Self {
        SimulatedChannel {
            name,
            duty: Rc::new(Cell::new(0)),
        }
    }

    /// Shared view of the last written duty-cycle.
    pub fn monitor(&self) -> Rc<Cell<u16>> {
        Rc::clone(&self.duty)
    }
}

impl PwmChannel for SimulatedChannel {
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::trace!(channel = self.name, duty, "duty write (simulated)");
        self.duty.set(duty);
        Ok(())
    }
}
