//! PCA9685 16-channel PWM controller.
//!
//! Register math is plain functions so it can be checked off-target; the I²C
//! device itself needs the `hardware` feature on Linux.
use crate::error::{HwError, Result};

pub const MODE1: u8 = 0x00;
pub const PRESCALE: u8 = 0xFE;
pub const LED0_ON_L: u8 = 0x06;

pub const MODE1_RESTART: u8 = 0x80;
pub const MODE1_AI: u8 = 0x20;
pub const MODE1_SLEEP: u8 = 0x10;

/// Internal oscillator frequency.
pub const OSC_HZ: f64 = 25_000_000.0;
pub const CHANNELS: u8 = 16;

/// Prescaler value for a carrier frequency: `round(osc / (4096 * hz)) - 1`.
pub fn prescale_for(hz: u32) -> Result<u8> {
    if hz == 0 {
        return Err(HwError::InvalidFrequency(hz));
    }
    let pre = (OSC_HZ / (4096.0 * f64::from(hz))).round() - 1.0;
    if !(3.0..=255.0).contains(&pre) {
        return Err(HwError::InvalidFrequency(hz));
    }
    Ok(pre as u8)
}

/// `[ON_L, ON_H, OFF_L, OFF_H]` for a 16-bit duty-cycle.
///
/// The controller has 12-bit resolution; full scale uses the always-on bit.
pub fn channel_registers(duty: u16) -> [u8; 4] {
    if duty == u16::MAX {
        return [0x00, 0x10, 0x00, 0x00];
    }
    let off = (u32::from(duty) + 1) >> 4;
    [0x00, 0x00, (off & 0xFF) as u8, (off >> 8) as u8]
}

/// First register of a channel's 4-register block.
pub fn channel_base(channel: u8) -> Result<u8> {
    if channel >= CHANNELS {
        return Err(HwError::InvalidChannel(channel));
    }
    Ok(LED0_ON_L + 4 * channel)
}

#[cfg(all(feature = "hardware", target_os = "linux"))]
mod device {
    use super::*;
    use dial_traits::PwmChannel;
    use rppal::i2c::I2c;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use tracing::{debug, trace};

    fn i2c_err(e: rppal::i2c::Error) -> HwError {
        HwError::I2c(e.to_string())
    }

    pub struct Pca9685 {
        i2c: I2c,
    }

    impl Pca9685 {
        pub fn open(bus: u8, address: u16) -> Result<Self> {
            let mut i2c = I2c::with_bus(bus).map_err(i2c_err)?;
            i2c.set_slave_address(address).map_err(i2c_err)?;
            i2c.smbus_write_byte(MODE1, MODE1_AI).map_err(i2c_err)?;
            debug!(bus, address, "pca9685 opened");
            Ok(Self { i2c })
        }

        pub fn set_frequency(&mut self, hz: u32) -> Result<()> {
            let prescale = prescale_for(hz)?;
            let old = self.i2c.smbus_read_byte(MODE1).map_err(i2c_err)?;
            // prescaler is only writable while the oscillator sleeps
            self.i2c
                .smbus_write_byte(MODE1, (old & !MODE1_RESTART) | MODE1_SLEEP)
                .map_err(i2c_err)?;
            self.i2c
                .smbus_write_byte(PRESCALE, prescale)
                .map_err(i2c_err)?;
            self.i2c.smbus_write_byte(MODE1, old).map_err(i2c_err)?;
            std::thread::sleep(Duration::from_millis(5));
            self.i2c
                .smbus_write_byte(MODE1, old | MODE1_RESTART | MODE1_AI)
                .map_err(i2c_err)?;
            debug!(hz, prescale, "pca9685 frequency set");
            Ok(())
        }

        pub fn set_duty(&mut self, channel: u8, duty: u16) -> Result<()> {
            let base = channel_base(channel)?;
            trace!(channel, duty, "pca9685 duty write");
            self.i2c
                .block_write(base, &channel_registers(duty))
                .map_err(i2c_err)
        }

        /// Share the controller between per-hand channel handles.
        pub fn into_shared(self) -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(self))
        }
    }

    pub struct Pca9685Channel {
        dev: Rc<RefCell<Pca9685>>,
        channel: u8,
    }

    impl Pca9685Channel {
        pub fn new(dev: Rc<RefCell<Pca9685>>, channel: u8) -> Result<Self> {
            channel_base(channel)?;
            Ok(Self { dev, channel })
        }
    }

    impl PwmChannel for Pca9685Channel {
        fn set_duty_cycle(
            &mut self,
            duty: u16,
        ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.dev.borrow_mut().set_duty(self.channel, duty)?;
            Ok(())
        }
    }
}

#[cfg(all(feature = "hardware", target_os = "linux"))]
pub use device::{Pca9685, Pca9685Channel};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prescale_for_clock_frequency() {
        // 25 MHz / (4096 * 60 Hz) = 101.7 -> 102 - 1
        assert_eq!(prescale_for(60).unwrap(), 101);
        assert_eq!(prescale_for(1526).unwrap(), 3);
        assert_eq!(prescale_for(24).unwrap(), 253);
    }

    #[test]
    fn prescale_rejects_out_of_range() {
        assert!(matches!(prescale_for(0), Err(HwError::InvalidFrequency(0))));
        assert!(matches!(prescale_for(10), Err(HwError::InvalidFrequency(10))));
        assert!(matches!(prescale_for(5000), Err(HwError::InvalidFrequency(5000))));
    }

    #[test]
    fn duty_maps_to_twelve_bit_off_count() {
        assert_eq!(channel_registers(0), [0, 0, 0, 0]);
        // 0x7FFF + 1 = 0x8000 >> 4 = 0x800
        assert_eq!(channel_registers(0x7FFF), [0, 0, 0x00, 0x08]);
        assert_eq!(channel_registers(0xFFFE), [0, 0, 0xFF, 0x0F]);
        assert_eq!(channel_registers(u16::MAX), [0, 0x10, 0, 0]);
    }

    #[test]
    fn channel_base_addresses() {
        assert_eq!(channel_base(0).unwrap(), 0x06);
        assert_eq!(channel_base(2).unwrap(), 0x0E);
        assert_eq!(channel_base(15).unwrap(), 0x42);
        assert!(matches!(channel_base(16), Err(HwError::InvalidChannel(16))));
    }
}
