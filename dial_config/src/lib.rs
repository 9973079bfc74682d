#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and calibration persistence for the dial clock.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - `CalibrationFile` is the on-disk JSON document holding one anchor table
//!   per dial; loading distinguishes a missing file from a malformed one.
use serde::Deserialize;
use std::path::PathBuf;

pub mod calibration;

pub use calibration::{
    CalibrationFile, CalibrationFileError, load_calibration_json, parse_calibration_json,
    save_calibration_json,
};

/// Default location of the calibration document, relative to the working directory.
pub const DEFAULT_CALIBRATION_FILE: &str = "calibration_data.json";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PwmCfg {
    /// PCA9685 carrier frequency. Set once at startup.
    pub frequency_hz: u32,
    /// Linux I²C bus number (`/dev/i2c-N`)
    pub i2c_bus: u8,
    /// 7-bit controller address
    pub address: u16,
}

impl Default for PwmCfg {
    fn default() -> Self {
        Self {
            frequency_hz: 60,
            i2c_bus: 1,
            address: 0x40,
        }
    }
}

/// Controller channel wired to each hand.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Channels {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
}

impl Default for Channels {
    fn default() -> Self {
        Self {
            seconds: 2,
            minutes: 1,
            hours: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MotionCfg {
    /// Easing window per hand per clock tick (ms)
    pub ease_ms: u64,
    /// Pause between clock ticks (ms)
    pub tick_ms: u64,
}

impl Default for MotionCfg {
    fn default() -> Self {
        Self {
            ease_ms: 20,
            tick_ms: 20,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CalibrationCfg {
    /// Path of the persisted anchor tables (JSON)
    pub file: PathBuf,
    /// Deadline for a single key poll during calibration (ms)
    pub key_poll_ms: u64,
}

impl Default for CalibrationCfg {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_CALIBRATION_FILE),
            key_poll_ms: 100,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub pwm: PwmCfg,
    pub channels: Channels,
    pub motion: MotionCfg,
    pub calibration: CalibrationCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// PCA9685 prescaler limits translate to roughly 24 Hz ..= 1526 Hz.
const PWM_FREQUENCY_RANGE: std::ops::RangeInclusive<u32> = 24..=1526;
/// PCA9685 exposes 16 channels.
const CHANNEL_COUNT: u8 = 16;

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // PWM
        if !PWM_FREQUENCY_RANGE.contains(&self.pwm.frequency_hz) {
            eyre::bail!("pwm.frequency_hz must be in [24, 1526]");
        }
        if self.pwm.address > 0x7F {
            eyre::bail!("pwm.address must be a 7-bit I2C address");
        }

        // Channels
        let chans = [
            ("seconds", self.channels.seconds),
            ("minutes", self.channels.minutes),
            ("hours", self.channels.hours),
        ];
        for (name, ch) in chans {
            if ch >= CHANNEL_COUNT {
                eyre::bail!("channels.{name} must be in [0, 15]");
            }
        }
        if self.channels.seconds == self.channels.minutes
            || self.channels.seconds == self.channels.hours
            || self.channels.minutes == self.channels.hours
        {
            eyre::bail!("channels must be pairwise distinct");
        }

        // Motion
        if self.motion.tick_ms == 0 {
            eyre::bail!("motion.tick_ms must be >= 1");
        }
        if self.motion.ease_ms > 60 * 1000 {
            eyre::bail!("motion.ease_ms is unreasonably large (>60s)");
        }

        // Calibration
        if self.calibration.key_poll_ms == 0 {
            eyre::bail!("calibration.key_poll_ms must be >= 1");
        }
        if self.calibration.file.as_os_str().is_empty() {
            eyre::bail!("calibration.file must not be empty");
        }

        // Logging
        if let Some(r) = self.logging.rotation.as_deref()
            && !matches!(r, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
