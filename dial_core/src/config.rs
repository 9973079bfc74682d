//! Runtime configuration used by the clock loop and the calibration session.
//!
//! These are separate from the TOML-deserialized config in `dial_config`;
//! see `conversions` for the mapping.

use std::time::Duration;

/// Hand motion pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionCfg {
    /// Easing window per hand per tick.
    pub ease: Duration,
    /// Pause after all hands have moved.
    pub tick: Duration,
}

impl Default for MotionCfg {
    fn default() -> Self {
        Self {
            ease: Duration::from_millis(20),
            tick: Duration::from_millis(20),
        }
    }
}

/// Calibration session pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCfg {
    /// Deadline for a single key poll; the shutdown flag is checked in between.
    pub key_poll: Duration,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            key_poll: Duration::from_millis(100),
        }
    }
}
