#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core dial clock logic (hardware-agnostic).
//!
//! All hardware interactions go through `dial_traits::PwmChannel` and
//! `dial_traits::KeyInput`; time goes through `dial_traits::Clock` and
//! `dial_traits::WallClock`.
//!
//! ## Architecture
//!
//! - **Calibration**: per-dial anchor tables, reference value → duty-cycle (`calibration`)
//! - **Store**: loading/saving the anchor tables through a backend (`store`)
//! - **Interpolation**: piecewise-linear lookup between anchors (`interpolate`)
//! - **Motion**: 50-step easing between two duty-cycles (`motion`)
//! - **Session**: the interactive calibration state machine (`session`)
//! - **Clock loop**: wall time → targets → eased hands (`clock_loop`)
//! - **Runner**: drives either mode until done or shut down (`runner`)
//!
//! ## Duty-cycles
//!
//! Duty-cycles are `u16` throughout, so the [0, 65535] domain is a type
//! invariant. Every computation that leaves the integer domain goes back
//! through [`util::clamp_duty`].

pub mod calibration;
pub mod clock_loop;
pub mod config;
pub mod conversions;
pub mod error;
pub mod hands;
pub mod hw_error;
pub mod interpolate;
pub mod mocks;
pub mod motion;
pub mod runner;
pub mod session;
pub mod store;
pub mod util;
pub mod wall;

pub use calibration::{AnchorTable, CalibrationMap, Dial};
pub use clock_loop::{ClockLoop, FractionalTime};
pub use config::{MotionCfg, SessionCfg};
pub use error::{DialError, Result};
pub use hands::Hands;
pub use interpolate::interpolate;
pub use motion::{EASE_STEPS, Ease, ease};
pub use session::{CalibrationSession, Cursor, SessionState, SessionStep};
pub use store::{CalibrationBackend, CalibrationStore, JsonFileBackend};
pub use wall::LocalWallClock;
