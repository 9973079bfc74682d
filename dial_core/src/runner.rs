//! Drives either mode until it finishes or the shutdown flag is raised.
//!
//! Both loops check `shutdown` between steps, so an interrupt is noticed
//! within one tick (run mode) or one key poll (calibration mode).

use std::sync::atomic::{AtomicBool, Ordering};

use dial_traits::{Clock, KeyInput, PwmChannel, WallClock};
use tracing::{debug, info, warn};

use crate::calibration::CalibrationMap;
use crate::clock_loop::ClockLoop;
use crate::config::{MotionCfg, SessionCfg};
use crate::error::{DialError, Result};
use crate::hands::Hands;
use crate::hw_error::map_input_error;
use crate::session::{CalibrationSession, SessionStep};
use crate::store::{CalibrationBackend, CalibrationStore};

/// Run the clock until `shutdown` is set. Returns the number of ticks run.
///
/// The calibration must already exist; a missing map is
/// `ConfigurationMissing` and nothing is driven.
pub fn run_clock<B, C>(
    store: &CalibrationStore<B>,
    hands: &mut Hands<C>,
    wall: &dyn WallClock,
    clock: &dyn Clock,
    motion: MotionCfg,
    shutdown: &AtomicBool,
) -> Result<u64>
where
    B: CalibrationBackend,
    C: PwmChannel,
{
    let map = store.load_required()?;
    let mut clock_loop = ClockLoop::new(map, motion)?;
    info!(ease = ?motion.ease, tick = ?motion.tick, "clock running");

    let mut ticks: u64 = 0;
    while !shutdown.load(Ordering::Relaxed) {
        let now = wall.time_of_day();
        clock_loop.tick(now, hands, clock)?;
        ticks += 1;
        clock_loop.pause(clock);
    }
    info!(ticks, "clock stopped");
    Ok(ticks)
}

/// Run a full calibration session and save the result.
///
/// `on_step` sees every non-idle transition (for operator prompts). An
/// interrupted session returns `Interrupted` and saves nothing.
pub fn run_calibration<B, C, K>(
    store: &mut CalibrationStore<B>,
    hands: &mut Hands<C>,
    keys: &mut K,
    cfg: SessionCfg,
    shutdown: &AtomicBool,
    mut on_step: impl FnMut(&SessionStep),
) -> Result<CalibrationMap>
where
    B: CalibrationBackend,
    C: PwmChannel,
    K: KeyInput + ?Sized,
{
    let map = store.load_or_empty()?;
    let mut session = CalibrationSession::new(map);
    on_step(&session.step(None, hands)?);

    while !session.is_complete() {
        if shutdown.load(Ordering::Relaxed) {
            warn!("calibration interrupted; nothing saved");
            return Err(DialError::Interrupted.into());
        }
        let event = keys
            .poll(cfg.key_poll)
            .map_err(|e| map_input_error(e.as_ref()))?;
        let step = session.step(event, hands)?;
        if step != SessionStep::Idle {
            debug!(?step, "session step");
            on_step(&step);
        }
    }

    let map = session.into_map();
    store.save(&map)?;
    Ok(map)
}
