//! Interactive calibration state machine.
//!
//! The operator walks every checkpoint of every dial in order (seconds,
//! minutes, hours), nudging the hand with fine/coarse steps and then either
//! confirming the position or skipping it. Each call to
//! [`CalibrationSession::step`] applies at most one key event.
//!
//! ```text
//! SelectDial(Seconds) ──► Adjust(cursor) ──Confirm/Skip──► Adjust(next checkpoint)
//!                            │  ▲                          │ (last checkpoint)
//!                            └──┘ Fine/Coarse ±            ▼
//!                                                Adjust(first checkpoint of next dial)
//!                                                          │ (last dial)
//!                                                          ▼
//!                                                       Complete
//! ```

use dial_traits::{KeyEvent, PwmChannel};
use tracing::{debug, info};

use crate::calibration::{CalibrationMap, Dial};
use crate::error::Result;
use crate::hands::Hands;

pub const FINE_STEP: u16 = 50;
pub const COARSE_STEP: u16 = 500;

/// Where the operator currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub dial: Dial,
    /// Position within `dial.checkpoints()`.
    pub index: usize,
    pub checkpoint: u32,
    /// Duty-cycle currently applied to the hand.
    pub working: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// About to start on a dial; resolved by the next `step`.
    SelectDial(Dial),
    Adjust(Cursor),
    Complete,
}

/// What a single `step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// No event; nothing changed.
    Idle,
    /// The first checkpoint was entered and its seed value applied.
    Entered(Cursor),
    /// Working value moved.
    Adjusted(Cursor),
    /// Working value stored as the anchor; `next` is the new position.
    Recorded {
        dial: Dial,
        checkpoint: u32,
        duty: u16,
        next: Option<Cursor>,
    },
    /// Anchor left as it was (`kept`, if any).
    Skipped {
        dial: Dial,
        checkpoint: u32,
        kept: Option<u16>,
        next: Option<Cursor>,
    },
    /// Nothing left to do.
    Complete,
}

/// Apply a fine/coarse adjustment, saturating at the duty-cycle bounds.
/// Confirm and Skip leave the value alone.
pub fn adjust(working: u16, event: KeyEvent) -> u16 {
    match event {
        KeyEvent::FineIncrement => working.saturating_add(FINE_STEP),
        KeyEvent::FineDecrement => working.saturating_sub(FINE_STEP),
        KeyEvent::CoarseIncrement => working.saturating_add(COARSE_STEP),
        KeyEvent::CoarseDecrement => working.saturating_sub(COARSE_STEP),
        KeyEvent::Confirm | KeyEvent::Skip => working,
    }
}

/// Owns the working copy of the calibration map for the session's lifetime.
#[derive(Debug)]
pub struct CalibrationSession {
    map: CalibrationMap,
    state: SessionState,
}

impl CalibrationSession {
    /// Start a session on top of `map`. Existing anchors seed the working
    /// values and survive unless re-confirmed.
    pub fn new(map: CalibrationMap) -> Self {
        Self {
            map,
            state: SessionState::SelectDial(Dial::Seconds),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cursor(&self) -> Option<Cursor> {
        match self.state {
            SessionState::Adjust(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn map(&self) -> &CalibrationMap {
        &self.map
    }

    pub fn into_map(self) -> CalibrationMap {
        self.map
    }

    /// Advance by one (optional) key event.
    ///
    /// A pending `SelectDial` is resolved first, so the event applies to the
    /// dial's first checkpoint.
    pub fn step<C: PwmChannel>(
        &mut self,
        event: Option<KeyEvent>,
        hands: &mut Hands<C>,
    ) -> Result<SessionStep> {
        let mut entered = None;
        if let SessionState::SelectDial(dial) = self.state {
            entered = Some(self.enter(dial, 0, hands)?);
        }
        let SessionState::Adjust(mut cur) = self.state else {
            return Ok(SessionStep::Complete);
        };
        let Some(event) = event else {
            return Ok(entered.map_or(SessionStep::Idle, SessionStep::Entered));
        };

        match event {
            KeyEvent::Confirm => {
                self.map
                    .table_mut(cur.dial)
                    .insert(cur.checkpoint, cur.working);
                info!(
                    dial = cur.dial.label(),
                    checkpoint = cur.checkpoint,
                    duty = cur.working,
                    "anchor recorded"
                );
                let next = self.advance(cur, hands)?;
                Ok(SessionStep::Recorded {
                    dial: cur.dial,
                    checkpoint: cur.checkpoint,
                    duty: cur.working,
                    next,
                })
            }
            KeyEvent::Skip => {
                let kept = self.map.table(cur.dial).get(cur.checkpoint);
                info!(
                    dial = cur.dial.label(),
                    checkpoint = cur.checkpoint,
                    kept,
                    "anchor skipped"
                );
                let next = self.advance(cur, hands)?;
                Ok(SessionStep::Skipped {
                    dial: cur.dial,
                    checkpoint: cur.checkpoint,
                    kept,
                    next,
                })
            }
            adjustment => {
                cur.working = adjust(cur.working, adjustment);
                self.state = SessionState::Adjust(cur);
                hands.set(cur.dial, cur.working)?;
                debug!(dial = cur.dial.label(), duty = cur.working, "adjusted");
                Ok(SessionStep::Adjusted(cur))
            }
        }
    }

    /// Move onto a checkpoint, seed its working value and show it on the hand.
    fn enter<C: PwmChannel>(
        &mut self,
        dial: Dial,
        index: usize,
        hands: &mut Hands<C>,
    ) -> Result<Cursor> {
        let checkpoint = dial.checkpoints()[index];
        let working = self.map.table(dial).get(checkpoint).unwrap_or(0);
        let cur = Cursor {
            dial,
            index,
            checkpoint,
            working,
        };
        self.state = SessionState::Adjust(cur);
        hands.set(dial, working)?;
        Ok(cur)
    }

    fn advance<C: PwmChannel>(
        &mut self,
        cur: Cursor,
        hands: &mut Hands<C>,
    ) -> Result<Option<Cursor>> {
        if cur.index + 1 < cur.dial.checkpoints().len() {
            return self.enter(cur.dial, cur.index + 1, hands).map(Some);
        }
        match cur.dial.next() {
            Some(dial) => self.enter(dial, 0, hands).map(Some),
            None => {
                self.state = SessionState::Complete;
                info!("calibration session complete");
                Ok(None)
            }
        }
    }
}
