//! Test and helper mocks for dial_core

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dial_config::CalibrationFile;
use dial_traits::{Clock, KeyEvent, KeyInput, PwmChannel};

use crate::error::DialError;
use crate::store::CalibrationBackend;

/// A channel that records every duty-cycle written to it.
#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    log: Rc<RefCell<Vec<u16>>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values written so far, oldest first.
    pub fn values(&self) -> Vec<u16> {
        self.log.borrow().clone()
    }

    pub fn last(&self) -> Option<u16> {
        self.log.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl PwmChannel for RecordingChannel {
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.log.borrow_mut().push(duty);
        Ok(())
    }
}

/// A channel whose writes always fail.
#[derive(Debug, Default)]
pub struct FailingChannel;

impl PwmChannel for FailingChannel {
    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("channel offline")))
    }
}

/// Key source replaying a fixed script. `None` entries are poll timeouts.
/// Once the script runs out every poll fails.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    script: VecDeque<Option<KeyEvent>>,
}

impl ScriptedKeys {
    pub fn new(script: impl IntoIterator<Item = Option<KeyEvent>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Script made only of events, no timeouts.
    pub fn events(events: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self::new(events.into_iter().map(Some))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl KeyInput for ScriptedKeys {
    fn poll(
        &mut self,
        _timeout: Duration,
    ) -> Result<Option<KeyEvent>, Box<dyn std::error::Error + Send + Sync>> {
        self.script
            .pop_front()
            .ok_or_else(|| "key script exhausted".into())
    }
}

/// In-memory calibration storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    pub stored: Option<CalibrationFile>,
    pub writes: usize,
}

impl MemoryBackend {
    pub fn with(file: CalibrationFile) -> Self {
        Self {
            stored: Some(file),
            writes: 0,
        }
    }
}

impl CalibrationBackend for MemoryBackend {
    fn read(&self) -> Result<Option<CalibrationFile>, DialError> {
        Ok(self.stored.clone())
    }

    fn write(&mut self, file: &CalibrationFile) -> Result<(), DialError> {
        self.stored = Some(file.clone());
        self.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Deterministic clock: `sleep` advances time instead of blocking.
#[derive(Debug, Clone)]
pub struct ManualClock {
    offset: Arc<Mutex<Duration>>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            offset: Arc::new(Mutex::new(Duration::ZERO)),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Total simulated time slept.
    pub fn elapsed(&self) -> Duration {
        self.offset.lock().map(|g| *g).unwrap_or(Duration::ZERO)
    }

    /// Every requested sleep, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl Clock for ManualClock {
    fn sleep(&self, d: Duration) {
        if let Ok(mut off) = self.offset.lock() {
            *off = off.saturating_add(d);
        }
        if let Ok(mut s) = self.sleeps.lock() {
            s.push(d);
        }
    }
}
