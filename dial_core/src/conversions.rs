//! `From` implementations bridging `dial_config` types to `dial_core` types.

use std::time::Duration;

use dial_config::CalibrationFile;

use crate::calibration::{AnchorTable, CalibrationMap, Dial};
use crate::config::{MotionCfg, SessionCfg};

// ── Calibration document ─────────────────────────────────────────────────────

impl From<&CalibrationFile> for CalibrationMap {
    fn from(f: &CalibrationFile) -> Self {
        let table = |m: &std::collections::BTreeMap<u32, u16>| -> AnchorTable {
            m.iter().map(|(&k, &v)| (k, v)).collect()
        };
        CalibrationMap::from_tables(table(&f.seconds), table(&f.minutes), table(&f.hours))
    }
}

impl From<&CalibrationMap> for CalibrationFile {
    fn from(map: &CalibrationMap) -> Self {
        let entries = |dial: Dial| map.table(dial).iter().collect();
        CalibrationFile {
            seconds: entries(Dial::Seconds),
            minutes: entries(Dial::Minutes),
            hours: entries(Dial::Hours),
        }
    }
}

// ── Runtime pacing ───────────────────────────────────────────────────────────

impl From<&dial_config::MotionCfg> for MotionCfg {
    fn from(c: &dial_config::MotionCfg) -> Self {
        Self {
            ease: Duration::from_millis(c.ease_ms),
            tick: Duration::from_millis(c.tick_ms),
        }
    }
}

impl From<&dial_config::CalibrationCfg> for SessionCfg {
    fn from(c: &dial_config::CalibrationCfg) -> Self {
        Self {
            key_poll: Duration::from_millis(c.key_poll_ms),
        }
    }
}
