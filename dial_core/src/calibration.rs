//! Per-dial anchor tables.
//!
//! An anchor pairs a reference value on a dial (e.g. "30 seconds") with the
//! duty-cycle that drives that hand to the matching physical position.
//! Anchors are always traversed in ascending reference order.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::DialError;

const MINUTE_CHECKPOINTS: [u32; 7] = [0, 10, 20, 30, 40, 50, 60];
const HOUR_CHECKPOINTS: [u32; 13] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// One clock hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dial {
    Seconds,
    Minutes,
    Hours,
}

impl Dial {
    /// Calibration and drive order.
    pub const ALL: [Dial; 3] = [Dial::Seconds, Dial::Minutes, Dial::Hours];

    pub const fn label(self) -> &'static str {
        match self {
            Dial::Seconds => "seconds",
            Dial::Minutes => "minutes",
            Dial::Hours => "hours",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Dial::Seconds => 0,
            Dial::Minutes => 1,
            Dial::Hours => 2,
        }
    }

    /// Inclusive reference domain `(min, max)`.
    pub const fn domain(self) -> (u32, u32) {
        match self {
            Dial::Seconds | Dial::Minutes => (0, 60),
            Dial::Hours => (0, 12),
        }
    }

    /// Reference values visited, in order, during calibration.
    pub const fn checkpoints(self) -> &'static [u32] {
        match self {
            Dial::Seconds | Dial::Minutes => &MINUTE_CHECKPOINTS,
            Dial::Hours => &HOUR_CHECKPOINTS,
        }
    }

    /// The dial calibrated after this one.
    pub const fn next(self) -> Option<Dial> {
        match self {
            Dial::Seconds => Some(Dial::Minutes),
            Dial::Minutes => Some(Dial::Hours),
            Dial::Hours => None,
        }
    }
}

impl fmt::Display for Dial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference value → duty-cycle, unique keys, ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorTable {
    anchors: BTreeMap<u32, u16>,
}

impl AnchorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reference: u32) -> Option<u16> {
        self.anchors.get(&reference).copied()
    }

    /// Set an anchor, returning the duty-cycle it replaced.
    pub fn insert(&mut self, reference: u32, duty: u16) -> Option<u16> {
        self.anchors.insert(reference, duty)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Anchors in ascending reference order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16)> + '_ {
        self.anchors.iter().map(|(&k, &v)| (k, v))
    }

    pub fn first(&self) -> Option<(u32, u16)> {
        self.anchors.first_key_value().map(|(&k, &v)| (k, v))
    }

    pub fn last(&self) -> Option<(u32, u16)> {
        self.anchors.last_key_value().map(|(&k, &v)| (k, v))
    }

    /// True when the smallest and largest keys are the dial's domain bounds.
    pub fn spans(&self, dial: Dial) -> bool {
        let (lo, hi) = dial.domain();
        matches!((self.first(), self.last()), (Some((a, _)), Some((b, _))) if a <= lo && b >= hi)
    }
}

impl FromIterator<(u32, u16)> for AnchorTable {
    fn from_iter<I: IntoIterator<Item = (u32, u16)>>(iter: I) -> Self {
        Self {
            anchors: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(u32, u16); N]> for AnchorTable {
    fn from(pairs: [(u32, u16); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// One anchor table per dial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalibrationMap {
    tables: [AnchorTable; 3],
}

impl CalibrationMap {
    /// All three tables empty; the starting point of a first calibration.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_tables(seconds: AnchorTable, minutes: AnchorTable, hours: AnchorTable) -> Self {
        Self {
            tables: [seconds, minutes, hours],
        }
    }

    pub fn table(&self, dial: Dial) -> &AnchorTable {
        &self.tables[dial.index()]
    }

    pub fn table_mut(&mut self, dial: Dial) -> &mut AnchorTable {
        &mut self.tables[dial.index()]
    }

    /// Check the map can drive the clock: every dial needs at least one anchor.
    ///
    /// Tables that cannot interpolate over their whole domain are allowed but
    /// logged, since the hand will sit still outside the recorded range.
    pub fn validate_for_run(&self) -> Result<(), DialError> {
        for dial in Dial::ALL {
            let table = self.table(dial);
            if table.is_empty() {
                return Err(DialError::EmptyAnchorTable(dial));
            }
            if table.len() < 2 {
                tracing::warn!(dial = dial.label(), "single anchor; hand will not move");
            } else if !table.spans(dial) {
                let (lo, hi) = dial.domain();
                tracing::warn!(
                    dial = dial.label(),
                    lo,
                    hi,
                    "anchors do not cover the full dial"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_iterate_in_numeric_order() {
        let t: AnchorTable = [(60, 3), (0, 1), (10, 2)].into();
        let keys: Vec<u32> = t.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![0, 10, 60]);
        assert_eq!(t.first(), Some((0, 1)));
        assert_eq!(t.last(), Some((60, 3)));
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut t = AnchorTable::new();
        assert_eq!(t.insert(30, 100), None);
        assert_eq!(t.insert(30, 200), Some(100));
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(30), Some(200));
    }

    #[test]
    fn checkpoints_per_dial() {
        assert_eq!(Dial::Seconds.checkpoints(), &[0, 10, 20, 30, 40, 50, 60]);
        assert_eq!(Dial::Minutes.checkpoints().len(), 7);
        assert_eq!(Dial::Hours.checkpoints().len(), 13);
        assert_eq!(Dial::Hours.checkpoints().last(), Some(&12));
    }

    #[test]
    fn spans_requires_both_bounds() {
        assert!(AnchorTable::from([(0, 1), (60, 2)]).spans(Dial::Seconds));
        assert!(!AnchorTable::from([(0, 1), (50, 2)]).spans(Dial::Seconds));
        assert!(AnchorTable::from([(0, 1), (12, 2)]).spans(Dial::Hours));
        assert!(!AnchorTable::new().spans(Dial::Hours));
    }

    #[test]
    fn validate_for_run_rejects_empty_tables() {
        let mut map = CalibrationMap::empty();
        assert_eq!(
            map.validate_for_run(),
            Err(DialError::EmptyAnchorTable(Dial::Seconds))
        );
        map.table_mut(Dial::Seconds).insert(0, 10);
        map.table_mut(Dial::Minutes).insert(0, 10);
        assert_eq!(
            map.validate_for_run(),
            Err(DialError::EmptyAnchorTable(Dial::Hours))
        );
        map.table_mut(Dial::Hours).insert(0, 10);
        assert_eq!(map.validate_for_run(), Ok(()));
    }
}
