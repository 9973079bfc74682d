//! Piecewise-linear lookup from reference value to duty-cycle.

use crate::calibration::AnchorTable;
use crate::util::clamp_duty;

/// Duty-cycle for `value` on a dial calibrated by `table`.
///
/// Walks adjacent anchor pairs in ascending order and interpolates linearly
/// inside the first pair with `lo <= value <= hi`, truncating toward zero.
///
/// When no pair brackets `value` (below the first key, above the last key,
/// or a single anchor) the duty-cycle of the anchor with the **largest** key
/// is returned. That applies below the range too, so a hand whose table
/// does not start at the dial minimum parks at its top anchor there.
///
/// Returns `None` for an empty table.
pub fn interpolate(table: &AnchorTable, value: f64) -> Option<u16> {
    let (_, last_duty) = table.last()?;
    for ((lo_key, lo_duty), (hi_key, hi_duty)) in table.iter().zip(table.iter().skip(1)) {
        let (lo, hi) = (f64::from(lo_key), f64::from(hi_key));
        if lo <= value && value <= hi {
            let span = f64::from(hi_duty) - f64::from(lo_duty);
            let duty = f64::from(lo_duty) + span * ((value - lo) / (hi - lo));
            return Some(clamp_duty(duty.trunc()));
        }
    }
    Some(last_duty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn three_point() -> AnchorTable {
        [(0, 1000), (30, 2000), (60, 3000)].into()
    }

    #[rstest]
    #[case(15.0, 1500)]
    #[case(45.0, 2500)]
    #[case(60.0, 3000)]
    #[case(70.0, 3000)]
    #[case(0.0, 1000)]
    #[case(30.0, 2000)]
    fn three_point_table(#[case] value: f64, #[case] expected: u16) {
        assert_eq!(interpolate(&three_point(), value), Some(expected));
    }

    #[test]
    fn truncates_toward_zero() {
        let t: AnchorTable = [(0, 0), (3, 10)].into();
        // 10 * 1/3 = 3.33..
        assert_eq!(interpolate(&t, 1.0), Some(3));
        // 10 * 2/3 = 6.66..
        assert_eq!(interpolate(&t, 2.0), Some(6));
    }

    #[test]
    fn decreasing_anchors_interpolate_downward() {
        let t: AnchorTable = [(0, 4000), (60, 1000)].into();
        assert_eq!(interpolate(&t, 30.0), Some(2500));
        assert_eq!(interpolate(&t, 45.0), Some(1750));
    }

    #[test]
    fn below_first_anchor_falls_back_to_largest_key() {
        // Deliberately not the smallest key's duty-cycle.
        let t: AnchorTable = [(10, 1000), (60, 3000)].into();
        assert_eq!(interpolate(&t, 5.0), Some(3000));
    }

    #[test]
    fn single_anchor_is_constant() {
        let t: AnchorTable = [(30, 1234)].into();
        assert_eq!(interpolate(&t, 0.0), Some(1234));
        assert_eq!(interpolate(&t, 30.0), Some(1234));
        assert_eq!(interpolate(&t, 59.9), Some(1234));
    }

    #[test]
    fn empty_table_has_no_value() {
        assert_eq!(interpolate(&AnchorTable::new(), 10.0), None);
    }

    #[test]
    fn nan_takes_the_fallback() {
        assert_eq!(interpolate(&three_point(), f64::NAN), Some(3000));
    }
}
