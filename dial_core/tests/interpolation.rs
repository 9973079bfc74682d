use dial_core::{AnchorTable, interpolate};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(15.0, 1500)]
#[case(45.0, 2500)]
#[case(60.0, 3000)]
#[case(70.0, 3000)]
fn three_anchor_examples(#[case] value: f64, #[case] expected: u16) {
    let table: AnchorTable = [(0, 1000), (30, 2000), (60, 3000)].into();
    assert_eq!(interpolate(&table, value), Some(expected));
}

#[rstest]
fn fallback_uses_largest_key_on_both_sides() {
    let table: AnchorTable = [(10, 500), (20, 900), (50, 4000)].into();
    assert_eq!(interpolate(&table, 55.0), Some(4000));
    // below range: also the largest key, not the smallest
    assert_eq!(interpolate(&table, 0.0), Some(4000));
}

prop_compose! {
    /// 2..=8 anchors with distinct keys in [0, 60].
    fn table_strategy()(
        anchors in prop::collection::btree_map(0u32..=60, any::<u16>(), 2..=8)
    ) -> AnchorTable {
        anchors.into_iter().collect()
    }
}

prop_compose! {
    /// Anchors whose duty-cycles increase with the key.
    fn monotonic_table()(
        keys in prop::collection::btree_set(0u32..=60, 2..=8),
        start in 0u16..1000,
        steps in prop::collection::vec(0u16..5000, 8),
    ) -> AnchorTable {
        let mut duty = start;
        keys.into_iter()
            .zip(steps)
            .map(|(k, s)| {
                let d = duty;
                duty = duty.saturating_add(s);
                (k, d)
            })
            .collect()
    }
}

proptest! {
    #[test]
    fn anchor_keys_return_their_duty(table in table_strategy()) {
        for (k, d) in table.iter() {
            prop_assert_eq!(interpolate(&table, f64::from(k)), Some(d));
        }
    }

    #[test]
    fn between_anchors_stays_between_duties(table in table_strategy(), frac in 0.0f64..1.0) {
        let anchors: Vec<(u32, u16)> = table.iter().collect();
        for w in anchors.windows(2) {
            let ((lo_k, lo_d), (hi_k, hi_d)) = (w[0], w[1]);
            let v = f64::from(lo_k) + frac * f64::from(hi_k - lo_k);
            let got = interpolate(&table, v).unwrap();
            prop_assert!(got >= lo_d.min(hi_d) && got <= lo_d.max(hi_d),
                "{got} not within [{lo_d}, {hi_d}] at {v}");
        }
    }

    #[test]
    fn monotonic_anchors_give_monotonic_output(
        table in monotonic_table(),
        a in 0.0f64..=60.0,
        b in 0.0f64..=60.0,
    ) {
        let (first, _) = table.first().unwrap();
        let (last, _) = table.last().unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        // only inside the anchored range; outside it the fallback applies
        prop_assume!(lo >= f64::from(first) && hi <= f64::from(last));
        prop_assert!(interpolate(&table, lo).unwrap() <= interpolate(&table, hi).unwrap());
    }

    #[test]
    fn above_range_returns_largest_key(table in table_strategy(), extra in 0.001f64..100.0) {
        let (last_k, last_d) = table.last().unwrap();
        prop_assert_eq!(interpolate(&table, f64::from(last_k) + extra), Some(last_d));
    }
}
