use std::time::Duration;

use dial_core::mocks::{FailingChannel, ManualClock, RecordingChannel};
use dial_core::{DialError, EASE_STEPS, ease};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
fn ease_emits_fifty_even_steps() {
    let mut sink = RecordingChannel::new();
    let clock = ManualClock::new();
    ease(1000, 2000, Duration::from_millis(20), &mut sink, &clock).unwrap();

    let values = sink.values();
    assert_eq!(values.len(), 50);
    let expected: Vec<u16> = (1..=50).map(|i| 1000 + 20 * i).collect();
    assert_eq!(values, expected);

    // paced: 50 sleeps of 20ms / 50
    let sleeps = clock.sleeps();
    assert_eq!(sleeps.len(), EASE_STEPS as usize);
    assert!(sleeps.iter().all(|d| *d == Duration::from_micros(400)));
    assert_eq!(clock.elapsed(), Duration::from_millis(20));
}

#[rstest]
fn zero_duration_does_not_pause() {
    let mut sink = RecordingChannel::new();
    let clock = ManualClock::new();
    ease(300, 0, Duration::ZERO, &mut sink, &clock).unwrap();
    assert_eq!(sink.values().len(), 50);
    assert_eq!(sink.last(), Some(0));
    assert_eq!(clock.elapsed(), Duration::ZERO);
}

#[rstest]
fn channel_failure_surfaces_as_hardware_error() {
    let clock = ManualClock::new();
    let err = ease(0, 100, Duration::from_millis(1), &mut FailingChannel, &clock)
        .expect_err("write must fail");
    match err.downcast_ref::<DialError>() {
        Some(DialError::Hardware(msg)) => assert!(msg.contains("offline")),
        other => panic!("unexpected error: {other:?}"),
    }
    // nothing paced after the failed write
    assert!(clock.sleeps().is_empty());
}

proptest! {
    #[test]
    fn ease_is_monotonic_and_lands_on_target(start in any::<u16>(), end in any::<u16>()) {
        let mut sink = RecordingChannel::new();
        let clock = ManualClock::new();
        ease(start, end, Duration::from_millis(1), &mut sink, &clock).unwrap();
        let v = sink.values();
        prop_assert_eq!(v.len(), 50);
        if end >= start {
            prop_assert!(v.windows(2).all(|w| w[0] <= w[1]));
        } else {
            prop_assert!(v.windows(2).all(|w| w[0] >= w[1]));
        }
        prop_assert_eq!(*v.last().unwrap(), end);
    }
}
