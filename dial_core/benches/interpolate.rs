use std::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use dial_core::mocks::{ManualClock, RecordingChannel};
use dial_core::{AnchorTable, CalibrationMap, ClockLoop, Hands, MotionCfg, ease, interpolate};
use dial_traits::TimeOfDay;

// Full checkpoint table with a slightly non-linear response, like a real movement
fn realistic_table(step: u32, max: u32) -> AnchorTable {
    (0..=max)
        .step_by(step as usize)
        .map(|k| {
            let x = f64::from(k) / f64::from(max);
            let duty = 600.0 + 5200.0 * x + 300.0 * (x * std::f64::consts::PI).sin();
            (k, duty as u16)
        })
        .collect()
}

fn group_sizing(g: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>) {
    // BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p dial_core --bench interpolate
    let samples = std::env::var("BENCH_SAMPLE_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(50);
    g.sample_size(samples.max(10));
    if let Some(ms) = std::env::var("BENCH_MEAS_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
    {
        g.measurement_time(Duration::from_millis(ms.max(1)));
    }
}

pub fn bench_interpolate(c: &mut Criterion) {
    let mut g = c.benchmark_group("interpolate");
    group_sizing(&mut g);

    let minutes = realistic_table(10, 60);
    let hours = realistic_table(1, 12);
    g.bench_function("minutes_sweep", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for i in 0..600 {
                let v = f64::from(i) / 10.0;
                acc += u32::from(interpolate(black_box(&minutes), v).unwrap_or(0));
            }
            black_box(acc)
        })
    });
    g.bench_function("hours_sweep", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for i in 0..720 {
                let v = 1.0 + f64::from(i) / 60.0;
                acc += u32::from(interpolate(black_box(&hours), v).unwrap_or(0));
            }
            black_box(acc)
        })
    });
    g.finish();
}

pub fn bench_tick(c: &mut Criterion) {
    let mut g = c.benchmark_group("clock_tick");
    group_sizing(&mut g);

    let map = CalibrationMap::from_tables(
        realistic_table(10, 60),
        realistic_table(10, 60),
        realistic_table(1, 12),
    );
    let motion = MotionCfg {
        ease: Duration::ZERO,
        tick: Duration::ZERO,
    };
    g.bench_function("ease_only", |b| {
        let clock = ManualClock::new();
        b.iter_batched(
            RecordingChannel::new,
            |mut ch| ease(black_box(0), black_box(5800), Duration::ZERO, &mut ch, &clock),
            BatchSize::SmallInput,
        )
    });
    g.bench_function("full_tick", |b| {
        let clock = ManualClock::new();
        b.iter_batched(
            || {
                let hands = Hands::new(
                    RecordingChannel::new(),
                    RecordingChannel::new(),
                    RecordingChannel::new(),
                );
                let lp = ClockLoop::new(map.clone(), motion).unwrap_or_else(|e| panic!("{e}"));
                (hands, lp)
            },
            |(mut hands, mut lp)| lp.tick(TimeOfDay::new(10, 8, 42, 250_000), &mut hands, &clock),
            BatchSize::SmallInput,
        )
    });
    g.finish();
}

criterion_group!(benches, bench_interpolate, bench_tick);
criterion_main!(benches);
