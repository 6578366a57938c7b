// tests/simulation_integration.rs
//! Integration tests for the scheduler lifecycle and the public API.
//!
//! Timer tests run under tokio's paused clock so cadence assertions are
//! exact instead of sleep-and-hope.

use std::sync::Arc;
use std::time::Duration;

use vitals_core::config::SimulationConfig;
use vitals_core::sim::{Condition, DeviceFrame, Scenario, Scheduler, SubjectSeed, Trend};
use vitals_core::utils::{MockTimeProvider, SequenceRandomness};

const MILLIS_PER_HOUR: u64 = 3_600_000;

fn seeds(n: usize) -> Vec<SubjectSeed> {
    (1..=n)
        .map(|i| SubjectSeed {
            id: i.to_string(),
            name: format!("Subject {i}"),
            baseline_rate: 80.0,
            variability: 8.0,
            condition: Condition::Normal,
            trend: Trend::Stable,
        })
        .collect()
}

/// One subject, morning clock, zero jitter, select-all ticks, no drift.
/// Each tick consumes exactly four draws, so the sequence cycles cleanly.
fn deterministic_scheduler() -> Scheduler {
    Scheduler::new(SimulationConfig::default(), seeds(1))
        .expect("valid seeds")
        .with_clock(Arc::new(MockTimeProvider::new(9 * MILLIS_PER_HOUR)))
        .with_randomness(Box::new(SequenceRandomness::new([0.0, 0.5, 0.5, 0.9])))
}

#[tokio::test(start_paused = true)]
async fn timer_fires_on_the_configured_cadence() {
    let mut scheduler = deterministic_scheduler();
    scheduler.start(Duration::from_millis(1_000));
    assert!(scheduler.is_running());

    tokio::time::sleep(Duration::from_millis(3_500)).await;

    let snapshot = scheduler.snapshot();
    assert_eq!(snapshot.combined.len(), 3);
    // Morning worked example flows through the whole stack.
    assert!(snapshot.combined.iter().all(|r| r.average_rate == 88));
    scheduler.stop();
}

#[tokio::test(start_paused = true)]
async fn second_start_does_not_add_a_timer() {
    let mut scheduler = deterministic_scheduler();
    scheduler.start(Duration::from_millis(1_000));
    // Would roughly 10x the reading count if it spawned a second timer.
    scheduler.start(Duration::from_millis(100));

    tokio::time::sleep(Duration::from_millis(2_500)).await;

    assert_eq!(scheduler.snapshot().combined.len(), 2);
    scheduler.stop();
}

#[tokio::test(start_paused = true)]
async fn stop_halts_ticks_and_preserves_state() {
    let mut scheduler = deterministic_scheduler();
    scheduler.start(Duration::from_millis(1_000));
    tokio::time::sleep(Duration::from_millis(2_500)).await;

    scheduler.stop();
    assert!(!scheduler.is_running());
    let frozen = scheduler.snapshot().combined.len();
    assert_eq!(frozen, 2);

    tokio::time::sleep(Duration::from_millis(5_000)).await;
    assert_eq!(scheduler.snapshot().combined.len(), frozen);

    // Idempotent stop.
    scheduler.stop();
    assert!(!scheduler.is_running());

    // Restart resumes with history intact (pause semantics, not reset).
    scheduler.start(Duration::from_millis(1_000));
    assert!(scheduler.is_running());
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(scheduler.snapshot().combined.len(), frozen + 1);
    scheduler.stop();
}

#[tokio::test]
async fn emergency_scenario_touches_only_the_designated_subject() {
    let scheduler = Scheduler::new(SimulationConfig::default(), seeds(3))
        .expect("valid seeds")
        .with_randomness(Box::new(SequenceRandomness::new([0.5])));

    scheduler.apply_scenario("emergency").expect("known scenario");

    let snapshot = scheduler.snapshot();
    let designated = &snapshot.patients[0];
    assert_eq!(designated.baseline_rate, Scenario::EMERGENCY_BASELINE_BPM);
    assert_eq!(designated.condition, Condition::Stressed);
    for other in &snapshot.patients[1..] {
        assert_eq!(other.baseline_rate, 80.0);
        assert_eq!(other.condition, Condition::Normal);
    }

    assert!(scheduler.apply_scenario("meltdown").is_err());
}

#[tokio::test]
async fn reset_replaces_history_with_the_backfill_window() {
    let now = 50 * MILLIS_PER_HOUR;
    let config = SimulationConfig::default();
    let scheduler = Scheduler::new(config.clone(), seeds(2))
        .expect("valid seeds")
        .with_clock(Arc::new(MockTimeProvider::new(now)))
        .with_randomness(Box::new(SequenceRandomness::new([0.5])));

    for _ in 0..5 {
        scheduler.tick_now();
    }
    scheduler.reset();

    let snapshot = scheduler.snapshot();
    let window = config.backfill_count as u64 * config.backfill_spacing_ms;
    for id in ["1", "2"] {
        let history = &snapshot.per_subject[id];
        assert_eq!(history.len(), config.backfill_count);
        assert!(history
            .iter()
            .all(|r| r.timestamp_ms < now && r.timestamp_ms >= now - window));
    }
    // Combined backfill stays timestamp-ordered, newest first.
    for pair in snapshot.combined.windows(2) {
        assert!(pair[0].timestamp_ms >= pair[1].timestamp_ms);
    }
}

#[tokio::test]
async fn snapshot_serializes_for_read_only_consumers() {
    let scheduler = deterministic_scheduler();
    scheduler.tick_now();

    let snapshot = scheduler.snapshot();
    let json = serde_json::to_string(&snapshot).expect("snapshot serializes");
    assert!(json.contains("\"average_rate\":88"));
    assert!(json.contains("\"status\":\"normal\""));
}

#[tokio::test]
async fn latest_reading_renders_as_a_device_frame() {
    let scheduler = deterministic_scheduler();
    scheduler.tick_now();

    let snapshot = scheduler.snapshot();
    let frame = DeviceFrame::from(&snapshot.combined[0]);
    assert_eq!(frame.to_string(), "BPM1: 88 | BPM2: 88 | Promedio: 88");
    let parsed: DeviceFrame = frame.to_string().parse().expect("frame parses");
    assert_eq!(parsed, frame);
}

#[tokio::test]
async fn stats_track_alert_partition_across_subjects() {
    // Emergency pushes the designated subject well past the high band.
    let scheduler = Scheduler::new(SimulationConfig::default(), seeds(2))
        .expect("valid seeds")
        .with_clock(Arc::new(MockTimeProvider::new(19 * MILLIS_PER_HOUR)))
        .with_randomness(Box::new(SequenceRandomness::new([0.5])));
    scheduler.apply_scenario("emergency").expect("known scenario");

    scheduler.tick_now();

    // 140 * 1.2 = 168: high alert for the designated subject.
    let designated = scheduler.subject_stats("1").expect("known subject");
    assert_eq!(designated.count, 1);
    assert_eq!(designated.high, 1);
    assert_eq!(designated.alerts, 1);

    // 80 * 1.0 = 80: still normal for the untouched one.
    let untouched = scheduler.subject_stats("2").expect("known subject");
    assert_eq!(untouched.normal, 1);
    assert_eq!(untouched.alerts, 0);
}
