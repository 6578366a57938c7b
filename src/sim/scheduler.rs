// src/sim/scheduler.rs
//! Periodic simulation driver.
//!
//! The scheduler owns the patient-state store and every history ring. A
//! tick is synchronous in-memory work; the only asynchrony is the tokio
//! interval task that fires ticks while the scheduler is running. `stop`
//! aborts that task through its single join handle, so no tick can fire
//! after it returns (an in-flight tick holding the lock completes first).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::SimResult;
use crate::sim::generator;
use crate::sim::reading::{History, Reading};
use crate::sim::scenario::{self, Scenario};
use crate::sim::stats::HeartRateStats;
use crate::sim::subject::{PatientState, PatientStateStore, SubjectSeed};
use crate::utils::rng::{Randomness, StdRandomness};
use crate::utils::time::{SystemTimeProvider, TimeProvider};

/// Error type a reading sink may return. Sink failures are logged and
/// dropped, never propagated into the simulation.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Optional collaborator receiving every emitted reading (e.g. a mock
/// persistence layer). Durability is the sink's concern.
pub trait ReadingSink: Send {
    /// Persist one reading. Errors are logged by the scheduler and dropped.
    fn append(&mut self, reading: &Reading) -> Result<(), SinkError>;
}

/// Read-only view of the scheduler's state for polling consumers.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerSnapshot {
    /// Patient states in seed order.
    pub patients: Vec<PatientState>,
    /// Cross-subject history, newest first.
    pub combined: Vec<Reading>,
    /// Per-subject histories, newest first.
    pub per_subject: HashMap<String, Vec<Reading>>,
}

struct Core {
    config: SimulationConfig,
    store: PatientStateStore,
    per_subject: HashMap<String, History>,
    combined: History,
    rng: Box<dyn Randomness>,
    clock: Arc<dyn TimeProvider>,
    sink: Option<Box<dyn ReadingSink>>,
}

impl Core {
    /// One simulation step: select subjects, generate, record, maybe drift.
    fn tick(&mut self) {
        let subject_count = self.store.len();
        if subject_count == 0 {
            return;
        }
        let now = self.clock.now_millis();

        let selected: Vec<usize> =
            if self.rng.next_unit() < self.config.all_subjects_probability {
                (0..subject_count).collect()
            } else {
                vec![self.rng.next_index(subject_count)]
            };
        debug!(selected = selected.len(), timestamp_ms = now, "tick");

        for index in selected {
            let reading =
                generator::generate_reading(&self.store.states()[index], now, self.rng.as_mut());
            self.record(reading);
        }

        if self.rng.next_unit() < self.config.drift_probability {
            self.store.drift_all(self.rng.as_mut());
            debug!("drifted all subjects");
        }
    }

    fn record(&mut self, reading: Reading) {
        // The reading came from the store, so the id resolves.
        let _ = self
            .store
            .record_last_rate(&reading.subject_id, reading.average_rate);

        if let Some(sink) = self.sink.as_mut() {
            if let Err(error) = sink.append(&reading) {
                warn!(subject = %reading.subject_id, %error, "reading sink append failed");
            }
        }

        self.per_subject
            .entry(reading.subject_id.clone())
            .or_insert_with(|| History::new(self.config.history_cap))
            .push(reading.clone());
        self.combined.push(reading);
    }

    /// Clear histories and backfill a synthetic trailing window, without
    /// advancing drift.
    fn reset(&mut self) {
        let now = self.clock.now_millis();
        self.combined.clear();
        for history in self.per_subject.values_mut() {
            history.clear();
        }

        // Oldest first, subjects interleaved per instant, so the combined
        // ring stays timestamp-ordered and each front ends newest.
        for step in (1..=self.config.backfill_count as u64).rev() {
            let timestamp = now.saturating_sub(step * self.config.backfill_spacing_ms);
            for index in 0..self.store.len() {
                let reading = generator::generate_reading(
                    &self.store.states()[index],
                    timestamp,
                    self.rng.as_mut(),
                );
                self.record(reading);
            }
        }
        info!(backfill = self.config.backfill_count, "history reset");
    }

    fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            patients: self.store.states().to_vec(),
            combined: self.combined.to_vec(),
            per_subject: self
                .per_subject
                .iter()
                .map(|(id, history)| (id.clone(), history.to_vec()))
                .collect(),
        }
    }
}

/// Drives periodic reading generation over a seeded set of subjects.
///
/// State machine is Idle -> Running -> Idle; stopping (or pausing, the same
/// thing) never discards accumulated history or patient state.
pub struct Scheduler {
    core: Arc<Mutex<Core>>,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Build an idle scheduler from validated config and subject seeds.
    ///
    /// Uses the system clock and an entropy-seeded RNG; swap either with
    /// the builder methods before starting.
    pub fn new(
        config: SimulationConfig,
        seeds: impl IntoIterator<Item = SubjectSeed>,
    ) -> SimResult<Self> {
        config.validate()?;
        let store = PatientStateStore::new(seeds)?;
        let per_subject = store
            .states()
            .iter()
            .map(|s| (s.subject_id.clone(), History::new(config.history_cap)))
            .collect();
        let combined = History::new(config.history_cap);
        Ok(Self {
            core: Arc::new(Mutex::new(Core {
                config,
                store,
                per_subject,
                combined,
                rng: Box::new(StdRandomness::from_entropy()),
                clock: Arc::new(SystemTimeProvider),
                sink: None,
            })),
            handle: None,
        })
    }

    /// Replace the clock (testing).
    pub fn with_clock(self, clock: Arc<dyn TimeProvider>) -> Self {
        self.core.lock().clock = clock;
        self
    }

    /// Replace the randomness source (testing or reproducible runs).
    pub fn with_randomness(self, rng: Box<dyn Randomness>) -> Self {
        self.core.lock().rng = rng;
        self
    }

    /// Attach a reading sink.
    pub fn with_sink(self, sink: Box<dyn ReadingSink>) -> Self {
        self.core.lock().sink = Some(sink);
        self
    }

    /// Tick cadence from the configuration.
    pub fn config_interval(&self) -> Duration {
        Duration::from_millis(self.core.lock().config.tick_interval_ms)
    }

    /// Begin firing ticks at the given cadence. Idempotent: a second call
    /// while running is ignored, so two overlapping timers cannot exist.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(&mut self, tick_interval: Duration) {
        if self.is_running() {
            debug!("scheduler already running; start ignored");
            return;
        }
        let core = Arc::clone(&self.core);
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // An interval's first tick completes immediately; consume it so
            // the first reading lands one full period after start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                core.lock().tick();
            }
        }));
        info!(interval_ms = tick_interval.as_millis() as u64, "scheduler started");
    }

    /// Halt future ticks. Idempotent; history and patient state survive.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            debug!("scheduler already idle; stop ignored");
            return;
        };
        handle.abort();
        info!("scheduler stopped");
    }

    /// Whether the timer task is live.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Run one tick immediately, independent of the timer. Useful for
    /// pull-driven hosts and deterministic tests.
    pub fn tick_now(&self) {
        self.core.lock().tick();
    }

    /// Clear histories and regenerate the backfill window. Running status
    /// is unchanged; patient drift does not advance.
    pub fn reset(&self) {
        self.core.lock().reset();
    }

    /// Apply a named scenario preset to the subjects.
    pub fn apply_scenario(&self, name: &str) -> SimResult<()> {
        let parsed: Scenario = name.parse()?;
        let mut core = self.core.lock();
        scenario::apply(parsed, &mut core.store)?;
        info!(scenario = name, "scenario applied");
        Ok(())
    }

    /// Read-only snapshot of patients and histories.
    pub fn snapshot(&self) -> SchedulerSnapshot {
        self.core.lock().snapshot()
    }

    /// Rollup statistics for one subject's retained history.
    pub fn subject_stats(&self, subject_id: &str) -> SimResult<HeartRateStats> {
        let core = self.core.lock();
        core.store.get(subject_id)?;
        Ok(core
            .per_subject
            .get(subject_id)
            .map(|history| HeartRateStats::from_readings(history.iter()))
            .unwrap_or_default())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
