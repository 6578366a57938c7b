// src/sim/subject.rs
//! Per-subject simulation parameters and the store that owns them.

use serde::{Deserialize, Serialize};

use crate::config::constants::{bands, simulation};
use crate::error::{SimError, SimResult};
use crate::utils::rng::Randomness;

/// Activity condition modulating a subject's baseline rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Normal,
    Resting,
    Exercising,
    Stressed,
}

impl Condition {
    pub(crate) const ALL: [Condition; 4] = [
        Condition::Normal,
        Condition::Resting,
        Condition::Exercising,
        Condition::Stressed,
    ];

    /// Multiplier applied to the baseline when generating a reading.
    pub fn multiplier(self) -> f64 {
        match self {
            Condition::Normal => simulation::NORMAL_MULTIPLIER,
            Condition::Resting => simulation::RESTING_MULTIPLIER,
            Condition::Exercising => simulation::EXERCISING_MULTIPLIER,
            Condition::Stressed => simulation::STRESSED_MULTIPLIER,
        }
    }

    /// Upper bound the drift nudge respects for this condition.
    fn drift_ceiling(self) -> f64 {
        match self {
            Condition::Exercising => simulation::DRIFT_CEILING_EXERCISING_BPM,
            _ => simulation::DRIFT_CEILING_BPM,
        }
    }
}

/// Slow directional bias applied to the baseline over repeated drifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Stable,
    Increasing,
    Decreasing,
}

impl Trend {
    pub(crate) const ALL: [Trend; 3] = [Trend::Stable, Trend::Increasing, Trend::Decreasing];
}

/// Seed parameters for one monitored subject.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SubjectSeed {
    pub id: String,
    pub name: String,
    pub baseline_rate: f64,
    pub variability: f64,
    pub condition: Condition,
    pub trend: Trend,
}

/// Live simulation parameters for one subject.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PatientState {
    pub subject_id: String,
    pub name: String,
    /// Baseline heart rate in bpm, always within the hard clamp.
    pub baseline_rate: f64,
    /// Per-reading dispersion in bpm, always positive.
    pub variability: f64,
    pub condition: Condition,
    pub trend: Trend,
    /// Most recent average reading, kept for display continuity only.
    pub last_rate: Option<u32>,
}

/// Owns every [`PatientState`]. Seeded once, mutated only through its
/// methods so the baseline clamp holds at every mutation point.
#[derive(Debug, Clone)]
pub struct PatientStateStore {
    states: Vec<PatientState>,
}

impl PatientStateStore {
    /// Seed the store, validating every subject.
    ///
    /// Rejects non-positive variability, baselines outside the hard clamp,
    /// and duplicate subject ids.
    pub fn new(seeds: impl IntoIterator<Item = SubjectSeed>) -> SimResult<Self> {
        let mut states: Vec<PatientState> = Vec::new();
        for seed in seeds {
            if seed.variability <= 0.0 {
                return Err(SimError::configuration(
                    "variability",
                    format!("subject '{}': must be positive", seed.id),
                ));
            }
            if seed.baseline_rate < f64::from(bands::RATE_FLOOR_BPM)
                || seed.baseline_rate > f64::from(bands::RATE_CEILING_BPM)
            {
                return Err(SimError::configuration(
                    "baseline_rate",
                    format!(
                        "subject '{}': {} outside [{}, {}]",
                        seed.id,
                        seed.baseline_rate,
                        bands::RATE_FLOOR_BPM,
                        bands::RATE_CEILING_BPM
                    ),
                ));
            }
            if states.iter().any(|s| s.subject_id == seed.id) {
                return Err(SimError::configuration(
                    "id",
                    format!("duplicate subject '{}'", seed.id),
                ));
            }
            states.push(PatientState {
                subject_id: seed.id,
                name: seed.name,
                baseline_rate: seed.baseline_rate,
                variability: seed.variability,
                condition: seed.condition,
                trend: seed.trend,
                last_rate: None,
            });
        }
        Ok(Self { states })
    }

    /// Number of seeded subjects.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when no subjects are seeded.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All states in seed order.
    pub fn states(&self) -> &[PatientState] {
        &self.states
    }

    /// The designated subject for single-target scenarios: the first seed.
    pub fn designated_subject_id(&self) -> Option<&str> {
        self.states.first().map(|s| s.subject_id.as_str())
    }

    /// Look up one subject.
    pub fn get(&self, subject_id: &str) -> SimResult<&PatientState> {
        self.states
            .iter()
            .find(|s| s.subject_id == subject_id)
            .ok_or_else(|| SimError::SubjectNotFound {
                subject_id: subject_id.to_owned(),
            })
    }

    fn get_mut(&mut self, subject_id: &str) -> SimResult<&mut PatientState> {
        self.states
            .iter_mut()
            .find(|s| s.subject_id == subject_id)
            .ok_or_else(|| SimError::SubjectNotFound {
                subject_id: subject_id.to_owned(),
            })
    }

    /// Record the latest average reading for display continuity.
    pub fn record_last_rate(&mut self, subject_id: &str, rate: u32) -> SimResult<()> {
        self.get_mut(subject_id)?.last_rate = Some(rate);
        Ok(())
    }

    /// Probabilistically perturb one subject's condition, trend and baseline.
    ///
    /// Draw order is fixed: condition re-roll gate (plus an index draw when
    /// it fires), then trend re-roll gate (plus an index draw), then a
    /// deterministic nudge whenever the resulting trend is directional.
    /// A complete no-op is a valid outcome.
    pub fn apply_drift(&mut self, subject_id: &str, rng: &mut dyn Randomness) -> SimResult<()> {
        let state = self.get_mut(subject_id)?;

        if rng.next_unit() < simulation::DRIFT_CONDITION_PROBABILITY {
            state.condition = Condition::ALL[rng.next_index(Condition::ALL.len())];
        }
        if rng.next_unit() < simulation::DRIFT_TREND_PROBABILITY {
            state.trend = Trend::ALL[rng.next_index(Trend::ALL.len())];
        }

        match state.trend {
            Trend::Increasing => {
                let ceiling = state.condition.drift_ceiling();
                if state.baseline_rate < ceiling {
                    state.baseline_rate =
                        (state.baseline_rate + simulation::DRIFT_STEP_BPM).min(ceiling);
                }
            }
            Trend::Decreasing => {
                if state.baseline_rate > simulation::DRIFT_FLOOR_BPM {
                    state.baseline_rate =
                        (state.baseline_rate - simulation::DRIFT_STEP_BPM).max(simulation::DRIFT_FLOOR_BPM);
                }
            }
            Trend::Stable => {}
        }

        // Invariant: the hard clamp survives every mutation.
        state.baseline_rate = state.baseline_rate.clamp(
            f64::from(bands::RATE_FLOOR_BPM),
            f64::from(bands::RATE_CEILING_BPM),
        );
        Ok(())
    }

    /// Drift every subject once, in seed order.
    pub fn drift_all(&mut self, rng: &mut dyn Randomness) {
        let ids: Vec<String> = self.states.iter().map(|s| s.subject_id.clone()).collect();
        for id in ids {
            // Ids came from the store, lookup cannot fail.
            let _ = self.apply_drift(&id, rng);
        }
    }

    /// Overwrite one subject's generation parameters, keeping its trend.
    ///
    /// Used by scenario application; the baseline is clamped like every
    /// other mutation.
    pub(crate) fn override_parameters(
        &mut self,
        subject_id: &str,
        baseline_rate: f64,
        variability: f64,
        condition: Condition,
    ) -> SimResult<()> {
        let state = self.get_mut(subject_id)?;
        state.baseline_rate = baseline_rate.clamp(
            f64::from(bands::RATE_FLOOR_BPM),
            f64::from(bands::RATE_CEILING_BPM),
        );
        state.variability = variability;
        state.condition = condition;
        Ok(())
    }
}
