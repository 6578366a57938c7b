// src/config/mod.rs
//! Scheduler configuration with validation.

pub mod constants;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Runtime configuration for the simulation scheduler.
///
/// All fields default to the reference values in [`constants::scheduler`];
/// deserialized configs may override any subset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Tick cadence in milliseconds.
    #[serde(default = "defaults::tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Bound on every history ring.
    #[serde(default = "defaults::history_cap")]
    pub history_cap: usize,

    /// Chance per tick of generating for all subjects instead of one.
    #[serde(default = "defaults::all_subjects_probability")]
    pub all_subjects_probability: f64,

    /// Chance per tick of drifting every subject afterwards.
    #[serde(default = "defaults::drift_probability")]
    pub drift_probability: f64,

    /// Readings backfilled per subject on reset.
    #[serde(default = "defaults::backfill_count")]
    pub backfill_count: usize,

    /// Spacing between backfilled readings in milliseconds.
    #[serde(default = "defaults::backfill_spacing_ms")]
    pub backfill_spacing_ms: u64,
}

mod defaults {
    use super::constants::scheduler;

    pub fn tick_interval_ms() -> u64 {
        scheduler::DEFAULT_TICK_INTERVAL_MS
    }

    pub fn history_cap() -> usize {
        scheduler::DEFAULT_HISTORY_CAP
    }

    pub fn all_subjects_probability() -> f64 {
        scheduler::ALL_SUBJECTS_PROBABILITY
    }

    pub fn drift_probability() -> f64 {
        scheduler::DRIFT_PROBABILITY
    }

    pub fn backfill_count() -> usize {
        scheduler::BACKFILL_COUNT
    }

    pub fn backfill_spacing_ms() -> u64 {
        scheduler::BACKFILL_SPACING_MS
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: defaults::tick_interval_ms(),
            history_cap: defaults::history_cap(),
            all_subjects_probability: defaults::all_subjects_probability(),
            drift_probability: defaults::drift_probability(),
            backfill_count: defaults::backfill_count(),
            backfill_spacing_ms: defaults::backfill_spacing_ms(),
        }
    }
}

impl SimulationConfig {
    /// Validate field ranges before the scheduler accepts the config.
    pub fn validate(&self) -> SimResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(SimError::configuration(
                "tick_interval_ms",
                "must be positive",
            ));
        }
        if self.history_cap == 0 {
            return Err(SimError::configuration("history_cap", "must be positive"));
        }
        validate_probability("all_subjects_probability", self.all_subjects_probability)?;
        validate_probability("drift_probability", self.drift_probability)?;
        if self.backfill_count == 0 {
            return Err(SimError::configuration(
                "backfill_count",
                "must be positive",
            ));
        }
        if self.backfill_spacing_ms == 0 {
            return Err(SimError::configuration(
                "backfill_spacing_ms",
                "must be positive",
            ));
        }
        Ok(())
    }
}

fn validate_probability(field: &str, value: f64) -> SimResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SimError::configuration(
            field,
            format!("probability {value} outside [0, 1]"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_interval_ms, 4_000);
        assert_eq!(config.history_cap, 100);
    }

    #[test]
    fn rejects_zero_cadence_and_cap() {
        let config = SimulationConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::Configuration { field, .. }) if field == "tick_interval_ms"
        ));

        let config = SimulationConfig {
            history_cap: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_probabilities() {
        let config = SimulationConfig {
            all_subjects_probability: 1.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimulationConfig {
            drift_probability: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"history_cap": 10}"#)
            .expect("partial config should deserialize");
        assert_eq!(config.history_cap, 10);
        assert_eq!(config.tick_interval_ms, 4_000);
        assert!(config.validate().is_ok());
    }
}
