// src/sim/scenario.rs
//! Named scenario presets that bulk-overwrite subject parameters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::sim::subject::{Condition, PatientStateStore};

/// Preset bundle applied to the store by [`apply`].
///
/// Scenarios overwrite baseline, variability and condition; trends are never
/// touched. `Emergency` targets only the designated subject (the first
/// seed), leaving everyone else as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Normal,
    Exercise,
    Stress,
    Emergency,
}

/// Parameters a scenario writes into a subject.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Preset {
    baseline_rate: f64,
    variability: f64,
    condition: Condition,
}

impl Scenario {
    /// Baseline written to the designated subject by the emergency scenario.
    pub const EMERGENCY_BASELINE_BPM: f64 = 140.0;

    fn preset(self) -> Preset {
        match self {
            Scenario::Normal => Preset {
                baseline_rate: 75.0,
                variability: 8.0,
                condition: Condition::Normal,
            },
            Scenario::Exercise => Preset {
                baseline_rate: 95.0,
                variability: 15.0,
                condition: Condition::Exercising,
            },
            Scenario::Stress => Preset {
                baseline_rate: 85.0,
                variability: 12.0,
                condition: Condition::Stressed,
            },
            Scenario::Emergency => Preset {
                baseline_rate: Self::EMERGENCY_BASELINE_BPM,
                variability: 20.0,
                condition: Condition::Stressed,
            },
        }
    }
}

impl FromStr for Scenario {
    type Err = SimError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "normal" => Ok(Scenario::Normal),
            "exercise" => Ok(Scenario::Exercise),
            "stress" => Ok(Scenario::Stress),
            "emergency" => Ok(Scenario::Emergency),
            _ => Err(SimError::UnknownScenario {
                name: name.to_owned(),
            }),
        }
    }
}

/// Apply a scenario's preset to the store.
pub fn apply(scenario: Scenario, store: &mut PatientStateStore) -> SimResult<()> {
    let preset = scenario.preset();
    match scenario {
        Scenario::Emergency => {
            let Some(designated) = store.designated_subject_id().map(str::to_owned) else {
                return Ok(());
            };
            store.override_parameters(
                &designated,
                preset.baseline_rate,
                preset.variability,
                preset.condition,
            )
        }
        _ => {
            let ids: Vec<String> = store
                .states()
                .iter()
                .map(|s| s.subject_id.clone())
                .collect();
            for id in &ids {
                store.override_parameters(
                    id,
                    preset.baseline_rate,
                    preset.variability,
                    preset.condition,
                )?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::subject::{SubjectSeed, Trend};

    fn store() -> PatientStateStore {
        let seeds = ["a", "b", "c"].map(|id| SubjectSeed {
            id: id.to_owned(),
            name: format!("Subject {id}"),
            baseline_rate: 80.0,
            variability: 8.0,
            condition: Condition::Normal,
            trend: Trend::Increasing,
        });
        PatientStateStore::new(seeds).unwrap()
    }

    #[test]
    fn parses_known_names_only() {
        assert_eq!("exercise".parse::<Scenario>().unwrap(), Scenario::Exercise);
        assert_eq!("emergency".parse::<Scenario>().unwrap(), Scenario::Emergency);
        let err = "panic".parse::<Scenario>().unwrap_err();
        assert!(matches!(err, SimError::UnknownScenario { name } if name == "panic"));
    }

    #[test]
    fn bulk_scenarios_rewrite_every_subject() {
        let mut store = store();
        apply(Scenario::Stress, &mut store).unwrap();
        for state in store.states() {
            assert_eq!(state.baseline_rate, 85.0);
            assert_eq!(state.variability, 12.0);
            assert_eq!(state.condition, Condition::Stressed);
            // Trend untouched.
            assert_eq!(state.trend, Trend::Increasing);
        }
    }

    #[test]
    fn emergency_targets_only_the_designated_subject() {
        let mut store = store();
        apply(Scenario::Emergency, &mut store).unwrap();

        let designated = store.get("a").unwrap();
        assert_eq!(designated.baseline_rate, Scenario::EMERGENCY_BASELINE_BPM);
        assert_eq!(designated.variability, 20.0);
        assert_eq!(designated.condition, Condition::Stressed);

        for id in ["b", "c"] {
            let untouched = store.get(id).unwrap();
            assert_eq!(untouched.baseline_rate, 80.0);
            assert_eq!(untouched.variability, 8.0);
            assert_eq!(untouched.condition, Condition::Normal);
        }
    }

    #[test]
    fn emergency_on_empty_store_is_a_no_op() {
        let mut empty = PatientStateStore::new([]).unwrap();
        assert!(apply(Scenario::Emergency, &mut empty).is_ok());
    }
}
