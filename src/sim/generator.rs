// src/sim/generator.rs
//! Synthetic reading generation.
//!
//! One reading is a pure function of the subject's current state, the tick
//! timestamp and two random draws: the baseline is scaled by a circadian
//! multiplier and the condition multiplier, two sensor samples are jittered
//! independently around that target, and the classification falls out of the
//! sampled values.

use crate::config::constants::{bands, simulation};
use crate::sim::reading::Reading;
use crate::sim::subject::PatientState;
use crate::utils::rng::Randomness;
use crate::utils::time::hour_of_day;

/// Circadian multiplier for a UTC hour of day.
pub fn time_of_day_multiplier(hour: u32) -> f64 {
    match hour {
        6..=11 => simulation::MORNING_MULTIPLIER,
        12..=17 => simulation::AFTERNOON_MULTIPLIER,
        18..=21 => simulation::EVENING_MULTIPLIER,
        _ => simulation::NIGHT_MULTIPLIER,
    }
}

fn clamp_sample(value: f64) -> u32 {
    value
        .round()
        .clamp(f64::from(bands::RATE_FLOOR_BPM), f64::from(bands::RATE_CEILING_BPM)) as u32
}

/// Generate one reading for a subject at the given instant.
///
/// Infallible for any state the store can hold; the store's validation is
/// the precondition.
pub fn generate_reading(
    state: &PatientState,
    timestamp_ms: u64,
    rng: &mut dyn Randomness,
) -> Reading {
    let target = (state.baseline_rate
        * time_of_day_multiplier(hour_of_day(timestamp_ms))
        * state.condition.multiplier())
    .round();

    let half_span = state.variability / 2.0;
    let sensor_a = clamp_sample(target + rng.next_symmetric(half_span));
    let sensor_b = clamp_sample(target + rng.next_symmetric(half_span));

    Reading::from_sensors(state.subject_id.clone(), timestamp_ms, sensor_a, sensor_b)
}
