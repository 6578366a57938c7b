// src/sim/stats.rs
//! Aggregate statistics over a history slice.

use serde::Serialize;

use crate::sim::reading::Reading;

/// Rollup of a set of readings, as the list/detail screens consume it.
///
/// Averages are rounded to one decimal. An empty input yields the zero
/// rollup rather than an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HeartRateStats {
    pub count: usize,
    pub average: f64,
    pub min: u32,
    pub max: u32,
    pub normal: usize,
    pub high: usize,
    pub low: usize,
    pub alerts: usize,
    pub sensor_a_average: f64,
    pub sensor_b_average: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl HeartRateStats {
    /// Compute the rollup over any iteration of readings.
    pub fn from_readings<'a>(readings: impl IntoIterator<Item = &'a Reading>) -> Self {
        let mut stats = HeartRateStats::default();
        let mut sum = 0u64;
        let mut sum_a = 0u64;
        let mut sum_b = 0u64;
        let mut min = u32::MAX;
        let mut max = 0u32;

        for reading in readings {
            stats.count += 1;
            sum += u64::from(reading.average_rate);
            sum_a += u64::from(reading.sensor_a);
            sum_b += u64::from(reading.sensor_b);
            min = min.min(reading.average_rate);
            max = max.max(reading.average_rate);
            if reading.status.is_alert() {
                stats.alerts += 1;
            }
            match reading.status {
                crate::sim::reading::ReadingStatus::Normal => stats.normal += 1,
                crate::sim::reading::ReadingStatus::High => stats.high += 1,
                crate::sim::reading::ReadingStatus::Low => stats.low += 1,
            }
        }

        if stats.count == 0 {
            return stats;
        }

        let n = stats.count as f64;
        stats.average = round1(sum as f64 / n);
        stats.sensor_a_average = round1(sum_a as f64 / n);
        stats.sensor_b_average = round1(sum_b as f64 / n);
        stats.min = min;
        stats.max = max;
        stats
    }
}
