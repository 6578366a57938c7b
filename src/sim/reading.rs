// src/sim/reading.rs
//! Reading value object, derived classifications and the bounded history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::constants::bands;

/// Classification of an average heart rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    Normal,
    High,
    Low,
}

impl ReadingStatus {
    /// Classify an average rate.
    ///
    /// High strictly above 115, low strictly below 60, normal otherwise.
    /// The gap bands (100, 115] and [60, 75) fall through to normal, the
    /// same way the reference device's logic defaulted them.
    pub fn classify(average_rate: u32) -> Self {
        if average_rate > bands::HIGH_ABOVE_BPM {
            ReadingStatus::High
        } else if average_rate < bands::LOW_BELOW_BPM {
            ReadingStatus::Low
        } else {
            ReadingStatus::Normal
        }
    }

    /// True for any non-normal status.
    pub fn is_alert(self) -> bool {
        !matches!(self, ReadingStatus::Normal)
    }
}

/// Confidence derived from inter-sensor agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SignalQuality {
    /// Classify the absolute difference between the two sensor samples.
    pub fn classify(sensor_a: u32, sensor_b: u32) -> Self {
        let diff = sensor_a.abs_diff(sensor_b);
        if diff <= bands::QUALITY_EXCELLENT_MAX_DIFF {
            SignalQuality::Excellent
        } else if diff <= bands::QUALITY_GOOD_MAX_DIFF {
            SignalQuality::Good
        } else if diff <= bands::QUALITY_FAIR_MAX_DIFF {
            SignalQuality::Fair
        } else {
            SignalQuality::Poor
        }
    }
}

/// One synthetic dual-sensor reading, immutable once created.
///
/// `average_rate`, `status` and `signal_quality` are pure functions of the
/// sensor samples; construction is the only place they are computed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reading {
    pub subject_id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    pub sensor_a: u32,
    pub sensor_b: u32,
    pub average_rate: u32,
    pub status: ReadingStatus,
    pub signal_quality: SignalQuality,
}

impl Reading {
    /// Build a reading from its raw sensor samples, deriving everything else.
    pub fn from_sensors(subject_id: impl Into<String>, timestamp_ms: u64, sensor_a: u32, sensor_b: u32) -> Self {
        let average_rate = ((sensor_a + sensor_b) as f64 / 2.0).round() as u32;
        Self {
            subject_id: subject_id.into(),
            timestamp_ms,
            sensor_a,
            sensor_b,
            average_rate,
            status: ReadingStatus::classify(average_rate),
            signal_quality: SignalQuality::classify(sensor_a, sensor_b),
        }
    }
}

/// Bounded, newest-first sequence of readings.
///
/// Appends evict the oldest entry once the cap is reached. Created empty,
/// cleared on reset.
#[derive(Debug, Clone)]
pub struct History {
    readings: VecDeque<Reading>,
    cap: usize,
}

impl History {
    /// Empty history with the given bound. `cap` must be non-zero (enforced
    /// upstream by config validation).
    pub fn new(cap: usize) -> Self {
        Self {
            readings: VecDeque::with_capacity(cap.min(128)),
            cap,
        }
    }

    /// Append at the front, evicting the oldest entry past the cap.
    pub fn push(&mut self, reading: Reading) {
        self.readings.push_front(reading);
        self.readings.truncate(self.cap);
    }

    /// Newest reading, if any.
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.front()
    }

    /// Newest-first iterator.
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Drop all retained readings; the cap is unchanged.
    pub fn clear(&mut self) {
        self.readings.clear();
    }

    /// Newest-first snapshot for read-only consumers.
    pub fn to_vec(&self) -> Vec<Reading> {
        self.readings.iter().cloned().collect()
    }
}
