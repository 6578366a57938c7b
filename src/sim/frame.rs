// src/sim/frame.rs
//! Text frame codec for the simulated heart-rate device.
//!
//! The device the simulation stands in for emits one line per sample:
//! `BPM1: 75 | BPM2: 80 | Promedio: 77`. This module renders and parses
//! that line; the transport underneath it stays out of scope.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::reading::Reading;

/// One raw device line: both sensor samples and the device-computed average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceFrame {
    pub bpm1: u32,
    pub bpm2: u32,
    pub average: u32,
}

impl fmt::Display for DeviceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BPM1: {} | BPM2: {} | Promedio: {}",
            self.bpm1, self.bpm2, self.average
        )
    }
}

impl From<&Reading> for DeviceFrame {
    fn from(reading: &Reading) -> Self {
        Self {
            bpm1: reading.sensor_a,
            bpm2: reading.sensor_b,
            average: reading.average_rate,
        }
    }
}

fn labeled_number(line: &str, label: &str) -> Option<u32> {
    let start = line.find(label)? + label.len();
    let rest = line[start..].trim_start();
    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };
    digits.parse().ok()
}

impl FromStr for DeviceFrame {
    type Err = SimError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parse = || -> Option<DeviceFrame> {
            Some(DeviceFrame {
                bpm1: labeled_number(line, "BPM1:")?,
                bpm2: labeled_number(line, "BPM2:")?,
                average: labeled_number(line, "Promedio:")?,
            })
        };
        parse().ok_or_else(|| SimError::InvalidFrame {
            line: line.trim().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_reference_line() {
        let frame = DeviceFrame {
            bpm1: 75,
            bpm2: 80,
            average: 77,
        };
        assert_eq!(frame.to_string(), "BPM1: 75 | BPM2: 80 | Promedio: 77");
    }

    #[test]
    fn round_trips_through_text() {
        let frame = DeviceFrame {
            bpm1: 118,
            bpm2: 121,
            average: 120,
        };
        let parsed: DeviceFrame = frame.to_string().parse().unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let parsed: DeviceFrame = "BPM1:   75 | BPM2: 80 | Promedio:77".parse().unwrap();
        assert_eq!(
            parsed,
            DeviceFrame {
                bpm1: 75,
                bpm2: 80,
                average: 77
            }
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in ["", "BPM1: 75", "BPM1: x | BPM2: 80 | Promedio: 77"] {
            let err = line.parse::<DeviceFrame>().unwrap_err();
            assert!(matches!(err, SimError::InvalidFrame { .. }));
        }
    }

    #[test]
    fn frame_from_reading_mirrors_sensors() {
        let reading = Reading::from_sensors("1", 0, 75, 80);
        let frame = DeviceFrame::from(&reading);
        assert_eq!(frame.bpm1, 75);
        assert_eq!(frame.bpm2, 80);
        assert_eq!(frame.average, reading.average_rate);
    }
}
