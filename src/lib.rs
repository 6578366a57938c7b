//! vitals-core: synthetic vital-sign generation and classification for
//! patient monitoring demos.
//!
//! The crate stands in for a fleet of dual-sensor heart-rate devices. Per
//! monitored subject it holds simulation parameters (baseline, variability,
//! condition, trend), generates correlated dual-sensor readings with
//! circadian and activity modulation, classifies status and signal quality,
//! and drives everything from a periodic, cancellable scheduler with a
//! bounded in-memory history.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use vitals_core::config::SimulationConfig;
//! use vitals_core::sim::{Condition, Scheduler, SubjectSeed, Trend};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let seeds = vec![SubjectSeed {
//!         id: "1".into(),
//!         name: "Juan Perez".into(),
//!         baseline_rate: 80.0,
//!         variability: 8.0,
//!         condition: Condition::Normal,
//!         trend: Trend::Stable,
//!     }];
//!
//!     let mut scheduler = Scheduler::new(SimulationConfig::default(), seeds)?;
//!     let interval = scheduler.config_interval();
//!     scheduler.start(interval);
//!
//!     tokio::time::sleep(Duration::from_secs(20)).await;
//!
//!     let snapshot = scheduler.snapshot();
//!     for reading in &snapshot.combined {
//!         println!("{} -> {} bpm ({:?})", reading.subject_id, reading.average_rate, reading.status);
//!     }
//!     scheduler.stop();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod error;
pub mod sim;
pub mod utils;

pub use config::SimulationConfig;
pub use error::{SimError, SimResult};
pub use sim::{
    Condition, DeviceFrame, HeartRateStats, PatientState, PatientStateStore, Reading, ReadingSink,
    ReadingStatus, Scenario, Scheduler, SchedulerSnapshot, SignalQuality, SubjectSeed, Trend,
};
pub use utils::{MockTimeProvider, Randomness, SystemTimeProvider, TimeProvider};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "vitals-core");
    }
}
