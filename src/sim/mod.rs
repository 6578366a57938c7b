// src/sim/mod.rs
//! Synthetic vital-sign simulation: subjects, readings, generation,
//! scenarios and the periodic scheduler.

pub mod frame;
pub mod generator;
pub mod reading;
pub mod scenario;
pub mod scheduler;
pub mod stats;
pub mod subject;

pub use frame::DeviceFrame;
pub use generator::generate_reading;
pub use reading::{History, Reading, ReadingStatus, SignalQuality};
pub use scenario::Scenario;
pub use scheduler::{ReadingSink, Scheduler, SchedulerSnapshot, SinkError};
pub use stats::HeartRateStats;
pub use subject::{Condition, PatientState, PatientStateStore, SubjectSeed, Trend};
