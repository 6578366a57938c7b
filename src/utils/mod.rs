// src/utils/mod.rs
//! Shared utilities: injectable time and randomness sources.

pub mod rng;
pub mod time;

pub use rng::{Randomness, SequenceRandomness, StdRandomness};
pub use time::{current_timestamp_millis, hour_of_day, MockTimeProvider, SystemTimeProvider, TimeProvider};
