// src/config/constants.rs
//! Simulation-wide design constants.
//!
//! Every tunable of the generator, classifier and scheduler lives here so
//! the algorithm code carries no magic numbers.

/// Classification bands for heart-rate readings.
pub mod bands {
    /// Hard physiological clamp applied to every sensor sample and baseline.
    pub const RATE_FLOOR_BPM: u32 = 45;
    pub const RATE_CEILING_BPM: u32 = 180;

    /// Average rates strictly below this classify as low.
    pub const LOW_BELOW_BPM: u32 = 60;
    /// Average rates strictly above this classify as high.
    pub const HIGH_ABOVE_BPM: u32 = 115;

    /// Inter-sensor disagreement thresholds (bpm) for signal quality.
    pub const QUALITY_EXCELLENT_MAX_DIFF: u32 = 5;
    pub const QUALITY_GOOD_MAX_DIFF: u32 = 10;
    pub const QUALITY_FAIR_MAX_DIFF: u32 = 15;
}

/// Reading-generation and drift constants.
pub mod simulation {
    /// Circadian multipliers by UTC hour band.
    pub const MORNING_MULTIPLIER: f64 = 1.1; // 06..=11
    pub const AFTERNOON_MULTIPLIER: f64 = 1.05; // 12..=17
    pub const EVENING_MULTIPLIER: f64 = 1.0; // 18..=21
    pub const NIGHT_MULTIPLIER: f64 = 0.9; // 22..=05

    /// Condition multipliers applied to the baseline rate.
    pub const EXERCISING_MULTIPLIER: f64 = 1.4;
    pub const RESTING_MULTIPLIER: f64 = 0.85;
    pub const STRESSED_MULTIPLIER: f64 = 1.2;
    pub const NORMAL_MULTIPLIER: f64 = 1.0;

    /// Per-invocation chance that drift re-rolls the condition or the trend.
    pub const DRIFT_CONDITION_PROBABILITY: f64 = 0.25;
    pub const DRIFT_TREND_PROBABILITY: f64 = 0.25;

    /// Baseline nudge applied per drift while a trend is active.
    pub const DRIFT_STEP_BPM: f64 = 2.0;

    /// Trend nudge bounds. The hard clamp in `bands` still applies on top.
    pub const DRIFT_FLOOR_BPM: f64 = 60.0;
    pub const DRIFT_CEILING_BPM: f64 = 110.0;
    pub const DRIFT_CEILING_EXERCISING_BPM: f64 = 140.0;
}

/// Scheduler cadence and history bounds.
pub mod scheduler {
    /// Reference tick cadence.
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 4_000;

    /// Maximum retained readings per history ring.
    pub const DEFAULT_HISTORY_CAP: usize = 100;

    /// Chance that a tick generates for every subject rather than one.
    pub const ALL_SUBJECTS_PROBABILITY: f64 = 0.7;

    /// Chance that a tick ends by drifting every subject's parameters.
    pub const DRIFT_PROBABILITY: f64 = 0.1;

    /// Synthetic readings backfilled per subject on reset, and their spacing.
    pub const BACKFILL_COUNT: usize = 30;
    pub const BACKFILL_SPACING_MS: u64 = 20_000;
}
