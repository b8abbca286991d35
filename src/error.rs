//! Construction-time configuration errors.
//!
//! Invalid configuration is a programming error and fails fast at
//! construction. Everything recoverable (storage failures, out-of-range
//! samples, rejected size transitions) is handled locally by the component
//! involved and never surfaces as an error value.

use thiserror::Error;

/// Rejected widget or simulator configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Metric domain is empty or inverted.
    #[error("invalid domain: min {min} must be strictly below max {max}")]
    InvalidDomain { min: f64, max: f64 },

    /// A threshold table needs at least one tier above its fallback.
    #[error("threshold table must contain at least one tier")]
    EmptyThresholdTable,

    /// Tier bounds must strictly decrease so that first-match-wins covers
    /// the domain without gaps or overlaps.
    #[error("threshold bounds must strictly decrease: {prev} followed by {next}")]
    NonMonotonicThresholds { prev: f64, next: f64 },

    /// Periodic schedules cannot have a zero interval.
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,

    /// Step ranges bound the sampled delta magnitude and must be positive.
    #[error("step range must be positive, got {0}")]
    NonPositiveStep(f64),

    /// Sampling probabilities must lie in [0, 1].
    #[error("probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// A size enumeration with fewer than two levels has no transitions.
    #[error("size set needs at least two levels, got {0}")]
    TooFewSizes(usize),

    /// The caller-supplied default size must be a member of the size set.
    #[error("default size {0:?} is not in the configured size set")]
    UnknownDefaultSize(String),

    /// Zone ids within one session must be unique.
    #[error("duplicate zone id {0:?}")]
    DuplicateZoneId(String),
}
