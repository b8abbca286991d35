//! Generic bounded-random-walk simulator for one scalar metric.
//!
//! Every gauge on the dashboard is driven by the same machine: each tick
//! samples a delta according to the metric's [`StepPolicy`], clamps the
//! result into the metric's domain, and rounds it to the metric's documented
//! precision. The policies reproduce the handful of behaviors the gauges
//! actually exhibit:
//!
//! | Policy | Gauges | Behavior |
//! |--------|--------|----------|
//! | `SymmetricUniform` | temperature, humidity, heart rate, SpO₂, signal | delta ~ U(−step, step) |
//! | `Regime` | speed | accelerate / hold / decelerate chosen by fixed probabilities |
//! | `ChargeDischarge` | battery | charging flag re-sampled per tick, biased walk with a discharge floor |
//! | `FillAndReset` | garbage fill | monotone climb, reset to a small random value above a threshold |
//!
//! # Invariant
//!
//! `domain_min <= value <= domain_max` holds after every tick. The initial
//! value is caller-supplied and expected inside the domain but not required
//! to be — the first tick reclamps it.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ConfigError;
use crate::schedule::Ticker;

// =============================================================================
// Precision
// =============================================================================

/// Rounding applied to a metric's value after every tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Precision {
    /// Whole numbers: percentages, bpm, dBm, speed.
    Integer,
    /// One decimal place: temperatures, SpO₂.
    Tenths,
}

impl Precision {
    /// Round `value` to this precision.
    pub fn apply(
        self,
        value: f64,
    ) -> f64 {
        match self {
            Self::Integer => value.round(),
            Self::Tenths => (value * 10.0).round() / 10.0,
        }
    }
}

// =============================================================================
// Step Policies
// =============================================================================

/// How one tick's delta is sampled.
///
/// `ChargeDischarge` carries the charging flag as part of the policy because
/// the flag is re-sampled by the same tick that consumes it.
#[derive(Clone, Debug)]
pub enum StepPolicy {
    /// Delta uniform in [−step, step].
    SymmetricUniform { step: f64 },

    /// Pick a regime first, then a biased delta: with probability
    /// `accelerate` add U(0, step), with probability `hold` stay put,
    /// otherwise subtract U(0, step).
    Regime {
        accelerate: f64,
        hold: f64,
        step: f64,
    },

    /// Battery behavior: re-sample `charging` with `charge_prob` each tick.
    /// While charging the value climbs by U(0, charge_step) toward the domain
    /// ceiling; while discharging it falls by U(0, discharge_step) but never
    /// below `discharge_floor`, even when the nominal domain minimum is lower.
    ChargeDischarge {
        charge_prob: f64,
        charge_step: f64,
        discharge_step: f64,
        discharge_floor: f64,
        charging: bool,
    },

    /// Capacity behavior: climb by U(0, fill_step); a tick that starts above
    /// `reset_threshold` instead resets to U(0, reset_ceiling), modeling an
    /// emptying/servicing event.
    FillAndReset {
        fill_step: f64,
        reset_threshold: f64,
        reset_ceiling: f64,
    },
}

impl StepPolicy {
    fn validate(&self) -> Result<(), ConfigError> {
        fn positive(step: f64) -> Result<(), ConfigError> {
            if step > 0.0 { Ok(()) } else { Err(ConfigError::NonPositiveStep(step)) }
        }
        fn probability(p: f64) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&p) {
                Ok(())
            } else {
                Err(ConfigError::InvalidProbability(p))
            }
        }

        match *self {
            Self::SymmetricUniform { step } => positive(step),
            Self::Regime { accelerate, hold, step } => {
                positive(step)?;
                probability(accelerate)?;
                probability(hold)?;
                probability(accelerate + hold)
            }
            Self::ChargeDischarge {
                charge_prob,
                charge_step,
                discharge_step,
                ..
            } => {
                probability(charge_prob)?;
                positive(charge_step)?;
                positive(discharge_step)
            }
            Self::FillAndReset {
                fill_step,
                reset_ceiling,
                ..
            } => {
                positive(fill_step)?;
                positive(reset_ceiling)
            }
        }
    }
}

// =============================================================================
// MetricConfig
// =============================================================================

/// Construction configuration for one metric simulator.
#[derive(Clone, Debug)]
pub struct MetricConfig {
    pub initial_value: f64,
    pub domain_min: f64,
    pub domain_max: f64,
    pub tick_interval: Duration,
    pub precision: Precision,
    pub policy: StepPolicy,
}

impl MetricConfig {
    /// Fail fast on programming errors: inverted domains, zero intervals,
    /// non-positive step ranges, probabilities outside [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.domain_min >= self.domain_max {
            return Err(ConfigError::InvalidDomain {
                min: self.domain_min,
                max: self.domain_max,
            });
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        self.policy.validate()
    }
}

// =============================================================================
// MetricSimulator
// =============================================================================

/// Bounded random walk for one metric, owning its own periodic schedule.
#[derive(Debug)]
pub struct MetricSimulator {
    value: f64,
    domain_min: f64,
    domain_max: f64,
    precision: Precision,
    policy: StepPolicy,
    ticker: Ticker,
    rng: StdRng,
}

impl MetricSimulator {
    /// Create a simulator seeded from OS entropy.
    pub fn new(
        config: MetricConfig,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        Self::build(config, StdRng::from_entropy(), now)
    }

    /// Create a simulator with a fixed seed for deterministic runs.
    pub fn with_seed(
        config: MetricConfig,
        seed: u64,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        Self::build(config, StdRng::seed_from_u64(seed), now)
    }

    fn build(
        config: MetricConfig,
        rng: StdRng,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            value: config.initial_value,
            domain_min: config.domain_min,
            domain_max: config.domain_max,
            precision: config.precision,
            policy: config.policy,
            ticker: Ticker::new(config.tick_interval, now)?,
            rng,
        })
    }

    /// Run the ticks due at `now` and return how many fired.
    pub fn poll(
        &mut self,
        now: Instant,
    ) -> u32 {
        let due = self.ticker.poll(now);
        for _ in 0..due {
            self.tick();
        }
        due
    }

    /// Apply one update: sample a delta per the policy, clamp, round.
    pub fn tick(&mut self) {
        let current = self.value;
        let rng = &mut self.rng;

        let next = match &mut self.policy {
            StepPolicy::SymmetricUniform { step } => current + rng.gen_range(-*step..=*step),

            StepPolicy::Regime { accelerate, hold, step } => {
                let roll: f64 = rng.gen_range(0.0..1.0);
                if roll < *accelerate {
                    current + rng.gen_range(0.0..*step)
                } else if roll < *accelerate + *hold {
                    current
                } else {
                    current - rng.gen_range(0.0..*step)
                }
            }

            StepPolicy::ChargeDischarge {
                charge_prob,
                charge_step,
                discharge_step,
                discharge_floor,
                charging,
            } => {
                *charging = rng.gen_bool(*charge_prob);
                if *charging {
                    current + rng.gen_range(0.0..*charge_step)
                } else {
                    // Discharge never drives the simulated value below the
                    // floor, even when the nominal domain minimum is lower.
                    (current - rng.gen_range(0.0..*discharge_step)).max(*discharge_floor)
                }
            }

            StepPolicy::FillAndReset {
                fill_step,
                reset_threshold,
                reset_ceiling,
            } => {
                if current > *reset_threshold {
                    rng.gen_range(0.0..*reset_ceiling)
                } else {
                    current + rng.gen_range(0.0..*fill_step)
                }
            }
        };

        self.value = self.precision.apply(next.clamp(self.domain_min, self.domain_max));
    }

    /// Current value. Inside the domain after any tick; before the first tick
    /// it is whatever the caller supplied.
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Domain bounds as `(min, max)`.
    pub const fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    /// Charging flag, for the battery policy only.
    pub const fn charging(&self) -> Option<bool> {
        match self.policy {
            StepPolicy::ChargeDischarge { charging, .. } => Some(charging),
            _ => None,
        }
    }

    /// Interval of the primary value schedule.
    pub const fn tick_interval(&self) -> Duration {
        self.ticker.interval()
    }

    /// Stop the value schedule; further polls mutate nothing.
    pub fn cancel(&mut self) {
        self.ticker.cancel();
    }

    /// Whether the value schedule has been cancelled.
    pub const fn is_cancelled(&self) -> bool {
        self.ticker.is_cancelled()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
