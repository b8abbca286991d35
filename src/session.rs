//! Multi-entity simulation session: several named zones sharing one tick
//! cadence, plus an aggregate "core" reading on its own schedule.
//!
//! Backs the body-heat-map widget. Each zone is an independent bounded
//! random walk — zones tick together but their deltas are uncorrelated.
//! The session tracks a focused zone (`None` = the core reading) and, in the
//! history-enabled configuration, a bounded ring buffer of recent values per
//! zone so a freshly focused zone has history available immediately.
//!
//! Focus is transient UI state and is never persisted.

use std::collections::VecDeque;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::ZONE_HISTORY_CAPACITY;
use crate::error::ConfigError;
use crate::schedule::Ticker;
use crate::simulator::{MetricConfig, MetricSimulator, Precision};

/// Label surfaced for the aggregate reading when no zone is focused.
pub const CORE_LABEL: &str = "Core";

// =============================================================================
// Configuration
// =============================================================================

/// One named zone of a session.
#[derive(Clone, Copy, Debug)]
pub struct ZoneSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub initial_value: f64,
}

/// Construction configuration for a [`SimulationSession`].
///
/// The core reading has its own full [`MetricConfig`] (own schedule, own
/// policy); zones share the cadence, domain, step range, and precision given
/// here.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub core: MetricConfig,
    pub zones: Vec<ZoneSpec>,
    pub zone_domain_min: f64,
    pub zone_domain_max: f64,
    pub zone_step: f64,
    pub zone_precision: Precision,
    pub tick_interval: std::time::Duration,
    pub history_enabled: bool,
}

impl SessionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.zone_domain_min >= self.zone_domain_max {
            return Err(ConfigError::InvalidDomain {
                min: self.zone_domain_min,
                max: self.zone_domain_max,
            });
        }
        if self.zone_step <= 0.0 {
            return Err(ConfigError::NonPositiveStep(self.zone_step));
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        for (i, zone) in self.zones.iter().enumerate() {
            if self.zones[..i].iter().any(|z| z.id == zone.id) {
                return Err(ConfigError::DuplicateZoneId(zone.id.to_string()));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Session State
// =============================================================================

#[derive(Debug)]
struct Zone {
    id: &'static str,
    label: &'static str,
    value: f64,
    history: VecDeque<f64>,
}

/// A zone's current value, for the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneReading {
    pub id: &'static str,
    pub label: &'static str,
    pub value: f64,
}

/// The headline reading: the focused zone, or the core when nothing is
/// focused.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusedReading {
    /// `None` for the aggregate core reading.
    pub zone_id: Option<&'static str>,
    pub label: &'static str,
    pub value: f64,
}

/// Coordinated multi-zone simulator with focus and optional history.
#[derive(Debug)]
pub struct SimulationSession {
    core: MetricSimulator,
    zones: Vec<Zone>,
    zone_domain_min: f64,
    zone_domain_max: f64,
    zone_step: f64,
    zone_precision: Precision,
    ticker: Ticker,
    rng: StdRng,
    focus: Option<usize>,
    history_enabled: bool,
}

impl SimulationSession {
    /// Create a session seeded from OS entropy.
    pub fn new(
        config: SessionConfig,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        Self::build(config, StdRng::from_entropy(), now)
    }

    /// Create a session with a fixed seed for deterministic runs.
    pub fn with_seed(
        config: SessionConfig,
        seed: u64,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        Self::build(config, StdRng::seed_from_u64(seed), now)
    }

    fn build(
        config: SessionConfig,
        mut rng: StdRng,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let core = MetricSimulator::with_seed(config.core, rng.next_u64(), now)?;
        let zones = config
            .zones
            .into_iter()
            .map(|spec| Zone {
                id: spec.id,
                label: spec.label,
                value: spec.initial_value,
                history: VecDeque::with_capacity(ZONE_HISTORY_CAPACITY),
            })
            .collect();
        Ok(Self {
            core,
            zones,
            zone_domain_min: config.zone_domain_min,
            zone_domain_max: config.zone_domain_max,
            zone_step: config.zone_step,
            zone_precision: config.zone_precision,
            ticker: Ticker::new(config.tick_interval, now)?,
            rng,
            focus: None,
            history_enabled: config.history_enabled,
        })
    }

    /// Run all due schedules (shared zone cadence and the core's own
    /// schedule). Returns the number of coordinated zone ticks that fired.
    pub fn poll(
        &mut self,
        now: Instant,
    ) -> u32 {
        self.core.poll(now);
        let due = self.ticker.poll(now);
        for _ in 0..due {
            self.tick_zones();
        }
        due
    }

    /// One coordinated tick: every zone samples and clamps its own delta.
    /// History is appended for every zone regardless of current focus, so a
    /// newly focused zone has readings immediately.
    fn tick_zones(&mut self) {
        for zone in &mut self.zones {
            let delta = self.rng.gen_range(-self.zone_step..=self.zone_step);
            zone.value = self
                .zone_precision
                .apply((zone.value + delta).clamp(self.zone_domain_min, self.zone_domain_max));
            if self.history_enabled {
                if zone.history.len() >= ZONE_HISTORY_CAPACITY {
                    zone.history.pop_front();
                }
                zone.history.push_back(zone.value);
            }
        }
    }

    /// Set which zone's reading is surfaced as the headline value.
    /// `None` selects the aggregate core reading. Unknown ids are rejected
    /// (focus unchanged) and reported as `false`.
    pub fn focus(
        &mut self,
        zone_id: Option<&str>,
    ) -> bool {
        match zone_id {
            None => {
                self.focus = None;
                true
            }
            Some(id) => match self.zones.iter().position(|z| z.id == id) {
                Some(index) => {
                    tracing::debug!(zone = id, "zone focused");
                    self.focus = Some(index);
                    true
                }
                None => {
                    tracing::debug!(zone = id, "ignoring focus request for unknown zone");
                    false
                }
            },
        }
    }

    /// Currently focused zone id, `None` when the core reading is surfaced.
    pub fn focused_id(&self) -> Option<&'static str> {
        self.focus.map(|i| self.zones[i].id)
    }

    /// The headline reading for the current focus.
    pub fn focused(&self) -> FocusedReading {
        match self.focus {
            Some(index) => {
                let zone = &self.zones[index];
                FocusedReading {
                    zone_id: Some(zone.id),
                    label: zone.label,
                    value: zone.value,
                }
            }
            None => FocusedReading {
                zone_id: None,
                label: CORE_LABEL,
                value: self.core.value(),
            },
        }
    }

    /// Up to the last 20 recorded values for a zone, in arrival order.
    /// `None` when history is disabled or the zone id is unknown.
    pub fn history_for(
        &self,
        zone_id: &str,
    ) -> Option<Vec<f64>> {
        if !self.history_enabled {
            return None;
        }
        self.zones
            .iter()
            .find(|z| z.id == zone_id)
            .map(|z| z.history.iter().copied().collect())
    }

    /// Whether this session retains per-zone history.
    pub const fn history_enabled(&self) -> bool {
        self.history_enabled
    }

    /// Current value of the aggregate core reading.
    pub fn core_value(&self) -> f64 {
        self.core.value()
    }

    /// All zone readings, in configuration order.
    pub fn zones(&self) -> impl Iterator<Item = ZoneReading> + '_ {
        self.zones.iter().map(|z| ZoneReading {
            id: z.id,
            label: z.label,
            value: z.value,
        })
    }

    /// Stop both the shared zone cadence and the core's schedule.
    pub fn cancel(&mut self) {
        self.ticker.cancel();
        self.core.cancel();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
