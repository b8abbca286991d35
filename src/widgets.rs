//! Per-gauge configuration catalog.
//!
//! Every dashboard gauge is one [`GaugeWidget`]: a [`MetricSimulator`] with
//! that gauge's domain, cadence, and step policy, a [`ThresholdTable`] for
//! its label/color tiers, and a [`WidgetSizeController`] for its display
//! size. A few gauges carry extras — the pulse indicators own a second
//! independent [`PulseTimer`], the cell-signal gauge tracks carrier and
//! roaming state alongside the dBm walk, and the temperature gauge converts
//! its Celsius walk to the configured display unit.
//!
//! The constructors at the bottom are the catalog proper: one function per
//! gauge with the exact figures the dashboard uses.

use std::rc::Rc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::classify::{Category, Threshold, ThresholdTable};
use crate::colors::ColorToken;
use crate::error::ConfigError;
use crate::schedule::PulseTimer;
use crate::simulator::{MetricConfig, MetricSimulator, Precision, StepPolicy};
use crate::sizes::{SizeSet, WidgetSizeController};
use crate::store::SizeStore;

// =============================================================================
// Reading
// =============================================================================

/// What the rendering layer consumes: display value plus classified tier.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Reading {
    pub value: f64,
    pub label: &'static str,
    pub color: ColorToken,
}

/// Display unit for the temperature gauge. The underlying walk is always
/// Celsius; classification runs on the Celsius value regardless of unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TempUnit {
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    /// Convert a Celsius value into this unit.
    pub fn from_celsius(
        self,
        celsius: f64,
    ) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Suffix for the rendering layer (`°C` / `°F`).
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

// =============================================================================
// Cell-Signal State
// =============================================================================

const CARRIERS: [&str; 2] = ["T-Mobile", "AT&T"];

/// Carrier and roaming state for the cell-signal gauge, re-sampled on each
/// value tick from its own rng.
#[derive(Debug)]
struct SignalState {
    carrier_index: usize,
    roaming: bool,
    rng: StdRng,
}

impl SignalState {
    fn tick(&mut self) {
        if self.rng.gen_bool(0.2) {
            self.carrier_index = 1 - self.carrier_index;
        }
        if self.rng.gen_bool(0.1) {
            self.roaming = !self.roaming;
        }
    }
}

/// Quality label with the roaming suffix the rendering layer shows.
fn roaming_label(quality: &'static str) -> &'static str {
    match quality {
        "Excellent" => "Excellent (Roaming)",
        "Good" => "Good (Roaming)",
        "Fair" => "Fair (Roaming)",
        "Poor" => "Poor (Roaming)",
        other => other,
    }
}

/// Bar count (1..=5) for a signal strength in dBm.
pub fn signal_bars(dbm: f64) -> u8 {
    if dbm > -70.0 {
        5
    } else if dbm > -80.0 {
        4
    } else if dbm > -90.0 {
        3
    } else if dbm > -100.0 {
        2
    } else {
        1
    }
}

// =============================================================================
// GaugeWidget
// =============================================================================

/// One dashboard gauge: simulator, classification table, size controller,
/// and the gauge-specific extras.
pub struct GaugeWidget {
    id: &'static str,
    unit: &'static str,
    simulator: MetricSimulator,
    table: ThresholdTable,
    pulse: Option<PulseTimer>,
    /// Pulse cadence follows the simulated value (heartbeat at the simulated
    /// bpm) rather than staying fixed.
    pulse_tracks_value: bool,
    signal: Option<SignalState>,
    temp_unit: Option<TempUnit>,
    /// Range the visual fill normalizes over when it differs from the walk
    /// domain (humidity fills by raw percent while walking a narrower band).
    fill_range: Option<(f64, f64)>,
    size: WidgetSizeController,
}

impl GaugeWidget {
    /// Run all due schedules and return the current reading.
    pub fn poll(
        &mut self,
        now: Instant,
    ) -> Reading {
        let value_ticks = self.simulator.poll(now);
        if value_ticks > 0 {
            if let Some(signal) = &mut self.signal {
                for _ in 0..value_ticks {
                    signal.tick();
                }
            }
            if self.pulse_tracks_value
                && let Some(pulse) = &mut self.pulse
            {
                // One beat per 60000/bpm ms.
                let bpm = self.simulator.value();
                pulse.retune(Duration::from_secs_f64(60.0 / bpm), now);
            }
        }
        if let Some(pulse) = &mut self.pulse {
            pulse.poll(now);
        }
        self.reading()
    }

    /// The current reading without advancing any schedule.
    pub fn reading(&self) -> Reading {
        let raw = self.simulator.value();
        let category = self.table.classify(raw);
        let label = match self.simulator.charging() {
            Some(true) => "Charging",
            Some(false) => "On Battery",
            None => match &self.signal {
                Some(signal) if signal.roaming => roaming_label(category.label),
                _ => category.label,
            },
        };
        Reading {
            value: self.display_value(raw),
            label,
            color: category.color,
        }
    }

    fn display_value(
        &self,
        raw: f64,
    ) -> f64 {
        match self.temp_unit {
            Some(unit) => unit.from_celsius(raw),
            None => raw,
        }
    }

    /// Fraction of the gauge's fill range currently filled, in [0, 1].
    pub fn fill_fraction(&self) -> f64 {
        let (min, max) = self.fill_range.unwrap_or_else(|| self.simulator.domain());
        ((self.simulator.value() - min) / (max - min)).clamp(0.0, 1.0)
    }

    /// Whether the transient pulse flag is up (heart rate / SpO₂ only).
    pub fn pulse_active(&self) -> bool {
        self.pulse.as_ref().is_some_and(PulseTimer::is_active)
    }

    /// Bar count for the cell-signal gauge, `None` for every other gauge.
    pub fn bars(&self) -> Option<u8> {
        self.signal.as_ref().map(|_| signal_bars(self.simulator.value()))
    }

    /// Current carrier name, cell-signal gauge only.
    pub fn carrier(&self) -> Option<&'static str> {
        self.signal.as_ref().map(|s| CARRIERS[s.carrier_index])
    }

    /// Whether the connection is roaming, cell-signal gauge only.
    pub fn roaming(&self) -> Option<bool> {
        self.signal.as_ref().map(|s| s.roaming)
    }

    /// Display unit suffix (`%`, `bpm`, `dBm`, ...).
    pub const fn unit(&self) -> &'static str {
        self.unit
    }

    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Current display size token.
    pub fn size(&self) -> &str {
        self.size.size()
    }

    /// Apply a resize request; unknown tokens are rejected.
    pub fn resize(
        &mut self,
        size: &str,
    ) -> bool {
        self.size.set_size(size)
    }

    /// Stop every schedule this gauge owns.
    pub fn cancel(&mut self) {
        self.simulator.cancel();
        if let Some(pulse) = &mut self.pulse {
            pulse.cancel();
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

struct GaugeSpec {
    id: &'static str,
    unit: &'static str,
    config: MetricConfig,
    table: ThresholdTable,
    sizes: SizeSet,
    default_size: &'static str,
}

fn build_gauge(
    spec: GaugeSpec,
    store: Rc<dyn SizeStore>,
    seed: Option<u64>,
    now: Instant,
) -> Result<GaugeWidget, ConfigError> {
    let simulator = match seed {
        Some(seed) => MetricSimulator::with_seed(spec.config, seed, now)?,
        None => MetricSimulator::new(spec.config, now)?,
    };
    let size = WidgetSizeController::new(spec.id, spec.sizes, spec.default_size, store)?;
    Ok(GaugeWidget {
        id: spec.id,
        unit: spec.unit,
        simulator,
        table: spec.table,
        pulse: None,
        pulse_tracks_value: false,
        signal: None,
        temp_unit: None,
        fill_range: None,
        size,
    })
}

/// Battery: integer percent, charging flag re-sampled each tick (P = 0.6),
/// charge climbs by U(0, 2), discharge falls by U(0, 1.5) with a floor of 10.
pub fn battery(
    store: Rc<dyn SizeStore>,
    seed: Option<u64>,
    now: Instant,
) -> Result<GaugeWidget, ConfigError> {
    build_gauge(
        GaugeSpec {
            id: "battery",
            unit: "%",
            config: MetricConfig {
                initial_value: 75.0,
                domain_min: 0.0,
                domain_max: 100.0,
                tick_interval: Duration::from_secs(5),
                precision: Precision::Integer,
                policy: StepPolicy::ChargeDischarge {
                    charge_prob: 0.6,
                    charge_step: 2.0,
                    discharge_step: 1.5,
                    discharge_floor: 10.0,
                    charging: false,
                },
            },
            // Integer values, so "above 50" starts at 51.
            table: ThresholdTable::new(
                vec![
                    Threshold::new(51.0, "High", ColorToken::Green),
                    Threshold::new(21.0, "Medium", ColorToken::Yellow),
                ],
                Category::new("Low", ColorToken::Red),
            )?,
            sizes: SizeSet::three_level(),
            default_size: "small",
        },
        store,
        seed,
        now,
    )
}

/// Temperature: Celsius walk ±1.5 in [10, 35] every 7 s, one decimal,
/// displayed in the configured unit (Fahrenheit by default).
pub fn temperature(
    unit: TempUnit,
    store: Rc<dyn SizeStore>,
    seed: Option<u64>,
    now: Instant,
) -> Result<GaugeWidget, ConfigError> {
    let mut gauge = build_gauge(
        GaugeSpec {
            id: "temperature",
            unit: unit.suffix(),
            config: MetricConfig {
                initial_value: 22.0,
                domain_min: 10.0,
                domain_max: 35.0,
                tick_interval: Duration::from_secs(7),
                precision: Precision::Tenths,
                policy: StepPolicy::SymmetricUniform { step: 1.5 },
            },
            table: ThresholdTable::new(
                vec![
                    Threshold::new(30.0, "Very Hot", ColorToken::Red),
                    Threshold::new(25.0, "Hot", ColorToken::Orange),
                    Threshold::new(20.0, "Comfortable", ColorToken::Yellow),
                    Threshold::new(15.0, "Cool", ColorToken::Green),
                ],
                Category::new("Cold", ColorToken::Blue),
            )?,
            sizes: SizeSet::three_level(),
            default_size: "small",
        },
        store,
        seed,
        now,
    )?;
    gauge.temp_unit = Some(unit);
    Ok(gauge)
}

/// Humidity: integer percent walk ±3 clamped to [25, 80] every 8 s. The
/// visual fill still spans the full percent scale.
pub fn humidity(
    store: Rc<dyn SizeStore>,
    seed: Option<u64>,
    now: Instant,
) -> Result<GaugeWidget, ConfigError> {
    let mut gauge = build_gauge(
        GaugeSpec {
            id: "humidity",
            unit: "%",
            config: MetricConfig {
                initial_value: 45.0,
                domain_min: 25.0,
                domain_max: 80.0,
                tick_interval: Duration::from_secs(8),
                precision: Precision::Integer,
                policy: StepPolicy::SymmetricUniform { step: 3.0 },
            },
            table: ThresholdTable::new(
                vec![
                    Threshold::new(70.0, "Very Humid", ColorToken::Blue),
                    Threshold::new(50.0, "Humid", ColorToken::Green),
                    Threshold::new(35.0, "Comfortable", ColorToken::Yellow),
                ],
                Category::new("Dry", ColorToken::Orange),
            )?,
            sizes: SizeSet::three_level(),
            default_size: "small",
        },
        store,
        seed,
        now,
    )?;
    gauge.fill_range = Some((0.0, 100.0));
    Ok(gauge)
}

/// Garbage fill: climbs by U(0, 3) every 6 s; a tick starting above 90
/// empties the can to U(0, 10) instead.
pub fn garbage(
    store: Rc<dyn SizeStore>,
    seed: Option<u64>,
    now: Instant,
) -> Result<GaugeWidget, ConfigError> {
    build_gauge(
        GaugeSpec {
            id: "garbage",
            unit: "%",
            config: MetricConfig {
                initial_value: 60.0,
                domain_min: 0.0,
                domain_max: 100.0,
                tick_interval: Duration::from_secs(6),
                precision: Precision::Integer,
                policy: StepPolicy::FillAndReset {
                    fill_step: 3.0,
                    reset_threshold: 90.0,
                    reset_ceiling: 10.0,
                },
            },
            // Integer values, strict "above" bounds start one unit up.
            table: ThresholdTable::new(
                vec![
                    Threshold::new(81.0, "Need emptying", ColorToken::Red),
                    Threshold::new(51.0, "Getting full", ColorToken::Orange),
                    Threshold::new(31.0, "Normal level", ColorToken::Yellow),
                ],
                Category::new("Recently emptied", ColorToken::Green),
            )?,
            sizes: SizeSet::three_level(),
            default_size: "small",
        },
        store,
        seed,
        now,
    )
}

/// Speed: regime walk (accelerate / hold / decelerate, magnitude U(0, 8))
/// in [0, 120] mph every 4 s; color tiers at 85% / 60% / 30% of max.
pub fn speed(
    store: Rc<dyn SizeStore>,
    seed: Option<u64>,
    now: Instant,
) -> Result<GaugeWidget, ConfigError> {
    build_gauge(
        GaugeSpec {
            id: "speed",
            unit: "mph",
            config: MetricConfig {
                initial_value: 45.0,
                domain_min: 0.0,
                domain_max: 120.0,
                tick_interval: Duration::from_secs(4),
                precision: Precision::Integer,
                policy: StepPolicy::Regime {
                    accelerate: 0.45,
                    hold: 0.1,
                    step: 8.0,
                },
            },
            table: ThresholdTable::new(
                vec![
                    Threshold::new(103.0, "Very Fast", ColorToken::Red),
                    Threshold::new(73.0, "Fast", ColorToken::Orange),
                    Threshold::new(37.0, "Moderate", ColorToken::Yellow),
                ],
                Category::new("Slow", ColorToken::Green),
            )?,
            sizes: SizeSet::three_level(),
            default_size: "small",
        },
        store,
        seed,
        now,
    )
}

/// Heart rate: integer bpm walk ±5 in [60, 120] every 5 s, plus a beat
/// pulse whose cadence tracks the simulated bpm (flag holds 200 ms).
pub fn heart_rate(
    store: Rc<dyn SizeStore>,
    seed: Option<u64>,
    now: Instant,
) -> Result<GaugeWidget, ConfigError> {
    let mut gauge = build_gauge(
        GaugeSpec {
            id: "heart_rate",
            unit: "bpm",
            config: MetricConfig {
                initial_value: 72.0,
                domain_min: 60.0,
                domain_max: 120.0,
                tick_interval: Duration::from_secs(5),
                precision: Precision::Integer,
                policy: StepPolicy::SymmetricUniform { step: 5.0 },
            },
            table: ThresholdTable::new(
                vec![
                    Threshold::new(100.0, "Elevated", ColorToken::Red),
                    Threshold::new(85.0, "Active", ColorToken::Orange),
                    Threshold::new(70.0, "Normal", ColorToken::Yellow),
                ],
                Category::new("Resting", ColorToken::Green),
            )?,
            sizes: SizeSet::three_level(),
            default_size: "small",
        },
        store,
        seed,
        now,
    )?;
    gauge.pulse = Some(PulseTimer::new(
        Duration::from_secs_f64(60.0 / 72.0),
        Duration::from_millis(200),
        now,
    )?);
    gauge.pulse_tracks_value = true;
    Ok(gauge)
}

/// Oxygen saturation: SpO₂ walk ±0.2 in [90, 100] every 6 s, one decimal,
/// plus a fixed 3 s pulse (flag holds 300 ms).
pub fn oxygen(
    store: Rc<dyn SizeStore>,
    seed: Option<u64>,
    now: Instant,
) -> Result<GaugeWidget, ConfigError> {
    let mut gauge = build_gauge(
        GaugeSpec {
            id: "oxygen",
            unit: "%",
            config: MetricConfig {
                initial_value: 98.0,
                domain_min: 90.0,
                domain_max: 100.0,
                tick_interval: Duration::from_secs(6),
                precision: Precision::Tenths,
                policy: StepPolicy::SymmetricUniform { step: 0.2 },
            },
            table: ThresholdTable::new(
                vec![
                    Threshold::new(95.0, "Normal", ColorToken::Blue),
                    Threshold::new(90.0, "Slightly Low", ColorToken::Yellow),
                ],
                Category::new("Low", ColorToken::Red),
            )?,
            sizes: SizeSet::three_level(),
            default_size: "small",
        },
        store,
        seed,
        now,
    )?;
    gauge.pulse = Some(PulseTimer::new(
        Duration::from_secs(3),
        Duration::from_millis(300),
        now,
    )?);
    Ok(gauge)
}

/// Cell signal: dBm walk ±10 in [−110, −60] every 3 s, carrier flip
/// (P = 0.2) and roaming toggle (P = 0.1) per tick.
pub fn cell_signal(
    store: Rc<dyn SizeStore>,
    seed: Option<u64>,
    now: Instant,
) -> Result<GaugeWidget, ConfigError> {
    let mut gauge = build_gauge(
        GaugeSpec {
            id: "cell_signal",
            unit: "dBm",
            config: MetricConfig {
                initial_value: -85.0,
                domain_min: -110.0,
                domain_max: -60.0,
                tick_interval: Duration::from_secs(3),
                precision: Precision::Integer,
                policy: StepPolicy::SymmetricUniform { step: 10.0 },
            },
            // Integer dBm, strict "above −70" starts at −69.
            table: ThresholdTable::new(
                vec![
                    Threshold::new(-69.0, "Excellent", ColorToken::Green),
                    Threshold::new(-84.0, "Good", ColorToken::Blue),
                    Threshold::new(-99.0, "Fair", ColorToken::Yellow),
                ],
                Category::new("Poor", ColorToken::Red),
            )?,
            sizes: SizeSet::three_level(),
            default_size: "small",
        },
        store,
        seed,
        now,
    )?;
    gauge.signal = Some(SignalState {
        carrier_index: 0,
        roaming: false,
        rng: match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        },
    });
    Ok(gauge)
}

// =============================================================================
// Heat Map
// =============================================================================

/// The body-heat-map widget: a [`SimulationSession`] of seven zones plus a
/// classification table keyed to offsets from normal body temperature.
pub struct HeatMapWidget {
    session: crate::session::SimulationSession,
    table: ThresholdTable,
    size: WidgetSizeController,
}

impl HeatMapWidget {
    /// Build the heat map with its seven zones offset from the core reading.
    pub fn new(
        store: Rc<dyn SizeStore>,
        seed: Option<u64>,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        use crate::config::NORMAL_BODY_TEMP_F;
        use crate::session::{SessionConfig, SimulationSession, ZoneSpec};

        let core = NORMAL_BODY_TEMP_F;
        let config = SessionConfig {
            core: MetricConfig {
                initial_value: core,
                domain_min: 93.0,
                domain_max: 105.0,
                tick_interval: Duration::from_secs(5),
                precision: Precision::Tenths,
                policy: StepPolicy::SymmetricUniform { step: 0.3 },
            },
            zones: vec![
                ZoneSpec { id: "head", label: "Head", initial_value: core + 0.2 },
                ZoneSpec { id: "chest", label: "Chest", initial_value: core + 0.5 },
                ZoneSpec { id: "abdomen", label: "Abdomen", initial_value: core - 0.2 },
                ZoneSpec { id: "left_arm", label: "Left Arm", initial_value: core - 1.5 },
                ZoneSpec { id: "right_arm", label: "Right Arm", initial_value: core - 1.5 },
                ZoneSpec { id: "left_leg", label: "Left Leg", initial_value: core - 2.0 },
                ZoneSpec { id: "right_leg", label: "Right Leg", initial_value: core - 2.0 },
            ],
            zone_domain_min: 93.0,
            zone_domain_max: 105.0,
            zone_step: 0.4,
            zone_precision: Precision::Tenths,
            tick_interval: Duration::from_secs(5),
            history_enabled: true,
        };
        let session = match seed {
            Some(seed) => SimulationSession::with_seed(config, seed, now)?,
            None => SimulationSession::new(config, now)?,
        };

        // Tiers are offsets from 98.6 °F; one-decimal values make "above
        // +2" start at +2.1.
        let table = ThresholdTable::new(
            vec![
                Threshold::new(core + 2.1, "Very Hot", ColorToken::Red),
                Threshold::new(core + 1.1, "Hot", ColorToken::Orange),
                Threshold::new(core + 0.1, "Warm", ColorToken::Yellow),
                Threshold::new(core - 0.9, "Normal", ColorToken::Gray),
                Threshold::new(core - 1.9, "Cool", ColorToken::Green),
            ],
            Category::new("Cold", ColorToken::Blue),
        )?;

        let size = WidgetSizeController::new("heat_map", SizeSet::four_level(), "medium", store)?;
        Ok(Self { session, table, size })
    }

    /// Run due schedules and return the headline reading for the current
    /// focus.
    pub fn poll(
        &mut self,
        now: Instant,
    ) -> Reading {
        self.session.poll(now);
        self.reading()
    }

    /// Headline reading (focused zone, or the core when unfocused).
    pub fn reading(&self) -> Reading {
        let focused = self.session.focused();
        let category = self.table.classify(focused.value);
        Reading {
            value: focused.value,
            label: category.label,
            color: category.color,
        }
    }

    /// Label of whatever the headline reading describes.
    pub fn focused_label(&self) -> &'static str {
        self.session.focused().label
    }

    /// Every zone with its classified reading, in body order.
    pub fn zone_readings(&self) -> Vec<(&'static str, Reading)> {
        self.session
            .zones()
            .map(|zone| {
                let category = self.table.classify(zone.value);
                (
                    zone.id,
                    Reading {
                        value: zone.value,
                        label: category.label,
                        color: category.color,
                    },
                )
            })
            .collect()
    }

    /// Change which zone is surfaced; `None` returns to the core reading.
    pub fn select_zone(
        &mut self,
        zone_id: Option<&str>,
    ) -> bool {
        self.session.focus(zone_id)
    }

    /// Recent history for a zone (see [`SimulationSession::history_for`]).
    pub fn history_for(
        &self,
        zone_id: &str,
    ) -> Option<Vec<f64>> {
        self.session.history_for(zone_id)
    }

    pub const fn id(&self) -> &'static str {
        "heat_map"
    }

    pub fn size(&self) -> &str {
        self.size.size()
    }

    pub fn resize(
        &mut self,
        size: &str,
    ) -> bool {
        self.size.set_size(size)
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
