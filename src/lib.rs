//! Telemetry widget dashboard simulation core.
//!
//! Simulates a dashboard of live-looking telemetry gauges — battery,
//! temperature, humidity, garbage fill, vehicle speed, heart rate, oxygen
//! saturation, cell signal, and a multi-zone body-heat map. Every gauge is
//! a self-contained bounded random walk rather than a real sensor feed:
//! each tick samples a delta per the gauge's policy, clamps into the
//! gauge's domain, and classifies the result into a label/color pair for
//! the rendering layer.
//!
//! # Architecture
//!
//! - [`simulator`] — the generic bounded-random-walk machine and its per
//!   gauge step policies.
//! - [`classify`] — pure ordered threshold classification.
//! - [`schedule`] — poll-driven periodic scheduling ([`schedule::Ticker`])
//!   and transient pulse flags ([`schedule::PulseTimer`]). All timing flows
//!   through explicit `Instant`s, so tests never wait on real time.
//! - [`session`] — the multi-zone variant behind the heat map: zones share
//!   one cadence, a nullable focus picks the headline reading, and each
//!   zone keeps a bounded history ring.
//! - [`store`] / [`sizes`] — durable per-widget display-size preferences:
//!   value state is ephemeral, layout preference survives restarts.
//! - [`widgets`] — the per-gauge configuration catalog.
//! - [`dashboard`] — composition, event routing, and teardown.

pub mod classify;
pub mod colors;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod schedule;
pub mod session;
pub mod simulator;
pub mod sizes;
pub mod store;
pub mod widgets;

pub use classify::{Category, Threshold, ThresholdTable};
pub use colors::ColorToken;
pub use dashboard::Dashboard;
pub use error::ConfigError;
pub use schedule::{PulseTimer, Ticker};
pub use session::{SessionConfig, SimulationSession, ZoneSpec};
pub use simulator::{MetricConfig, MetricSimulator, Precision, StepPolicy};
pub use sizes::{SizeSet, WidgetSizeController};
pub use store::{JsonFileStore, MemoryStore, SizeStore};
pub use widgets::{GaugeWidget, HeatMapWidget, Reading, TempUnit};
