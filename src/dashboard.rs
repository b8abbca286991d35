//! Dashboard composition: owns every widget and the shared size store.
//!
//! The driver loop calls [`Dashboard::poll`] at frame cadence; each widget
//! checks its own schedules against the supplied instant. External events
//! ([`Dashboard::resize`], [`Dashboard::select_zone`]) are fanned to the
//! widget that owns them. Dropping the dashboard drops every widget and
//! with them every schedule; [`Dashboard::shutdown`] additionally cancels
//! all schedules ahead of drop.

use std::rc::Rc;
use std::time::Instant;

use crate::error::ConfigError;
use crate::store::SizeStore;
use crate::widgets::{self, GaugeWidget, HeatMapWidget, Reading, TempUnit};

/// The full widget set, mirroring the demo layout.
pub struct Dashboard {
    gauges: Vec<GaugeWidget>,
    heat_map: HeatMapWidget,
    store: Rc<dyn SizeStore>,
}

impl Dashboard {
    /// Build the standard composition against a shared size store.
    pub fn new(
        store: Rc<dyn SizeStore>,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        Self::build(store, None, now)
    }

    /// Deterministic variant: widget seeds are derived from `seed`.
    pub fn with_seed(
        store: Rc<dyn SizeStore>,
        seed: u64,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        Self::build(store, Some(seed), now)
    }

    fn build(
        store: Rc<dyn SizeStore>,
        seed: Option<u64>,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        let derive = |offset: u64| seed.map(|s| s.wrapping_add(offset));
        let gauges = vec![
            widgets::battery(store.clone(), derive(0), now)?,
            widgets::temperature(TempUnit::Fahrenheit, store.clone(), derive(10), now)?,
            widgets::humidity(store.clone(), derive(20), now)?,
            widgets::garbage(store.clone(), derive(30), now)?,
            widgets::speed(store.clone(), derive(40), now)?,
            widgets::heart_rate(store.clone(), derive(50), now)?,
            widgets::oxygen(store.clone(), derive(60), now)?,
            widgets::cell_signal(store.clone(), derive(70), now)?,
        ];
        let heat_map = HeatMapWidget::new(store.clone(), derive(80), now)?;
        Ok(Self { gauges, heat_map, store })
    }

    /// Poll every widget and collect the current readings.
    pub fn poll(
        &mut self,
        now: Instant,
    ) -> Vec<(&'static str, Reading)> {
        let mut readings = Vec::with_capacity(self.gauges.len() + 1);
        for gauge in &mut self.gauges {
            readings.push((gauge.id(), gauge.poll(now)));
        }
        readings.push((self.heat_map.id(), self.heat_map.poll(now)));
        readings
    }

    /// Route a resize request to the named widget. Unknown widget ids and
    /// sizes outside the widget's set are both rejected.
    pub fn resize(
        &mut self,
        widget_id: &str,
        size: &str,
    ) -> bool {
        if widget_id == self.heat_map.id() {
            return self.heat_map.resize(size);
        }
        match self.gauges.iter_mut().find(|g| g.id() == widget_id) {
            Some(gauge) => gauge.resize(size),
            None => {
                tracing::debug!(widget = widget_id, "ignoring resize for unknown widget");
                false
            }
        }
    }

    /// Change the heat map's focused zone (`None` = core reading).
    pub fn select_zone(
        &mut self,
        zone_id: Option<&str>,
    ) -> bool {
        self.heat_map.select_zone(zone_id)
    }

    /// Look up one gauge by id.
    pub fn gauge(
        &self,
        widget_id: &str,
    ) -> Option<&GaugeWidget> {
        self.gauges.iter().find(|g| g.id() == widget_id)
    }

    /// The gauges in layout order (heat map excluded).
    pub fn gauges(&self) -> &[GaugeWidget] {
        &self.gauges
    }

    pub const fn heat_map(&self) -> &HeatMapWidget {
        &self.heat_map
    }

    /// The size store shared by every widget.
    pub fn store(&self) -> Rc<dyn SizeStore> {
        self.store.clone()
    }

    /// Cancel every schedule owned by any widget.
    pub fn shutdown(&mut self) {
        for gauge in &mut self.gauges {
            gauge.cancel();
        }
        self.heat_map.cancel();
        tracing::info!("dashboard schedules cancelled");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::store::MemoryStore;

    fn dashboard(now: Instant) -> Dashboard {
        Dashboard::with_seed(Rc::new(MemoryStore::new()), 42, now).unwrap()
    }

    #[test]
    fn test_standard_composition() {
        let board = dashboard(Instant::now());
        let ids: Vec<&str> = board.gauges().iter().map(|g| g.id()).collect();
        assert_eq!(
            ids,
            [
                "battery",
                "temperature",
                "humidity",
                "garbage",
                "speed",
                "heart_rate",
                "oxygen",
                "cell_signal"
            ]
        );
        assert_eq!(board.heat_map().id(), "heat_map");
    }

    #[test]
    fn test_poll_emits_one_reading_per_widget() {
        let now = Instant::now();
        let mut board = dashboard(now);
        let readings = board.poll(now + Duration::from_secs(10));
        assert_eq!(readings.len(), 9, "Eight gauges plus the heat map");
        assert!(readings.iter().any(|(id, _)| *id == "heat_map"));
    }

    #[test]
    fn test_resize_routes_to_the_named_widget() {
        let now = Instant::now();
        let mut board = dashboard(now);
        assert!(board.resize("battery", "large"));
        assert_eq!(board.gauge("battery").unwrap().size(), "large");
        assert_eq!(board.gauge("speed").unwrap().size(), "small", "Other widgets untouched");
    }

    #[test]
    fn test_resize_rejects_unknown_widget_and_size() {
        let now = Instant::now();
        let mut board = dashboard(now);
        assert!(!board.resize("toaster", "large"));
        assert!(
            !board.resize("battery", "x-large"),
            "Battery uses the three-level set and has no x-large"
        );
        assert!(board.resize("heat_map", "x-large"), "Heat map uses the four-level set");
    }

    #[test]
    fn test_resized_widgets_share_one_store() {
        let now = Instant::now();
        let mut board = dashboard(now);
        board.resize("battery", "medium");
        assert_eq!(board.store().get("battery"), Some("medium".to_string()));
    }

    #[test]
    fn test_select_zone_routes_to_heat_map() {
        let now = Instant::now();
        let mut board = dashboard(now);
        assert!(board.select_zone(Some("chest")));
        assert_eq!(board.heat_map().focused_label(), "Chest");
        assert!(!board.select_zone(Some("tail")));
    }

    #[test]
    fn test_shutdown_freezes_every_reading() {
        let now = Instant::now();
        let mut board = dashboard(now);
        board.shutdown();
        let before = board.poll(now + Duration::from_secs(60));
        let after = board.poll(now + Duration::from_secs(600));
        assert_eq!(after, before, "No schedule may fire after shutdown");
    }
}
