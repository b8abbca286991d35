//! Demo driver: builds the standard dashboard and polls it at frame cadence,
//! logging each reading as its gauge ticks.
//!
//! Widget sizes persist to `widget_sizes.json` in the working directory, so
//! resizes made through the library API survive restarts. Set `RUST_LOG` to
//! control verbosity (`info` shows value changes, `debug` adds rejected
//! events and focus changes).

use std::rc::Rc;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use telemetry_dashboard_sim::config::{FRAME_TIME, SIZE_STORE_FILE};
use telemetry_dashboard_sim::{Dashboard, JsonFileStore, Reading};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = Rc::new(JsonFileStore::open(SIZE_STORE_FILE));
    let now = Instant::now();
    let mut dashboard = match Dashboard::new(store, now) {
        Ok(dashboard) => dashboard,
        Err(err) => {
            tracing::error!(%err, "dashboard configuration rejected");
            return;
        }
    };

    tracing::info!(widgets = dashboard.gauges().len() + 1, "dashboard started");

    let mut previous: Vec<(&str, Reading)> = Vec::new();
    loop {
        let readings = dashboard.poll(Instant::now());
        for (id, reading) in &readings {
            let changed = previous
                .iter()
                .find(|(prev_id, _)| prev_id == id)
                .is_none_or(|(_, prev)| prev != reading);
            if changed {
                tracing::info!(
                    widget = id,
                    value = reading.value,
                    label = reading.label,
                    color = %reading.color,
                    "reading"
                );
            }
        }
        previous = readings;

        std::thread::sleep(FRAME_TIME);
    }
}
