//! Application configuration constants.
//!
//! Per-gauge simulation parameters (domains, step ranges, tick intervals,
//! threshold tables) live in [`crate::widgets`]; this module only holds the
//! constants shared across modules.

use std::time::Duration;

// =============================================================================
// Demo Loop Configuration
// =============================================================================

/// Poll granularity of the demo loop. Every widget schedule is checked at this
/// cadence; the shortest real tick interval is 3 seconds, so 250ms gives
/// plenty of headroom without busy-waiting.
pub const FRAME_TIME: Duration = Duration::from_millis(250);

// =============================================================================
// Multi-Zone Session Configuration
// =============================================================================

/// Number of readings kept per zone in the history ring buffer.
/// Oldest readings are evicted once the buffer is full.
pub const ZONE_HISTORY_CAPACITY: usize = 20;

/// Reference body temperature in Fahrenheit. Heat-map classification tiers
/// are offsets from this value.
pub const NORMAL_BODY_TEMP_F: f64 = 98.6;

// =============================================================================
// Persistence Configuration
// =============================================================================

/// Default file name for the widget size preference store.
pub const SIZE_STORE_FILE: &str = "widget_sizes.json";
