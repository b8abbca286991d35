//! Cooperative periodic scheduling for widget simulators.
//!
//! The dashboard runs single-threaded: a driver loop polls every widget at a
//! fixed frame cadence and each widget checks its own schedules against the
//! supplied `Instant`. Nothing blocks and nothing re-enters — a tick is just
//! a synchronous state mutation performed while the widget is being polled.
//!
//! # Ownership
//!
//! Every [`Ticker`] (and every secondary [`PulseTimer`]) is owned by exactly
//! one widget. Tearing a widget down drops its schedules with it, so a
//! schedule can never fire against state that no longer has an observer.
//! [`Ticker::cancel`] additionally lets a widget stop its schedules ahead of
//! drop; a cancelled ticker reports zero due ticks forever after.
//!
//! # Catch-up
//!
//! `poll` reports how many whole intervals elapsed since the last report, so
//! a driver that stalls (debugger, suspended laptop) replays the missed ticks
//! rather than silently stretching the walk's cadence.

use std::time::{Duration, Instant};

use crate::error::ConfigError;

// =============================================================================
// Ticker
// =============================================================================

/// One owned periodic schedule.
///
/// Created with its interval and the current instant; `poll` returns the
/// number of ticks that have come due since the previous call.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl Ticker {
    /// Create a schedule whose first tick is due one interval from `now`.
    pub fn new(
        interval: Duration,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(Self {
            interval,
            next_due: now + interval,
            cancelled: false,
        })
    }

    /// Count the ticks due at `now` and advance the schedule past them.
    ///
    /// Returns 0 after cancellation, regardless of elapsed time.
    pub fn poll(
        &mut self,
        now: Instant,
    ) -> u32 {
        if self.cancelled {
            return 0;
        }
        let mut fired = 0;
        while self.next_due <= now {
            self.next_due += self.interval;
            fired += 1;
        }
        fired
    }

    /// Stop the schedule. Safe to call more than once; the first call is the
    /// one that takes effect.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether the schedule has been cancelled.
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Current interval between ticks.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Re-tune the interval, scheduling the next tick one new interval from
    /// `now`. Used by value-dependent schedules (heartbeat cadence follows
    /// the simulated bpm).
    pub fn retune(
        &mut self,
        interval: Duration,
        now: Instant,
    ) {
        if interval.is_zero() {
            return; // keep the old cadence rather than spin
        }
        self.interval = interval;
        self.next_due = now + interval;
    }
}

// =============================================================================
// PulseTimer
// =============================================================================

/// Secondary transient-flag schedule (heartbeat / SpO₂ pulse blink).
///
/// Runs its own [`Ticker`], independent of the owning widget's value
/// schedule: each tick raises the flag, and the flag drops again `hold`
/// after it was raised. The two schedules share nothing but the widget that
/// owns them both.
#[derive(Debug, Clone)]
pub struct PulseTimer {
    ticker: Ticker,
    hold: Duration,
    active_until: Option<Instant>,
}

impl PulseTimer {
    /// Create a pulse schedule firing every `interval`, holding the flag for
    /// `hold` after each firing.
    pub fn new(
        interval: Duration,
        hold: Duration,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            ticker: Ticker::new(interval, now)?,
            hold,
            active_until: None,
        })
    }

    /// Process due ticks and expiry, then report whether the flag is up.
    pub fn poll(
        &mut self,
        now: Instant,
    ) -> bool {
        if self.ticker.poll(now) > 0 {
            self.active_until = Some(now + self.hold);
        }
        if let Some(until) = self.active_until
            && now >= until
        {
            self.active_until = None;
        }
        self.active_until.is_some()
    }

    /// Whether the flag is currently raised (as of the last `poll`).
    pub const fn is_active(&self) -> bool {
        self.active_until.is_some()
    }

    /// Re-tune the firing cadence (see [`Ticker::retune`]).
    pub fn retune(
        &mut self,
        interval: Duration,
        now: Instant,
    ) {
        self.ticker.retune(interval, now);
    }

    /// Stop the schedule; the flag drops and never rises again.
    pub fn cancel(&mut self) {
        self.ticker.cancel();
        self.active_until = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_secs(5);

    #[test]
    fn test_ticker_rejects_zero_interval() {
        let now = Instant::now();
        assert_eq!(
            Ticker::new(Duration::ZERO, now).unwrap_err(),
            ConfigError::ZeroTickInterval
        );
    }

    #[test]
    fn test_ticker_not_due_before_interval() {
        let now = Instant::now();
        let mut ticker = Ticker::new(TICK, now).unwrap();
        assert_eq!(ticker.poll(now), 0, "No tick should be due at creation time");
        assert_eq!(ticker.poll(now + TICK / 2), 0, "No tick should be due mid-interval");
    }

    #[test]
    fn test_ticker_fires_once_per_interval() {
        let now = Instant::now();
        let mut ticker = Ticker::new(TICK, now).unwrap();
        assert_eq!(ticker.poll(now + TICK), 1, "Exactly one tick due after one interval");
        assert_eq!(ticker.poll(now + TICK), 0, "Same instant polled twice must not double-fire");
        assert_eq!(ticker.poll(now + TICK * 2), 1, "Next interval fires the next tick");
    }

    #[test]
    fn test_ticker_catches_up_after_stall() {
        let now = Instant::now();
        let mut ticker = Ticker::new(TICK, now).unwrap();
        assert_eq!(ticker.poll(now + TICK * 4), 4, "A stalled driver replays missed ticks");
    }

    #[test]
    fn test_ticker_cancel_stops_firing() {
        let now = Instant::now();
        let mut ticker = Ticker::new(TICK, now).unwrap();
        ticker.cancel();
        assert!(ticker.is_cancelled());
        // Teardown safety: N further tick periods produce zero fires.
        assert_eq!(ticker.poll(now + TICK * 10), 0, "Cancelled ticker must never fire");
    }

    #[test]
    fn test_ticker_cancel_is_idempotent() {
        let now = Instant::now();
        let mut ticker = Ticker::new(TICK, now).unwrap();
        ticker.cancel();
        ticker.cancel();
        assert_eq!(ticker.poll(now + TICK), 0);
    }

    #[test]
    fn test_ticker_retune_changes_cadence() {
        let now = Instant::now();
        let mut ticker = Ticker::new(TICK, now).unwrap();
        ticker.retune(Duration::from_secs(1), now);
        assert_eq!(ticker.poll(now + Duration::from_secs(1)), 1);
        assert_eq!(ticker.interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_ticker_retune_ignores_zero() {
        let now = Instant::now();
        let mut ticker = Ticker::new(TICK, now).unwrap();
        ticker.retune(Duration::ZERO, now);
        assert_eq!(ticker.interval(), TICK, "Zero retune keeps the old cadence");
    }

    #[test]
    fn test_pulse_raises_then_clears() {
        let now = Instant::now();
        let interval = Duration::from_secs(3);
        let hold = Duration::from_millis(300);
        let mut pulse = PulseTimer::new(interval, hold, now).unwrap();

        assert!(!pulse.poll(now), "Flag starts down");
        assert!(pulse.poll(now + interval), "Flag rises when the schedule fires");
        assert!(
            pulse.poll(now + interval + Duration::from_millis(100)),
            "Flag holds within the hold window"
        );
        assert!(
            !pulse.poll(now + interval + hold),
            "Flag clears once the hold window elapses"
        );
    }

    #[test]
    fn test_pulse_cancel_drops_flag() {
        let now = Instant::now();
        let mut pulse = PulseTimer::new(Duration::from_secs(3), Duration::from_millis(300), now).unwrap();
        assert!(pulse.poll(now + Duration::from_secs(3)));
        pulse.cancel();
        assert!(!pulse.is_active(), "Cancel drops the flag immediately");
        assert!(!pulse.poll(now + Duration::from_secs(30)), "Cancelled pulse never rises again");
    }
}
