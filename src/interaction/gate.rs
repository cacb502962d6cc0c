//! Double-tap gate for placement.
//!
//! Placement needs two taps on a detected surface within a short window. The gate only
//! looks at timestamps: the second tap may land anywhere, and the location it carries is
//! the one that gets placed.

use std::time::{Duration, Instant};

use crate::config::DEFAULT_DOUBLE_TAP_WINDOW;

/// Where the gate is in a double-tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapGateState {
    Idle,
    AwaitingSecondTap(Instant),
}

/// A placement gesture that passed the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confirmed<T>(pub T);

/// Turns a stream of taps into confirmed placement gestures.
#[derive(Debug, Clone)]
pub struct PlacementGate {
    window: Duration,
    state: TapGateState,
}

impl PlacementGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: TapGateState::Idle,
        }
    }

    /// Feeds one tap. Returns the tap's location when it completes a double-tap.
    ///
    /// A tap arriving `window` or later after the pending first tap starts a new
    /// double-tap instead.
    pub fn on_tap<T>(&mut self, location: T, now: Instant) -> Option<Confirmed<T>> {
        match self.state {
            TapGateState::AwaitingSecondTap(first) if now.saturating_duration_since(first) < self.window => {
                self.state = TapGateState::Idle;
                Some(Confirmed(location))
            }
            _ => {
                self.state = TapGateState::AwaitingSecondTap(now);
                None
            }
        }
    }

    pub fn state(&self) -> TapGateState {
        self.state
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Forgets any pending first tap.
    pub fn reset(&mut self) {
        self.state = TapGateState::Idle;
    }
}

impl Default for PlacementGate {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const WINDOW: Duration = Duration::from_millis(1000);

    #[test]
    fn test_first_tap_waits() {
        let mut gate = PlacementGate::new(WINDOW);
        let t0 = Instant::now();

        assert_eq!(gate.on_tap("a", t0), None);
        assert_eq!(gate.state(), TapGateState::AwaitingSecondTap(t0));
    }

    #[test]
    fn test_second_tap_inside_window_confirms() {
        let mut gate = PlacementGate::new(WINDOW);
        let t0 = Instant::now();

        gate.on_tap("first", t0);
        let confirmed = gate.on_tap("second", t0 + Duration::from_millis(300));

        assert_eq!(confirmed, Some(Confirmed("second")));
        assert_eq!(gate.state(), TapGateState::Idle);
    }

    #[test]
    fn test_late_second_tap_restarts() {
        let mut gate = PlacementGate::new(WINDOW);
        let t0 = Instant::now();
        let t1 = t0 + WINDOW;

        gate.on_tap((), t0);
        assert_eq!(gate.on_tap((), t1), None);
        assert_eq!(gate.state(), TapGateState::AwaitingSecondTap(t1));

        // The late tap now counts as a first tap.
        assert!(gate.on_tap((), t1 + Duration::from_millis(10)).is_some());
    }

    #[test]
    fn test_third_tap_starts_over() {
        let mut gate = PlacementGate::new(WINDOW);
        let t0 = Instant::now();

        gate.on_tap((), t0);
        assert!(gate.on_tap((), t0 + Duration::from_millis(100)).is_some());
        assert!(gate.on_tap((), t0 + Duration::from_millis(200)).is_none());
    }

    #[test]
    fn test_location_is_not_compared() {
        let mut gate = PlacementGate::new(WINDOW);
        let t0 = Instant::now();

        gate.on_tap([0.0_f32, 0.0, -1.0], t0);
        let confirmed = gate.on_tap([4.0_f32, 0.0, 3.0], t0 + Duration::from_millis(50));
        assert_eq!(confirmed, Some(Confirmed([4.0, 0.0, 3.0])));
    }

    #[test]
    fn test_reset_drops_pending_tap() {
        let mut gate = PlacementGate::new(WINDOW);
        let t0 = Instant::now();

        gate.on_tap((), t0);
        gate.reset();
        assert!(gate.on_tap((), t0 + Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_random_tap_pairs_respect_window() {
        let mut rng = rand::rng();
        let base = Instant::now();

        for _ in 0..500 {
            let start = base + Duration::from_millis(rng.random_range(0..10_000));
            let gap = Duration::from_millis(rng.random_range(0..2_000));
            let mut gate = PlacementGate::new(WINDOW);

            gate.on_tap((), start);
            let confirmed = gate.on_tap((), start + gap);

            if gap < WINDOW {
                assert!(confirmed.is_some(), "gap {:?} should confirm", gap);
                assert_eq!(gate.state(), TapGateState::Idle);
            } else {
                assert!(confirmed.is_none(), "gap {:?} should not confirm", gap);
                assert_eq!(gate.state(), TapGateState::AwaitingSecondTap(start + gap));
            }
        }
    }
}
