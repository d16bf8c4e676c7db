//! One-shot countdown timers polled once per frame.
//!
//! Every time-gated player action (tool use, seed use, selection cooldowns)
//! runs on an `ActionTimer`. There is no scheduling thread: the owner calls
//! `update` each frame with the monotonic elapsed-time clock and dispatches
//! the bound effect when it returns true. Explicit dispatch at the call site
//! replaces stored callbacks, keeping ownership simple.

/// Milliseconds since app start, as supplied by `bevy::time::Time`.
pub fn now_ms(time: &bevy::time::Time) -> u64 {
    time.elapsed().as_millis() as u64
}

#[derive(Debug, Clone)]
pub struct ActionTimer {
    duration_ms: u64,
    start_ms: u64,
    active: bool,
}

impl ActionTimer {
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms, start_ms: 0, active: false }
    }

    /// Start (or restart) the countdown at `now`.
    pub fn activate(&mut self, now: u64) {
        self.active = true;
        self.start_ms = now;
    }

    /// Stop without firing.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.start_ms = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Poll the timer. Returns true exactly once per activation, on the
    /// first call at or after expiry, deactivating in the same step.
    pub fn update(&mut self, now: u64) -> bool {
        if !self.active {
            return false;
        }
        if now.saturating_sub(self.start_ms) >= self.duration_ms {
            self.deactivate();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_on_first_update_after_expiry() {
        let mut t = ActionTimer::new(350);
        t.activate(1_000);
        assert!(!t.update(1_000));
        assert!(!t.update(1_349));
        assert!(t.update(1_350));
        // Deactivated after firing; later polls are no-ops.
        assert!(!t.is_active());
        assert!(!t.update(9_999));
    }

    #[test]
    fn test_never_fires_without_activation() {
        let mut t = ActionTimer::new(10);
        assert!(!t.update(0));
        assert!(!t.update(1_000_000));
    }

    #[test]
    fn test_reactivation_restarts_countdown() {
        let mut t = ActionTimer::new(200);
        t.activate(0);
        assert!(!t.update(150));
        t.activate(150); // restart before expiry
        assert!(!t.update(300));
        assert!(t.update(350));
    }

    #[test]
    fn test_deactivate_suppresses_firing() {
        let mut t = ActionTimer::new(100);
        t.activate(0);
        t.deactivate();
        assert!(!t.update(500));
    }

    #[test]
    fn test_fires_exactly_at_duration_boundary() {
        let mut t = ActionTimer::new(0);
        t.activate(42);
        assert!(t.update(42));
    }
}
