//! Fist transition tracking with cooldown.
//!
//! The classifier runs every inference frame and flickers near the
//! decision boundary. This tracker turns the raw flag into a stabilized
//! "fist opened" event: it fires on a closed-to-open transition, at most
//! once per cooldown window.

/// Default minimum time between accepted fist-opened events.
pub const DEFAULT_COOLDOWN_MS: f64 = 500.0;

/// Per-hand gesture state persisting across inference frames.
#[derive(Debug)]
pub struct FistTracker {
    /// Fist flag from the previous frame.
    was_fist: bool,
    /// Timestamp of the last closed-to-open transition (accepted or not).
    last_release_ms: f64,
    cooldown_ms: f64,
}

impl FistTracker {
    pub fn new() -> Self {
        Self::with_cooldown(DEFAULT_COOLDOWN_MS)
    }

    pub fn with_cooldown(cooldown_ms: f64) -> Self {
        Self {
            was_fist: false,
            last_release_ms: f64::NEG_INFINITY,
            cooldown_ms,
        }
    }

    /// Whether the previous frame read as a fist.
    pub fn is_fist(&self) -> bool {
        self.was_fist
    }

    /// Feeds one frame's fist flag; returns true when a fist-opened event
    /// fires.
    ///
    /// The transition timestamp is updated on every closed-to-open
    /// transition, whether or not the cooldown gate passed, so a burst of
    /// detector jitter keeps pushing the window forward instead of
    /// sneaking an event through.
    pub fn update(&mut self, is_fist: bool, now_ms: f64) -> bool {
        let opened = self.was_fist && !is_fist;
        self.was_fist = is_fist;

        if !opened {
            return false;
        }

        let accepted = now_ms - self.last_release_ms >= self.cooldown_ms;
        self.last_release_ms = now_ms;
        accepted
    }
}

impl Default for FistTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_close_then_open() {
        let mut tracker = FistTracker::new();
        assert!(!tracker.update(true, 0.0));
        assert!(tracker.update(false, 100.0));
    }

    #[test]
    fn test_no_event_without_prior_fist() {
        let mut tracker = FistTracker::new();
        assert!(!tracker.update(false, 0.0));
        assert!(!tracker.update(false, 100.0));
    }

    #[test]
    fn test_cooldown_suppresses_rapid_retrigger() {
        let mut tracker = FistTracker::new();
        tracker.update(true, 0.0);
        assert!(tracker.update(false, 100.0));
        // Second open within 500ms of the first: suppressed.
        tracker.update(true, 200.0);
        assert!(!tracker.update(false, 300.0));
        // The suppressed transition still reset the window, so another
        // transition must wait 500ms from 300.0, not from 100.0.
        tracker.update(true, 500.0);
        assert!(!tracker.update(false, 700.0));
        tracker.update(true, 750.0);
        assert!(tracker.update(false, 1250.0));
    }

    #[test]
    fn test_event_after_cooldown_elapses() {
        let mut tracker = FistTracker::new();
        tracker.update(true, 0.0);
        assert!(tracker.update(false, 50.0));
        tracker.update(true, 400.0);
        assert!(tracker.update(false, 551.0));
    }

    #[test]
    fn test_custom_cooldown() {
        let mut tracker = FistTracker::with_cooldown(100.0);
        tracker.update(true, 0.0);
        assert!(tracker.update(false, 10.0));
        tracker.update(true, 50.0);
        assert!(tracker.update(false, 111.0));
    }

    #[test]
    fn test_is_fist_mirrors_last_frame() {
        let mut tracker = FistTracker::new();
        tracker.update(true, 0.0);
        assert!(tracker.is_fist());
        tracker.update(false, 10.0);
        assert!(!tracker.is_fist());
    }
}
