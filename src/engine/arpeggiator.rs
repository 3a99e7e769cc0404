//! Arpeggiator clock.
//!
//! A wall-clock stepper: given a patch's step interval and semitone
//! pattern, it advances a step index on its own cadence, independent of
//! how often callers poll. [`ArpeggiatorClock::advance`] returns the
//! semitone offset of the currently sounding step every call, whether or
//! not a step fired this call.

use crate::patch::ArpeggiatorPattern;

/// Steps a semitone pattern on a wall-clock cadence.
pub struct ArpeggiatorClock {
    pattern: Option<ArpeggiatorPattern>,
    active: bool,
    /// Index of the currently sounding step.
    step_index: usize,
    /// Whether the first step after activation has fired yet. The first
    /// trigger sounds step 0 rather than advancing past it.
    started: bool,
    last_step_ms: f64,
}

impl ArpeggiatorClock {
    pub fn new(pattern: Option<ArpeggiatorPattern>) -> Self {
        Self {
            pattern,
            active: false,
            step_index: 0,
            started: false,
            last_step_ms: 0.0,
        }
    }

    /// Swaps in the new patch's pattern (or none) and resets the step.
    pub fn set_pattern(&mut self, pattern: Option<ArpeggiatorPattern>) {
        self.pattern = pattern;
        self.step_index = 0;
        self.started = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts or stops the clock. Deactivation silently resets to step 0;
    /// no frequency change is emitted until the next active advance reads
    /// index 0. Activation anchors the cadence at `now_ms`.
    pub fn set_active(&mut self, active: bool, now_ms: f64) {
        if active && !self.active {
            self.step_index = 0;
            self.started = false;
            self.last_step_ms = now_ms;
        } else if !active {
            self.step_index = 0;
            self.started = false;
        }
        self.active = active;
    }

    /// Polls the clock, stepping if the interval has elapsed, and returns
    /// the semitone offset of the current step. Inactive clocks and
    /// patches without a pattern always return 0.
    pub fn advance(&mut self, now_ms: f64) -> i32 {
        if !self.active {
            return 0;
        }
        let Some(pattern) = &self.pattern else {
            return 0;
        };
        if pattern.steps.is_empty() {
            return 0;
        }

        if now_ms - self.last_step_ms >= pattern.interval_ms {
            if self.started {
                self.step_index = (self.step_index + 1) % pattern.steps.len();
            } else {
                self.started = true;
            }
            self.last_step_ms = now_ms;
        }

        pattern.steps[self.step_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> ArpeggiatorPattern {
        ArpeggiatorPattern {
            interval_ms: 200.0,
            steps: vec![0, 4, 7, 12],
        }
    }

    #[test]
    fn test_five_steps_over_one_second() {
        let mut clock = ArpeggiatorClock::new(Some(pattern()));
        clock.set_active(true, 0.0);

        let mut fired = Vec::new();
        assert_eq!(clock.advance(0.0), 0);
        let mut last = 0;
        for i in 1..=20 {
            let now = i as f64 * 50.0;
            let offset = clock.advance(now);
            // A "step" is any poll where the returned step could have
            // changed; count the trigger instants instead by tracking the
            // interval boundaries.
            if now % 200.0 == 0.0 {
                fired.push(offset);
            }
            last = offset;
        }
        // Triggers at 200, 400, 600, 800, 1000 ms: exactly five, visiting
        // pattern indices 0, 1, 2, 3, 0.
        assert_eq!(fired, vec![0, 4, 7, 12, 0]);
        assert_eq!(last, 0);
    }

    #[test]
    fn test_polling_rate_does_not_skip_steps() {
        let mut clock = ArpeggiatorClock::new(Some(pattern()));
        clock.set_active(true, 0.0);
        // Poll only every 450ms: steps still land one at a time.
        assert_eq!(clock.advance(450.0), 0);
        assert_eq!(clock.advance(900.0), 4);
        assert_eq!(clock.advance(1350.0), 7);
    }

    #[test]
    fn test_returns_current_step_between_triggers() {
        let mut clock = ArpeggiatorClock::new(Some(pattern()));
        clock.set_active(true, 0.0);
        clock.advance(200.0);
        clock.advance(400.0);
        // Now sounding step index 1 (= 4 semitones); repolling holds it.
        assert_eq!(clock.advance(410.0), 4);
        assert_eq!(clock.advance(500.0), 4);
    }

    #[test]
    fn test_deactivation_resets_to_step_zero() {
        let mut clock = ArpeggiatorClock::new(Some(pattern()));
        clock.set_active(true, 0.0);
        clock.advance(200.0);
        clock.advance(400.0);
        clock.advance(600.0);
        assert_eq!(clock.advance(610.0), 7);

        clock.set_active(false, 650.0);
        assert_eq!(clock.advance(700.0), 0);

        clock.set_active(true, 1000.0);
        assert_eq!(clock.advance(1010.0), 0);
        assert_eq!(clock.advance(1200.0), 0);
        assert_eq!(clock.advance(1400.0), 4);
    }

    #[test]
    fn test_no_pattern_returns_zero() {
        let mut clock = ArpeggiatorClock::new(None);
        clock.set_active(true, 0.0);
        for i in 0..10 {
            assert_eq!(clock.advance(i as f64 * 100.0), 0);
        }
    }

    #[test]
    fn test_empty_steps_returns_zero() {
        let mut clock = ArpeggiatorClock::new(Some(ArpeggiatorPattern {
            interval_ms: 100.0,
            steps: vec![],
        }));
        clock.set_active(true, 0.0);
        assert_eq!(clock.advance(1000.0), 0);
    }

    #[test]
    fn test_set_pattern_resets_step() {
        let mut clock = ArpeggiatorClock::new(Some(pattern()));
        clock.set_active(true, 0.0);
        clock.advance(200.0);
        clock.advance(400.0);
        clock.set_pattern(Some(ArpeggiatorPattern {
            interval_ms: 100.0,
            steps: vec![5, 9],
        }));
        assert_eq!(clock.advance(450.0), 5);
    }
}
