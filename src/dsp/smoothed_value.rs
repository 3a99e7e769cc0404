//! Smoothed parameter values for click-free audio.
//!
//! Every externally driven parameter in the synthesis graph (harmonic
//! frequencies and gains, filter cutoff, reverb send level, LFO rate) is
//! written as a *target* and converges toward it with one-pole exponential
//! smoothing. This is what absorbs the rate mismatch between the ~60 Hz
//! control tick and the audio sample clock without audible steps.

/// A value that smoothly interpolates toward a target.
///
/// Uses exponential (one-pole lowpass) smoothing. The time constant is the
/// time to reach ~63% of the distance to the target.
#[derive(Clone, Debug)]
pub struct SmoothedValue {
    /// Current smoothed value.
    current: f32,
    /// Target value we're converging toward.
    target: f32,
    /// Per-sample smoothing coefficient (0-1). Higher = slower.
    coefficient: f32,
    /// Sample rate, kept for recalculating the coefficient.
    sample_rate: f32,
    /// Time constant in seconds.
    time_constant_secs: f32,
}

impl SmoothedValue {
    /// Snap threshold: below this distance the value locks onto the target
    /// to avoid denormal drift and wasted work once converged.
    const SNAP_EPSILON: f32 = 1e-4;

    /// Creates a new smoothed value starting (and targeted) at `initial`.
    pub fn new(initial: f32, time_constant_secs: f32, sample_rate: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coefficient: Self::calc_coefficient(time_constant_secs, sample_rate),
            sample_rate,
            time_constant_secs,
        }
    }

    /// coefficient = exp(-1 / (tc * sr)); a zero or sub-sample time
    /// constant degenerates to instant assignment.
    fn calc_coefficient(time_constant_secs: f32, sample_rate: f32) -> f32 {
        let tc_samples = time_constant_secs * sample_rate;
        if tc_samples < 1.0 {
            return 0.0;
        }
        (-1.0 / tc_samples).exp()
    }

    /// Sets a new target to converge toward.
    #[inline]
    pub fn set_target(&mut self, value: f32) {
        self.target = value;
    }

    /// The current target.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// The current smoothed value, without advancing.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Advances the smoothing by one sample and returns the new value.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let diff = self.current - self.target;
        if diff.abs() <= Self::SNAP_EPSILON {
            self.current = self.target;
        } else {
            self.current = self.target + self.coefficient * diff;
        }
        self.current
    }

    /// Sets the value immediately, bypassing smoothing. Used for initial
    /// setup and for discrete changes where a glide would be wrong.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// True while the value is still converging toward its target.
    #[inline]
    pub fn is_smoothing(&self) -> bool {
        (self.current - self.target).abs() > Self::SNAP_EPSILON
    }

    /// Updates the sample rate and recalculates the coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.coefficient = Self::calc_coefficient(self.time_constant_secs, sample_rate);
    }

    /// Updates the time constant and recalculates the coefficient.
    pub fn set_time_constant(&mut self, time_constant_secs: f32) {
        self.time_constant_secs = time_constant_secs;
        self.coefficient = Self::calc_coefficient(time_constant_secs, self.sample_rate);
    }
}
