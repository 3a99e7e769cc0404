//! Master amplitude envelope.
//!
//! A four-state machine gating overall loudness on hand presence: linear
//! attack to 1 when hands appear, linear release to 0 when they leave.
//! Ramps always restart from the instantaneous current gain, so flipping
//! presence mid-ramp can never produce an audible jump.

/// Envelope stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Gain 0, nothing sounding.
    Idle,
    /// Rising linearly toward 1.
    Attacking,
    /// Holding at 1 while hands are present.
    Sustaining,
    /// Falling linearly toward 0.
    Releasing,
}

/// Hand-presence driven attack/release envelope, advanced per sample.
pub struct EnvelopeController {
    stage: EnvelopeStage,
    /// Instantaneous gain, the committed value any new ramp starts from.
    gain: f32,
    /// Per-sample gain increment of the in-flight ramp.
    step: f32,
    attack_secs: f32,
    release_secs: f32,
    sample_rate: f32,
}

impl EnvelopeController {
    pub fn new(attack_secs: f32, release_secs: f32, sample_rate: f32) -> Self {
        Self {
            stage: EnvelopeStage::Idle,
            gain: 0.0,
            step: 0.0,
            attack_secs: attack_secs.max(1e-3),
            release_secs: release_secs.max(1e-3),
            sample_rate,
        }
    }

    /// Updates ramp durations on patch change. An in-flight ramp keeps its
    /// current slope; the new times apply from the next transition.
    pub fn set_times(&mut self, attack_secs: f32, release_secs: f32) {
        self.attack_secs = attack_secs.max(1e-3);
        self.release_secs = release_secs.max(1e-3);
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// The instantaneous gain value.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Drives the envelope from the aggregate hand-presence flag.
    ///
    /// Redundant calls (already attacking/sustaining on `true`, already
    /// idle/releasing on `false`) are no-ops. A transition cancels any
    /// in-flight ramp and starts the new one from the current gain.
    pub fn set_presence(&mut self, present: bool) {
        match (present, self.stage) {
            (true, EnvelopeStage::Idle) | (true, EnvelopeStage::Releasing) => {
                self.step = (1.0 - self.gain) / (self.attack_secs * self.sample_rate);
                self.stage = EnvelopeStage::Attacking;
            }
            (false, EnvelopeStage::Attacking) | (false, EnvelopeStage::Sustaining) => {
                self.step = -self.gain / (self.release_secs * self.sample_rate);
                self.stage = EnvelopeStage::Releasing;
            }
            _ => {}
        }
    }

    /// Advances one sample and returns the gain to apply.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle | EnvelopeStage::Sustaining => {}
            EnvelopeStage::Attacking => {
                self.gain += self.step;
                // Within half a step counts as arrived: f32 accumulation
                // can leave the sum fractionally shy of the target after
                // the nominal sample count.
                if 1.0 - self.gain <= self.step * 0.5 {
                    self.gain = 1.0;
                    self.stage = EnvelopeStage::Sustaining;
                }
            }
            EnvelopeStage::Releasing => {
                self.gain += self.step;
                if self.gain <= self.step * -0.5 {
                    self.gain = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }
        self.gain
    }
}
