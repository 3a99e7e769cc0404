//! Mono reverb send.
//!
//! A Freeverb-style diffusion network: 8 parallel comb filters with lowpass
//! damping in the feedback path, followed by 4 series allpass filters. The
//! send returns the wet signal only; the graph owns the wet/dry mix so the
//! reverb amount can be gesture-controlled with its own smoothing.

/// Freeverb tuning constants, in samples at 44100 Hz. Scaled linearly for
/// other sample rates.
const COMB_TUNINGS: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];
const ALLPASS_TUNINGS: [usize; 4] = [556, 441, 341, 225];

/// Fixed room character. The instrument exposes only a wet amount, not room
/// geometry, so feedback and damping are compile-time constants.
const COMB_FEEDBACK: f32 = 0.84;
const COMB_DAMPING: f32 = 0.2;

/// A comb filter with lowpass damping in the feedback path.
struct CombFilter {
    buffer: Vec<f32>,
    write_pos: usize,
    filter_state: f32,
}

impl CombFilter {
    fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            write_pos: 0,
            filter_state: 0.0,
        }
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let output = self.buffer[self.write_pos];

        // One-pole lowpass in the feedback path darkens the tail.
        self.filter_state = output * (1.0 - COMB_DAMPING) + self.filter_state * COMB_DAMPING;
        self.buffer[self.write_pos] = input + self.filter_state * COMB_FEEDBACK;

        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        output
    }

    fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.filter_state = 0.0;
    }
}

/// An allpass filter for diffusion.
struct AllpassFilter {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl AllpassFilter {
    fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            write_pos: 0,
        }
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        const FEEDBACK: f32 = 0.5;

        let buffered = self.buffer[self.write_pos];
        let output = -input + buffered;

        self.buffer[self.write_pos] = input + buffered * FEEDBACK;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();

        output
    }

    fn clear(&mut self) {
        self.buffer.fill(0.0);
    }
}

/// The mono reverb send: wet signal out, mix handled by the caller.
pub struct ReverbSend {
    combs: Vec<CombFilter>,
    allpasses: Vec<AllpassFilter>,
}

impl ReverbSend {
    /// Creates a send sized for the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        let scale = sample_rate / 44100.0;
        Self {
            combs: COMB_TUNINGS
                .iter()
                .map(|&t| CombFilter::new((t as f32 * scale) as usize))
                .collect(),
            allpasses: ALLPASS_TUNINGS
                .iter()
                .map(|&t| AllpassFilter::new((t as f32 * scale) as usize))
                .collect(),
        }
    }

    /// Processes one dry sample, returning the wet sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        // Parallel combs, averaged to keep the wet path at unity-ish level.
        let mut wet = 0.0;
        for comb in &mut self.combs {
            wet += comb.process(input);
        }
        wet /= self.combs.len() as f32;

        for allpass in &mut self.allpasses {
            wet = allpass.process(wet);
        }
        wet
    }

    /// Silences the tail.
    pub fn clear(&mut self) {
        for comb in &mut self.combs {
            comb.clear();
        }
        for allpass in &mut self.allpasses {
            allpass.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_produces_tail() {
        let mut reverb = ReverbSend::new(44100.0);
        let mut energy = 0.0;
        let first = reverb.process(1.0);
        // The impulse takes at least the shortest comb delay to emerge.
        assert_eq!(first, 0.0);
        for _ in 0..44100 {
            energy += reverb.process(0.0).abs();
        }
        assert!(energy > 1.0, "no reverb tail, energy {}", energy);
    }

    #[test]
    fn test_tail_decays() {
        let mut reverb = ReverbSend::new(44100.0);
        reverb.process(1.0);
        let mut early = 0.0;
        let mut late = 0.0;
        for i in 0..88200 {
            let s = reverb.process(0.0).abs();
            if i < 22050 {
                early += s;
            } else if i >= 66150 {
                late += s;
            }
        }
        assert!(late < early, "tail did not decay: early {early}, late {late}");
    }

    #[test]
    fn test_clear_silences() {
        let mut reverb = ReverbSend::new(44100.0);
        for _ in 0..1000 {
            reverb.process(1.0);
        }
        reverb.clear();
        for _ in 0..4410 {
            assert_eq!(reverb.process(0.0), 0.0);
        }
    }

    #[test]
    fn test_other_sample_rates_scale() {
        // Just exercises construction and a block at 48 kHz.
        let mut reverb = ReverbSend::new(48000.0);
        reverb.process(1.0);
        let mut energy = 0.0;
        for _ in 0..48000 {
            energy += reverb.process(0.0).abs();
        }
        assert!(energy > 1.0);
    }
}
