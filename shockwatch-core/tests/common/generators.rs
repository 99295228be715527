//! Raw ADC signal generators
//!
//! Produces raw counts that, under the default calibration, land on a
//! chosen normalized magnitude:
//! - At rest: magnitude ≈ 1.0 with a few counts of noise
//! - Knock: a short burst at several g
//! - Dropout: one channel failing for a stretch of cycles

use shockwatch_core::constants::sensors::{CHANNEL_SCALE_FACTORS, MAGNITUDE_NORMALIZATION};

use super::{RawCycle, TestRng};

/// Raw counts for a magnitude split evenly over the three axes
pub fn raw_for_magnitude(magnitude: f32) -> [u16; 3] {
    let per_axis_mv = magnitude * MAGNITUDE_NORMALIZATION / 3f32.sqrt();
    let mut raw = [0u16; 3];
    for (i, scale) in CHANNEL_SCALE_FACTORS.iter().enumerate() {
        raw[i] = (per_axis_mv * scale).round().clamp(0.0, u16::MAX as f32) as u16;
    }
    raw
}

/// Signal generator with deterministic noise
pub struct SignalGenerator {
    rng: TestRng,
    noise_counts: f32,
}

impl SignalGenerator {
    pub fn new(seed: u32, noise_counts: f32) -> Self {
        Self {
            rng: TestRng::new(seed),
            noise_counts,
        }
    }

    fn noisy(&mut self, raw: [u16; 3]) -> RawCycle {
        let mut out = [None; 3];
        for (i, value) in raw.iter().enumerate() {
            let noise = self.rng.gen_range(-self.noise_counts, self.noise_counts);
            out[i] = Some((*value as f32 + noise).round().max(0.0) as u16);
        }
        out
    }

    /// `cycles` cycles at a constant magnitude
    pub fn level(&mut self, magnitude: f32, cycles: usize) -> Vec<RawCycle> {
        let raw = raw_for_magnitude(magnitude);
        (0..cycles).map(|_| self.noisy(raw)).collect()
    }

    /// Device lying still (1 g)
    pub fn at_rest(&mut self, cycles: usize) -> Vec<RawCycle> {
        self.level(1.0, cycles)
    }

    /// Short burst at `peak` g
    pub fn knock(&mut self, peak: f32, cycles: usize) -> Vec<RawCycle> {
        self.level(peak, cycles)
    }

    /// At rest, with `channel` failing on every cycle
    pub fn dropout(&mut self, channel: usize, cycles: usize) -> Vec<RawCycle> {
        self.at_rest(cycles)
            .into_iter()
            .map(|mut c| {
                c[channel] = None;
                c
            })
            .collect()
    }
}
