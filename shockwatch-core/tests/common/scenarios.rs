//! Named signal scenarios for integration tests

use super::generators::SignalGenerator;
use super::RawCycle;

/// Scenario builder
pub struct Scenarios;

impl Scenarios {
    /// Long quiet stretch, one knock, then quiet again
    pub fn single_knock(rest_before: usize, knock_len: usize, rest_after: usize) -> Vec<RawCycle> {
        let mut gen = SignalGenerator::new(7, 2.0);
        let mut script = gen.at_rest(rest_before);
        script.extend(gen.knock(3.0, knock_len));
        script.extend(gen.at_rest(rest_after));
        script
    }

    /// Sustained vibration well above threshold
    pub fn sustained_shaking(rest_before: usize, shaking: usize) -> Vec<RawCycle> {
        let mut gen = SignalGenerator::new(11, 2.0);
        let mut script = gen.at_rest(rest_before);
        for i in 0..shaking {
            let peak = if i % 2 == 0 { 2.5 } else { 0.2 };
            script.extend(gen.level(peak, 1));
        }
        script
    }

    /// Quiet signal with one channel failing for a stretch
    pub fn channel_dropout(rest: usize, channel: usize, failing: usize) -> Vec<RawCycle> {
        let mut gen = SignalGenerator::new(3, 0.0);
        let mut script = gen.at_rest(rest);
        script.extend(gen.dropout(channel, failing));
        script.extend(gen.at_rest(rest));
        script
    }
}
