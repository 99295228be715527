//! Three-Axis Sample Acquisition
//!
//! Reads one raw conversion per channel, converts counts to millivolts
//! with the channel's divisor, and combines the axes into a normalized
//! magnitude:
//!
//! ```text
//! mv[i]     = raw[i] / scale_factors[i]
//! magnitude = sqrt(mv[0]² + mv[1]² + mv[2]²) / normalization
//! ```
//!
//! ## Failed Conversions
//!
//! A failed channel does not abort the cycle. Its value for the cycle is
//! chosen by [`StalePolicy`]:
//!
//! - `HoldLast` (default): reuse the channel's last good millivolt value,
//!   or 0.0 if it has never succeeded
//! - `Zero`: use 0.0
//!
//! The failure is recorded in the cycle's [`ChannelStatus`] so the
//! reporter can emit a diagnostic line.

use crate::buffer::Sample;
use crate::constants::sensors::{CHANNEL_COUNT, CHANNEL_SCALE_FACTORS, MAGNITUDE_NORMALIZATION};
use crate::errors::{positive_finite, AcquisitionError, ConfigError, ConfigResult};
use crate::time::ClockReader;
use crate::traits::{ChannelSource, TickSource};

/// Accelerometer axis wired to an ADC input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Channel {
    /// ADC input 0
    X = 0,
    /// ADC input 1
    Y = 1,
    /// ADC input 2
    Z = 2,
}

impl Channel {
    /// All channels in read order
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::X, Channel::Y, Channel::Z];

    /// Position in per-channel arrays
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of one channel's conversion in a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    /// Conversion succeeded and the value is fresh
    Ok,
    /// Conversion failed; the value came from the stale policy
    Failed(AcquisitionError),
}

impl ChannelStatus {
    /// True if the conversion succeeded
    pub fn is_ok(&self) -> bool {
        matches!(self, ChannelStatus::Ok)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelStatus {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Ok => defmt::write!(fmt, "ok"),
            Self::Failed(e) => defmt::write!(fmt, "failed: {}", e),
        }
    }
}

/// Substitute for a channel whose conversion failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StalePolicy {
    /// Reuse the last good value of that channel
    #[default]
    HoldLast,
    /// Treat the channel as reading zero
    Zero,
}

/// Per-channel conversion and magnitude normalization
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationConfig {
    /// Raw-count divisor per channel
    pub scale_factors: [f32; CHANNEL_COUNT],

    /// Divisor applied to the Euclidean norm
    pub normalization: f32,

    /// What a failed channel contributes
    pub stale_policy: StalePolicy,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            scale_factors: CHANNEL_SCALE_FACTORS,
            normalization: MAGNITUDE_NORMALIZATION,
            stale_policy: StalePolicy::HoldLast,
        }
    }
}

impl CalibrationConfig {
    /// Identity calibration: raw counts pass through and the norm is not scaled
    pub fn unity() -> Self {
        Self {
            scale_factors: [1.0; CHANNEL_COUNT],
            normalization: 1.0,
            stale_policy: StalePolicy::HoldLast,
        }
    }

    /// Override the per-channel divisors
    pub fn with_scale_factors(mut self, scale_factors: [f32; CHANNEL_COUNT]) -> Self {
        self.scale_factors = scale_factors;
        self
    }

    /// Override the magnitude divisor
    pub fn with_normalization(mut self, normalization: f32) -> Self {
        self.normalization = normalization;
        self
    }

    /// Override the failed-channel policy
    pub fn with_stale_policy(mut self, stale_policy: StalePolicy) -> Self {
        self.stale_policy = stale_policy;
        self
    }

    /// Check parameters are usable
    pub fn validate(&self) -> ConfigResult<()> {
        for (channel, &value) in self.scale_factors.iter().enumerate() {
            if !positive_finite(value) {
                return Err(ConfigError::InvalidScaleFactor { channel, value });
            }
        }
        if !positive_finite(self.normalization) {
            return Err(ConfigError::InvalidNormalization {
                value: self.normalization,
            });
        }
        Ok(())
    }

    /// Millivolts for a raw count on `channel`
    pub fn calibrate(&self, channel: Channel, raw: u16) -> f32 {
        f32::from(raw) / self.scale_factors[channel.index()]
    }

    /// Normalized Euclidean norm of the three axes
    pub fn magnitude(&self, millivolts: &[f32; CHANNEL_COUNT]) -> f32 {
        let sum_sq: f32 = millivolts.iter().map(|v| v * v).sum();
        libm::sqrtf(sum_sq) / self.normalization
    }
}

/// Everything one cycle produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cycle {
    /// Magnitude and interval stored in the ring buffer
    pub sample: Sample,

    /// Calibrated millivolts per channel, after the stale policy
    pub millivolts: [f32; CHANNEL_COUNT],

    /// Conversion outcome per channel
    pub status: [ChannelStatus; CHANNEL_COUNT],
}

impl Cycle {
    /// Channels whose conversion failed this cycle
    pub fn failures(&self) -> impl Iterator<Item = AcquisitionError> + '_ {
        self.status.iter().filter_map(|s| match s {
            ChannelStatus::Failed(e) => Some(*e),
            ChannelStatus::Ok => None,
        })
    }

    /// True if every channel converted
    pub fn is_complete(&self) -> bool {
        self.status.iter().all(ChannelStatus::is_ok)
    }
}

/// Pulls one cycle from the ADC and the timer
#[derive(Debug)]
pub struct SampleAcquirer<S, T> {
    source: S,
    clock: ClockReader<T>,
    calibration: CalibrationConfig,
    last_good: [f32; CHANNEL_COUNT],
}

impl<S: ChannelSource, T: TickSource> SampleAcquirer<S, T> {
    /// Create an acquirer over a channel source and a clock
    pub fn new(source: S, clock: ClockReader<T>, calibration: CalibrationConfig) -> Self {
        Self {
            source,
            clock,
            calibration,
            last_good: [0.0; CHANNEL_COUNT],
        }
    }

    /// Read all channels, then the timer, and derive the cycle's sample
    pub fn acquire(&mut self) -> Cycle {
        let mut millivolts = [0.0; CHANNEL_COUNT];
        let mut status = [ChannelStatus::Ok; CHANNEL_COUNT];

        for channel in Channel::ALL {
            let i = channel.index();
            match nb::block!(self.source.read_channel(channel)) {
                Ok(raw) => {
                    let mv = self.calibration.calibrate(channel, raw);
                    self.last_good[i] = mv;
                    millivolts[i] = mv;
                }
                Err(_) => {
                    status[i] = ChannelStatus::Failed(AcquisitionError::ChannelReadFailed { channel });
                    millivolts[i] = match self.calibration.stale_policy {
                        StalePolicy::HoldLast => self.last_good[i],
                        StalePolicy::Zero => 0.0,
                    };
                }
            }
        }

        let interval_ms = self.clock.lap();
        let magnitude = self.calibration.magnitude(&millivolts);

        Cycle {
            sample: Sample { magnitude, interval_ms },
            millivolts,
            status,
        }
    }

    /// Clock used for intervals
    pub fn clock(&self) -> &ClockReader<T> {
        &self.clock
    }

    /// Calibration in use
    pub fn calibration(&self) -> &CalibrationConfig {
        &self.calibration
    }

    /// Borrow the channel source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the channel source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
