//! Error Types for Acquisition and Configuration
//!
//! ## Design Philosophy
//!
//! Errors follow the same embedded constraints as the rest of the core:
//!
//! 1. **Small Size**: A channel index or a rejected `f32` is all a variant carries.
//! 2. **No Heap Allocation**: No `String`; messages are static format strings.
//! 3. **Copy Semantics**: Errors are stored in the per-cycle status array and
//!    copied into diagnostics without moves.
//!
//! ## Error Categories
//!
//! ### Acquisition (recoverable, never unwinds the loop)
//! - `ChannelReadFailed`: one ADC conversion failed this cycle. The cycle still
//!   completes using the configured [`StalePolicy`](crate::acquisition::StalePolicy).
//!
//! ### Configuration (rejected up front)
//! - `ConfigError`: a parameter is outside its valid domain. Raised only by
//!   `validate()` / `Monitor::new`, so a running monitor has no fatal path.
//!
//! Clock wrap is not an error; it is corrected arithmetically by
//! [`ClockReader`](crate::time::ClockReader).

use thiserror_no_std::Error;

use crate::acquisition::Channel;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Per-channel acquisition failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionError {
    /// The channel source returned an error for this conversion
    #[error("channel {channel:?} conversion failed")]
    ChannelReadFailed {
        /// Channel whose conversion failed
        channel: Channel,
    },
}

/// Invalid configuration parameter
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Smoothing factor outside (0, 1]
    #[error("smoothing factor {name} = {value} outside (0, 1]")]
    InvalidSmoothing {
        /// Which factor ("alpha" or "beta")
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Detection threshold not a positive finite number
    #[error("detection threshold {value} must be positive and finite")]
    InvalidThreshold {
        /// Rejected value
        value: f32,
    },

    /// Channel scale factor not a positive finite number
    #[error("scale factor {value} for channel {channel} must be positive and finite")]
    InvalidScaleFactor {
        /// Channel index
        channel: usize,
        /// Rejected value
        value: f32,
    },

    /// Magnitude normalization not a positive finite number
    #[error("magnitude normalization {value} must be positive and finite")]
    InvalidNormalization {
        /// Rejected value
        value: f32,
    },

    /// Tick duration not a positive finite number
    #[error("tick duration {value}ms must be positive and finite")]
    InvalidTickDuration {
        /// Rejected value
        value: f32,
    },

    /// Timer wrap period of zero
    #[error("timer wrap period must be non-zero")]
    ZeroWrapPeriod,

    /// Post-event capture would not fit in the ring buffer
    #[error("post-event capture of {requested} samples does not fit capacity {capacity}")]
    CaptureTooLong {
        /// Requested post-event samples
        requested: usize,
        /// Ring buffer capacity
        capacity: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for AcquisitionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ChannelReadFailed { channel } =>
                defmt::write!(fmt, "Channel {} conversion failed", channel.index()),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidSmoothing { name, value } =>
                defmt::write!(fmt, "Smoothing {} = {} outside (0, 1]", name, value),
            Self::InvalidThreshold { value } =>
                defmt::write!(fmt, "Threshold {} invalid", value),
            Self::InvalidScaleFactor { channel, value } =>
                defmt::write!(fmt, "Scale factor {} for channel {} invalid", value, channel),
            Self::InvalidNormalization { value } =>
                defmt::write!(fmt, "Normalization {} invalid", value),
            Self::InvalidTickDuration { value } =>
                defmt::write!(fmt, "Tick duration {}ms invalid", value),
            Self::ZeroWrapPeriod =>
                defmt::write!(fmt, "Zero wrap period"),
            Self::CaptureTooLong { requested, capacity } =>
                defmt::write!(fmt, "Capture {} exceeds capacity {}", requested, capacity),
        }
    }
}

/// Reject values that are not positive finite numbers
pub(crate) fn positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
