//! Core sampling and shock detection engine for ShockWatch
//!
//! Samples a three-axis analog accelerometer, tracks a short-term baseline
//! of the combined magnitude, and when the signal deviates from it, captures
//! a window of samples around the event in chronological order.
//!
//! Designed for the same targets as the firmware it runs on:
//! - Fixed memory: ring buffer and event window are inline arrays
//! - No heap allocation anywhere in the cycle
//! - Single-threaded loop with an explicit stop flag
//!
//! ## Components
//!
//! - [`time`] - Tick differencing with wrap correction
//! - [`acquisition`] - Channel reads, calibration, magnitude
//! - [`buffer`] - Ring buffer and chronological event window
//! - [`detector`] - Moving average / moving deviation detector
//! - [`capture`] - Post-event capture state machine
//! - [`report`] - Record formatting
//! - [`monitor`] - The loop that ties them together
//!
//! ```no_run
//! use core::sync::atomic::AtomicBool;
//! use shockwatch_core::prelude::*;
//! use shockwatch_core::report::IoSink;
//! use shockwatch_core::time::InstantTicks;
//! # struct Adc;
//! # impl ChannelSource for Adc {
//! #     type Error = ();
//! #     fn read_channel(&mut self, _c: Channel) -> nb::Result<u16, ()> { Ok(0) }
//! # }
//!
//! let config = MonitorConfig::default();
//! let ticks = InstantTicks::new(&config.clock);
//! let sink = IoSink::new(std::io::stdout());
//!
//! let mut monitor: Monitor<_, _, _, DEFAULT_CAPACITY> =
//!     Monitor::new(Adc, ticks, sink, config).expect("valid config");
//!
//! static STOP: AtomicBool = AtomicBool::new(false);
//! monitor.run(&STOP);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => { if false { let _ = format_args!($($arg)*); } };
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => { if false { let _ = format_args!($($arg)*); } };
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => { if false { let _ = format_args!($($arg)*); } };
}

pub mod acquisition;
pub mod buffer;
pub mod capture;
pub mod constants;
pub mod detector;
pub mod errors;
pub mod monitor;
pub mod report;
pub mod time;
pub mod traits;

// Public API
pub use errors::{AcquisitionError, ConfigError, ConfigResult};
pub use monitor::{Monitor, MonitorConfig, RunSummary};

/// Everything needed to wire up a monitor
pub mod prelude {
    pub use crate::acquisition::{CalibrationConfig, Channel, StalePolicy};
    pub use crate::buffer::{EventWindow, RingBuffer, Sample};
    pub use crate::capture::CaptureState;
    pub use crate::constants::DEFAULT_CAPACITY;
    pub use crate::detector::DetectorConfig;
    pub use crate::monitor::{CycleOutcome, Monitor, MonitorConfig, RunSummary};
    pub use crate::report::ReportFormat;
    pub use crate::time::ClockConfig;
    pub use crate::traits::{ChannelSource, LineSink, TickSource};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
