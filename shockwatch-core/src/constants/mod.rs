//! Constants for ShockWatch Core
//!
//! Centralized, documented constants for the sampling and detection engine.
//! Every value the firmware hard-coded lives here under a name,
//! and the config structs take their defaults from these.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Sensors**: ADC channel calibration and magnitude normalization
//! - **Detection**: EMA / mean-absolute-deviation parameters
//! - **Time**: Hardware timer frequency and wrap period
//! - **Buffers**: Ring buffer capacity, capture length, record line size

/// ADC channel calibration and magnitude normalization.
pub mod sensors;

/// Anomaly detector smoothing factors and threshold.
pub mod detection;

/// Timer tick duration and wrap period.
pub mod time;

/// Ring buffer capacity, post-event capture length and line sizes.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use sensors::{CHANNEL_COUNT, CHANNEL_SCALE_FACTORS, MAGNITUDE_NORMALIZATION};

pub use detection::{EMA_ALPHA, DEVIATION_BETA, DETECTION_THRESHOLD, INITIAL_MOVING_AVERAGE};

pub use time::{TICK_DURATION_MS, TIMER_WRAP_PERIOD};

pub use buffers::{DEFAULT_CAPACITY, POST_EVENT_SAMPLES, MAX_LINE_LEN};
