//! Sensor Calibration Constants
//!
//! This module defines the per-channel conversion from raw ADC counts to
//! millivolts and the empirical normalization applied to the combined
//! magnitude of the three accelerometer axes.

// ===== CHANNEL LAYOUT =====

/// Number of analog channels sampled per cycle (one per accelerometer axis).
///
/// Fixed by the hardware: X, Y and Z outputs of the analog accelerometer
/// are wired to three ADC inputs.
pub const CHANNEL_COUNT: usize = 3;

// ===== ADC CALIBRATION =====

/// Raw-count divisor for channel 0 (X axis).
///
/// Measured against a reference voltage on the CC3220SF ADC input.
/// `millivolts = raw / 1.14`
pub const CHANNEL_0_SCALE: f32 = 1.14;

/// Raw-count divisor for channel 1 (Y axis).
///
/// The Y input reads slightly high relative to X and Z.
pub const CHANNEL_1_SCALE: f32 = 1.15;

/// Raw-count divisor for channel 2 (Z axis).
pub const CHANNEL_2_SCALE: f32 = 1.14;

/// All channel divisors in channel order.
pub const CHANNEL_SCALE_FACTORS: [f32; CHANNEL_COUNT] =
    [CHANNEL_0_SCALE, CHANNEL_1_SCALE, CHANNEL_2_SCALE];

// ===== MAGNITUDE =====

/// Divisor applied to the Euclidean norm of the three calibrated channels.
///
/// Empirical: brings the at-rest magnitude of the accelerometer (1 g) to
/// roughly 1.0, which is why the detector seeds its moving average at 1.0.
///
/// Source: bench calibration of the analog accelerometer at rest
pub const MAGNITUDE_NORMALIZATION: f32 = 1040.0;
