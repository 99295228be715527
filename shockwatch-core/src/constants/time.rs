//! Timer Constants
//!
//! The cycle interval is measured with a free-running hardware timer that
//! counts system clock ticks and wraps at a fixed period.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: f32 = 1000.0;

// ===== HARDWARE TIMER =====

/// System clock frequency driving the timer (Hz).
///
/// Source: CC3220SF datasheet, 80 MHz system clock
pub const TIMER_FREQUENCY_HZ: f32 = 80_000_000.0;

/// Duration of one timer tick in milliseconds.
///
/// `1 / 80 MHz = 12.5 ns = 0.0000125 ms`
pub const TICK_DURATION_MS: f32 = MS_PER_SECOND / TIMER_FREQUENCY_HZ;

/// Period at which the free-running counter wraps (2^28 counts).
///
/// At 80 MHz this is ~3.36 s, so the cycle rate must stay well above
/// 0.3 Hz for the single-wrap interval correction to hold.
pub const TIMER_WRAP_PERIOD: u32 = 1 << 28;
