//! Tick Source Abstraction for Embedded Timers
//!
//! This module provides the `TickSource` trait which abstracts the
//! free-running hardware timer used to measure the interval between cycles.
//!
//! ## Design Goals
//!
//! - **Platform Independence**: Works with a bare-metal timer peripheral, an
//!   RTOS tick or a host clock
//! - **Testability**: Easy to mock for deterministic wrap-around tests
//! - **Efficiency**: A single register read per cycle
//!
//! ## Common Implementations
//!
//! - `InstantTicks`: Host monotonic clock quantised to ticks (requires `std`)
//! - `MockTicks`: Controllable counter for testing

use crate::time::Ticks;

/// Free-running tick counter
///
/// The counter increases monotonically and wraps to zero after
/// `ClockConfig::wrap_period` ticks. The consumer never assumes anything
/// about the absolute value; it only differences consecutive readings.
///
/// ## Implementation Requirements
///
/// - `now()` must not block
/// - Values must stay below the configured wrap period
///
/// ## Example Implementation
///
/// ```rust
/// use shockwatch_core::traits::TickSource;
/// use shockwatch_core::time::Ticks;
///
/// struct TimerA0 {
///     // ... register block
/// }
///
/// impl TickSource for TimerA0 {
///     fn now(&self) -> Ticks {
///         // Read the TAR register
///         0 // placeholder
///     }
/// }
/// ```
///
/// ## Platform-Specific Considerations
///
/// ### Bare Metal (no_std)
/// - Read the timer value register directly
/// - Configure the timer in free-running mode with the same period
///   passed to `ClockConfig`
///
/// ### Linux/Unix
/// - Use `InstantTicks`, which emulates wrap on top of `CLOCK_MONOTONIC`
pub trait TickSource {
    /// Current counter value
    fn now(&self) -> Ticks;
}
