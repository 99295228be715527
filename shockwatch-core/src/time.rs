//! Cycle timing for edge devices
//!
//! The interval between two cycles is measured with a free-running counter
//! that wraps at a known period. [`ClockReader`] differences consecutive
//! readings and corrects a single wrap:
//!
//! ```text
//! now >= prev:  elapsed = (now - prev) * tick_ms
//! now <  prev:  elapsed = (period + now - prev) * tick_ms
//! ```
//!
//! More than one wrap between two readings cannot be detected; the cycle
//! rate must exceed the wrap rate (2^28 ticks at 80 MHz ≈ 3.36 s).

use core::cell::Cell;

use crate::constants::time::{MS_PER_SECOND, TIMER_FREQUENCY_HZ, TIMER_WRAP_PERIOD};
use crate::errors::{positive_finite, ConfigError, ConfigResult};
use crate::traits::TickSource;

/// Raw timer counter value
pub type Ticks = u32;

/// Timer parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockConfig {
    /// Duration of one tick in milliseconds
    pub tick_duration_ms: f32,

    /// Number of ticks after which the counter wraps to zero
    pub wrap_period: Ticks,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::from_frequency(TIMER_FREQUENCY_HZ, TIMER_WRAP_PERIOD)
    }
}

impl ClockConfig {
    /// Config for a timer clocked at `frequency_hz`
    pub fn from_frequency(frequency_hz: f32, wrap_period: Ticks) -> Self {
        Self {
            tick_duration_ms: MS_PER_SECOND / frequency_hz,
            wrap_period,
        }
    }

    /// Override the wrap period
    pub fn with_wrap_period(mut self, wrap_period: Ticks) -> Self {
        self.wrap_period = wrap_period;
        self
    }

    /// Override the tick duration
    pub fn with_tick_duration_ms(mut self, tick_duration_ms: f32) -> Self {
        self.tick_duration_ms = tick_duration_ms;
        self
    }

    /// Check parameters are usable
    pub fn validate(&self) -> ConfigResult<()> {
        if !positive_finite(self.tick_duration_ms) {
            return Err(ConfigError::InvalidTickDuration {
                value: self.tick_duration_ms,
            });
        }
        if self.wrap_period == 0 {
            return Err(ConfigError::ZeroWrapPeriod);
        }
        Ok(())
    }

    /// Ticks between two readings, correcting a single wrap
    pub fn elapsed_ticks(&self, prev: Ticks, now: Ticks) -> u64 {
        if now >= prev {
            u64::from(now - prev)
        } else {
            u64::from(self.wrap_period) + u64::from(now) - u64::from(prev)
        }
    }

    /// Elapsed milliseconds between two readings, correcting a single wrap
    pub fn elapsed(&self, prev: Ticks, now: Ticks) -> f32 {
        self.elapsed_ticks(prev, now) as f32 * self.tick_duration_ms
    }

    /// Milliseconds spanned by `ticks`, in double precision for long totals
    pub fn ticks_to_ms(&self, ticks: u64) -> f64 {
        ticks as f64 * f64::from(self.tick_duration_ms)
    }
}

/// Measures the interval between consecutive cycles
///
/// Holds the previous reading so each [`lap`](Self::lap) returns the time
/// since the last one. The baseline is taken when the reader is created.
///
/// The running total is kept in ticks, so it stays exact over runs far
/// longer than an `f32` millisecond sum could track.
#[derive(Debug)]
pub struct ClockReader<T> {
    source: T,
    config: ClockConfig,
    last: Ticks,
    total_ticks: u64,
}

impl<T: TickSource> ClockReader<T> {
    /// Wrap a tick source, taking the first reading as baseline
    pub fn new(source: T, config: ClockConfig) -> Self {
        let last = source.now();
        Self {
            source,
            config,
            last,
            total_ticks: 0,
        }
    }

    /// Elapsed milliseconds between two readings
    pub fn elapsed(&self, prev: Ticks, now: Ticks) -> f32 {
        self.config.elapsed(prev, now)
    }

    /// Read the counter and return milliseconds since the previous lap
    pub fn lap(&mut self) -> f32 {
        let now = self.source.now();
        let ticks = self.config.elapsed_ticks(self.last, now);
        self.last = now;
        self.total_ticks = self.total_ticks.saturating_add(ticks);
        ticks as f32 * self.config.tick_duration_ms
    }

    /// Ticks accumulated over all laps
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Milliseconds accumulated over all laps
    pub fn total_ms(&self) -> f64 {
        self.config.ticks_to_ms(self.total_ticks)
    }

    /// Counter value at the last lap
    pub fn last_ticks(&self) -> Ticks {
        self.last
    }

    /// Timer parameters in use
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Borrow the underlying source
    pub fn source(&self) -> &T {
        &self.source
    }
}

/// Controllable wrapping counter for tests
#[derive(Debug, Clone)]
pub struct MockTicks {
    ticks: Cell<Ticks>,
    wrap_period: Ticks,
}

impl MockTicks {
    /// Counter starting at `start`, wrapping at `wrap_period`
    pub fn new(start: Ticks, wrap_period: Ticks) -> Self {
        Self {
            ticks: Cell::new(start % wrap_period.max(1)),
            wrap_period: wrap_period.max(1),
        }
    }

    /// Jump to an absolute value
    pub fn set(&self, ticks: Ticks) {
        self.ticks.set(ticks % self.wrap_period);
    }

    /// Advance by `ticks`, wrapping at the period
    pub fn advance(&self, ticks: Ticks) {
        let next = (u64::from(self.ticks.get()) + u64::from(ticks)) % u64::from(self.wrap_period);
        // The modulo keeps the value below wrap_period, which is a Ticks
        self.ticks.set(next as Ticks);
    }
}

impl TickSource for MockTicks {
    fn now(&self) -> Ticks {
        self.ticks.get()
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now(&self) -> Ticks {
        (**self).now()
    }
}

/// Host monotonic clock presented as a wrapping tick counter (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct InstantTicks {
    start: std::time::Instant,
    tick_ns: f64,
    wrap_period: u64,
}

#[cfg(feature = "std")]
impl InstantTicks {
    /// Start counting now with the given timer parameters
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            start: std::time::Instant::now(),
            tick_ns: f64::from(config.tick_duration_ms) * 1_000_000.0,
            wrap_period: u64::from(config.wrap_period.max(1)),
        }
    }
}

#[cfg(feature = "std")]
impl TickSource for InstantTicks {
    fn now(&self) -> Ticks {
        let nanos = self.start.elapsed().as_nanos() as f64;
        let ticks = (nanos / self.tick_ns) as u64;
        (ticks % self.wrap_period) as Ticks
    }
}
