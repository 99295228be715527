//! Sampling and Detection Loop
//!
//! [`Monitor`] owns every piece of state the loop touches: acquirer, ring
//! buffer, detector, capture machine and reporter. One call to
//! [`Monitor::run_cycle`] is one cycle:
//!
//! ```text
//! acquire ──▶ write ring buffer ──▶ update detector ──▶ emit sample
//!                                                          │
//!             emit event window ◀── take_window ◀── capture.observe
//! ```
//!
//! The loop methods check a stop flag once per cycle, before acquiring, so
//! a run ends cleanly between cycles. Nothing in a cycle can fail: channel
//! failures degrade the sample and surface as diagnostic lines.
//!
//! ## Usage Example
//!
//! ```rust
//! use core::sync::atomic::AtomicBool;
//! use shockwatch_core::prelude::*;
//! use shockwatch_core::time::MockTicks;
//!
//! struct AtRest;
//!
//! impl ChannelSource for AtRest {
//!     type Error = ();
//!     fn read_channel(&mut self, _channel: Channel) -> nb::Result<u16, ()> {
//!         Ok(685)
//!     }
//! }
//!
//! let ticks = MockTicks::new(0, 1 << 28);
//! let mut lines: Vec<String> = Vec::new();
//! let mut monitor: Monitor<_, _, _, 64> =
//!     Monitor::new(AtRest, &ticks, &mut lines, MonitorConfig::default().with_post_event_samples(8))
//!         .unwrap();
//!
//! let stop = AtomicBool::new(false);
//! let summary = monitor.run_for(10, &stop);
//! assert_eq!(summary.cycles, 10);
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use crate::acquisition::{CalibrationConfig, Cycle, SampleAcquirer};
use crate::buffer::{EventWindow, RingBuffer};
use crate::capture::{CaptureState, EventCapture};
use crate::constants::buffers::POST_EVENT_SAMPLES;
use crate::detector::{AnomalyDetector, DetectorConfig, DetectorState};
use crate::errors::{ConfigError, ConfigResult};
use crate::report::{ReportFormat, Reporter};
use crate::time::{ClockConfig, ClockReader};
use crate::traits::{ChannelSource, LineSink, TickSource};

/// Complete monitor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonitorConfig {
    /// ADC conversion and magnitude normalization
    pub calibration: CalibrationConfig,

    /// Detector parameters
    pub detector: DetectorConfig,

    /// Timer parameters
    pub clock: ClockConfig,

    /// Cycles recorded after a detection before the window is emitted
    pub post_event_samples: usize,

    /// Per-sample record layout
    pub format: ReportFormat,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            calibration: CalibrationConfig::default(),
            detector: DetectorConfig::default(),
            clock: ClockConfig::default(),
            post_event_samples: POST_EVENT_SAMPLES,
            format: ReportFormat::Text,
        }
    }
}

impl MonitorConfig {
    /// Override calibration
    pub fn with_calibration(mut self, calibration: CalibrationConfig) -> Self {
        self.calibration = calibration;
        self
    }

    /// Override detector parameters
    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    /// Override timer parameters
    pub fn with_clock(mut self, clock: ClockConfig) -> Self {
        self.clock = clock;
        self
    }

    /// Override the post-event capture length
    pub fn with_post_event_samples(mut self, post_event_samples: usize) -> Self {
        self.post_event_samples = post_event_samples;
        self
    }

    /// Override the record layout
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Check every section against a ring buffer of `capacity` slots
    pub fn validate(&self, capacity: usize) -> ConfigResult<()> {
        self.calibration.validate()?;
        self.detector.validate()?;
        self.clock.validate()?;
        if self.post_event_samples >= capacity {
            return Err(ConfigError::CaptureTooLong {
                requested: self.post_event_samples,
                capacity,
            });
        }
        Ok(())
    }
}

/// What one cycle did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    /// Zero-based cycle number
    pub index: u64,

    /// Ring buffer slot the sample was written to
    pub slot: usize,

    /// Acquired cycle, including per-channel status
    pub cycle: Cycle,

    /// Detector statistics after this cycle
    pub stats: DetectorState,

    /// Deviation exceeded the threshold this cycle
    pub detected: bool,

    /// Capture state after this cycle
    pub capture: CaptureState,

    /// An event window was emitted this cycle
    pub event_emitted: bool,
}

/// Totals for a run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    /// Cycles executed
    pub cycles: u64,

    /// Event windows emitted
    pub events: u64,

    /// Failed channel conversions
    pub channel_failures: u64,

    /// Clock time covered by the run's cycles
    pub elapsed_ms: f64,
}

impl RunSummary {
    fn record(&mut self, outcome: &CycleOutcome, elapsed_ms: f64) {
        self.cycles += 1;
        self.channel_failures += outcome.cycle.failures().count() as u64;
        self.elapsed_ms = elapsed_ms;
        if outcome.event_emitted {
            self.events += 1;
        }
    }
}

/// Event-triggered sampling and detection engine
///
/// ## Type Parameters
///
/// - `S`: ADC channel source
/// - `T`: timer tick source
/// - `W`: record sink
/// - `N`: ring buffer capacity (event window length)
pub struct Monitor<S, T, W, const N: usize> {
    acquirer: SampleAcquirer<S, T>,
    buffer: RingBuffer<N>,
    detector: AnomalyDetector,
    capture: EventCapture,
    reporter: Reporter<W>,
    cycles: u64,
}

impl<S, T, W, const N: usize> Monitor<S, T, W, N>
where
    S: ChannelSource,
    T: TickSource,
    W: LineSink,
{
    /// Validate `config` and assemble a monitor
    ///
    /// The clock baseline is read here, so the first cycle's interval is
    /// measured from construction.
    pub fn new(source: S, ticks: T, sink: W, config: MonitorConfig) -> ConfigResult<Self> {
        config.validate(N)?;

        let clock = ClockReader::new(ticks, config.clock);
        Ok(Self {
            acquirer: SampleAcquirer::new(source, clock, config.calibration),
            buffer: RingBuffer::new(),
            detector: AnomalyDetector::new(config.detector),
            capture: EventCapture::new(config.post_event_samples),
            reporter: Reporter::new(sink, config.format),
            cycles: 0,
        })
    }

    /// Run one acquire → store → detect → report → capture step
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let index = self.cycles;
        self.cycles += 1;

        let cycle = self.acquirer.acquire();
        for failure in cycle.failures() {
            log_warn!("cycle {}: {}", index, failure);
        }

        let slot = self.buffer.write(cycle.sample);
        let deviation = self.detector.update(cycle.sample.magnitude);
        let detected = self.detector.exceeds(deviation);
        let stats = self.detector.state();

        self.reporter
            .emit_sample(index, &cycle, &stats, self.acquirer.clock().total_ms());

        let was_idle = !self.capture.state().is_active();
        let capture = self.capture.observe(detected);
        if was_idle && capture.is_active() {
            log_info!(
                "cycle {}: deviation {} over threshold, capturing {} more cycles",
                index,
                deviation,
                self.capture.post_event_samples()
            );
        }

        let event_emitted = match self.capture.take_window(&self.buffer) {
            Some(window) => {
                self.emit_window(index, &window);
                true
            }
            None => false,
        };

        CycleOutcome {
            index,
            slot,
            cycle,
            stats,
            detected,
            capture: self.capture.state(),
            event_emitted,
        }
    }

    fn emit_window(&mut self, index: u64, window: &EventWindow<N>) {
        log_info!(
            "cycle {}: emitting event window of {} samples ({} valid)",
            index,
            N,
            window.valid()
        );
        self.reporter.emit_event(window);
    }

    /// Run until `stop` is set
    pub fn run(&mut self, stop: &AtomicBool) -> RunSummary {
        self.run_while(stop, |_| true)
    }

    /// Run at most `cycles` cycles, or until `stop` is set
    ///
    /// Ends with a `Total time` record.
    pub fn run_for(&mut self, cycles: u64, stop: &AtomicBool) -> RunSummary {
        let summary = self.run_while(stop, |summary| summary.cycles < cycles);
        self.reporter.emit_total(summary.elapsed_ms);
        summary
    }

    /// Run until `duration_ms` of cycle time has accumulated, or until
    /// `stop` is set
    ///
    /// Ends with a `Total time` record.
    pub fn run_for_duration(&mut self, duration_ms: f64, stop: &AtomicBool) -> RunSummary {
        let summary = self.run_while(stop, |summary| summary.elapsed_ms < duration_ms);
        self.reporter.emit_total(summary.elapsed_ms);
        summary
    }

    fn run_while<F>(&mut self, stop: &AtomicBool, mut keep_going: F) -> RunSummary
    where
        F: FnMut(&RunSummary) -> bool,
    {
        let mut summary = RunSummary::default();
        let start_ticks = self.acquirer.clock().total_ticks();
        log_debug!("monitor loop starting at cycle {}", self.cycles);

        while !stop.load(Ordering::Relaxed) && keep_going(&summary) {
            let outcome = self.run_cycle();
            let clock = self.acquirer.clock();
            let elapsed_ms = clock.config().ticks_to_ms(clock.total_ticks() - start_ticks);
            summary.record(&outcome, elapsed_ms);
        }

        log_debug!(
            "monitor loop stopped: {} cycles, {} events, {} channel failures",
            summary.cycles,
            summary.events,
            summary.channel_failures
        );
        summary
    }

    /// Cycles run since construction
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Sample history
    pub fn buffer(&self) -> &RingBuffer<N> {
        &self.buffer
    }

    /// Detector statistics
    pub fn detector_state(&self) -> DetectorState {
        self.detector.state()
    }

    /// Capture progress
    pub fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    /// Event windows emitted since construction
    pub fn events(&self) -> u64 {
        self.capture.completed()
    }

    /// Record writer
    pub fn reporter(&self) -> &Reporter<W> {
        &self.reporter
    }

    /// Sample acquirer
    pub fn acquirer(&self) -> &SampleAcquirer<S, T> {
        &self.acquirer
    }

    /// Mutable sample acquirer, e.g. to reconfigure a scripted source
    pub fn acquirer_mut(&mut self) -> &mut SampleAcquirer<S, T> {
        &mut self.acquirer
    }

    /// Give the sink back
    pub fn into_sink(self) -> W {
        self.reporter.into_sink()
    }
}

impl<S, T, W, const N: usize> core::fmt::Debug for Monitor<S, T, W, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Monitor")
            .field("cycles", &self.cycles)
            .field("buffer", &self.buffer)
            .field("detector", &self.detector)
            .field("capture", &self.capture)
            .finish()
    }
}
