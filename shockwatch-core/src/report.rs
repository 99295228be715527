//! Record Formatting
//!
//! Turns cycles and event windows into text lines for a [`LineSink`].
//! Each line is formatted into a fixed-capacity `heapless::String`, so
//! reporting never allocates. A record that does not fit is dropped whole
//! and counted; it is never cut short.
//!
//! ## Formats
//!
//! Text (default):
//! ```text
//! Sample: 41, accel: 1.002113, moving avg: 0.998750, dev_accel: 0.004120, Interval: 0.652000ms
//! ```
//!
//! CSV (header once, before the first record):
//! ```text
//! Sample,ADC_0,ADC_1,ADC_2,Timestamp,Acceleration
//! 41,601.754395,598.260864,592.105286,26.740000,1.002113
//! ```
//!
//! Channel failures, in either format:
//! ```text
//! CONFIG_ADC_1 convert failed (41)
//! ```
//!
//! End of a bounded run, in either format:
//! ```text
//! Total time: 1000.350000ms
//! ```
//!
//! Event windows, one `position,accel,interval` row per slot between two
//! marker lines:
//! ```text
//! Detected event
//! 0,1.001201,0.651000
//! ...
//! 5999,0.998102,0.652000
//! Detected event
//! ```

use core::fmt::{self, Write};

use heapless::String;

use crate::acquisition::{Channel, Cycle};
use crate::buffer::EventWindow;
use crate::constants::buffers::MAX_LINE_LEN;
use crate::detector::DetectorState;
use crate::traits::LineSink;

/// Marker line before and after an event table
pub const EVENT_MARKER: &str = "Detected event";

/// Header of the CSV per-sample format
pub const CSV_HEADER: &str = "Sample,ADC_0,ADC_1,ADC_2,Timestamp,Acceleration";

/// Per-sample record layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReportFormat {
    /// Human-readable line with detector statistics
    #[default]
    Text,
    /// Comma-separated channels, cumulative timestamp and magnitude
    Csv,
}

/// Formats records and hands them to a sink
#[derive(Debug)]
pub struct Reporter<W> {
    sink: W,
    format: ReportFormat,
    header_written: bool,
    dropped: u64,
}

impl<W: LineSink> Reporter<W> {
    /// Reporter writing `format` records to `sink`
    pub fn new(sink: W, format: ReportFormat) -> Self {
        Self {
            sink,
            format,
            header_written: false,
            dropped: 0,
        }
    }

    /// Emit one cycle: a diagnostic line per failed channel, then the sample
    ///
    /// `timestamp_ms` is the cumulative time since start, used by CSV.
    pub fn emit_sample(&mut self, index: u64, cycle: &Cycle, stats: &DetectorState, timestamp_ms: f64) {
        for failure in cycle.failures() {
            let crate::errors::AcquisitionError::ChannelReadFailed { channel } = failure;
            self.emit_channel_failure(channel, index);
        }

        match self.format {
            ReportFormat::Text => self.emit(format_args!(
                "Sample: {}, accel: {:.6}, moving avg: {:.6}, dev_accel: {:.6}, Interval: {:.6}ms",
                index,
                cycle.sample.magnitude,
                stats.moving_avg,
                stats.moving_dev,
                cycle.sample.interval_ms,
            )),
            ReportFormat::Csv => {
                if !self.header_written {
                    self.sink.write_line(CSV_HEADER);
                    self.header_written = true;
                }
                let [c0, c1, c2] = cycle.millivolts;
                self.emit(format_args!(
                    "{},{:.6},{:.6},{:.6},{:.6},{:.6}",
                    index, c0, c1, c2, timestamp_ms, cycle.sample.magnitude,
                ));
            }
        }
    }

    /// Emit the diagnostic line for a failed conversion
    pub fn emit_channel_failure(&mut self, channel: Channel, index: u64) {
        self.emit(format_args!("CONFIG_ADC_{} convert failed ({})", channel.index(), index));
    }

    /// Emit an event table, oldest sample first
    pub fn emit_event<const N: usize>(&mut self, window: &EventWindow<N>) {
        self.sink.write_line(EVENT_MARKER);
        for (position, sample) in window.samples().iter().enumerate() {
            self.emit(format_args!(
                "{},{:.6},{:.6}",
                position, sample.magnitude, sample.interval_ms
            ));
        }
        self.sink.write_line(EVENT_MARKER);
    }

    /// Emit the closing line of a bounded run
    pub fn emit_total(&mut self, total_ms: f64) {
        self.emit(format_args!("Total time: {:.6}ms", total_ms));
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        let mut line: String<MAX_LINE_LEN> = String::new();
        if line.write_fmt(args).is_err() {
            self.dropped += 1;
            log_warn!("record longer than {} bytes dropped", MAX_LINE_LEN);
            return;
        }
        self.sink.write_line(&line);
    }

    /// Records dropped for exceeding the line capacity
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Layout in use
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Borrow the sink
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Mutably borrow the sink
    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Give the sink back
    pub fn into_sink(self) -> W {
        self.sink
    }
}

/// Sink over any `std::io::Write`, one newline-terminated record per line
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W> {
    writer: W,
    errors: u64,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> IoSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer, errors: 0 }
    }

    /// Write failures seen so far
    pub fn errors(&self) -> u64 {
        self.errors
    }

    /// Give the writer back
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> LineSink for IoSink<W> {
    fn write_line(&mut self, line: &str) {
        if writeln!(self.writer, "{}", line).is_err() {
            self.errors += 1;
        }
    }
}
