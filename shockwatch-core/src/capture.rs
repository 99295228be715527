//! Post-Event Capture State Machine
//!
//! ## Overview
//!
//! When the detector fires, the ring buffer already holds the samples that
//! led up to the shock. Capture keeps the loop running for `K` more cycles
//! so the aftermath is recorded too, then snapshots the whole buffer in
//! chronological order.
//!
//! ```text
//!            detection              K cycles elapsed
//!   Idle ─────────────────▶ Capturing(K) ─────────────▶ Reporting
//!    ▲                        │ each cycle: remaining -= 1   │
//!    │                        │ detections ignored           │
//!    └────────────────────────┴──────────────────────────────┘
//!                       window emitted
//! ```
//!
//! Detections during `Capturing` neither restart nor extend the capture,
//! which bounds capture length under a sustained anomaly. The window is
//! taken at the end of the capture, so it starts at the sample that was
//! oldest at that moment, not at the detection.
//!
//! ## Cycle Protocol
//!
//! The monitor drives the machine once per cycle, *after* the cycle's
//! sample has been written:
//!
//! 1. [`EventCapture::observe`] with the cycle's detection flag
//! 2. [`EventCapture::take_window`], which yields the window and returns to
//!    `Idle` only if the machine reached `Reporting`

use crate::buffer::{EventWindow, RingBuffer};

/// Capture progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Waiting for a detection
    Idle,
    /// Recording post-event cycles
    Capturing {
        /// Cycles still to record before reporting
        remaining: usize,
    },
    /// Capture complete; window ready to reconstruct
    Reporting,
}

impl CaptureState {
    /// True while a capture is in flight (capturing or awaiting report)
    pub fn is_active(&self) -> bool {
        !matches!(self, CaptureState::Idle)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CaptureState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(fmt, "Idle"),
            Self::Capturing { remaining } => defmt::write!(fmt, "Capturing({})", remaining),
            Self::Reporting => defmt::write!(fmt, "Reporting"),
        }
    }
}

/// Drives one capture at a time over the shared ring buffer
#[derive(Debug, Clone)]
pub struct EventCapture {
    post_event_samples: usize,
    state: CaptureState,
    completed: u64,
}

impl EventCapture {
    /// Capture `post_event_samples` cycles after each detection
    pub fn new(post_event_samples: usize) -> Self {
        Self {
            post_event_samples,
            state: CaptureState::Idle,
            completed: 0,
        }
    }

    /// Advance by one cycle given whether this cycle detected an event
    ///
    /// Returns the state after the transition.
    pub fn observe(&mut self, detected: bool) -> CaptureState {
        self.state = match self.state {
            CaptureState::Idle if detected => self.start(),
            CaptureState::Idle => CaptureState::Idle,
            CaptureState::Capturing { remaining } => match remaining.saturating_sub(1) {
                0 => CaptureState::Reporting,
                remaining => CaptureState::Capturing { remaining },
            },
            // Not yet collected; stays until take_window
            CaptureState::Reporting => CaptureState::Reporting,
        };
        self.state
    }

    fn start(&self) -> CaptureState {
        if self.post_event_samples == 0 {
            CaptureState::Reporting
        } else {
            CaptureState::Capturing {
                remaining: self.post_event_samples,
            }
        }
    }

    /// If reporting, reconstruct the window from `buffer` and return to idle
    pub fn take_window<const N: usize>(&mut self, buffer: &RingBuffer<N>) -> Option<EventWindow<N>> {
        if self.state != CaptureState::Reporting {
            return None;
        }
        self.state = CaptureState::Idle;
        self.completed += 1;
        Some(buffer.chronological())
    }

    /// Current state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Cycles recorded after each detection
    pub fn post_event_samples(&self) -> usize {
        self.post_event_samples
    }

    /// Captures reported so far
    pub fn completed(&self) -> u64 {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Sample;

    #[test]
    fn idle_without_detection() {
        let mut capture = EventCapture::new(3);
        assert_eq!(capture.observe(false), CaptureState::Idle);
        assert!(!capture.state().is_active());
    }

    #[test]
    fn counts_down_then_reports() {
        let mut capture = EventCapture::new(3);
        assert_eq!(capture.observe(true), CaptureState::Capturing { remaining: 3 });
        assert_eq!(capture.observe(false), CaptureState::Capturing { remaining: 2 });
        assert_eq!(capture.observe(false), CaptureState::Capturing { remaining: 1 });
        assert_eq!(capture.observe(false), CaptureState::Reporting);
    }

    #[test]
    fn detections_while_capturing_are_ignored() {
        let mut capture = EventCapture::new(2);
        capture.observe(true);
        assert_eq!(capture.observe(true), CaptureState::Capturing { remaining: 1 });
        assert_eq!(capture.observe(true), CaptureState::Reporting);
    }

    #[test]
    fn zero_length_capture_reports_immediately() {
        let mut capture = EventCapture::new(0);
        assert_eq!(capture.observe(true), CaptureState::Reporting);
    }

    #[test]
    fn take_window_only_when_reporting() {
        let mut buffer = RingBuffer::<4>::new();
        for i in 0..6 {
            buffer.write(Sample::new(i as f32, 1.0));
        }

        let mut capture = EventCapture::new(1);
        assert!(capture.take_window(&buffer).is_none());

        capture.observe(true);
        assert!(capture.take_window(&buffer).is_none());

        capture.observe(false);
        let window = capture.take_window(&buffer).unwrap();
        assert_eq!(window.samples()[0].magnitude, 2.0);
        assert_eq!(capture.state(), CaptureState::Idle);
        assert_eq!(capture.completed(), 1);
        assert!(capture.take_window(&buffer).is_none());
    }
}
