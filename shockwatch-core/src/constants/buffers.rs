//! Buffer Sizes and Memory Constraints
//!
//! This module defines the ring buffer capacity, the post-event capture
//! length and the fixed record line size used by the reporter.

// ===== RING BUFFER =====

/// Default ring buffer capacity (samples).
///
/// 6000 samples × 8 bytes/sample = ~48KB, the bulk of the CC3220SF's
/// application RAM budget. At the ~1.5 kHz cycle rate of blocking ADC
/// conversions this covers roughly four seconds of history.
///
/// Source: firmware `ADC_SAMPLE_COUNT`
pub const DEFAULT_CAPACITY: usize = 6000;

// ===== EVENT CAPTURE =====

/// Additional cycles recorded after a detection before the window is
/// reconstructed and emitted.
///
/// Places the trigger point near the end of the window so most of the
/// window is pre-event baseline.
pub const POST_EVENT_SAMPLES: usize = 100;

// ===== REPORTING =====

/// Maximum length of one formatted record line (bytes).
///
/// The longest record is the text-format per-sample line with four
/// six-decimal floats, well under 160 bytes.
pub const MAX_LINE_LEN: usize = 160;
