//! Fixed-Size Ring Buffer for Sample History
//!
//! ## Overview
//!
//! Holds the last `N` cycle results so that, when a shock is detected, the
//! samples leading up to it are still available. The capacity is a const
//! generic; storage is an inline array and nothing allocates.
//!
//! ## Design Rationale
//!
//! ### Why Not `heapless::Deque`?
//!
//! The event window is a rotation of the *physical* array by the write
//! cursor, including slots that have not been written yet. Exposing the
//! cursor and raw slots directly keeps that rotation a pair of slice copies
//! and keeps the slot layout identical to the firmware's sample arrays.
//!
//! ### Memory Layout
//!
//! ```text
//! RingBuffer<5> after 7 writes (s0..s6):
//! ┌────┬────┬────┬────┬────┐
//! │ s5 │ s6 │ s2 │ s3 │ s4 │  ← physical slots
//! └────┴────┴────┴────┴────┘
//!             ↑
//!             └── cursor = 2 (next write, oldest sample)
//!
//! Each slot: Sample = 8 bytes (two f32)
//! Total size = 8 * N + 16 bytes (cursor and write count)
//! ```
//!
//! ### Index Arithmetic
//!
//! The cursor only ever advances with `(cursor + 1) % N`. There is no
//! boundary comparison anywhere, so it cannot step outside `[0, N)`.
//!
//! ## Usage Example
//!
//! ```rust
//! use shockwatch_core::buffer::{RingBuffer, Sample};
//!
//! let mut history: RingBuffer<4> = RingBuffer::new();
//!
//! for i in 0..6 {
//!     history.write(Sample::new(i as f32, 1.0));
//! }
//!
//! // Oldest first: the first two samples were overwritten
//! let window = history.chronological();
//! let magnitudes: Vec<f32> = window.samples().iter().map(|s| s.magnitude).collect();
//! assert_eq!(magnitudes, vec![2.0, 3.0, 4.0, 5.0]);
//! ```

/// One cycle's derived result
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Normalized three-axis magnitude (≥ 0)
    pub magnitude: f32,

    /// Milliseconds since the previous cycle's clock reading (≥ 0)
    pub interval_ms: f32,
}

impl Sample {
    /// Zeroed slot content for never-written positions
    pub const EMPTY: Sample = Sample {
        magnitude: 0.0,
        interval_ms: 0.0,
    };

    /// Construct a sample
    pub const fn new(magnitude: f32, interval_ms: f32) -> Self {
        Self {
            magnitude,
            interval_ms,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Sample {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "accel={} interval={}ms", self.magnitude, self.interval_ms)
    }
}

/// Fixed-size circular store of samples
///
/// ## Type Parameter
///
/// - `N`: Number of slots. Must be non-zero.
///
/// ## Internal Invariants
///
/// - `cursor < N`
/// - `written` counts every write; `len() = min(written, N)`
/// - Once full, `slots[cursor]` is the oldest sample
///
/// ## Thread Safety
///
/// Not synchronized. The monitor loop is the single writer and the single
/// reader; a multi-threaded host must confine it to one thread or guard the
/// whole update+capture step with one lock.
#[derive(Clone)]
pub struct RingBuffer<const N: usize> {
    slots: [Sample; N],
    cursor: usize,
    written: u64,
}

impl<const N: usize> RingBuffer<N> {
    const NON_EMPTY: () = assert!(N > 0, "RingBuffer capacity must be non-zero");

    /// Creates a buffer with every slot zeroed
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self {
            slots: [Sample::EMPTY; N],
            cursor: 0,
            written: 0,
        }
    }

    /// Store `sample` at the cursor, advance the cursor, return the slot used
    ///
    /// Overwrites the oldest sample once the buffer is full.
    pub fn write(&mut self, sample: Sample) -> usize {
        let index = self.cursor;
        self.slots[index] = sample;
        self.cursor = (self.cursor + 1) % N;
        self.written = self.written.saturating_add(1);
        index
    }

    /// Sample in physical slot `index`, taken modulo `N`
    pub fn read(&self, index: usize) -> Sample {
        self.slots[index % N]
    }

    /// Number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Next slot to be written; the oldest slot once full
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of valid samples, at most `N`
    pub fn len(&self) -> usize {
        if self.written >= N as u64 {
            N
        } else {
            // written < N, so it fits in usize
            self.written as usize
        }
    }

    /// True before the first write
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// True once every slot has been written at least once
    pub fn is_full(&self) -> bool {
        self.written >= N as u64
    }

    /// Total writes since creation
    pub fn total_written(&self) -> u64 {
        self.written
    }

    /// Most recent sample
    pub fn last(&self) -> Option<Sample> {
        if self.is_empty() {
            return None;
        }
        Some(self.slots[(self.cursor + N - 1) % N])
    }

    /// Valid sample by logical index (0 = oldest, len-1 = newest)
    ///
    /// ```text
    /// Physical array:  [D, E, A, B, C]  (cursor = 2, full)
    /// Logical view:    [A, B, C, D, E]
    /// logical[i] = physical[(cursor + i) % N]
    /// ```
    pub fn get(&self, index: usize) -> Option<Sample> {
        if index >= self.len() {
            return None;
        }
        let start = if self.is_full() { self.cursor } else { 0 };
        Some(self.slots[(start + index) % N])
    }

    /// Iterate valid samples from oldest to newest
    pub fn iter(&self) -> RingBufferIter<'_, N> {
        RingBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Physical slots in storage order
    pub fn as_slots(&self) -> &[Sample; N] {
        &self.slots
    }

    /// Copy the whole buffer into a fresh window, rotated so the slot at the
    /// cursor comes first
    ///
    /// The result is `slots[c..N] ++ slots[0..c]`. The buffer itself is not
    /// touched, so calling this twice without a write in between yields the
    /// same window.
    pub fn chronological(&self) -> EventWindow<N> {
        let mut samples = [Sample::EMPTY; N];
        let c = self.cursor;
        samples[..N - c].copy_from_slice(&self.slots[c..]);
        samples[N - c..].copy_from_slice(&self.slots[..c]);
        EventWindow {
            samples,
            valid: self.len(),
        }
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for RingBuffer<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &N)
            .field("cursor", &self.cursor)
            .field("written", &self.written)
            .finish()
    }
}

/// Iterator over valid ring buffer contents, oldest first
pub struct RingBufferIter<'a, const N: usize> {
    buffer: &'a RingBuffer<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for RingBufferIter<'a, N> {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, const N: usize> ExactSizeIterator for RingBufferIter<'a, N> {}

/// Chronologically ordered copy of the ring buffer
///
/// Index 0 is the oldest slot, index `N-1` the newest sample. Before the
/// buffer has wrapped once, the leading `N - valid` positions are
/// never-written zero slots.
#[derive(Clone, PartialEq)]
pub struct EventWindow<const N: usize> {
    samples: [Sample; N],
    valid: usize,
}

impl<const N: usize> EventWindow<N> {
    /// All `N` positions, oldest first
    pub fn samples(&self) -> &[Sample; N] {
        &self.samples
    }

    /// Only the positions holding real samples, oldest first
    pub fn recent(&self) -> &[Sample] {
        &self.samples[N - self.valid..]
    }

    /// Number of real samples in the window
    pub fn valid(&self) -> usize {
        self.valid
    }

    /// Window length (always `N`)
    pub const fn len(&self) -> usize {
        N
    }

    /// Sum of intervals over the real samples
    pub fn span_ms(&self) -> f32 {
        self.recent().iter().map(|s| s.interval_ms).sum()
    }

    /// Largest magnitude and its window position
    pub fn peak(&self) -> Option<(usize, Sample)> {
        let offset = N - self.valid;
        self.recent()
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, Sample)>, (i, s)| match best {
                Some((_, b)) if b.magnitude >= s.magnitude => best,
                _ => Some((offset + i, *s)),
            })
    }
}

impl<const N: usize> core::fmt::Debug for EventWindow<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventWindow")
            .field("len", &N)
            .field("valid", &self.valid)
            .finish()
    }
}
