//! Fixed-size saturation history for the detail graph.
//!
//! A circular buffer of the last [`HISTORY_SIZE`] samples. One sample is
//! pushed per tick, so the graph always shows the most recent
//! `HISTORY_SIZE / 10` seconds with one pixel column per sample.

use crate::config::HISTORY_SIZE;

/// Circular buffer of saturation samples, iterated oldest first.
pub struct SaturationHistory {
    buffer: [f32; HISTORY_SIZE],
    index: usize,
    count: usize,
}

impl SaturationHistory {
    /// Create an empty history.
    pub const fn new() -> Self {
        Self {
            buffer: [0.0; HISTORY_SIZE],
            index: 0,
            count: 0,
        }
    }

    /// Append a sample, dropping the oldest one once the buffer is full.
    pub fn push(
        &mut self,
        value: f32,
    ) {
        self.buffer[self.index] = value;
        self.index = (self.index + 1) % HISTORY_SIZE;
        if self.count < HISTORY_SIZE {
            self.count += 1;
        }
    }

    /// Number of stored samples.
    #[inline]
    pub const fn len(&self) -> usize { self.count }

    /// Whether no sample has been pushed yet.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.count == 0 }

    /// Most recent sample.
    pub fn latest(&self) -> Option<f32> {
        if self.count == 0 {
            None
        } else {
            Some(self.buffer[(self.index + HISTORY_SIZE - 1) % HISTORY_SIZE])
        }
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let start = if self.count < HISTORY_SIZE { 0 } else { self.index };
        (0..self.count).map(move |i| self.buffer[(start + i) % HISTORY_SIZE])
    }
}

impl Default for SaturationHistory {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
