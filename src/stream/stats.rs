// src/stream/stats.rs
//! Statistics tracking for stream buffers.

/// Snapshot of a stream buffer's counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Current size of the backing region in bytes
    pub capacity: usize,
    /// Unread bytes currently buffered
    pub available: usize,
    /// Total bytes pulled from the source since creation
    pub bytes_filled: usize,
    /// Number of times the backing region was replaced by a larger one
    pub grows: usize,
    /// Number of take requests served by an allocation that was not retained
    pub one_off_allocations: usize,
    /// Number of take requests refused because unread data was pending
    pub busy_rejections: usize,
}

impl StreamStats {
    /// Returns how many times larger than `default_size` the backing region
    /// has become.
    ///
    /// # Examples
    ///
    /// ```
    /// use duplexbuf::prelude::*;
    ///
    /// let wire = [0u8; 5000];
    /// let mut buf = StreamBuffer::new(&wire[..]);
    /// buf.fill(5000)?;
    ///
    /// assert_eq!(buf.stats().growth_factor(DEFAULT_BUF_SIZE), 2.0);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn growth_factor(&self, default_size: usize) -> f64 {
        if default_size == 0 {
            return 0.0;
        }
        self.capacity as f64 / default_size as f64
    }
}

#[derive(Debug, Default)]
pub(crate) struct StreamCounters {
    pub(crate) bytes_filled: usize,
    pub(crate) grows: usize,
    pub(crate) one_off_allocations: usize,
    pub(crate) busy_rejections: usize,
}
