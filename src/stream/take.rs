// src/stream/take.rs
//! Write side: handing out regions for outgoing messages
//!
//! Every `take_*` call succeeds only while the buffer is
//! [`Idle`](super::BufferState::Idle). Handing out writable space that
//! aliases unread bytes would corrupt them, so a holding buffer answers
//! `None` and the caller must fall back to its own allocation.

use super::config::RetainPolicy;
use super::core::StreamBuffer;
use super::region::WriteRegion;
use log::debug;

impl<R> StreamBuffer<R> {
    /// Returns a writable region of exactly `length` bytes.
    ///
    /// - If `length` fits the default size or the current capacity, the
    ///   region aliases the front of the backing storage.
    /// - If it is below `max_packet_size`, the backing storage is replaced by
    ///   a fresh allocation of exactly `length` bytes, which is kept for later
    ///   calls. Under [`RetainPolicy::OneOff`] the allocation is one-off
    ///   instead.
    /// - Otherwise the region is a one-off allocation and the backing
    ///   storage is untouched.
    ///
    /// Returns `None` while unread bytes are pending.
    ///
    /// # Examples
    ///
    /// ```
    /// use duplexbuf::StreamBuffer;
    ///
    /// let mut buf = StreamBuffer::new(std::io::empty());
    /// let region = buf.take_buffer(10_000).expect("buffer is idle");
    /// assert_eq!(region.len(), 10_000);
    /// assert!(region.is_aliased());
    /// drop(region);
    /// assert_eq!(buf.capacity(), 10_000);
    /// ```
    pub fn take_buffer(&mut self, length: usize) -> Option<WriteRegion<'_>> {
        if self.reject_if_holding() {
            return None;
        }

        if length <= self.config.default_size || length <= self.data.len() {
            return Some(WriteRegion::borrowed(&mut self.data[..length]));
        }

        if length < self.config.max_packet_size
            && self.config.retain_policy == RetainPolicy::Retain
        {
            debug!(
                "replacing {} byte stream buffer with {} byte region",
                self.data.len(),
                length
            );
            self.data = vec![0; length];
            self.counters.grows += 1;
            return Some(WriteRegion::borrowed(&mut self.data[..]));
        }

        debug!("serving {} byte take with a one-off allocation", length);
        self.counters.one_off_allocations += 1;
        Some(WriteRegion::owned(vec![0; length]))
    }

    /// Returns a writable region of `length` bytes for callers that know
    /// `length` never exceeds the default size.
    ///
    /// A `length` beyond the current capacity is a caller bug; debug builds
    /// assert, release builds fall back to [`take_buffer`](Self::take_buffer).
    ///
    /// Returns `None` while unread bytes are pending.
    pub fn take_small_buffer(&mut self, length: usize) -> Option<WriteRegion<'_>> {
        debug_assert!(
            length <= self.config.default_size,
            "take_small_buffer: length {} > default size {}",
            length,
            self.config.default_size
        );
        if length > self.data.len() {
            return self.take_buffer(length);
        }
        if self.reject_if_holding() {
            return None;
        }
        Some(WriteRegion::borrowed(&mut self.data[..length]))
    }

    /// Returns the whole backing region, for messages whose size is not
    /// known up front.
    ///
    /// Returns `None` while unread bytes are pending.
    ///
    /// # Examples
    ///
    /// ```
    /// use duplexbuf::StreamBuffer;
    /// # use duplexbuf::BufferError;
    ///
    /// let mut buf = StreamBuffer::new(std::io::empty());
    /// let mut region = buf.take_complete_buffer().expect("buffer is idle");
    /// assert_eq!(region.len(), 4096);
    ///
    /// let mut n = 0;
    /// for word in ["SELECT", " ", "1"] {
    ///     region[n..n + word.len()].copy_from_slice(word.as_bytes());
    ///     n += word.len();
    /// }
    /// assert_eq!(&region.commit(n)?[..], b"SELECT 1");
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn take_complete_buffer(&mut self) -> Option<WriteRegion<'_>> {
        if self.reject_if_holding() {
            return None;
        }
        Some(WriteRegion::borrowed(&mut self.data[..]))
    }

    fn reject_if_holding(&mut self) -> bool {
        if self.available == 0 {
            return false;
        }
        debug!(
            "take refused: {} unread bytes pending in stream buffer",
            self.available
        );
        self.counters.busy_rejections += 1;
        true
    }
}
