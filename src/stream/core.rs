// src/stream/core.rs
//! Core stream buffer structure and the read side
//!
//! This module provides the [`StreamBuffer`] type: one contiguous backing
//! region shared by the read and write directions of a half-duplex
//! connection. Reads hand out slices that alias the backing region; the
//! borrow checker keeps them from outliving the next buffer call.

use super::config::StreamBufferConfig;
use super::stats::{StreamCounters, StreamStats};
use crate::error::{BufferError, Result};
use log::{debug, trace};
use std::io::{ErrorKind, Read};
use zeroize::Zeroize;

/// Whether the buffer can hand out a writable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// No unread bytes are buffered; any take call may succeed.
    Idle,
    /// Unread bytes are buffered; take calls return `None` until they are
    /// consumed with [`StreamBuffer::read_next`].
    Holding {
        /// Number of unread bytes
        pending: usize,
    },
}

/// A growable staging buffer paired with a readable source.
///
/// The same backing region serves incoming data (via [`fill`](Self::fill)
/// and [`read_next`](Self::read_next)) and outgoing data (via the
/// `take_*` family). That is sound only because the protocol on top is
/// half-duplex: a request is fully written before its response is read.
///
/// # Examples
///
/// ```
/// use duplexbuf::StreamBuffer;
/// # use duplexbuf::BufferError;
///
/// let wire: &[u8] = &[0x03, 0x00, 0x00, 0x01, b'a', b'b', b'c'];
/// let mut buf = StreamBuffer::new(wire);
///
/// let header = buf.read_next(4)?;
/// let payload_len = header[0] as usize;
/// assert_eq!(buf.read_next(payload_len)?, b"abc");
/// # Ok::<(), BufferError>(())
/// ```
pub struct StreamBuffer<R> {
    /// Backing region; its length is the buffer's capacity
    pub(crate) data: Vec<u8>,
    /// Upstream source that `fill` pulls from
    pub(crate) source: R,
    /// Offset of the first unread byte
    pub(crate) cursor: usize,
    /// Number of unread bytes starting at `cursor`
    pub(crate) available: usize,
    pub(crate) config: StreamBufferConfig,
    pub(crate) counters: StreamCounters,
}

impl<R: Read> StreamBuffer<R> {
    /// Creates a buffer of [`DEFAULT_BUF_SIZE`](super::DEFAULT_BUF_SIZE)
    /// bytes reading from `source`.
    ///
    /// # Examples
    ///
    /// ```
    /// use duplexbuf::{StreamBuffer, DEFAULT_BUF_SIZE};
    ///
    /// let buf = StreamBuffer::new(std::io::empty());
    /// assert_eq!(buf.capacity(), DEFAULT_BUF_SIZE);
    /// assert_eq!(buf.available(), 0);
    /// ```
    pub fn new(source: R) -> Self {
        Self::with_config(source, StreamBufferConfig::default())
    }

    /// Creates a buffer with custom sizing.
    ///
    /// # Panics
    ///
    /// Panics if `config.default_size` is zero.
    pub fn with_config(source: R, config: StreamBufferConfig) -> Self {
        assert!(config.default_size > 0, "default_size must be positive");
        Self {
            data: vec![0; config.default_size],
            source,
            cursor: 0,
            available: 0,
            config,
            counters: StreamCounters::default(),
        }
    }

    /// Ensures at least `need` unread bytes are buffered, starting at offset 0.
    ///
    /// Pending bytes are first moved to the front of the backing region. If
    /// `need` exceeds the capacity, the region grows to the next multiple of
    /// `default_size`, preserving the pending bytes. Then the source is read
    /// until enough bytes are buffered.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::EndOfInput`] if the source reports end of input
    /// first, or [`BufferError::Io`] with the source's own error. Reads that
    /// fail with [`ErrorKind::Interrupted`] are retried.
    ///
    /// # Examples
    ///
    /// ```
    /// use duplexbuf::StreamBuffer;
    /// # use duplexbuf::BufferError;
    ///
    /// let wire = [7u8; 5000];
    /// let mut buf = StreamBuffer::new(&wire[..]);
    /// buf.fill(5000)?;
    /// assert_eq!(buf.capacity(), 8192);
    /// assert!(buf.available() >= 5000);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn fill(&mut self, need: usize) -> Result<()> {
        if self.available > 0 && self.cursor > 0 {
            self.data
                .copy_within(self.cursor..self.cursor + self.available, 0);
        }
        self.cursor = 0;

        if need > self.data.len() {
            let new_capacity = self.config.grown_capacity(need);
            debug!(
                "growing stream buffer from {} to {} bytes",
                self.data.len(),
                new_capacity
            );
            let mut grown = vec![0; new_capacity];
            grown[..self.available].copy_from_slice(&self.data[..self.available]);
            self.data = grown;
            self.counters.grows += 1;
        }

        while self.available < need {
            match self.source.read(&mut self.data[self.available..]) {
                Ok(0) => {
                    trace!(
                        "source exhausted with {} of {} bytes buffered",
                        self.available,
                        need
                    );
                    return Err(BufferError::EndOfInput {
                        needed: need,
                        available: self.available,
                    });
                }
                Ok(n) => {
                    self.available += n;
                    self.counters.bytes_filled += n;
                    trace!("filled {} bytes ({}/{} buffered)", n, self.available, need);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(BufferError::Io(e)),
            }
        }
        Ok(())
    }

    /// Returns the next `need` bytes and advances past them.
    ///
    /// The slice aliases the backing region and is valid until the next
    /// buffer call; copy out anything that must be retained longer.
    ///
    /// # Errors
    ///
    /// Propagates the [`fill`](Self::fill) error when fewer than `need`
    /// bytes can be obtained. End of input is ignored if enough bytes were
    /// buffered anyway.
    ///
    /// # Examples
    ///
    /// ```
    /// use duplexbuf::StreamBuffer;
    /// # use duplexbuf::BufferError;
    ///
    /// let mut buf = StreamBuffer::new(&b"hello world"[..]);
    /// assert_eq!(buf.read_next(5)?, b"hello");
    /// assert_eq!(buf.read_next(6)?, b" world");
    /// assert!(buf.read_next(1).unwrap_err().is_end_of_input());
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn read_next(&mut self, need: usize) -> Result<&[u8]> {
        if self.available < need {
            match self.fill(need) {
                Ok(()) => {}
                Err(BufferError::EndOfInput { .. }) if self.available >= need => {}
                Err(e) => return Err(e),
            }
        }

        let start = self.cursor;
        self.cursor += need;
        self.available -= need;
        Ok(&self.data[start..start + need])
    }
}

impl<R> StreamBuffer<R> {
    /// Returns the size of the backing region in bytes.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of unread bytes currently buffered.
    #[inline(always)]
    pub fn available(&self) -> usize {
        self.available
    }

    /// Returns whether the buffer is idle or holding unread data.
    ///
    /// # Examples
    ///
    /// ```
    /// use duplexbuf::{BufferState, StreamBuffer};
    /// # use duplexbuf::BufferError;
    ///
    /// let wire: &[u8] = &[1, 2, 3, 4];
    /// let mut buf = StreamBuffer::new(wire);
    /// assert_eq!(buf.state(), BufferState::Idle);
    ///
    /// buf.fill(2)?;
    /// assert!(matches!(buf.state(), BufferState::Holding { .. }));
    /// # Ok::<(), BufferError>(())
    /// ```
    #[inline]
    pub fn state(&self) -> BufferState {
        if self.available == 0 {
            BufferState::Idle
        } else {
            BufferState::Holding {
                pending: self.available,
            }
        }
    }

    /// Returns `Ok(())` if no unread bytes are pending.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Busy`] while the buffer is holding unread data.
    pub fn ensure_idle(&self) -> Result<()> {
        match self.state() {
            BufferState::Idle => Ok(()),
            BufferState::Holding { pending } => Err(BufferError::Busy { pending }),
        }
    }

    /// Returns the buffer configuration.
    pub fn config(&self) -> &StreamBufferConfig {
        &self.config
    }

    /// Returns a reference to the underlying source.
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Returns a mutable reference to the underlying source.
    ///
    /// Reading from it directly bypasses any bytes already buffered.
    pub fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Returns a snapshot of buffer statistics.
    pub fn stats(&self) -> StreamStats {
        StreamStats {
            capacity: self.data.len(),
            available: self.available,
            bytes_filled: self.counters.bytes_filled,
            grows: self.counters.grows,
            one_off_allocations: self.counters.one_off_allocations,
            busy_rejections: self.counters.busy_rejections,
        }
    }

    /// Securely zeros the whole backing region and discards unread bytes.
    ///
    /// Capacity is kept. Use after staging sensitive payloads such as an
    /// authentication exchange.
    pub fn burn(&mut self) {
        debug!(
            "burning stream buffer ({} bytes, {} unread discarded)",
            self.data.len(),
            self.available
        );
        self.data.as_mut_slice().zeroize();
        self.cursor = 0;
        self.available = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Yields its chunks one `read` call at a time, then end of input.
    struct Chunked {
        chunks: Vec<Vec<u8>>,
        reads: usize,
    }

    impl Chunked {
        fn new(chunks: &[&[u8]]) -> Self {
            Self {
                chunks: chunks.iter().rev().map(|c| c.to_vec()).collect(),
                reads: 0,
            }
        }
    }

    impl Read for Chunked {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            match self.chunks.pop() {
                Some(chunk) => {
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        self.chunks.push(chunk[n..].to_vec());
                    }
                    Ok(n)
                }
                None => Ok(0),
            }
        }
    }

    #[test]
    fn test_new() {
        let buf = StreamBuffer::new(io::empty());
        assert_eq!(buf.capacity(), 4096);
        assert_eq!(buf.available(), 0);
        assert_eq!(buf.cursor, 0);
        assert_eq!(buf.state(), BufferState::Idle);
    }

    #[test]
    #[should_panic(expected = "default_size must be positive")]
    fn test_zero_default_size_panics() {
        let config = StreamBufferConfig {
            default_size: 0,
            ..StreamBufferConfig::default()
        };
        let _ = StreamBuffer::with_config(io::empty(), config);
    }

    #[test]
    fn test_read_next_across_chunks_then_eof() {
        let mut buf = StreamBuffer::new(Chunked::new(&[&[0x01, 0x02], &[0x03, 0x04]]));

        assert_eq!(buf.read_next(4).unwrap(), &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(buf.source().reads, 2);

        let err = buf.read_next(1).unwrap_err();
        assert!(err.is_end_of_input());
        assert_eq!(buf.source().reads, 3);
    }

    #[test]
    fn test_fill_compacts_pending_bytes() {
        let mut buf = StreamBuffer::new(Chunked::new(&[b"abcdef", b"gh"]));
        buf.fill(6).unwrap();
        assert_eq!(buf.read_next(4).unwrap(), b"abcd");
        assert_eq!(buf.cursor, 4);

        buf.fill(4).unwrap();
        assert_eq!(buf.cursor, 0);
        assert_eq!(&buf.data[..4], b"efgh");
        assert_eq!(buf.available(), 4);
    }

    #[test]
    fn test_fill_grows_and_preserves_prefix() {
        let mut source = vec![0xAB; 10];
        source.extend(std::iter::repeat_n(0xCD, 5000));
        let mut buf = StreamBuffer::new(Chunked::new(&[&source[..10], &source[10..]]));

        buf.fill(10).unwrap();
        assert_eq!(buf.read_next(2).unwrap(), &[0xAB, 0xAB]);

        buf.fill(5000).unwrap();
        assert_eq!(buf.capacity(), 8192);
        assert_eq!(&buf.data[..8], &[0xAB; 8]);
        assert!(buf.available() >= 5000);
        assert_eq!(buf.stats().grows, 1);
    }

    #[test]
    fn test_fill_zero_does_not_read() {
        let mut buf = StreamBuffer::new(Chunked::new(&[b"x"]));
        buf.fill(0).unwrap();
        assert_eq!(buf.source().reads, 0);
        assert_eq!(buf.read_next(0).unwrap(), b"");
    }

    #[test]
    fn test_fill_retries_interrupted() {
        struct Flaky {
            interrupted: bool,
        }
        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::Error::from(io::ErrorKind::Interrupted));
                }
                buf[0] = 9;
                Ok(1)
            }
        }

        let mut buf = StreamBuffer::new(Flaky { interrupted: false });
        assert_eq!(buf.read_next(1).unwrap(), &[9]);
    }

    #[test]
    fn test_source_error_is_propagated() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionAborted, "gone"))
            }
        }

        let mut buf = StreamBuffer::new(Broken);
        match buf.read_next(4) {
            Err(BufferError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionAborted),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_ensure_idle() {
        let mut buf = StreamBuffer::new(&b"abc"[..]);
        assert!(buf.ensure_idle().is_ok());
        buf.fill(3).unwrap();
        assert!(buf.ensure_idle().unwrap_err().is_busy());
        buf.read_next(3).unwrap();
        assert!(buf.ensure_idle().is_ok());
    }

    #[test]
    fn test_burn() {
        let mut buf = StreamBuffer::new(&b"secret"[..]);
        buf.fill(6).unwrap();
        buf.burn();
        assert_eq!(buf.available(), 0);
        assert_eq!(buf.capacity(), 4096);
        assert!(buf.data.iter().all(|&b| b == 0));
    }
}
