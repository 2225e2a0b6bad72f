// src/lib.rs
//! # Half-Duplex Stream Buffering
//!
//! The I/O staging layer for synchronous request/response binary protocols
//! spoken over one duplex stream connection.
//!
//! Features:
//! - One buffer for both directions: a request is fully written before its
//!   response is read, so a single backing region serves reads and writes
//! - Zero-copy reads: `read_next` hands out slices aliasing the backing
//!   region, tied by lifetime to the buffer so they cannot outlive it
//! - Writable regions for outgoing messages, sized exactly, small, or unknown
//! - On-demand growth for oversized messages, with a tunable retention policy
//! - Lock-free bounded recycle pools for per-query row and field structures,
//!   zeroized on return (via `zeroize`)
//!
//! ```
//! use duplexbuf::prelude::*;
//!
//! let response: &[u8] = &[0x02, 0x00, 0x00, 0x01, b'o', b'k'];
//! let mut buf = StreamBuffer::new(response);
//!
//! // Build the request in place while the buffer is idle.
//! let mut region = buf.take_small_buffer(4).expect("buffer is idle");
//! region.copy_from_slice(&[0x00, 0x00, 0x00, 0x0e]);
//! let request = region.commit(4)?;
//! assert_eq!(request.len(), 4);
//!
//! // Parse the response straight out of the same storage.
//! let len = buf.read_next(4)?[0] as usize;
//! let mut row = recycle::acquire_row_buffer();
//! row.push_value(buf.read_next(len)?);
//! assert_eq!(row.value(0), Some(&b"ok"[..]));
//! recycle::release_row_buffer(row);
//! # Ok::<(), BufferError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod recycle;
pub mod stream;

// Re-export main types
pub use error::{BufferError, Result, ResultExt};
pub use recycle::{
    DEFAULT_POOL_CAPACITY, FieldDescriptor, PoolConfig, PoolStats, RecyclePool, Recycled, RowBuffer,
};
pub use stream::{
    BufferState, DEFAULT_BUF_SIZE, MAX_PACKET_SIZE, RetainPolicy, StreamBuffer,
    StreamBufferConfig, StreamStats, WriteRegion,
};

/// Commonly used imports.
pub mod prelude {
    pub use crate::error::{BufferError, Result, ResultExt};
    pub use crate::recycle::{
        self, DEFAULT_POOL_CAPACITY, FieldDescriptor, PoolConfig, PoolStats, RecyclePool, Recycled,
        RowBuffer,
    };
    pub use crate::stream::{
        BufferState, DEFAULT_BUF_SIZE, MAX_PACKET_SIZE, RetainPolicy, StreamBuffer,
        StreamBufferConfig, StreamStats, WriteRegion,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_request_then_response_share_storage() {
        let response: &[u8] = b"\x05hello";
        let mut buf = StreamBuffer::new(response);

        let mut region = buf.take_buffer(3).unwrap();
        region.copy_from_slice(b"GET");
        assert_eq!(&region.commit(3).unwrap()[..], b"GET");

        let len = buf.read_next(1).unwrap()[0] as usize;
        assert_eq!(buf.read_next(len).unwrap(), b"hello");
        assert_eq!(buf.state(), BufferState::Idle);
    }

    #[test]
    fn test_pool_prelude() {
        let pool: RecyclePool<Vec<FieldDescriptor>> = RecyclePool::new(PoolConfig::default());
        let fields = pool.acquire_len(2);
        pool.release(fields);
        assert_eq!(pool.stats().released, 1);
    }
}
