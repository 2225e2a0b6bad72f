// src/stream/region.rs
//! Writable regions handed out by the `take_*` family

use crate::error::{BufferError, Result};
use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

enum Storage<'a> {
    /// Aliases the stream buffer's backing region
    Borrowed(&'a mut [u8]),
    /// Temporary allocation that the stream buffer does not keep
    Owned(Vec<u8>),
}

/// A writable region for building an outgoing message in place.
///
/// The region holds the stream buffer's mutable borrow, so no other buffer
/// call compiles while it is live. Write into it through `DerefMut`, then
/// [`commit`](Self::commit) the number of bytes produced.
///
/// # Examples
///
/// ```
/// use duplexbuf::StreamBuffer;
/// # use duplexbuf::BufferError;
///
/// let mut buf = StreamBuffer::new(std::io::empty());
/// let mut region = buf.take_small_buffer(8).expect("buffer is idle");
/// region[..3].copy_from_slice(b"SET");
///
/// let packet = region.commit(3)?;
/// assert_eq!(&packet[..], b"SET");
/// # Ok::<(), BufferError>(())
/// ```
pub struct WriteRegion<'a> {
    storage: Storage<'a>,
}

impl<'a> WriteRegion<'a> {
    pub(crate) fn borrowed(region: &'a mut [u8]) -> Self {
        Self {
            storage: Storage::Borrowed(region),
        }
    }

    pub(crate) fn owned(region: Vec<u8>) -> Self {
        Self {
            storage: Storage::Owned(region),
        }
    }

    /// Returns `true` if the region aliases the stream buffer's backing
    /// storage, `false` for a one-off allocation.
    #[inline]
    pub fn is_aliased(&self) -> bool {
        matches!(self.storage, Storage::Borrowed(_))
    }

    /// Releases the region, reporting that its first `written` bytes hold
    /// the outgoing message.
    ///
    /// Returns those bytes: borrowed from the stream buffer when the region
    /// aliases it, owned for a one-off allocation.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::CommitOutOfBounds`] if `written` exceeds the
    /// region length.
    pub fn commit(self, written: usize) -> Result<Cow<'a, [u8]>> {
        let len = self.len();
        if written > len {
            return Err(BufferError::CommitOutOfBounds { written, len });
        }
        match self.storage {
            Storage::Borrowed(region) => {
                let region: &'a [u8] = region;
                Ok(Cow::Borrowed(&region[..written]))
            }
            Storage::Owned(mut region) => {
                region.truncate(written);
                Ok(Cow::Owned(region))
            }
        }
    }
}

impl Deref for WriteRegion<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match &self.storage {
            Storage::Borrowed(region) => &region[..],
            Storage::Owned(region) => &region[..],
        }
    }
}

impl DerefMut for WriteRegion<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Borrowed(region) => &mut region[..],
            Storage::Owned(region) => &mut region[..],
        }
    }
}

impl std::fmt::Debug for WriteRegion<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteRegion")
            .field("len", &self.len())
            .field("aliased", &self.is_aliased())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_borrowed_prefix() {
        let mut backing = [0u8; 16];
        let mut region = WriteRegion::borrowed(&mut backing[..8]);
        assert!(region.is_aliased());
        region[..2].copy_from_slice(&[0xDE, 0xAD]);

        let out = region.commit(2).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&out[..], &[0xDE, 0xAD]);
    }

    #[test]
    fn test_commit_owned_truncates() {
        let mut region = WriteRegion::owned(vec![0; 32]);
        assert!(!region.is_aliased());
        region[0] = 1;

        let out = region.commit(1).unwrap();
        assert!(matches!(out, Cow::Owned(_)));
        assert_eq!(&out[..], &[1]);
    }

    #[test]
    fn test_commit_out_of_bounds() {
        let region = WriteRegion::owned(vec![0; 4]);
        match region.commit(5) {
            Err(BufferError::CommitOutOfBounds { written, len }) => {
                assert_eq!((written, len), (5, 4));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
