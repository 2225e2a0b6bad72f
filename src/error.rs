// src/error.rs
//! Error types for stream buffer operations with conversion support

use std::fmt;
use std::io;

/// Errors that can occur during stream buffer operations
#[derive(Debug)]
pub enum BufferError {
    /// The underlying source failed; the original error is kept verbatim
    Io(io::Error),
    /// The source reported end of input before enough bytes were buffered
    EndOfInput {
        /// Bytes the caller asked for
        needed: usize,
        /// Bytes that were buffered when the source ran dry
        available: usize,
    },
    /// Unread bytes are pending, so no writable region can be handed out
    Busy {
        /// Number of unread bytes still buffered
        pending: usize,
    },
    /// A write region was committed with more bytes than it holds
    CommitOutOfBounds {
        /// Bytes reported as written
        written: usize,
        /// Length of the region
        len: usize,
    },
}

impl BufferError {
    /// Returns `true` if this is an end-of-input condition.
    ///
    /// Protocol layers use this to tell a clean connection close apart from
    /// a transport failure.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput { .. })
    }

    /// Returns `true` if this is the "unread data pending" condition.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Source read error: {}", err),
            Self::EndOfInput { needed, available } => write!(
                f,
                "End of input: needed {} bytes, {} available",
                needed, available
            ),
            Self::Busy { pending } => {
                write!(f, "Buffer busy: {} unread bytes pending", pending)
            }
            Self::CommitOutOfBounds { written, len } => write!(
                f,
                "Commit of {} bytes exceeds region of {} bytes",
                written, len
            ),
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// ERROR CONVERSION
// ============================================================================

/// Convert BufferError to std::io::Error
impl From<BufferError> for io::Error {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::Io(inner) => inner,
            BufferError::EndOfInput { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, err),
            BufferError::CommitOutOfBounds { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
            BufferError::Busy { .. } => io::Error::other(err),
        }
    }
}

/// Convert std::io::Error to BufferError
impl From<io::Error> for BufferError {
    fn from(err: io::Error) -> Self {
        BufferError::Io(err)
    }
}

/// Convert BufferError to anyhow::Error
#[cfg(feature = "anyhow")]
impl From<BufferError> for anyhow::Error {
    fn from(err: BufferError) -> Self {
        anyhow::Error::new(err)
    }
}

/// Result type alias for stream buffer operations
pub type Result<T> = std::result::Result<T, BufferError>;

// ============================================================================
// EXTENSION TRAIT FOR EASY CONVERSION
// ============================================================================

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(|e| e.into())
    }

    fn into_io(self) -> io::Result<T> {
        self.map_err(|e| e.into())
    }
}
