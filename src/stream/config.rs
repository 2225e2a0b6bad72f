// src/stream/config.rs
//! Configuration for stream buffers

/// Size of a freshly created backing region, and the growth granule.
pub const DEFAULT_BUF_SIZE: usize = 4096;

/// Largest single protocol payload (`2^24 - 1` bytes).
///
/// `take_buffer` never keeps an allocation of this size or larger as the
/// reusable backing region.
pub const MAX_PACKET_SIZE: usize = (1 << 24) - 1;

/// What `take_buffer` does with a request that exceeds the current
/// capacity but stays below [`MAX_PACKET_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetainPolicy {
    /// Replace the backing region with the larger allocation and keep it
    /// for the rest of the connection.
    #[default]
    Retain,
    /// Hand out a temporary allocation and keep the current backing region.
    OneOff,
}

/// Configuration for stream buffer sizing.
#[derive(Debug, Clone)]
pub struct StreamBufferConfig {
    /// Initial capacity; growth rounds up to a multiple of this (bytes)
    pub default_size: usize,
    /// Requests at or above this size are never retained (bytes)
    pub max_packet_size: usize,
    /// Retention of oversized `take_buffer` allocations
    pub retain_policy: RetainPolicy,
}

impl Default for StreamBufferConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_BUF_SIZE,
            max_packet_size: MAX_PACKET_SIZE,
            retain_policy: RetainPolicy::Retain,
        }
    }
}

impl StreamBufferConfig {
    /// Default sizing, but oversized takes are never retained.
    ///
    /// Suits long-lived connections that see rare large messages and should
    /// not keep the memory afterwards.
    pub fn one_off() -> Self {
        Self {
            retain_policy: RetainPolicy::OneOff,
            ..Self::default()
        }
    }

    /// Rounds `need` up to the smallest multiple of `default_size` that is
    /// at least `need`.
    #[inline]
    pub(crate) fn grown_capacity(&self, need: usize) -> usize {
        need.div_ceil(self.default_size) * self.default_size
    }
}
