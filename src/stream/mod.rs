// src/stream/mod.rs
//! Shared read/write staging buffer for half-duplex connections

pub(crate) mod config;
pub mod core;
pub(crate) mod region;
pub(crate) mod stats;
mod take;

pub use config::{DEFAULT_BUF_SIZE, MAX_PACKET_SIZE, RetainPolicy, StreamBufferConfig};
pub use self::core::{BufferState, StreamBuffer};
pub use region::WriteRegion;
pub use stats::StreamStats;
