// src/recycle/mod.rs
//! Bounded object recycling for short-lived per-query structures.

pub(crate) mod config;
pub(crate) mod global;
pub(crate) mod pool;
pub(crate) mod row;
pub(crate) mod stats;

pub use config::{DEFAULT_POOL_CAPACITY, PoolConfig};
pub use global::{
    acquire_fields, acquire_row_buffer, field_lists, release_fields, release_row_buffer,
    row_buffers,
};
pub use pool::{RecyclePool, Recycled};
pub use row::{FieldDescriptor, RowBuffer};
pub use stats::PoolStats;
