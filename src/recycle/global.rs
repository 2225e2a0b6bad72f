// src/recycle/global.rs
//! Process-wide pools shared by every connection.

use super::config::DEFAULT_POOL_CAPACITY;
use super::pool::RecyclePool;
use super::row::{FieldDescriptor, RowBuffer};
use std::sync::LazyLock;

static ROW_BUFFERS: LazyLock<RecyclePool<RowBuffer>> =
    LazyLock::new(|| RecyclePool::with_capacity(DEFAULT_POOL_CAPACITY));

static FIELD_LISTS: LazyLock<RecyclePool<Vec<FieldDescriptor>>> =
    LazyLock::new(|| RecyclePool::with_capacity(DEFAULT_POOL_CAPACITY));

/// The process-wide row buffer pool.
pub fn row_buffers() -> &'static RecyclePool<RowBuffer> {
    &ROW_BUFFERS
}

/// The process-wide field descriptor list pool.
pub fn field_lists() -> &'static RecyclePool<Vec<FieldDescriptor>> {
    &FIELD_LISTS
}

/// Takes a row buffer from the process-wide pool.
pub fn acquire_row_buffer() -> RowBuffer {
    ROW_BUFFERS.acquire()
}

/// Resets a row buffer and returns it to the process-wide pool.
pub fn release_row_buffer(row: RowBuffer) {
    ROW_BUFFERS.release(row);
}

/// Takes a list of `n` default field descriptors from the process-wide pool.
///
/// # Example
///
/// ```rust
/// use duplexbuf::recycle;
///
/// let mut fields = recycle::acquire_fields(3);
/// fields[0].name.push_str("id");
/// assert_eq!(fields.len(), 3);
/// recycle::release_fields(fields);
/// ```
pub fn acquire_fields(n: usize) -> Vec<FieldDescriptor> {
    FIELD_LISTS.acquire_len(n)
}

/// Resets a field descriptor list and returns it to the process-wide pool.
pub fn release_fields(fields: Vec<FieldDescriptor>) {
    FIELD_LISTS.release(fields);
}
