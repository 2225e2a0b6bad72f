// src/recycle/pool.rs
//! Bounded, non-blocking recycle pool.
//!
//! # Bounds
//!
//! The idle list is a `crossbeam::queue::ArrayQueue`, so the pool can never
//! hold more than its capacity:
//! - `acquire` on an empty pool allocates a fresh `T::default()`.
//! - `release` on a full pool drops the instance.
//!
//! Neither path blocks or fails.
//!
//! # Reset on release
//!
//! Every instance is zeroized (via the [`zeroize`] crate) **before** it enters
//! the idle list. The next borrower can't observe a previous borrower's
//! data, including bytes left in spare `Vec` capacity.

use super::config::PoolConfig;
use super::stats::{PoolCounters, PoolStats};
use crossbeam::queue::ArrayQueue;
use log::trace;
use std::any::type_name;
use zeroize::Zeroize;

/// Thread-safe bounded cache of reusable instances of `T`.
///
/// # Example
///
/// ```rust
/// use duplexbuf::prelude::*;
///
/// let pool: RecyclePool<RowBuffer> = RecyclePool::new(PoolConfig::with_capacity(4));
///
/// let mut row = pool.acquire();
/// row.push_value(b"42");
/// pool.release(row);
///
/// // The reused instance comes back empty.
/// let row = pool.acquire();
/// assert!(row.is_empty());
/// ```
pub struct RecyclePool<T> {
    idle: ArrayQueue<T>,
    counters: PoolCounters,
}

impl<T: Default + Zeroize> Default for RecyclePool<T> {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl<T: Default + Zeroize> RecyclePool<T> {
    /// Creates a pool and pre-warms it with `config.prewarm` instances.
    ///
    /// # Panics
    ///
    /// Panics if `config.capacity` is zero.
    pub fn new(config: PoolConfig) -> Self {
        assert!(config.capacity > 0, "pool capacity must be positive");
        let idle = ArrayQueue::new(config.capacity);
        for _ in 0..config.prewarm.min(config.capacity) {
            let _ = idle.push(T::default());
        }
        Self {
            idle,
            counters: PoolCounters::new(),
        }
    }

    /// Creates an empty pool holding up to `capacity` idle instances.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(PoolConfig::with_capacity(capacity))
    }

    /// Takes an idle instance, or allocates a fresh one if none is idle.
    pub fn acquire(&self) -> T {
        PoolCounters::bump(&self.counters.acquired);
        match self.idle.pop() {
            Some(item) => {
                PoolCounters::bump(&self.counters.reused);
                item
            }
            None => {
                PoolCounters::bump(&self.counters.allocated);
                trace!("recycle pool empty, allocating {}", type_name::<T>());
                T::default()
            }
        }
    }

    /// Zeroizes `item` and returns it to the pool, dropping it if the pool is
    /// full.
    pub fn release(&self, mut item: T) {
        item.zeroize();
        PoolCounters::bump(&self.counters.released);
        if self.idle.push(item).is_err() {
            PoolCounters::bump(&self.counters.discarded);
            trace!("recycle pool full, dropping {}", type_name::<T>());
        }
    }

    /// Acquires an instance wrapped in a guard that releases it on drop.
    ///
    /// ```rust
    /// use duplexbuf::prelude::*;
    ///
    /// let pool: RecyclePool<RowBuffer> = RecyclePool::default();
    /// {
    ///     let mut row = pool.checkout();
    ///     row.push_null();
    /// }
    /// assert_eq!(pool.available(), 1);
    /// ```
    pub fn checkout(&self) -> Recycled<'_, T> {
        Recycled {
            item: Some(self.acquire()),
            pool: self,
        }
    }
}

impl<T> RecyclePool<T> {
    /// Number of instances currently idle in the pool.
    #[inline]
    pub fn available(&self) -> usize {
        self.idle.len()
    }

    /// Maximum number of idle instances the pool keeps.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.idle.capacity()
    }

    /// Drops every idle instance.
    pub fn clear(&self) {
        while self.idle.pop().is_some() {}
    }

    /// Returns a snapshot of pool statistics.
    ///
    /// Counters use `Relaxed` ordering; values are eventually consistent.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            available: self.idle.len(),
            capacity: self.idle.capacity(),
            acquired: PoolCounters::read(&self.counters.acquired),
            reused: PoolCounters::read(&self.counters.reused),
            allocated: PoolCounters::read(&self.counters.allocated),
            released: PoolCounters::read(&self.counters.released),
            discarded: PoolCounters::read(&self.counters.discarded),
        }
    }
}

impl<E: Default> RecyclePool<Vec<E>> {
    /// Takes a list of exactly `n` default elements.
    ///
    /// An idle list is reused only if its capacity is at least `n`; an
    /// undersized one is dropped and a fresh list is allocated instead.
    ///
    /// ```rust
    /// use duplexbuf::prelude::*;
    ///
    /// let pool: RecyclePool<Vec<FieldDescriptor>> = RecyclePool::default();
    /// pool.release(Vec::with_capacity(8));
    ///
    /// let fields = pool.acquire_len(5);
    /// assert_eq!(fields.len(), 5);
    /// assert_eq!(pool.stats().reused, 1);
    /// ```
    pub fn acquire_len(&self, n: usize) -> Vec<E> {
        PoolCounters::bump(&self.counters.acquired);
        if let Some(mut list) = self.idle.pop() {
            if list.capacity() >= n {
                PoolCounters::bump(&self.counters.reused);
                list.resize_with(n, E::default);
                return list;
            }
            PoolCounters::bump(&self.counters.discarded);
            trace!(
                "dropping idle list of capacity {} for request of {}",
                list.capacity(),
                n
            );
        }
        PoolCounters::bump(&self.counters.allocated);
        let mut list = Vec::with_capacity(n);
        list.resize_with(n, E::default);
        list
    }
}

/// An instance borrowed from a [`RecyclePool`].
///
/// On drop the instance is zeroized and returned to the pool if space
/// permits. Use [`into_inner`](Self::into_inner) to keep it instead.
pub struct Recycled<'a, T: Default + Zeroize> {
    item: Option<T>,
    pool: &'a RecyclePool<T>,
}

impl<T: Default + Zeroize> Recycled<'_, T> {
    /// Detaches the instance from the pool without returning it.
    pub fn into_inner(mut self) -> T {
        self.item.take().unwrap_or_default()
    }
}

impl<T: Default + Zeroize> std::ops::Deref for Recycled<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.item.as_ref().expect("recycled item is present until drop")
    }
}

impl<T: Default + Zeroize> std::ops::DerefMut for Recycled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.item.as_mut().expect("recycled item is present until drop")
    }
}

impl<T: Default + Zeroize> Drop for Recycled<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.pool.release(item);
        }
    }
}
