// src/recycle/stats.rs
//! Statistics tracking for recycle pools.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Snapshot of a recycle pool's counters.
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Number of idle instances currently in the pool
    pub available: usize,
    /// Maximum number of idle instances the pool can hold
    pub capacity: usize,
    /// Total number of acquire calls
    pub acquired: usize,
    /// Acquisitions served by an idle instance
    pub reused: usize,
    /// Acquisitions served by a fresh allocation
    pub allocated: usize,
    /// Total number of release calls
    pub released: usize,
    /// Instances dropped instead of pooled (pool full, or too small to reuse)
    pub discarded: usize,
}

impl PoolStats {
    /// Returns the number of instances currently held by borrowers.
    ///
    /// # Examples
    ///
    /// ```
    /// use duplexbuf::prelude::*;
    ///
    /// let pool: RecyclePool<RowBuffer> = RecyclePool::default();
    /// let _row = pool.acquire();
    ///
    /// assert_eq!(pool.stats().in_use(), 1);
    /// ```
    pub fn in_use(&self) -> usize {
        self.acquired.saturating_sub(self.released)
    }

    /// Returns the share of acquisitions served without allocating, as a
    /// percentage (0.0-100.0).
    ///
    /// # Examples
    ///
    /// ```
    /// use duplexbuf::prelude::*;
    ///
    /// let pool: RecyclePool<RowBuffer> = RecyclePool::default();
    /// for _ in 0..4 {
    ///     let row = pool.acquire();
    ///     pool.release(row);
    /// }
    ///
    /// assert_eq!(pool.stats().hit_rate(), 75.0);
    /// ```
    pub fn hit_rate(&self) -> f64 {
        if self.acquired == 0 {
            return 0.0;
        }
        (self.reused as f64 / self.acquired as f64) * 100.0
    }
}

pub(crate) struct PoolCounters {
    pub(crate) acquired: AtomicUsize,
    pub(crate) reused: AtomicUsize,
    pub(crate) allocated: AtomicUsize,
    pub(crate) released: AtomicUsize,
    pub(crate) discarded: AtomicUsize,
}

impl PoolCounters {
    pub(crate) fn new() -> Self {
        Self {
            acquired: AtomicUsize::new(0),
            reused: AtomicUsize::new(0),
            allocated: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
            discarded: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn read(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::Relaxed)
    }
}
