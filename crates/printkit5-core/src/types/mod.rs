//! Type aliases and shared-state handles.
//!
//! The streaming pipeline is pulled by a single thread, but two kinds of
//! state cross thread boundaries: scalars a user adjusts live (extrusion
//! ratio, baby-step offset) and the side-channel command queue. Both are
//! built on `parking_lot` primitives behind the aliases here so that the
//! observer side never blocks the pulling thread for more than a scalar
//! copy.

use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A thread-safe deque for cross-thread queue/buffer management.
pub type ThreadSafeDeque<T> = Arc<Mutex<VecDeque<T>>>;

/// A thread-safe reader-writer lock wrapper for read-heavy workloads.
///
/// Use when reads greatly outnumber writes. Multiple readers can access
/// concurrently, but writes require exclusive access.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// Create a new `ThreadSafe<T>` from a value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}

/// Create a new empty `ThreadSafeDeque<T>`.
#[inline]
pub fn thread_safe_deque<T>() -> ThreadSafeDeque<T> {
    Arc::new(Mutex::new(VecDeque::new()))
}

/// Create a new `ThreadSafeRw<T>` from a value.
#[inline]
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}

/// A cloneable handle to one live-adjustable scalar.
///
/// Every filter that exposes a user-tunable value (compensation ratio,
/// feed rate ratio, Z offset) receives one of these at construction
/// instead of reading ambient global state, so independent pipelines for
/// multiple printers cannot cross-contaminate. A `set` from any thread is
/// tearing-free and takes effect on the next line the filter processes;
/// lines already forwarded are never rewritten retroactively.
#[derive(Debug, Clone)]
pub struct ValueHandle {
    value: ThreadSafeRw<f64>,
}

impl ValueHandle {
    /// Create a handle holding the given initial value.
    pub fn new(initial: f64) -> Self {
        Self {
            value: thread_safe_rw(initial),
        }
    }

    /// Read the current value.
    pub fn get(&self) -> f64 {
        *self.value.read()
    }

    /// Replace the value. Visible to the next line processed.
    pub fn set(&self, value: f64) {
        *self.value.write() = value;
    }
}
