//! Type aliases for shared state.
//!
//! The design session is the single writer of the pattern store; exporters
//! and streamers on other threads take a read lock just long enough to copy
//! a snapshot.
//!
//! ## Usage
//!
//! ```rust
//! use stitchkit_core::types::*;
//!
//! let counter: ThreadSafeRw<u32> = thread_safe_rw(0);
//! *counter.write() += 1;
//! assert_eq!(*counter.read(), 1);
//! ```

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A thread-safe read-write lock for single-writer, many-reader state.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// Create a new `ThreadSafe<T>` from a value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}

/// Create a new `ThreadSafeRw<T>` from a value.
#[inline]
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}
