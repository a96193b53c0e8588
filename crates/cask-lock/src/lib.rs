//! Per-key mutual exclusion for the Cask gateway.
//!
//! The registry hands out one lock per key, created lazily on first use and
//! shared by every later operation on that key. Holding a [`KeyGuard`]
//! serializes all lock-requiring operations on that key; operations on
//! different keys proceed fully in parallel. The set of keys does not need
//! to be known up front.
//!
//! # Design Rules
//!
//! 1. Exactly one lock object ever exists per key, even when N callers race
//!    on the first access (insert-if-absent on a concurrent map).
//! 2. Release happens on every exit path -- the guard releases on drop,
//!    including panic unwind.
//! 3. Acquisition cannot fail; it can only wait. [`KeyLockRegistry::acquire_timeout`]
//!    bounds the wait for callers that need a deadline.
//! 4. Entries are never evicted implicitly. [`KeyLockRegistry::prune`] is the
//!    explicit escape hatch for long-lived processes with high key
//!    cardinality.

pub mod registry;

pub use registry::{AcquireTimeout, KeyGuard, KeyLockRegistry};
