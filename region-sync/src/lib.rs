//! # Minimal synchronization primitives
//!
//! A single spinlock type, split out of `region-alloc` so the core
//! allocator crate never has to decide how its callers serialize access.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod spin_lock;

pub use spin_lock::{SpinLock, SpinLockGuard};
