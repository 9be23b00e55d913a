//! The allocator handle.
//!
//! [`Heap`] is the "rewrite" the design notes invite: instead of five
//! process-wide globals (`start_block`, `end_block`, `alloc_bit`,
//! `available_bytes`, `regions_count`), every operation is a method taking
//! `&mut self` explicitly. A singleton instance of this handle reproduces
//! the specified global-state behavior exactly; see [`crate::global`] for
//! that singleton, built the way `kernel-alloc`'s `static_heap` module
//! builds one around `FreeListAllocator`.

mod alloc_path;
mod convenience;
mod free_path;
mod init;

use crate::block::{DEFAULT_ALIGN, Header, align_up};
use core::ptr::null_mut;

/// A first-fit, coalescing allocator over one or more externally supplied
/// memory regions.
///
/// `ALIGN` is the build-time word alignment `A` from the spec (default:
/// `size_of::<usize>()`, large enough to hold the pointer embedded in every
/// [`Header`]). It must be a power of two.
///
/// `Heap` is not `Sync` and not thread-safe on its own — see §5 of the spec:
/// callers must externally serialize every call. [`crate::global`] shows one
/// way to do that with a spinlock.
pub struct Heap<const ALIGN: usize = DEFAULT_ALIGN> {
    /// Sentinel; `start.next` points at the lowest-address free block.
    start: Header,
    /// Current tail sentinel — the final region's `end_block`. `NULL` until
    /// [`Heap::init`] has accepted at least one region.
    tail: *mut Header,
    /// Sum of the raw `size` field over every free, non-sentinel block on
    /// the list (matches what `init` seeds it with: a region's whole usable
    /// extent, header included).
    available: usize,
    /// Number of regions accepted by `init`.
    regions: usize,
}

// Safety: `Heap` performs no locking of its own; moving it between threads
// is sound as long as the caller ensures only one thread touches it at a
// time (spec §5). It is deliberately not `Sync`.
unsafe impl<const ALIGN: usize> Send for Heap<ALIGN> {}

impl<const ALIGN: usize> Heap<ALIGN> {
    /// Aligned size of [`Header`] — the `H` of the spec.
    pub(crate) const H: usize = align_up(size_of::<Header>(), ALIGN);

    /// Per-block header overhead in bytes, for callers sizing a region
    /// against a target number of allocations.
    #[must_use]
    pub const fn header_size() -> usize {
        Self::H
    }

    /// Construct an empty, uninitialized heap.
    #[must_use]
    pub const fn new() -> Self {
        debug_assert!(ALIGN.is_power_of_two(), "ALIGN must be a power of two");
        Self {
            start: Header::sentinel(),
            tail: null_mut(),
            available: 0,
            regions: 0,
        }
    }

    /// Whether [`Heap::init`] has successfully accepted at least one region.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        !self.tail.is_null()
    }

    /// Bytes currently available for allocation across every free block.
    #[must_use]
    pub const fn available_bytes(&self) -> usize {
        self.available
    }

    /// Number of regions accepted by [`Heap::init`].
    #[must_use]
    pub const fn regions_count(&self) -> usize {
        self.regions
    }
}

impl<const ALIGN: usize> Default for Heap<ALIGN> {
    fn default() -> Self {
        Self::new()
    }
}
