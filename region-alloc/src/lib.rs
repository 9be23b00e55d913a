//! A first-fit, coalescing allocator over externally supplied memory
//! regions.
//!
//! Unlike a heap built on top of the OS (`brk`/`mmap`), every byte this
//! crate ever hands out comes from [`Region`]s the caller supplies to
//! [`Heap::init`] — static arrays, a slab reserved by a bootloader, a pool
//! carved out of a larger arena, or (in tests) an ordinary host allocation
//! standing in for one. The allocator never asks the environment for more
//! memory on its own.
//!
//! [`Heap`] holds no global state; it's a plain value embedders place
//! wherever suits them (a `static` behind a lock, a field on a larger
//! context struct, ...) and drive through its `unsafe` methods under their
//! own synchronization (spec §5). For the common case of wanting a single
//! process-wide heap backed by `#[global_allocator]`, see [`global`]
//! (behind the `global-allocator` feature).
//!
//! ```
//! use region_alloc::{Heap, Region};
//!
//! let mut backing = [0u8; 4096];
//! let mut heap: Heap = Heap::new();
//! unsafe {
//!     heap.init(&[Region::new(backing.as_mut_ptr(), backing.len())]);
//!     let p = heap.malloc(64);
//!     assert!(!p.is_null());
//!     heap.free(p);
//! }
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod block;
mod error;
#[cfg(feature = "global-allocator")]
pub mod global;
mod heap;
mod region;

pub use block::DEFAULT_ALIGN;
pub use heap::Heap;
pub use region::Region;
