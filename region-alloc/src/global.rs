//! A process-wide [`Heap`] installed as `#[global_allocator]`.
//!
//! Mirrors how `kernel-alloc`'s `static_heap` module wraps a
//! `FreeListAllocator` in a spinlock behind a one-shot init guard, and how
//! `kernel_allocator.rs` bridges that into `GlobalAlloc`. Here the backing
//! store is a single statically reserved region handed to [`Heap::init`] the
//! first time the allocator is used.

use crate::{DEFAULT_ALIGN, Heap};
use core::alloc::{GlobalAlloc, Layout};
use core::ptr;
use core::sync::atomic::{AtomicBool, Ordering};
use region_sync::SpinLock;

/// Total size of the statically reserved heap backing [`GLOBAL`].
const HEAP_SIZE: usize = 1024 * 1024;

/// Backing storage, aligned generously enough for any type the allocator
/// will be asked to back.
#[repr(align(16))]
struct HeapMem([u8; HEAP_SIZE]);

static mut HEAP: HeapMem = HeapMem([0; HEAP_SIZE]);

/// The process-wide heap, serialized by a spinlock.
static HEAP_LOCK: SpinLock<Heap> = SpinLock::new(Heap::new());

static DID_INIT: AtomicBool = AtomicBool::new(false);

fn ensure_init() {
    if DID_INIT.load(Ordering::Acquire) {
        return;
    }
    HEAP_LOCK.with_lock(|heap| {
        if !heap.is_initialized() {
            let start = (&raw mut HEAP).cast::<u8>();
            unsafe {
                heap.init(&[crate::Region::new(start, HEAP_SIZE)]);
            }
            DID_INIT.store(true, Ordering::Release);
        }
    });
}

/// Adapter installed as `#[global_allocator]`.
///
/// Requests whose `layout.align()` exceeds [`DEFAULT_ALIGN`] are rejected
/// (`alloc` returns `NULL`): the underlying heap only guarantees the
/// alignment it was built with.
pub struct GlobalHeap;

#[global_allocator]
static GLOBAL_ALLOCATOR: GlobalHeap = GlobalHeap;

unsafe impl GlobalAlloc for GlobalHeap {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if layout.align() > DEFAULT_ALIGN {
            return ptr::null_mut();
        }
        ensure_init();
        HEAP_LOCK.with_lock(|heap| unsafe { heap.malloc(layout.size()) })
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
        if ptr.is_null() {
            return;
        }
        ensure_init();
        HEAP_LOCK.with_lock(|heap| unsafe { heap.free(ptr) });
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        if layout.align() > DEFAULT_ALIGN {
            return ptr::null_mut();
        }
        ensure_init();
        HEAP_LOCK.with_lock(|heap| unsafe { heap.calloc(1, layout.size()) })
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if layout.align() > DEFAULT_ALIGN {
            return ptr::null_mut();
        }
        ensure_init();
        HEAP_LOCK.with_lock(|heap| unsafe { heap.realloc(ptr, new_size) })
    }
}
