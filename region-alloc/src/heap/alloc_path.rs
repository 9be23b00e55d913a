//! Allocation path (spec §4.2): first-fit search, optional split.

use super::Heap;
use crate::block::{ALLOC_BIT, Header, align_up};
use core::ptr::{self, null_mut};

impl<const ALIGN: usize> Heap<ALIGN> {
    /// Allocate `size` payload bytes, first-fit, splitting the chosen block
    /// when the remainder would be worth keeping.
    ///
    /// Returns a payload pointer aligned to `ALIGN`, or `NULL` if
    /// uninitialized, `size` is `0`, `size` already carries the alloc-tag
    /// bit, the computed need overflows into the tag bit, or no free block
    /// is large enough.
    ///
    /// # Safety
    /// Must not be called concurrently with any other operation on this
    /// heap (spec §5); the heap must have been `init`ialized.
    pub unsafe fn malloc(&mut self, size: usize) -> *mut u8 {
        if !self.is_initialized() || size == 0 || size & ALLOC_BIT != 0 {
            return null_mut();
        }

        let need = match align_up(size, ALIGN).checked_add(Self::H) {
            Some(need) if need & ALLOC_BIT == 0 => need,
            _ => return null_mut(),
        };

        let mut prev = &raw mut self.start;
        let mut curr = unsafe { (*prev).next };
        loop {
            let header = unsafe { &*curr };
            if header.size >= need {
                break;
            }
            if header.is_final_tail() {
                return null_mut();
            }
            prev = curr;
            curr = header.next;
        }

        // Unlink `curr` from the free list.
        unsafe {
            (*prev).next = (*curr).next;
        }

        // `curr` leaves the free list entirely; its whole extent leaves
        // `available` too. If it gets split below, the remainder's extent
        // is added back once it's reinserted — net effect is a decrease of
        // exactly `need` on split, or the full block on no-split, matching
        // the worked example in the spec (a block with only 2*H slack left
        // over is allocated whole, not split into an unusable sliver).
        let curr_size = unsafe { (*curr).size };
        self.available -= curr_size;
        if curr_size - need > 2 * Self::H {
            let remainder = (curr as usize + need) as *mut Header;
            let remainder_size = curr_size - need;
            unsafe {
                ptr::write(
                    remainder,
                    Header {
                        size: remainder_size,
                        next: null_mut(),
                    },
                );
                (*curr).size = need;
                self.insert_free(remainder);
            }
            self.available += remainder_size;
        }

        unsafe {
            (*curr).size |= ALLOC_BIT;
            (*curr).next = null_mut();
        }

        (curr as *mut u8).wrapping_add(Self::H)
    }
}
