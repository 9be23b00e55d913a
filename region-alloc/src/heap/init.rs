//! Region-bridging initialization (spec §4.1).

use super::Heap;
use crate::Region;
use crate::block::{Header, align_down, align_up};
use crate::error::InitError;
use core::ptr;

impl<const ALIGN: usize> Heap<ALIGN> {
    /// Accept and stitch `regions` into a single, address-sorted free list.
    ///
    /// Must be called at most once. Regions must be listed in non-overlapping,
    /// monotonically increasing order by `start`; some may be dropped as too
    /// small to host a single block (`< H + A`, before and after alignment
    /// adjustment).
    ///
    /// Returns the number of regions actually incorporated, or `0` if this
    /// heap was already initialized or the regions aren't monotonic.
    ///
    /// # Safety
    /// Every `[region.start, region.start + region.size)` must be valid,
    /// writable, and exclusively owned by this heap from this call onward.
    pub unsafe fn init(&mut self, regions: &[Region]) -> usize {
        if let Err(e) = Self::validate(self.is_initialized(), regions) {
            log::warn!("region-alloc: init rejected: {e}");
            return 0;
        }

        for region in regions {
            // Safety: forwarded from the caller's precondition.
            if !unsafe { self.accept_region(region) } {
                log::debug!(
                    "region-alloc: region at {:p} (size {}) too small, skipped",
                    region.start,
                    region.size
                );
            }
        }

        self.regions
    }

    fn validate(already_initialized: bool, regions: &[Region]) -> Result<(), InitError> {
        if already_initialized {
            return Err(InitError::AlreadyInitialized);
        }
        let mut prev_end: Option<usize> = None;
        for region in regions {
            let start = region.start as usize;
            if let Some(prev_end) = prev_end {
                if start < prev_end {
                    return Err(InitError::NonMonotonicRegions);
                }
            }
            prev_end = Some(start + region.size);
        }
        Ok(())
    }

    /// Validate, align, and stitch in one region. Returns `false` if the
    /// region (before or after alignment adjustment) is too small to host a
    /// single block.
    unsafe fn accept_region(&mut self, region: &Region) -> bool {
        if region.size < Self::H + ALIGN {
            return false;
        }

        let raw_start = region.start as usize;
        let aligned_start = align_up(raw_start, ALIGN);
        let waste = aligned_start - raw_start;
        let size = align_down(region.size.saturating_sub(waste), ALIGN);

        if size < Self::H + ALIGN {
            return false;
        }

        let first_block = aligned_start as *mut Header;
        let end_block = (aligned_start + size - Self::H) as *mut Header;
        let prev_tail = self.tail;

        if prev_tail.is_null() {
            self.start.next = first_block;
        }

        unsafe {
            ptr::write(end_block, Header::sentinel());
            ptr::write(
                first_block,
                Header {
                    size: size - Self::H,
                    next: end_block,
                },
            );
            if !prev_tail.is_null() {
                (*prev_tail).next = first_block;
            }
        }

        self.tail = end_block;
        self.available += size - Self::H;
        self.regions += 1;
        true
    }
}
