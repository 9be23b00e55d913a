//! Internal diagnostics for [`Heap::init`](crate::Heap::init).
//!
//! These never escape the crate: the public contract (spec §7) is a plain
//! `usize` count, `0` on failure. This enum only gives `log::warn!` a
//! specific reason before `init` collapses to that sentinel, mirroring how
//! `kernel-alloc::vmm::VmmError` sits behind a simpler outer contract
//! elsewhere in the same crate family.
#[derive(Debug, thiserror::Error)]
pub(crate) enum InitError {
    #[error("heap already initialized")]
    AlreadyInitialized,
    #[error("regions are not listed in non-overlapping, increasing order")]
    NonMonotonicRegions,
}
