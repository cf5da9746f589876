use std::{alloc::{self, Layout}, ptr::NonNull};

use crate::errors::AllocErr;


const GROWTH_FACTOR: usize = 2;

#[inline]
pub(super) fn infallible<T>(result: Result<T, AllocErr>) -> T {
    match result {
        Ok(x) => x,
        Err(AllocErr::Layout) => panic!("invalid parameters to Layout::from_size_align"),
        Err(AllocErr::Overflow) => panic!("capacity overflow"),
        Err(AllocErr::Alloc { layout }) => alloc::handle_alloc_error(layout),
    }
}

/// Capacity to grow to when `required` slots are needed and `current` are held.
///
/// Doubles from `max(current, 1)`. If doubling stops making progress the
/// requirement itself is used, so the result is always `>= required` and
/// strictly greater than `current` whenever `required > current`.
#[inline]
pub(super) fn next_capacity(current: usize, required: usize) -> usize {
    let mut cap = current.max(1);
    while cap < required {
        cap = match cap.checked_mul(GROWTH_FACTOR) {
            Some(grown) if grown > cap => grown,
            _ => required,
        };
    }
    cap
}

/// Allocates uninitialized space for `cap` values of `T`.
///
/// Zero-sized types never reach the allocator and get a dangling pointer.
pub(super) fn allocate<T>(cap: usize) -> Result<NonNull<T>, AllocErr> {
    debug_assert!(cap > 0);
    let layout = Layout::array::<T>(cap).map_err(AllocErr::layout)?;
    if layout.size() == 0 { return Ok(NonNull::dangling()) }

    match NonNull::new(unsafe { alloc::alloc(layout) }) {
        Some(ptr) => Ok(ptr.cast()),
        None => {
            tracing::debug!(capacity = cap, bytes = layout.size(), "allocation failed");
            Err(AllocErr::alloc(layout))
        }
    }
}

/// Releases a buffer obtained from [`allocate`].
///
/// # Safety
///
/// `ptr` must have come from `allocate::<T>(cap)` with this same `cap`, and
/// must not be used again afterwards.
pub(super) unsafe fn deallocate<T>(ptr: NonNull<T>, cap: usize) {
    // The layout was validated when the buffer was allocated.
    let layout = unsafe {
        Layout::from_size_align_unchecked(size_of::<T>() * cap, align_of::<T>())
    };
    if layout.size() == 0 { return }
    unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) };
}

/// Releases a buffer when dropped, including while unwinding.
pub(super) struct Release<T> {
    pub(super) buf: NonNull<T>,
    pub(super) cap: usize,
}

impl<T> Drop for Release<T> {
    fn drop(&mut self) { unsafe { deallocate(self.buf, self.cap) } }
}
