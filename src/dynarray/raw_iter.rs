use std::{mem, ptr::NonNull};


/// Reads values out of a run of live slots, front or back.
///
/// Owns nothing; whoever builds one decides what happens to slots that are
/// never read.
pub(super) struct RawIter<T> {
    start: *const T,
    end: *const T,
}

impl <T> RawIter<T> {

    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// # Safety
    ///
    /// `start..start + len` must be live values that nothing else will read or
    /// drop.
    pub(super) unsafe fn new(start: *const T, len: usize) -> Self {
        Self {
            start,
            end: match (Self::IS_ZST, len) {
                (true, count) => (start as usize + count) as *const _,
                (_, 0) => start,
                (_, count) => unsafe { start.add(count) }
            }
        }
    }

    #[inline]
    pub(super) fn next(&mut self) -> Option<T> {
        match (self.start == self.end, Self::IS_ZST) {
            (true, _) => None,
            (_, true) => unsafe {
                self.end = (self.end as usize - 1) as *const _;
                Some(NonNull::<T>::dangling().read())
            },
            (_, false) => unsafe {
                let item = Some(self.start.read());
                self.start = self.start.add(1);
                item
            }
        }
    }

    #[inline]
    pub(super) fn next_back(&mut self) -> Option<T> {
        match (self.start == self.end, Self::IS_ZST) {
            (true, _) => None,
            (_, true) => unsafe {
                self.end = (self.end as usize - 1) as *const _;
                Some(NonNull::<T>::dangling().read())
            },
            (_, false) => unsafe {
                self.end = self.end.sub(1);
                Some(self.end.read())
            }
        }
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        (self.end as usize - self.start as usize) / mem::size_of::<T>().max(1)
    }

    #[inline]
    pub(super) fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.start, self.len()) }
    }
}
