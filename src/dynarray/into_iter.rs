use std::{fmt, iter::FusedIterator, mem::ManuallyDrop, ptr::NonNull};

use super::{allocation::Release, raw_iter::RawIter, DynArray};


/// An owning iterator over the elements of a [`DynArray`].
///
/// Created by [`DynArray::into_iter`](IntoIterator::into_iter). Elements not
/// yielded are dropped along with the iterator, and the buffer is released.
pub struct IntoIter<T> {
    buf: Option<NonNull<T>>,
    cap: usize,
    iter: RawIter<T>,
}

impl <T> IntoIter<T> {
    pub(super) fn new(arr: DynArray<T>) -> Self {
        let arr = ManuallyDrop::new(arr);
        let iter = unsafe { RawIter::new(arr.as_ptr(), arr.len) };
        Self { buf: arr.buf, cap: arr.cap, iter }
    }

    /// Returns the elements not yet yielded as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] { self.iter.as_slice() }
}

unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

#[cfg(not(tarpaulin_include))]
impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl <T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> { self.iter.next() }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.iter.len();
        (len, Some(len))
    }
}

impl <T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> { self.iter.next_back() }
}

impl <T> ExactSizeIterator for IntoIter<T> {}

impl <T> FusedIterator for IntoIter<T> {}

impl <T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let _release = self.buf.take().map(|buf| Release { buf, cap: self.cap });
        for _ in &mut *self {}
    }
}
