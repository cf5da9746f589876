
mod allocation;
mod cursor;
mod into_iter;
mod raw_iter;

use std::{fmt, marker::PhantomData, mem::{self, ManuallyDrop}, ops::{Deref, DerefMut, Index, IndexMut}, ptr::{self, NonNull}, slice::{self, SliceIndex}};

use crate::errors::AllocErr;
use allocation::{allocate, deallocate, infallible, next_capacity, Release};
pub use cursor::{Cursor, CursorMut, Direction};
pub use into_iter::IntoIter;

/// Capacity used by [`DynArray::new`], and in place of a requested capacity
/// of zero.
pub const DEFAULT_CAPACITY: usize = 8;

/// A contiguous growable array type that owns its buffer.
///
/// Elements live in a single heap allocation of [`capacity`](Self::capacity)
/// slots. The first [`len`](Self::len) slots hold live values and the rest are
/// uninitialized. When an insertion needs more room the buffer is replaced by
/// one twice as large and every element is moved across.
///
/// # Examples
///
/// ```
/// use dynarr::DynArray;
///
/// let mut arr = DynArray::new();
/// assert_eq!(arr.push(3), 0);
/// assert_eq!(arr.push(7), 1);
///
/// assert_eq!(arr.len(), 2);
/// assert_eq!(arr[0], 3);
///
/// arr.insert(0, 1);
/// assert_eq!(arr, [1, 3, 7]);
///
/// arr.remove(1);
/// assert_eq!(arr, [1, 7]);
///
/// arr[0] = 19;
/// for v in &arr {
///     println!("{v}");
/// }
/// ```
///
/// # Capacity
///
/// A new array starts with [`DEFAULT_CAPACITY`] slots unless a capacity is
/// requested with [`with_capacity`](Self::with_capacity). Capacity only ever
/// grows while the array holds a given buffer. Growth doubles the capacity
/// until the new length fits.
///
/// ```
/// use dynarr::DynArray;
///
/// let mut arr = DynArray::with_capacity(2);
/// arr.extend([1, 2]);
/// assert_eq!(arr.capacity(), 2);
///
/// arr.push(3);
/// assert_eq!(arr.capacity(), 4);
/// ```
///
/// # Errors
///
/// Every operation that may allocate has a `try_` form returning
/// [`AllocErr`]. On error the array is left exactly as it was. The plain forms
/// panic on capacity overflow and abort through
/// [`handle_alloc_error`](std::alloc::handle_alloc_error) when the allocator
/// fails.
///
/// ```
/// use dynarr::{AllocErr, DynArray};
///
/// let mut arr = DynArray::from([1u64, 2, 3]);
/// assert_eq!(arr.try_reserve(usize::MAX), Err(AllocErr::Overflow));
/// assert_eq!(arr, [1, 2, 3]);
/// ```
///
/// # Indexing
///
/// Indexing past [`len`](Self::len) panics. Use `get` from the slice view
/// for a checked lookup.
///
/// ```should_panic
/// use dynarr::DynArray;
///
/// let arr = DynArray::from([1, 2, 3]);
/// println!("{}", arr[3]); // Panics!
/// ```
pub struct DynArray<T> {
    buf: Option<NonNull<T>>,
    len: usize,
    cap: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for DynArray<T> {}
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        let _release = self.buf.map(|buf| Release { buf, cap: self.cap });
        unsafe { ptr::drop_in_place(self.live_mut()) }
    }
}

impl<T> Default for DynArray<T> {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl<T: Clone> Clone for DynArray<T> {

    /// Copies every element into a fresh buffer of the same capacity.
    ///
    /// If cloning an element panics, the elements cloned so far are dropped
    /// and the new buffer is released before the panic continues.
    fn clone(&self) -> Self { infallible(self.try_clone()) }

    /// Replaces the contents of `self` with a copy of `source`.
    ///
    /// The copy is built before anything in `self` is touched, so a failing
    /// clone leaves `self` unmodified.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap_with(&mut copy);
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len &&
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<&[T; N]> for DynArray<T> {
    fn eq(&self, other: &&[T; N]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for DynArray<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<[T]> for DynArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for DynArray<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target { self.as_slice() }
}

impl<T> DerefMut for DynArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target { self.as_mut_slice() }
}

impl<T, I: SliceIndex<[T]>> Index<I> for DynArray<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for DynArray<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { IntoIter::new(self) }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        let items = items.into_iter();
        self.reserve(items.size_hint().0);
        items.for_each(|value| { self.push(value); });
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let items = items.into_iter();
        let mut arr = Self::with_capacity(items.size_hint().0);
        arr.extend(items);
        arr
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {

    /// Moves the elements of an array into a new `DynArray` with capacity `N`,
    /// or [`DEFAULT_CAPACITY`] when `N` is zero.
    ///
    /// # Examples
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let arr = DynArray::from([1, 2]);
    /// assert_eq!(arr.capacity(), 2);
    /// ```
    fn from(values: [T; N]) -> Self {
        let mut arr = Self::with_capacity(N);
        let values = ManuallyDrop::new(values);

        unsafe { ptr::copy_nonoverlapping(
            values.as_ptr(),
            arr.as_mut_ptr(),
            N
        )}
        arr.len = N;
        arr
    }
}

impl<T> From<Vec<T>> for DynArray<T> {
    fn from(vec: Vec<T>) -> Self { vec.into_iter().collect() }
}

impl<T> DynArray<T> {

    /// Constructs a new, empty `DynArray<T>` with [`DEFAULT_CAPACITY`] slots.
    ///
    /// This *will* allocate, except for zero-sized `T`.
    ///
    /// # Examples
    /// ```
    /// use dynarr::{DynArray, DEFAULT_CAPACITY};
    ///
    /// let arr = DynArray::<i32>::new();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.capacity(), DEFAULT_CAPACITY);
    /// ```
    #[inline]
    pub fn new() -> Self { infallible(Self::try_new()) }

    /// Fallible version of [`new`](Self::new).
    #[inline]
    pub fn try_new() -> Result<Self, AllocErr> { Self::try_with_capacity(DEFAULT_CAPACITY) }

    /// Constructs a new, empty `DynArray<T>` with room for `capacity` elements.
    ///
    /// A `capacity` of zero is replaced by [`DEFAULT_CAPACITY`].
    ///
    /// # Panics
    ///
    /// Panics if the capacity in bytes exceeds `isize::MAX`.
    ///
    /// # Examples
    /// ```
    /// use dynarr::{DynArray, DEFAULT_CAPACITY};
    ///
    /// assert_eq!(DynArray::<i32>::with_capacity(5).capacity(), 5);
    /// assert_eq!(DynArray::<i32>::with_capacity(0).capacity(), DEFAULT_CAPACITY);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        infallible(Self::try_with_capacity(capacity))
    }

    /// Fallible version of [`with_capacity`](Self::with_capacity).
    ///
    /// # Examples
    /// ```
    /// use dynarr::{AllocErr, DynArray};
    ///
    /// let err = DynArray::<u64>::try_with_capacity(usize::MAX).unwrap_err();
    /// assert_eq!(err, AllocErr::Layout);
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocErr> {
        let cap = match capacity {
            0 => DEFAULT_CAPACITY,
            cap => cap,
        };
        let buf = allocate(cap)?;
        Ok(Self { buf: Some(buf), len: 0, cap, _marker: PhantomData })
    }

    // What a moved-from array holds: no buffer at all.
    #[inline]
    const fn unallocated() -> Self {
        Self { buf: None, len: 0, cap: 0, _marker: PhantomData }
    }

    /// Returns the number of live elements.
    #[inline(always)]
    pub const fn len(&self) -> usize { self.len }

    /// Returns the number of slots in the current buffer, live or not.
    ///
    /// This is zero only for an array whose contents were moved out with
    /// [`take`](Self::take) or [`move_from`](Self::move_from).
    #[inline(always)]
    pub const fn capacity(&self) -> usize { self.cap }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns a raw pointer to the buffer.
    ///
    /// The pointer is dangling when the array holds no buffer. It changes
    /// whenever the array grows.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        match self.buf {
            Some(buf) => buf.as_ptr(),
            None => NonNull::dangling().as_ptr(),
        }
    }

    #[inline]
    const fn as_mut_ptr(&mut self) -> *mut T {
        match self.buf {
            Some(buf) => buf.as_ptr(),
            None => NonNull::dangling().as_ptr(),
        }
    }

    #[inline]
    fn live_mut(&mut self) -> *mut [T] {
        ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len)
    }

    /// Extracts a slice containing every live element.
    ///
    /// Equivalent to `&arr[..]`.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        // Only the first `len` slots are ever initialized.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice containing every live element.
    ///
    /// Equivalent to `&mut arr[..]`.
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        // Only the first `len` slots are ever initialized.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Makes room for at least `additional` more elements.
    ///
    /// Does nothing if the capacity is already sufficient. Never shrinks.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows.
    ///
    /// # Examples
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let mut arr = DynArray::from([1]);
    /// arr.reserve(10);
    /// assert!(arr.capacity() >= 11);
    /// ```
    #[inline]
    pub fn reserve(&mut self, additional: usize) { infallible(self.try_reserve(additional)) }

    /// Fallible version of [`reserve`](Self::reserve).
    ///
    /// On error the array keeps its buffer and elements untouched.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocErr> {
        let required = self.len
            .checked_add(additional)
            .ok_or(AllocErr::Overflow)?;

        if required > self.cap {
            self.grow_to(next_capacity(self.cap, required))?;
        }
        Ok(())
    }

    // Moves every live element into a new buffer of `new_cap` slots. The old
    // buffer is only released once the new one exists.
    #[cold]
    fn grow_to(&mut self, new_cap: usize) -> Result<(), AllocErr> {
        debug_assert!(new_cap > self.cap);
        let dst = allocate::<T>(new_cap)?;

        tracing::trace!(
            len = self.len,
            old_capacity = self.cap,
            new_capacity = new_cap,
            "growing buffer"
        );

        if let Some(src) = self.buf {
            unsafe {
                ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), self.len);
                deallocate(src, self.cap);
            }
        }

        self.buf = Some(dst);
        self.cap = new_cap;
        Ok(())
    }

    /// Appends an element and returns the index it was placed at.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let mut arr = DynArray::from([1, 2]);
    /// assert_eq!(arr.push(3), 2);
    /// assert_eq!(arr, [1, 2, 3]);
    /// ```
    ///
    /// # Time Complexity
    ///
    /// Takes amortized *O*(1) time. If the buffer is full every element is
    /// moved to a new one, which takes *O*(n) time.
    #[inline]
    pub fn push(&mut self, value: T) -> usize { infallible(self.try_push(value)) }

    /// Attempts to append an element, returning the index it was placed at.
    ///
    /// If the buffer cannot grow, `value` is dropped and the array is unchanged.
    ///
    /// # Examples
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let mut arr = DynArray::with_capacity(1);
    /// assert_eq!(arr.try_push('a'), Ok(0));
    /// assert_eq!(arr.try_push('b'), Ok(1));
    /// ```
    pub fn try_push(&mut self, value: T) -> Result<usize, AllocErr> {
        if self.len == self.cap { self.try_reserve(1)?; }

        let index = self.len;
        unsafe { self.as_mut_ptr().add(index).write(value) }
        self.len += 1;
        Ok(index)
    }

    /// Removes the last element and returns it, or `None` if the array is empty.
    ///
    /// # Examples
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let mut arr = DynArray::from([1, 2, 3]);
    /// assert_eq!(arr.pop(), Some(3));
    /// assert_eq!(arr, [1, 2]);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        match self.len == 0 {
            true => None,
            false => unsafe {
                self.len -= 1;
                Some(self.as_ptr().add(self.len).read())
            }
        }
    }

    /// Inserts an element at position `index`, shifting all elements after it
    /// to the right. Returns `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, or if the new capacity overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let mut arr = DynArray::from([1, 2, 3]);
    /// arr.insert(0, 99);
    /// assert_eq!(arr, [99, 1, 2, 3]);
    ///
    /// arr.insert(4, 100);
    /// assert_eq!(arr, [99, 1, 2, 3, 100]);
    /// ```
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(`DynArray::len - index`) time. Every element after the
    /// insertion point is moved one slot right.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        infallible(self.try_insert(index, value))
    }

    /// Fallible version of [`insert`](Self::insert).
    ///
    /// If the buffer cannot grow, `value` is dropped and the array is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<usize, AllocErr> {
        assert!(index <= self.len, "Index out of bounds");
        if self.len == self.cap { self.try_reserve(1)?; }

        unsafe {
            let ptr = self.as_mut_ptr().add(index);
            ptr::copy(ptr, ptr.add(1), self.len - index);
            ptr.write(value);
        }
        self.len += 1;
        Ok(index)
    }

    /// Drops the element at position `index`, shifting all elements after it
    /// to the left.
    ///
    /// The array is already consistent when the removed element is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let mut arr = DynArray::from([1, 2, 3, 4, 5]);
    /// arr.remove(1);
    /// assert_eq!(arr, [1, 3, 4, 5]);
    /// ```
    #[track_caller]
    pub fn remove(&mut self, index: usize) {
        assert!(index < self.len, "Index out of bounds");

        let removed = unsafe {
            let ptr = self.as_mut_ptr().add(index);
            let removed = ptr.read();
            ptr::copy(ptr.add(1), ptr, self.len - index - 1);
            removed
        };
        self.len -= 1;
        drop(removed);
    }

    /// Replaces the element at `index`, dropping the old one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, index: usize, value: T) {
        assert!(index < self.len, "Index out of bounds");
        self.as_mut_slice()[index] = value;
    }

    /// Drops every element. The buffer and its capacity are kept.
    ///
    /// # Examples
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let mut arr = DynArray::from([1, 2, 3]);
    /// let capacity = arr.capacity();
    ///
    /// arr.clear();
    /// assert!(arr.is_empty());
    /// assert_eq!(arr.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        let live = self.live_mut();
        self.len = 0;
        unsafe { ptr::drop_in_place(live) }
    }

    /// Exchanges buffers, lengths and capacities with `other`.
    ///
    /// Never allocates and never touches an element.
    ///
    /// # Examples
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let mut a = DynArray::from([1, 2]);
    /// let mut b = DynArray::from([3]);
    /// a.swap_with(&mut b);
    ///
    /// assert_eq!(a, [3]);
    /// assert_eq!(b, [1, 2]);
    /// ```
    #[inline]
    pub fn swap_with(&mut self, other: &mut Self) { mem::swap(self, other) }

    /// Moves the contents out, leaving `self` with no buffer.
    ///
    /// Never allocates and never touches an element. The emptied array has
    /// zero capacity and grows again on the next insertion.
    ///
    /// # Examples
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let mut a = DynArray::from([1, 2, 3]);
    /// let b = a.take();
    ///
    /// assert_eq!(b, [1, 2, 3]);
    /// assert_eq!(a.len(), 0);
    /// assert_eq!(a.capacity(), 0);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self { mem::replace(self, Self::unallocated()) }

    /// Drops the contents of `self`, then takes over the buffer of `source`,
    /// leaving `source` with no buffer.
    ///
    /// # Examples
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let mut a = DynArray::from([1, 2]);
    /// let mut b = DynArray::from([7, 8, 9]);
    /// a.move_from(&mut b);
    ///
    /// assert_eq!(a, [7, 8, 9]);
    /// assert!(b.is_empty());
    /// ```
    #[inline]
    pub fn move_from(&mut self, source: &mut Self) { *self = source.take(); }

    /// Clones every element into a new array with the same capacity, or
    /// [`DEFAULT_CAPACITY`] if `self` has no buffer.
    ///
    /// Returns an error if the new buffer cannot be allocated. If cloning an
    /// element panics, the partial copy is dropped and `self` is untouched.
    pub fn try_clone(&self) -> Result<Self, AllocErr>
    where
        T: Clone,
    {
        let mut copy = Self::try_with_capacity(self.cap)?;

        // `copy` owns whatever was written so far if a clone unwinds.
        for value in self.iter() {
            unsafe { copy.as_mut_ptr().add(copy.len).write(value.clone()) }
            copy.len += 1;
        }
        Ok(copy)
    }

    /// Returns a forward cursor starting at the first element.
    #[inline]
    pub const fn cursor(&self) -> Cursor<'_, T> { Cursor::new(self, Direction::Forward) }

    /// Returns a reverse cursor starting at the last element.
    ///
    /// # Examples
    /// ```
    /// use dynarr::DynArray;
    ///
    /// let arr: DynArray<_> = (1..=5).collect();
    /// let mut cursor = arr.reverse_cursor();
    ///
    /// assert_eq!(*cursor.get(), 5);
    /// cursor.advance();
    /// assert_eq!(*cursor.get(), 4);
    /// ```
    #[inline]
    pub const fn reverse_cursor(&self) -> Cursor<'_, T> { Cursor::new(self, Direction::Reverse) }

    #[inline]
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> { CursorMut::new(self, Direction::Forward) }

    #[inline]
    pub fn reverse_cursor_mut(&mut self) -> CursorMut<'_, T> { CursorMut::new(self, Direction::Reverse) }
}
