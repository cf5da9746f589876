use std::iter::FusedIterator;

use super::DynArray;


/// The way a cursor walks the live range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From index `0` up to `len - 1`.
    Forward,
    /// From index `len - 1` down to `0`.
    Reverse,
}

// `pos` is the index of the current element when walking forward, and one past
// it when walking in reverse. Either way a cursor is exhausted once `pos` hits
// its end of the range, without ever going negative.
#[derive(Debug, Clone, Copy)]
struct Position {
    pos: usize,
    direction: Direction,
}

impl Position {
    #[inline]
    const fn start(len: usize, direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self { pos: 0, direction },
            Direction::Reverse => Self { pos: len, direction },
        }
    }

    #[inline]
    const fn current(&self, len: usize) -> Option<usize> {
        match self.direction {
            Direction::Forward if self.pos < len => Some(self.pos),
            Direction::Reverse if self.pos > 0 => Some(self.pos - 1),
            _ => None,
        }
    }

    #[inline]
    const fn remaining(&self, len: usize) -> usize {
        match self.direction {
            Direction::Forward => len.saturating_sub(self.pos),
            Direction::Reverse => self.pos,
        }
    }

    #[inline]
    fn advance(&mut self, len: usize) {
        match self.direction {
            Direction::Forward => self.pos = (self.pos + 1).min(len),
            Direction::Reverse => self.pos = self.pos.saturating_sub(1),
        }
    }

    #[inline]
    #[track_caller]
    fn live_index(&self, len: usize) -> usize {
        match self.current(len) {
            Some(index) => index,
            None => panic!("cursor is exhausted"),
        }
    }
}

/// A read-only cursor over a [`DynArray`].
///
/// Built by [`DynArray::cursor`] or [`DynArray::reverse_cursor`]. The cursor
/// borrows the array, so nothing can reallocate or shift it while the cursor
/// is alive.
///
/// # Examples
///
/// ```
/// use dynarr::DynArray;
///
/// let arr = DynArray::from([10, 20, 30]);
///
/// let mut cursor = arr.cursor();
/// while cursor.has_next() {
///     println!("{}", cursor.get());
///     cursor.advance();
/// }
///
/// // Cursors are iterators too.
/// let backwards: Vec<_> = arr.reverse_cursor().copied().collect();
/// assert_eq!(backwards, [30, 20, 10]);
/// ```
#[derive(Debug)]
pub struct Cursor<'a, T> {
    arr: &'a DynArray<T>,
    at: Position,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self { Self { arr: self.arr, at: self.at } }
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(super) const fn new(arr: &'a DynArray<T>, direction: Direction) -> Self {
        Self { arr, at: Position::start(arr.len, direction) }
    }

    /// Returns `true` while the cursor points at a live element.
    #[inline]
    pub const fn has_next(&self) -> bool { self.at.current(self.arr.len).is_some() }

    /// Index of the element under the cursor, or `None` once exhausted.
    #[inline]
    pub const fn position(&self) -> Option<usize> { self.at.current(self.arr.len) }

    #[inline]
    pub const fn direction(&self) -> Direction { self.at.direction }

    /// Returns the element under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    #[inline]
    #[track_caller]
    pub fn get(&self) -> &'a T {
        let arr: &'a DynArray<T> = self.arr;
        &arr.as_slice()[self.at.live_index(arr.len)]
    }

    /// Moves to the next element in the cursor's direction.
    ///
    /// Advancing an exhausted cursor does nothing.
    #[inline]
    pub fn advance(&mut self) { self.at.advance(self.arr.len) }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let arr: &'a DynArray<T> = self.arr;
        let index = self.at.current(arr.len)?;
        self.at.advance(arr.len);
        Some(&arr.as_slice()[index])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.at.remaining(self.arr.len);
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}

/// A cursor that can overwrite the elements it visits.
///
/// Built by [`DynArray::cursor_mut`] or [`DynArray::reverse_cursor_mut`].
///
/// # Examples
///
/// ```
/// use dynarr::DynArray;
///
/// let mut arr = DynArray::from([1, 2, 3]);
///
/// let mut cursor = arr.cursor_mut();
/// while cursor.has_next() {
///     let doubled = cursor.get() * 2;
///     cursor.set(doubled);
///     cursor.advance();
/// }
///
/// assert_eq!(arr, [2, 4, 6]);
/// ```
#[derive(Debug)]
pub struct CursorMut<'a, T> {
    arr: &'a mut DynArray<T>,
    at: Position,
}

impl<'a, T> CursorMut<'a, T> {
    #[inline]
    pub(super) fn new(arr: &'a mut DynArray<T>, direction: Direction) -> Self {
        let at = Position::start(arr.len, direction);
        Self { arr, at }
    }

    #[inline]
    pub const fn has_next(&self) -> bool { self.at.current(self.arr.len).is_some() }

    #[inline]
    pub const fn position(&self) -> Option<usize> { self.at.current(self.arr.len) }

    #[inline]
    pub const fn direction(&self) -> Direction { self.at.direction }

    /// Returns the element under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    #[inline]
    #[track_caller]
    pub fn get(&self) -> &T { &self.arr.as_slice()[self.at.live_index(self.arr.len)] }

    /// Returns the element under the cursor mutably.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    #[inline]
    #[track_caller]
    pub fn get_mut(&mut self) -> &mut T {
        let index = self.at.live_index(self.arr.len);
        &mut self.arr.as_mut_slice()[index]
    }

    /// Replaces the element under the cursor, dropping the old one.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is exhausted.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, value: T) { *self.get_mut() = value; }

    #[inline]
    pub fn advance(&mut self) { self.at.advance(self.arr.len) }
}

#[cfg(test)]
mod tests {
    use crate::DynArray;
    use super::*;

    #[test]
    fn forward() {
        let arr = DynArray::from([10, 20, 30]);
        let mut cursor = arr.cursor();

        assert_eq!(cursor.direction(), Direction::Forward);
        assert!(cursor.has_next());
        assert_eq!(cursor.position(), Some(0));
        assert_eq!(*cursor.get(), 10);

        cursor.advance();
        assert_eq!(*cursor.get(), 20);
        cursor.advance();
        assert_eq!(*cursor.get(), 30);
        cursor.advance();

        assert!(!cursor.has_next());
        assert_eq!(cursor.position(), None);

        // Stays exhausted.
        cursor.advance();
        assert!(!cursor.has_next());
    }

    #[test]
    fn reverse() {
        let arr = (1..=10).collect::<DynArray<i32>>();
        let collected = arr.reverse_cursor().copied().collect::<Vec<_>>();
        assert_eq!(collected, (1..=10).rev().collect::<Vec<_>>());

        let mut cursor = arr.reverse_cursor();
        assert_eq!(cursor.position(), Some(9));
        for _ in 0..10 { cursor.advance(); }
        assert_eq!(cursor.position(), None);
        cursor.advance();
        assert!(!cursor.has_next());
    }

    #[test]
    fn empty() {
        let arr = DynArray::<i32>::new();
        assert!(!arr.cursor().has_next());
        assert!(!arr.reverse_cursor().has_next());
        assert_eq!(arr.cursor().next(), None);
    }

    #[test]
    #[should_panic(expected = "cursor is exhausted")]
    fn get_exhausted() {
        let arr = DynArray::from([1]);
        let mut cursor = arr.cursor();
        cursor.advance();
        cursor.get();
    }

    #[test]
    fn manual_iteration() {
        let arr = DynArray::from([10, 20, 30]);
        let mut cursor = arr.cursor();

        assert!(cursor.has_next());
        assert_eq!(cursor.next(), Some(&10));
        assert_eq!(*cursor.get(), 20);
        cursor.advance();
        assert_eq!(*cursor.get(), 30);
    }

    #[test]
    fn restartable() {
        let arr = DynArray::from([1, 2, 3]);
        let first = arr.cursor().sum::<i32>();
        let second = arr.cursor().sum::<i32>();
        assert_eq!(first, second);
    }

    #[test]
    fn exact_size() {
        let arr = DynArray::from([1, 2, 3, 4]);
        let mut cursor = arr.cursor();
        assert_eq!(cursor.len(), 4);
        cursor.next();
        assert_eq!(cursor.len(), 3);

        let mut cursor = arr.reverse_cursor();
        cursor.next();
        assert_eq!(cursor.len(), 3);
    }

    #[test]
    fn iterate_and_modify() {
        let mut arr = (1..=10).collect::<DynArray<i32>>();

        let mut cursor = arr.cursor_mut();
        while cursor.has_next() {
            let value = *cursor.get();
            cursor.set(value * 2);
            cursor.advance();
        }

        let copy = arr.clone();
        let mut expected = 2;
        for value in copy.cursor() {
            assert_eq!(*value, expected);
            expected += 2;
        }
    }

    #[test]
    fn reverse_mut() {
        let mut arr = DynArray::from([1, 2, 3]);

        let mut cursor = arr.reverse_cursor_mut();
        assert_eq!(cursor.direction(), Direction::Reverse);
        *cursor.get_mut() += 10;
        cursor.advance();
        cursor.set(0);

        assert_eq!(arr, [1, 0, 13]);
    }

    #[test]
    #[should_panic(expected = "cursor is exhausted")]
    fn set_exhausted() {
        let mut arr = DynArray::<String>::new();
        arr.reverse_cursor_mut().set("x".to_string());
    }
}
