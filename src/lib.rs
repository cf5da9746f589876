//! A contiguous growable array that manages its own buffer.
//!
//! [`DynArray`] keeps its elements in one heap allocation together with a
//! count of live elements. It grows by doubling, and it moves elements into a
//! fresh buffer only once that buffer exists. Operations that may allocate come
//! in two forms: a plain one that panics (or aborts) when memory runs out, and
//! a `try_` one that returns [`AllocErr`] and leaves the array untouched.
//!
//! ```
//! use dynarr::DynArray;
//!
//! let mut arr = DynArray::new();
//! for i in 1..=10 { arr.push(i); }
//!
//! for i in 0..arr.len() { arr[i] *= 2; }
//!
//! let mut cursor = arr.cursor_mut();
//! while cursor.has_next() {
//!     let value = *cursor.get();
//!     cursor.set(value + 2);
//!     cursor.advance();
//! }
//!
//! let backwards: Vec<_> = arr.reverse_cursor().copied().collect();
//! assert_eq!(backwards, [22, 20, 18, 16, 14, 12, 10, 8, 6, 4]);
//! ```

mod dynarray;

pub(crate) mod errors;

pub use dynarray::{Cursor, CursorMut, Direction, DynArray, IntoIter, DEFAULT_CAPACITY};
pub use errors::AllocErr;
