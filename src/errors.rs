use std::alloc::{Layout, LayoutError};

use thiserror::Error;


/// Failure to acquire storage for a [`DynArray`](crate::DynArray).
///
/// Returned by the `try_*` family of methods. When one of these is returned the
/// container it was called on is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocErr {
    /// The requested capacity does not fit in a `usize`.
    #[error("capacity overflow")]
    Overflow,
    /// The requested capacity exceeds what a single allocation may describe.
    #[error("invalid parameters to Layout::from_size_align")]
    Layout,
    /// The allocator returned null.
    #[error("memory allocation of {} bytes failed", layout.size())]
    Alloc { layout: Layout }
}

impl AllocErr {
    #[inline]
    pub(crate) const fn layout(_err: LayoutError) -> Self { Self::Layout }

    #[inline]
    pub(crate) const fn alloc(layout: Layout) -> Self { Self::Alloc { layout } }
}
