use std::collections::TryReserveError;

/// Failures reported by cursor-addressed and fallible ring operations.
///
/// Every operation returning this error checks its preconditions before
/// touching the buffer, so an `Err` always leaves the ring unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RingError {
    /// The cursor was issued by a different storage allocation: another
    /// ring, or this ring before its storage was reallocated.
    #[error("cursor does not belong to the current storage of this ring")]
    StaleCursor,

    #[error("cursor offset {offset} is outside of [0, {len}]")]
    CursorOutOfRange { offset: isize, len: usize },

    #[error("range start {start} is past range end {end}")]
    InvalidRange { start: usize, end: usize },

    #[error("capacity overflow")]
    CapacityOverflow,

    #[error("storage allocation failed")]
    Alloc(#[from] TryReserveError),
}
