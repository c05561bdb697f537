//! What a ring does when an incoming element finds no free slot.
//!
//! The policy is consulted once, before a push or insert decides between
//! "write into free space" and "overwrite". A policy that answers with a new
//! capacity makes the ring reallocate first, so the overwrite branch is never
//! reached.

use crate::error::RingError;

/// Overflow decision hook for [`RingBuffer`](crate::RingBuffer).
pub trait OverflowPolicy {
    /// Name used in log events.
    const NAME: &'static str;

    /// Capacity the ring must grow to before `incoming` more elements land
    /// in a ring holding `len` of `capacity` slots. `None` keeps the current
    /// storage and lets the ring overwrite.
    fn grown_capacity(
        capacity: usize,
        len: usize,
        incoming: usize,
    ) -> Result<Option<usize>, RingError>;
}

/// Bounded policy: a full ring evicts instead of growing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Overwrite;

/// Growable policy: a full ring reallocates and keeps every element.
///
/// The new capacity is double the old one, or exactly what the incoming
/// elements need when doubling falls short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Grow;

impl OverflowPolicy for Overwrite {
    const NAME: &'static str = "overwrite";

    #[inline]
    fn grown_capacity(
        _capacity: usize,
        _len: usize,
        _incoming: usize,
    ) -> Result<Option<usize>, RingError> {
        Ok(None)
    }
}

impl OverflowPolicy for Grow {
    const NAME: &'static str = "grow";

    #[inline]
    fn grown_capacity(
        capacity: usize,
        len: usize,
        incoming: usize,
    ) -> Result<Option<usize>, RingError> {
        let needed = len
            .checked_add(incoming)
            .ok_or(RingError::CapacityOverflow)?;
        if needed <= capacity {
            return Ok(None);
        }
        let doubled = capacity.checked_mul(2).unwrap_or(needed);
        Ok(Some(doubled.max(needed)))
    }
}
