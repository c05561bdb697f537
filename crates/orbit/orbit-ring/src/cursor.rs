//! Positions inside a ring and the arithmetic that moves them around.
//!
//! A [`Cursor`] names a physical slot plus the lap it was reached on. The lap
//! is what separates `begin()` from `end()` on a full ring: both sit on the
//! same slot, but `end()` is one lap further.
//!
//! ```text
//! capacity = 4, head = 2, len = 4 (full)
//!
//! slot:        0    1    2    3
//!            ┌────┬────┬────┬────┐
//!            │ C  │ D  │ A  │ B  │
//!            └────┴────┴────┴────┘
//!                        ^
//!             begin = (slot 2, lap 0)
//!             end   = (slot 2, lap 1)    end - begin == 4
//! ```
//!
//! Laps are counted in the ring's own frame, shared by every cursor it hands
//! out, so `begin()` is only on lap 0 until `head` first wraps.
//!
//! Cursors are plain values. They carry no borrow of the ring, so they can be
//! held across mutations and handed back to `insert`/`erase`. A cursor keeps
//! naming the same slot while the front moves: after `pop_front` it still
//! reaches its element, however the live window wraps. The ring checks
//! cursors on the way in: one from a different storage allocation is
//! rejected with [`RingError::StaleCursor`](crate::RingError::StaleCursor),
//! one whose slot has left the live window with
//! [`RingError::CursorOutOfRange`](crate::RingError::CursorOutOfRange).

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A forward position inside a ring.
///
/// Stepping past the last slot wraps to slot 0 and bumps the lap; stepping
/// back from slot 0 wraps to the last slot and drops the lap. `+=`/`-=` by `n`
/// land exactly where `n` unit steps would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    slot: usize,
    lap: isize,
    capacity: usize,
    storage: u64,
}

impl Cursor {
    #[inline]
    pub(crate) fn new(slot: usize, lap: isize, capacity: usize, storage: u64) -> Self {
        Self {
            slot,
            lap,
            capacity,
            storage,
        }
    }

    /// Physical slot index in `[0, capacity)`.
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Number of times this position has crossed the end of storage, in the
    /// frame of the ring that issued it.
    #[inline]
    pub fn lap(&self) -> isize {
        self.lap
    }

    /// Capacity of the storage this cursor was issued against.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn storage_id(&self) -> u64 {
        self.storage
    }

    /// Advances by one slot.
    #[inline]
    pub fn step(&mut self) {
        if self.capacity == 0 {
            return;
        }
        if self.slot + 1 == self.capacity {
            self.slot = 0;
            self.lap += 1;
        } else {
            self.slot += 1;
        }
    }

    /// Retreats by one slot.
    #[inline]
    pub fn step_back(&mut self) {
        if self.capacity == 0 {
            return;
        }
        if self.slot == 0 {
            self.slot = self.capacity - 1;
            self.lap -= 1;
        } else {
            self.slot -= 1;
        }
    }

    /// Shifts by `n` slots in either direction.
    pub fn advance(&mut self, n: isize) {
        if self.capacity == 0 {
            return;
        }
        let cap = self.capacity as isize;
        // Whole laps first, then a remainder in [0, cap) that crosses the
        // boundary at most once.
        let laps = n.div_euclid(cap);
        let rem = n.rem_euclid(cap);
        let slot = self.slot as isize + rem;
        if slot >= cap {
            self.slot = (slot - cap) as usize;
            self.lap += laps + 1;
        } else {
            self.slot = slot as usize;
            self.lap += laps;
        }
    }

    /// Signed logical distance `self - origin`.
    ///
    /// Two cursors on the same slot but different laps are `capacity` apart
    /// per lap, not zero.
    #[inline]
    pub fn distance_from(&self, origin: &Cursor) -> isize {
        let laps = self.lap - origin.lap;
        laps * self.capacity as isize + self.slot as isize - origin.slot as isize
    }

    #[inline]
    fn comparable(&self, other: &Cursor) -> bool {
        self.capacity == other.capacity && self.storage == other.storage
    }
}

impl AddAssign<isize> for Cursor {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        self.advance(n);
    }
}

impl SubAssign<isize> for Cursor {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        self.advance(-n);
    }
}

impl Add<isize> for Cursor {
    type Output = Cursor;

    #[inline]
    fn add(mut self, n: isize) -> Cursor {
        self.advance(n);
        self
    }
}

impl Add<Cursor> for isize {
    type Output = Cursor;

    #[inline]
    fn add(self, cursor: Cursor) -> Cursor {
        cursor + self
    }
}

impl Sub<isize> for Cursor {
    type Output = Cursor;

    #[inline]
    fn sub(mut self, n: isize) -> Cursor {
        self.advance(-n);
        self
    }
}

impl Sub<Cursor> for Cursor {
    type Output = isize;

    #[inline]
    fn sub(self, origin: Cursor) -> isize {
        self.distance_from(&origin)
    }
}

/// Cursors from different storages are unordered.
impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Cursor) -> Option<Ordering> {
        if !self.comparable(other) {
            return None;
        }
        Some(self.distance_from(other).cmp(&0))
    }
}

/// A position walking the ring from back to front.
///
/// Built by composition over a forward [`Cursor`]: the wrapped `base` sits
/// one slot *after* the element this cursor denotes, so `rbegin()` wraps
/// `end()` and `rend()` wraps `begin()`. Every step is the mirrored step of
/// the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevCursor {
    base: Cursor,
}

impl RevCursor {
    /// Reverse cursor denoting the element just before `base`.
    #[inline]
    pub fn new(base: Cursor) -> Self {
        Self { base }
    }

    /// The forward cursor one past the denoted element.
    #[inline]
    pub fn base(&self) -> Cursor {
        self.base
    }

    /// The forward cursor naming the element this reverse cursor denotes.
    #[inline]
    pub fn target(&self) -> Cursor {
        self.base - 1
    }

    /// Moves one element towards the front.
    #[inline]
    pub fn step(&mut self) {
        self.base.step_back();
    }

    #[inline]
    pub fn step_back(&mut self) {
        self.base.step();
    }

    #[inline]
    pub fn advance(&mut self, n: isize) {
        self.base.advance(-n);
    }
}

impl AddAssign<isize> for RevCursor {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        self.advance(n);
    }
}

impl SubAssign<isize> for RevCursor {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        self.advance(-n);
    }
}

impl Add<isize> for RevCursor {
    type Output = RevCursor;

    #[inline]
    fn add(mut self, n: isize) -> RevCursor {
        self.advance(n);
        self
    }
}

impl Sub<isize> for RevCursor {
    type Output = RevCursor;

    #[inline]
    fn sub(mut self, n: isize) -> RevCursor {
        self.advance(-n);
        self
    }
}

impl Sub<RevCursor> for RevCursor {
    type Output = isize;

    #[inline]
    fn sub(self, origin: RevCursor) -> isize {
        origin.base.distance_from(&self.base)
    }
}

impl PartialOrd for RevCursor {
    fn partial_cmp(&self, other: &RevCursor) -> Option<Ordering> {
        other.base.partial_cmp(&self.base)
    }
}
