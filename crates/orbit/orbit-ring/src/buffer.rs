//! The ring itself: construction, O(1) end operations, access and whole-ring
//! operations. Positional insert/erase and capacity changes live in
//! the `bulk` module.
//!
//! # State
//!
//! The ring stores two counters next to its storage:
//! - `head`: physical slot of the logical-first element
//! - `len`: number of live elements
//!
//! The write position is always derived as `(head + len) % capacity`, so
//! there is no third counter to drift out of sync. Logical element `i` lives
//! at physical slot `(head + i) % capacity`.
//!
//! `head_lap` counts how often `head` has crossed the last slot (negative
//! after `push_front` wraps it backwards). Cursors carry laps in the same
//! frame, so a cursor keeps naming its slot while `head` moves around it.
//!
//! # Cursor Invalidation
//!
//! Moving `head` without reallocating (`pop_front`, `push_front`, eviction,
//! erasing a prefix) leaves cursors pointing at the same slot. A cursor whose
//! slot has left the live window is rejected with
//! [`RingError::CursorOutOfRange`].
//!
//! Any operation that swaps in new storage (growth, `resize`, `try_reserve`,
//! an `assign` that outgrows the ring, `clone_from` into a smaller ring)
//! invalidates every cursor issued before it. Handing such a cursor back
//! to the ring yields [`RingError::StaleCursor`] rather than touching memory.

use crate::cursor::{Cursor, RevCursor};
use crate::error::RingError;
use crate::policy::{Grow, OverflowPolicy, Overwrite};
use crate::storage::Storage;
use std::fmt;
use std::marker::PhantomData;
use std::mem::size_of;
use std::ops::{Index, IndexMut};
use tracing::{debug, trace};

/// A ring buffer over owned, fixed-length storage.
///
/// `P` decides what happens when an element arrives at a full ring; see
/// [`BoundedRing`] and [`GrowableRing`].
///
/// # Example
/// ```
/// use orbit_ring::BoundedRing;
///
/// let mut ring = BoundedRing::with_capacity(3);
/// for v in 1..=5 {
///     ring.push_back(v);
/// }
/// assert_eq!(ring, [3, 4, 5]);
/// ```
pub struct RingBuffer<T, P = Overwrite> {
    pub(crate) storage: Storage<T>,
    pub(crate) head: usize,
    pub(crate) head_lap: isize,
    pub(crate) len: usize,
    policy: PhantomData<P>,
}

/// A ring that evicts the oldest element when pushed while full.
pub type BoundedRing<T> = RingBuffer<T, Overwrite>;

/// A ring that doubles its storage instead of evicting.
pub type GrowableRing<T> = RingBuffer<T, Grow>;

impl<T, P> RingBuffer<T, P> {
    pub(crate) fn from_parts(storage: Storage<T>, head: usize, len: usize) -> Self {
        Self {
            storage,
            head,
            head_lap: 0,
            len,
            policy: PhantomData,
        }
    }

    /// Creates an empty ring with room for `capacity` elements.
    ///
    /// # Panics
    /// Panics if the slot count overflows; allocation failure aborts.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(Storage::new(capacity), 0, 0)
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, RingError> {
        Ok(Self::from_parts(Storage::try_new(capacity)?, 0, 0))
    }

    /// Creates a full ring of `capacity` copies of `value`.
    pub fn filled(capacity: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut storage = Storage::new(capacity);
        for slot in 0..capacity {
            storage.put(slot, value.clone());
        }
        Self::from_parts(storage, 0, capacity)
    }

    /// Copies the elements in `[first, last)` of `source` into a new ring
    /// whose capacity is exactly the number of copied elements.
    pub fn from_cursor_range<Q>(
        source: &RingBuffer<T, Q>,
        first: Cursor,
        last: Cursor,
    ) -> Result<Self, RingError>
    where
        T: Clone,
    {
        let (start, end) = source.span_of(first, last)?;
        let mut storage = Storage::new(end - start);
        for (slot, logical) in (start..end).enumerate() {
            if let Some(value) = source.logical(logical) {
                storage.put(slot, value.clone());
            }
        }
        Ok(Self::from_parts(storage, 0, end - start))
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of slots in the current storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Largest slot count a ring of `T` can ever be asked for.
    #[inline]
    pub fn max_size(&self) -> usize {
        isize::MAX as usize / size_of::<Option<T>>().max(1)
    }

    /// True when no element is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when every slot is live. The next push evicts or grows.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Free slots left before the next push would overflow.
    #[inline]
    pub fn space_left(&self) -> usize {
        self.capacity() - self.len
    }

    /// Physical slot of logical element `logical`. Callers keep
    /// `logical < 2 * capacity`.
    #[inline]
    pub(crate) fn phys(&self, logical: usize) -> usize {
        let cap = self.capacity();
        if cap == 0 {
            return 0;
        }
        let raw = self.head + logical;
        if raw >= cap { raw - cap } else { raw }
    }

    #[inline]
    pub(crate) fn logical(&self, logical: usize) -> Option<&T> {
        if logical >= self.len {
            return None;
        }
        self.storage.get(self.phys(logical))
    }

    #[inline]
    pub(crate) fn logical_mut(&mut self, logical: usize) -> Option<&mut T> {
        if logical >= self.len {
            return None;
        }
        let slot = self.phys(logical);
        self.storage.get_mut(slot)
    }

    /// Cursor at logical offset `offset` (0 ..= capacity).
    pub(crate) fn cursor_at(&self, offset: usize) -> Cursor {
        let cap = self.capacity();
        let id = self.storage.id();
        if cap == 0 {
            return Cursor::new(0, 0, 0, id);
        }
        let raw = self.head + offset;
        if raw >= cap {
            Cursor::new(raw - cap, self.head_lap + 1, cap, id)
        } else {
            Cursor::new(raw, self.head_lap, cap, id)
        }
    }

    /// Moves `head` forward by `n <= capacity` slots.
    #[inline]
    pub(crate) fn advance_head(&mut self, n: usize) {
        let raw = self.head + n;
        if raw >= self.capacity() {
            self.head = raw - self.capacity();
            self.head_lap += 1;
        } else {
            self.head = raw;
        }
    }

    /// Moves `head` back by one slot. Capacity must be non-zero.
    #[inline]
    fn retreat_head(&mut self) {
        if self.head == 0 {
            self.head = self.capacity() - 1;
            self.head_lap -= 1;
        } else {
            self.head -= 1;
        }
    }

    /// Puts `head` back on slot 0 of lap 0.
    #[inline]
    fn reset_head(&mut self) {
        self.head = 0;
        self.head_lap = 0;
    }

    /// Resolves a cursor to its logical offset, checking that it belongs to
    /// the current storage and lies within `[begin, end]`.
    pub(crate) fn offset_of(&self, cursor: Cursor) -> Result<usize, RingError> {
        if cursor.storage_id() != self.storage.id() || cursor.capacity() != self.capacity() {
            return Err(RingError::StaleCursor);
        }
        let offset = cursor.distance_from(&self.begin());
        if offset < 0 || offset as usize > self.len {
            return Err(RingError::CursorOutOfRange {
                offset,
                len: self.len,
            });
        }
        Ok(offset as usize)
    }

    pub(crate) fn span_of(&self, first: Cursor, last: Cursor) -> Result<(usize, usize), RingError> {
        let start = self.offset_of(first)?;
        let end = self.offset_of(last)?;
        if start > end {
            return Err(RingError::InvalidRange { start, end });
        }
        Ok((start, end))
    }

    /// Cursor at the logical-first element.
    #[inline]
    pub fn begin(&self) -> Cursor {
        self.cursor_at(0)
    }

    /// Cursor one past the logical-last element.
    ///
    /// Its lap is chosen so that `end() - begin() == len()` always holds,
    /// including on a full ring where both share a slot.
    #[inline]
    pub fn end(&self) -> Cursor {
        self.cursor_at(self.len)
    }

    /// Reverse cursor at the logical-last element.
    #[inline]
    pub fn rbegin(&self) -> RevCursor {
        RevCursor::new(self.end())
    }

    /// Reverse cursor one before the logical-first element.
    #[inline]
    pub fn rend(&self) -> RevCursor {
        RevCursor::new(self.begin())
    }

    /// Element at `cursor`, or `None` for `end()` and foreign cursors.
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        let offset = self.offset_of(cursor).ok()?;
        self.logical(offset)
    }

    /// Mutable form of [`get`](Self::get).
    pub fn get_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        let offset = self.offset_of(cursor).ok()?;
        self.logical_mut(offset)
    }

    /// Oldest element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.logical(0)
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.logical_mut(0)
    }

    /// Newest element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.logical(self.len.checked_sub(1)?)
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.logical_mut(self.len.checked_sub(1)?)
    }

    /// Wraparound access: `index` is taken modulo `len()`, so reading past
    /// the end starts over at the front. `None` only for an empty ring.
    ///
    /// This wraps over live elements, not over `capacity()`: vacant slots
    /// hold no value to return. On a full ring the two coincide.
    #[inline]
    pub fn at(&self, index: usize) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.logical(index % self.len)
    }

    /// Mutable form of [`at`](Self::at).
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Option<&mut T> {
        if self.len == 0 {
            return None;
        }
        self.logical_mut(index % self.len)
    }

    /// Removes and returns the logical-first element. No-op on an empty ring.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.storage.take(self.head);
        self.advance_head(1);
        self.len -= 1;
        value
    }

    /// Removes and returns the logical-last element. No-op on an empty ring.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let slot = self.phys(self.len);
        self.storage.take(slot)
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) {
        for logical in 0..self.len {
            let slot = self.phys(logical);
            self.storage.take(slot);
        }
        self.reset_head();
        self.len = 0;
    }

    /// Exchanges contents, storage and counters with `other` in O(1).
    /// Cursors follow their storage to the other ring.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Moves the first `min(len, new.capacity())` elements into `storage`
    /// and adopts it. Elements that do not fit are dropped.
    pub(crate) fn relocate_into(&mut self, mut storage: Storage<T>, reason: &'static str) {
        let from = self.capacity();
        let kept = self.len.min(storage.capacity());
        for logical in 0..self.len {
            let slot = self.phys(logical);
            let value = self.storage.take(slot);
            if logical < kept {
                if let Some(value) = value {
                    storage.put(logical, value);
                }
            }
        }
        debug!(
            reason,
            from,
            to = storage.capacity(),
            kept,
            dropped = self.len - kept,
            "ring storage reallocated"
        );
        self.storage = storage;
        self.reset_head();
        self.len = kept;
    }
}

impl<T, P: OverflowPolicy> RingBuffer<T, P> {
    /// Asks the policy for room for `incoming` more elements and grows the
    /// storage if it says so.
    ///
    /// # Panics
    /// Panics on capacity overflow; allocation failure aborts.
    fn make_room(&mut self, incoming: usize) {
        match P::grown_capacity(self.capacity(), self.len, incoming) {
            Ok(Some(capacity)) => self.relocate_into(Storage::new(capacity), P::NAME),
            Ok(None) => {}
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of the growth step run before inserts.
    pub(crate) fn try_make_room(&mut self, incoming: usize) -> Result<(), RingError> {
        if let Some(capacity) = P::grown_capacity(self.capacity(), self.len, incoming)? {
            let storage = Storage::try_new(capacity)?;
            self.relocate_into(storage, P::NAME);
        }
        Ok(())
    }

    /// Appends `value` after the logical-last element.
    ///
    /// On a full bounded ring this evicts the logical-first element; a
    /// growable ring reallocates first. A zero-capacity bounded ring drops
    /// `value`.
    ///
    /// # Panics
    /// A growable ring panics on capacity overflow.
    pub fn push_back(&mut self, value: T) {
        self.make_room(1);
        let cap = self.capacity();
        if cap == 0 {
            trace!(policy = P::NAME, "push into zero-capacity ring discarded");
            return;
        }
        if self.len == cap {
            // head == tail on a full ring: the write lands on the oldest element.
            let evicted = self.storage.put(self.head, value);
            self.advance_head(1);
            trace!(policy = P::NAME, evicted = evicted.is_some(), "push_back overwrote front");
        } else {
            let tail = self.phys(self.len);
            self.storage.put(tail, value);
            self.len += 1;
        }
    }

    /// Prepends `value` before the logical-first element.
    ///
    /// On a full bounded ring this evicts the logical-last element.
    ///
    /// # Panics
    /// A growable ring panics on capacity overflow.
    pub fn push_front(&mut self, value: T) {
        self.make_room(1);
        let cap = self.capacity();
        if cap == 0 {
            trace!(policy = P::NAME, "push into zero-capacity ring discarded");
            return;
        }
        self.retreat_head();
        let evicted = self.storage.put(self.head, value);
        if self.len == cap {
            trace!(policy = P::NAME, evicted = evicted.is_some(), "push_front overwrote back");
        } else {
            self.len += 1;
        }
    }

    /// Builds the element with `make` and appends it.
    #[inline]
    pub fn push_back_with<F: FnOnce() -> T>(&mut self, make: F) {
        self.push_back(make());
    }

    /// Builds the element with `make` and prepends it.
    #[inline]
    pub fn push_front_with<F: FnOnce() -> T>(&mut self, make: F) {
        self.push_front(make());
    }

    /// Replaces the contents with a copy of `items`.
    ///
    /// Keeps the current storage when `items` fits, otherwise reallocates to
    /// exactly `items.len()` slots.
    pub fn replace_with_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        if items.len() <= self.capacity() {
            self.clear();
            for item in items {
                self.push_back(item.clone());
            }
        } else {
            *self = Self::from(items.to_vec());
        }
    }
}

impl<T, P> Default for RingBuffer<T, P> {
    /// Zero-capacity ring. A growable ring allocates on its first push.
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T: Clone, P: OverflowPolicy> Clone for RingBuffer<T, P> {
    fn clone(&self) -> Self {
        Self::from_parts(self.storage.clone(), self.head, self.len)
    }

    /// Reuses the existing storage when it is at least as large as the
    /// source's, otherwise takes a deep copy of the source storage.
    fn clone_from(&mut self, source: &Self) {
        if self.capacity() < source.capacity() {
            *self = source.clone();
            return;
        }
        self.clear();
        for value in source.iter() {
            self.push_back(value.clone());
        }
    }
}

impl<T, P> From<Vec<T>> for RingBuffer<T, P> {
    /// Full ring whose capacity is exactly `items.len()`.
    fn from(items: Vec<T>) -> Self {
        let len = items.len();
        let mut storage = Storage::new(len);
        for (slot, value) in items.into_iter().enumerate() {
            storage.put(slot, value);
        }
        Self::from_parts(storage, 0, len)
    }
}

impl<T, P, const N: usize> From<[T; N]> for RingBuffer<T, P> {
    fn from(items: [T; N]) -> Self {
        Self::from(Vec::from(items))
    }
}

impl<T, P> FromIterator<T> for RingBuffer<T, P> {
    /// Collects into a full ring with a tight-fit capacity.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T, P: OverflowPolicy> Extend<T> for RingBuffer<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: fmt::Debug, P> fmt::Debug for RingBuffer<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Equality is by logical content only: capacity, policy and where the
/// elements physically sit do not matter.
impl<T, U, P, Q> PartialEq<RingBuffer<U, Q>> for RingBuffer<T, P>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &RingBuffer<U, Q>) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, P> Eq for RingBuffer<T, P> {}

impl<T, U, P> PartialEq<[U]> for RingBuffer<T, P>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.len == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T, U, P> PartialEq<&[U]> for RingBuffer<T, P>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        *self == **other
    }
}

impl<T, U, P, const N: usize> PartialEq<[U; N]> for RingBuffer<T, P>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        *self == other[..]
    }
}

impl<T, U, P> PartialEq<Vec<U>> for RingBuffer<T, P>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        *self == other[..]
    }
}

impl<T, P> Index<usize> for RingBuffer<T, P> {
    type Output = T;

    /// Wraparound indexing, see [`RingBuffer::at`].
    ///
    /// # Panics
    /// Panics when the ring is empty.
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Some(value) => value,
            None => panic!("index {index} into an empty ring"),
        }
    }
}

impl<T, P> IndexMut<usize> for RingBuffer<T, P> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Some(value) => value,
            None => panic!("index {index} into an empty ring"),
        }
    }
}

/// Free-function form of [`RingBuffer::swap`].
#[inline]
pub fn swap<T, P>(a: &mut RingBuffer<T, P>, b: &mut RingBuffer<T, P>) {
    a.swap(b);
}
