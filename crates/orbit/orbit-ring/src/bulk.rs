//! Positional insert/erase, assign and capacity changes.
//!
//! Every positional operation resolves its cursors to logical offsets up
//! front and fails with [`RingError`] before touching anything, so a rejected
//! call leaves the ring as it was.
//!
//! # Insert Budget
//!
//! Inserting `k` elements at logical offset `p` into a ring with `space` free
//! slots:
//!
//! ```text
//! admitted  = min(k, p + space)             incoming elements that survive
//! overwrite = min(p, max(0, k - space))     prefix slots just before p reused
//! shift     = admitted - overwrite          how far [p, len) moves right
//! ```
//!
//! Incoming elements beyond `admitted` are the leading ones and are dropped.
//! The `overwrite` prefix elements closest to `p` are replaced in place. The
//! suffix `[p, len)` always survives.
//!
//! ```text
//! capacity 4, [A B C D], insert W at p = 2
//! space = 0 -> admitted = 1, overwrite = 1, shift = 0
//! result: [A W C D]
//! ```

use crate::buffer::RingBuffer;
use crate::cursor::Cursor;
use crate::error::RingError;
use crate::policy::OverflowPolicy;
use crate::storage::Storage;
use std::iter;
use tracing::{debug, trace};

impl<T, P: OverflowPolicy> RingBuffer<T, P> {
    /// Inserts `value` before `pos` and returns a cursor to it.
    ///
    /// A full bounded ring overwrites the element just before `pos`; with
    /// `pos == begin()` the value itself is the one that does not fit. A
    /// growable ring reallocates first.
    pub fn insert(&mut self, pos: Cursor, value: T) -> Result<Cursor, RingError> {
        let offset = self.offset_of(pos)?;
        self.insert_at(offset, iter::once(value))
    }

    /// Builds the element with `make` once `pos` has been validated, then
    /// inserts it.
    pub fn insert_with<F: FnOnce() -> T>(
        &mut self,
        pos: Cursor,
        make: F,
    ) -> Result<Cursor, RingError> {
        let offset = self.offset_of(pos)?;
        self.insert_at(offset, iter::once(make()))
    }

    /// Inserts `count` copies of `value` before `pos`.
    pub fn insert_n(&mut self, pos: Cursor, count: usize, value: T) -> Result<Cursor, RingError>
    where
        T: Clone,
    {
        let offset = self.offset_of(pos)?;
        self.insert_at(offset, iter::repeat_n(value, count))
    }

    /// Inserts a copy of `items` before `pos`, keeping their order.
    pub fn insert_slice(&mut self, pos: Cursor, items: &[T]) -> Result<Cursor, RingError>
    where
        T: Clone,
    {
        let offset = self.offset_of(pos)?;
        self.insert_at(offset, items.iter().cloned())
    }

    /// Inserts every element yielded by `items` before `pos`.
    ///
    /// The iterator's reported length decides the insert budget up front.
    pub fn insert_iter<I>(&mut self, pos: Cursor, items: I) -> Result<Cursor, RingError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let offset = self.offset_of(pos)?;
        self.insert_at(offset, items.into_iter())
    }

    /// Inserts a copy of `[first, last)` of `source` before `pos`.
    pub fn insert_cursor_range<Q>(
        &mut self,
        pos: Cursor,
        source: &RingBuffer<T, Q>,
        first: Cursor,
        last: Cursor,
    ) -> Result<Cursor, RingError>
    where
        T: Clone,
    {
        let offset = self.offset_of(pos)?;
        let (start, end) = source.span_of(first, last)?;
        let items = source.iter().skip(start).take(end - start).cloned();
        self.insert_at(offset, items)
    }

    fn insert_at<I>(&mut self, offset: usize, items: I) -> Result<Cursor, RingError>
    where
        I: ExactSizeIterator<Item = T>,
    {
        let incoming = items.len();
        // Growth keeps logical order, so `offset` stays meaningful.
        self.try_make_room(incoming)?;

        let space = self.space_left();
        let admitted = incoming.min(offset + space);
        let overwrite = offset.min(incoming.saturating_sub(space));
        let shift = admitted - overwrite;

        if shift > 0 {
            for logical in (offset..self.len).rev() {
                let from = self.phys(logical);
                let to = self.phys(logical + shift);
                self.storage.swap(from, to);
            }
            self.len += shift;
        }

        let start = offset - overwrite;
        let dropped = incoming - admitted;
        for (k, value) in items.skip(dropped).take(admitted).enumerate() {
            let slot = self.phys(start + k);
            self.storage.put(slot, value);
        }

        if dropped > 0 || overwrite > 0 {
            trace!(
                policy = P::NAME,
                dropped,
                overwrite,
                "insert exceeded free space"
            );
        }
        Ok(self.cursor_at(start))
    }

    /// Removes the element at `pos` and returns a cursor to its successor.
    ///
    /// Erasing `end()` is a no-op that returns `end()`. Erasing the front is
    /// O(1); anything else shifts the tail left by one.
    pub fn erase(&mut self, pos: Cursor) -> Result<Cursor, RingError> {
        let offset = self.offset_of(pos)?;
        if offset == self.len {
            return Ok(self.end());
        }
        self.remove_span(offset, offset + 1);
        Ok(self.cursor_at(offset))
    }

    /// Removes `[first, last)` and returns a cursor to the element that
    /// followed the range.
    ///
    /// Prefix and suffix ranges are O(1) counter updates; interior ranges
    /// shift the elements after `last` left to close the gap.
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Result<Cursor, RingError> {
        let (start, end) = self.span_of(first, last)?;
        self.remove_span(start, end);
        Ok(self.cursor_at(start))
    }

    fn remove_span(&mut self, start: usize, end: usize) {
        let removed = end - start;
        if removed == 0 {
            return;
        }
        for logical in start..end {
            let slot = self.phys(logical);
            self.storage.take(slot);
        }
        if start == 0 {
            self.advance_head(end);
        } else {
            for logical in end..self.len {
                let from = self.phys(logical);
                let to = self.phys(logical - removed);
                self.storage.swap(from, to);
            }
        }
        self.len -= removed;
    }

    /// Replaces the contents with `items`.
    ///
    /// Reallocates to exactly `items.len()` slots when they do not fit; old
    /// contents are never carried over.
    pub fn assign<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        self.clear();
        let incoming = items.len();
        if incoming > self.capacity() {
            debug!(
                from = self.capacity(),
                to = incoming,
                "assign reallocated ring storage"
            );
            self.storage = Storage::new(incoming);
        }
        for value in items {
            self.push_back(value);
        }
    }

    /// Replaces the contents with `count` copies of `value`.
    pub fn assign_n(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        self.assign(iter::repeat_n(value, count));
    }

    /// Sets the capacity to `capacity`.
    ///
    /// Shrinking keeps the first `capacity` elements and drops the rest;
    /// growing keeps everything. Either way the ring moves to new storage and
    /// all outstanding cursors go stale.
    ///
    /// # Panics
    /// Panics if the slot count overflows; allocation failure aborts.
    pub fn resize(&mut self, capacity: usize) {
        if capacity == self.capacity() {
            return;
        }
        self.relocate_into(Storage::new(capacity), "resize");
    }

    /// Fallible form of [`resize`](Self::resize).
    pub fn try_resize(&mut self, capacity: usize) -> Result<(), RingError> {
        if capacity == self.capacity() {
            return Ok(());
        }
        let storage = Storage::try_new(capacity)?;
        self.relocate_into(storage, "resize");
        Ok(())
    }

    /// Makes sure `additional` more elements fit without overwriting or
    /// growing, whatever the policy.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), RingError> {
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(RingError::CapacityOverflow)?;
        if needed <= self.capacity() {
            return Ok(());
        }
        let storage = Storage::try_new(needed)?;
        self.relocate_into(storage, "reserve");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{BoundedRing, GrowableRing, RingError};

    /// Ring of capacity 5 whose contents wrap past the last slot.
    fn wrapped() -> BoundedRing<u32> {
        let mut ring = BoundedRing::with_capacity(5);
        ring.extend([0, 0, 0, 1, 2]);
        ring.pop_front();
        ring.pop_front();
        ring.pop_front();
        ring.push_back(3);
        ring.push_back(4);
        assert_eq!(ring.begin().slot(), 3);
        ring
    }

    #[test]
    fn insert_shifts_across_the_wrap() {
        let mut ring = wrapped();
        let at = ring.insert(ring.begin() + 1, 9).unwrap();
        assert_eq!(ring, [1, 9, 2, 3, 4]);
        assert_eq!(ring.get(at), Some(&9));
    }

    #[test]
    fn erase_closes_the_gap_across_the_wrap() {
        let mut ring = wrapped();
        let next = ring.erase(ring.begin() + 1).unwrap();
        assert_eq!(ring, [1, 3, 4]);
        assert_eq!(ring.get(next), Some(&3));
    }

    #[test]
    fn erase_range_prefix_moves_head_only() {
        let mut ring = wrapped();
        let next = ring.erase_range(ring.begin(), ring.begin() + 2).unwrap();
        assert_eq!(ring, [3, 4]);
        assert_eq!(next, ring.begin());
        assert_eq!(ring.begin().slot(), 0);
    }

    #[test]
    fn erase_range_suffix_shrinks_len_only() {
        let mut ring = wrapped();
        let head = ring.begin().slot();
        let next = ring.erase_range(ring.begin() + 1, ring.end()).unwrap();
        assert_eq!(ring, [1]);
        assert_eq!(next, ring.end());
        assert_eq!(ring.begin().slot(), head);
    }

    #[test]
    fn insert_drops_leading_incoming_when_they_cannot_fit() {
        let mut ring = BoundedRing::from([1, 2]);
        ring.insert_slice(ring.begin(), &[7, 8, 9]).unwrap();
        // No prefix to overwrite and no free space: nothing gets in.
        assert_eq!(ring, [1, 2]);

        ring.insert_slice(ring.end(), &[7, 8, 9]).unwrap();
        // Two prefix slots available; only the trailing two survive.
        assert_eq!(ring, [8, 9]);
    }

    #[test]
    fn insert_n_fills_free_space_then_overwrites_prefix() {
        let mut ring = BoundedRing::with_capacity(5);
        ring.extend([1, 2, 3]);
        let at = ring.insert_n(ring.begin() + 2, 3, 0).unwrap();
        // space 2, admitted 3, overwrite 1: element 2 goes.
        assert_eq!(ring, [1, 0, 0, 0, 3]);
        assert_eq!(at, ring.begin() + 1);
    }

    #[test]
    fn growable_insert_invalidates_old_cursors() {
        let mut ring = GrowableRing::from(['a', 'b']);
        let old_end = ring.end();
        ring.insert(ring.end(), 'c').unwrap();
        assert_eq!(ring.capacity(), 4);
        assert!(matches!(ring.insert(old_end, 'd'), Err(RingError::StaleCursor)));
        assert_eq!(ring, ['a', 'b', 'c']);
    }

    #[test]
    fn reversed_range_is_rejected_without_mutation() {
        let mut ring = BoundedRing::from([1, 2, 3]);
        assert!(matches!(
            ring.erase_range(ring.begin() + 2, ring.begin()),
            Err(RingError::InvalidRange { start: 2, end: 0 })
        ));
        assert_eq!(ring, [1, 2, 3]);
    }

    #[test]
    fn try_reserve_grows_even_a_bounded_ring() {
        let mut ring = BoundedRing::from([1, 2, 3]);
        ring.try_reserve(2).unwrap();
        assert_eq!(ring.capacity(), 5);
        ring.push_back(4);
        ring.push_back(5);
        assert_eq!(ring, [1, 2, 3, 4, 5]);
        assert!(matches!(
            ring.try_reserve(usize::MAX),
            Err(RingError::CapacityOverflow)
        ));
    }
}
