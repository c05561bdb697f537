//! Fixed-length slot storage backing a ring.
//!
//! A `Storage` is allocated once with its final slot count and never resized:
//! a capacity change always builds a fresh `Storage` and moves elements over.
//! Each allocation is stamped with a process-unique id so cursors can tell
//! which allocation they were issued against.
//!
//! # Memory Layout
//!
//! ```text
//! slot:   0      1      2      3      4
//!       ┌──────┬──────┬──────┬──────┬──────┐
//!       │ None │ C    │ D    │ None │ None │   head = 1, len = 2
//!       └──────┴──────┴──────┴──────┴──────┘
//! ```
//!
//! Live slots hold `Some`, vacant slots hold `None`. Moving an element out of
//! a slot leaves `None` behind, which keeps shifting safe without `Clone`.

use crate::error::RingError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of allocation ids. Zero is never handed out.
static NEXT_STORAGE_ID: AtomicU64 = AtomicU64::new(1);

#[inline]
fn next_storage_id() -> u64 {
    NEXT_STORAGE_ID.fetch_add(1, Ordering::Relaxed)
}

pub(crate) struct Storage<T> {
    slots: Box<[Option<T>]>,
    id: u64,
}

impl<T> Storage<T> {
    /// Allocates `capacity` vacant slots.
    ///
    /// # Panics
    /// Panics on capacity overflow; allocation failure aborts like any `Vec`.
    pub(crate) fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots: slots.into_boxed_slice(),
            id: next_storage_id(),
        }
    }

    /// Allocates `capacity` vacant slots, reporting allocator refusal.
    pub(crate) fn try_new(capacity: usize) -> Result<Self, RingError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots: slots.into_boxed_slice(),
            id: next_storage_id(),
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub(crate) fn get(&self, slot: usize) -> Option<&T> {
        self.slots[slot].as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots[slot].as_mut()
    }

    /// Stores `value` in `slot`, returning whatever lived there before.
    #[inline]
    pub(crate) fn put(&mut self, slot: usize, value: T) -> Option<T> {
        self.slots[slot].replace(value)
    }

    #[inline]
    pub(crate) fn take(&mut self, slot: usize) -> Option<T> {
        self.slots[slot].take()
    }

    #[inline]
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Splits the window of `len` slots starting at `head` into its two
    /// physically contiguous pieces. The second piece is empty unless the
    /// window wraps past the last slot.
    pub(crate) fn window(&self, head: usize, len: usize) -> (&[Option<T>], &[Option<T>]) {
        let cap = self.capacity();
        if head + len <= cap {
            (&self.slots[head..head + len], &[][..])
        } else {
            let (front, back) = self.slots.split_at(head);
            (back, &front[..head + len - cap])
        }
    }

    pub(crate) fn window_mut(
        &mut self,
        head: usize,
        len: usize,
    ) -> (&mut [Option<T>], &mut [Option<T>]) {
        let cap = self.capacity();
        if head + len <= cap {
            (&mut self.slots[head..head + len], &mut [][..])
        } else {
            let (front, back) = self.slots.split_at_mut(head);
            (back, &mut front[..head + len - cap])
        }
    }
}

impl<T: Clone> Clone for Storage<T> {
    /// Deep copy. The copy is a new allocation and gets its own id.
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            id: next_storage_id(),
        }
    }
}
