//! Std iterators over the logical sequence.
//!
//! A ring's live window is at most two contiguous pieces of storage (before
//! and after the wrap), so borrowing iterators walk two slice iterators in
//! turn. Reverse traversal is `.rev()` on the same types.

use crate::buffer::RingBuffer;
use std::fmt;
use std::iter::FusedIterator;
use std::slice;

/// Read-only iterator, oldest element first.
pub struct Iter<'a, T> {
    first: slice::Iter<'a, Option<T>>,
    second: slice::Iter<'a, Option<T>>,
}

/// Mutable iterator, oldest element first.
pub struct IterMut<'a, T> {
    first: slice::IterMut<'a, Option<T>>,
    second: slice::IterMut<'a, Option<T>>,
}

/// Owning iterator that drains the ring from the front.
pub struct IntoIter<T, P> {
    ring: RingBuffer<T, P>,
}

impl<T, P> RingBuffer<T, P> {
    /// Iterates oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        let (first, second) = self.storage.window(self.head, self.len);
        Iter {
            first: first.iter(),
            second: second.iter(),
        }
    }

    /// Iterates oldest to newest, yielding mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (first, second) = self.storage.window_mut(self.head, self.len);
        IterMut {
            first: first.iter_mut(),
            second: second.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        match self.first.next() {
            Some(slot) => slot.as_ref(),
            None => self.second.next()?.as_ref(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first.len() + self.second.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.second.next_back() {
            Some(slot) => slot.as_ref(),
            None => self.first.next_back()?.as_ref(),
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> IterMut<'a, T> {
    /// Read-only view of the elements this iterator has yet to yield.
    pub fn as_iter(&self) -> Iter<'_, T> {
        Iter {
            first: self.first.as_slice().iter(),
            second: self.second.as_slice().iter(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        match self.first.next() {
            Some(slot) => slot.as_mut(),
            None => self.second.next()?.as_mut(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first.len() + self.second.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.second.next_back() {
            Some(slot) => slot.as_mut(),
            None => self.first.next_back()?.as_mut(),
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_iter()).finish()
    }
}

impl<T, P> Iterator for IntoIter<T, P> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.ring.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.len();
        (len, Some(len))
    }
}

impl<T, P> DoubleEndedIterator for IntoIter<T, P> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.ring.pop_back()
    }
}

impl<T, P> ExactSizeIterator for IntoIter<T, P> {}
impl<T, P> FusedIterator for IntoIter<T, P> {}

impl<T: fmt::Debug, P> fmt::Debug for IntoIter<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.ring).finish()
    }
}

impl<T, P> IntoIterator for RingBuffer<T, P> {
    type Item = T;
    type IntoIter = IntoIter<T, P>;

    fn into_iter(self) -> IntoIter<T, P> {
        IntoIter { ring: self }
    }
}

impl<'a, T, P> IntoIterator for &'a RingBuffer<T, P> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, P> IntoIterator for &'a mut RingBuffer<T, P> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::BoundedRing;

    fn wrapped() -> BoundedRing<char> {
        let mut ring = BoundedRing::from(['x', 'x', 'a', 'b']);
        ring.push_back('c');
        ring.push_back('d');
        ring
    }

    #[test]
    fn iter_follows_logical_order_across_the_wrap() {
        let ring = wrapped();
        assert_eq!(ring.iter().collect::<String>(), "abcd");
        assert_eq!(ring.iter().rev().collect::<String>(), "dcba");
        assert_eq!(ring.iter().len(), 4);
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let ring = wrapped();
        let mut it = ring.iter();
        assert_eq!(it.next(), Some(&'a'));
        assert_eq!(it.next_back(), Some(&'d'));
        assert_eq!(it.next_back(), Some(&'c'));
        assert_eq!(it.next(), Some(&'b'));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn iter_mut_edits_in_place_and_exposes_read_only_view() {
        let mut ring = wrapped();
        let mut it = ring.iter_mut();
        if let Some(first) = it.next() {
            *first = 'A';
        }
        assert_eq!(it.as_iter().collect::<String>(), "bcd");
        for value in it {
            *value = value.to_ascii_uppercase();
        }
        assert_eq!(ring, ['A', 'B', 'C', 'D']);
    }

    #[test]
    fn into_iter_drains_from_both_ends() {
        let mut it = wrapped().into_iter();
        assert_eq!(it.next_back(), Some('d'));
        assert_eq!(it.len(), 3);
        assert_eq!(it.collect::<Vec<_>>(), vec!['a', 'b', 'c']);
    }
}
