//! Behaviour of the ring that grows instead of evicting.
//!
//! ```bash
//! cargo test -p orbit-ring --test growable
//! ```

use orbit_ring::{GrowableRing, RingError};

#[test]
fn creation() {
    let ring = GrowableRing::<u32>::with_capacity(6);
    assert_eq!(ring.capacity(), 6);
    assert_eq!(ring.len(), 0);

    let ring = GrowableRing::from(['1', '2', '3', '4', '5']);
    assert_eq!(ring.capacity(), 5);
    assert_eq!(ring.len(), 5);
}

#[test]
fn push_past_capacity_doubles() {
    let mut ring = GrowableRing::with_capacity(5);
    ring.push_back('3');
    ring.push_front('2');
    ring.push_front('1');
    ring.push_back('4');
    ring.push_back('5');
    assert_eq!(ring, GrowableRing::from(['1', '2', '3', '4', '5']));

    ring.push_back('6');
    ring.push_back('7');
    assert_eq!(ring.capacity(), 10);
    assert_eq!(ring.len(), 7);
    assert_eq!(ring, GrowableRing::from(['1', '2', '3', '4', '5', '6', '7']));
}

#[test]
fn push_over_keeps_everything() {
    let mut ring = GrowableRing::from([1u32, 2, 3, 4, 5]);
    for v in 6..10 {
        ring.push_back(v);
    }
    assert_eq!(ring.len(), 9);
    assert_eq!(ring.capacity(), 10);
    assert_eq!(ring, GrowableRing::from([1u32, 2, 3, 4, 5, 6, 7, 8, 9]));
}

#[test]
fn push_front_on_full_ring_grows() {
    let mut ring = GrowableRing::from([2, 3]);
    ring.push_front(1);
    ring.push_front(0);
    assert_eq!(ring, [0, 1, 2, 3]);
    assert_eq!(ring.capacity(), 4);
    ring.push_front(-1);
    assert_eq!(ring.capacity(), 8);
    assert_eq!(ring, [-1, 0, 1, 2, 3]);
}

#[test]
fn growth_from_zero_capacity() {
    let mut ring = GrowableRing::default();
    let mut capacities = Vec::new();
    for v in 0..9 {
        ring.push_back(v);
        capacities.push(ring.capacity());
    }
    assert_eq!(capacities, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
    assert!(ring.iter().copied().eq(0..9));
}

#[test]
fn growth_preserves_order_from_a_wrapped_layout() {
    let mut ring = GrowableRing::with_capacity(4);
    ring.extend([0, 0, 1, 2]);
    ring.pop_front();
    ring.pop_front();
    ring.extend([3, 4]);
    assert!(ring.is_full());
    assert_eq!(ring.begin().slot(), 2);

    ring.push_back(5);
    assert_eq!(ring.capacity(), 8);
    assert_eq!(ring, [1, 2, 3, 4, 5]);
    assert_eq!(ring.begin().slot(), 0);
}

#[test]
fn pop_until_empty() {
    let mut ring = GrowableRing::from([1u32, 2, 3, 4, 5]);
    ring.pop_front();
    ring.pop_back();
    ring.pop_front();
    assert_eq!(ring.len(), 2);
    assert_eq!(ring, GrowableRing::from([3u32, 4]));
    ring.pop_front();
    ring.pop_back();
    assert_eq!(ring.len(), 0);
    assert_eq!(ring.pop_back(), None);
}

#[test]
fn clear_keeps_capacity() {
    let mut ring = GrowableRing::from([1u32, 2, 3, 4, 5]);
    ring.clear();
    assert_eq!(ring.capacity(), 5);
    assert!(ring.is_empty());
}

#[test]
fn resize_up() {
    let mut ring = GrowableRing::from([1i32, 2, 3, 4, 5]);
    ring.resize(9);
    assert_eq!(ring.len(), 5);
    assert_eq!(ring.capacity(), 9);
}

#[test]
fn insert_grows_before_shifting() {
    let mut ring = GrowableRing::from(['A', 'B', 'C', 'D']);
    ring.insert(ring.begin() + 2, 'W').unwrap();
    assert_eq!(ring.capacity(), 8);
    assert_eq!(ring.len(), 5);
    assert_eq!(ring, GrowableRing::from(['A', 'B', 'W', 'C', 'D']));

    ring.insert_slice(ring.begin() + 3, &['Z', 'Z', 'Z']).unwrap();
    assert_eq!(ring.len(), 8);
    assert_eq!(ring.capacity(), 8);
    assert_eq!(ring, GrowableRing::from(['A', 'B', 'W', 'Z', 'Z', 'Z', 'C', 'D']));
}

#[test]
fn insert_range_and_count() {
    let mut ring = GrowableRing::from(['A', 'B', 'C', 'D']);
    let source = GrowableRing::from(['A', 'W', 'C', 'D']);
    ring.pop_back();
    ring.pop_back();

    ring.insert_cursor_range(ring.begin() + 1, &source, source.begin() + 1, source.end())
        .unwrap();
    assert_eq!(ring, GrowableRing::from(['A', 'W', 'C', 'D', 'B']));

    ring.insert_n(ring.end(), 3, 'Z').unwrap();
    assert_eq!(
        ring,
        GrowableRing::from(['A', 'W', 'C', 'D', 'B', 'Z', 'Z', 'Z'])
    );
}

#[test]
fn insert_larger_than_double_fits_exactly() {
    let mut ring = GrowableRing::from([1, 2]);
    let at = ring.insert_iter(ring.begin() + 1, 10..17).unwrap();
    assert_eq!(ring.capacity(), 9);
    assert_eq!(ring, [1, 10, 11, 12, 13, 14, 15, 16, 2]);
    assert_eq!(ring.get(at), Some(&10));
}

#[test]
fn insert_overflowing_capacity_arithmetic_is_rejected() {
    let mut ring = GrowableRing::from([(), ()]);
    let result = ring.insert_n(ring.end(), usize::MAX, ());
    assert!(matches!(result, Err(RingError::CapacityOverflow)));
    assert_eq!(ring.len(), 2);
    assert_eq!(ring.capacity(), 2);
}

#[test]
fn insert_whose_growth_cannot_be_allocated_is_rejected() {
    let mut ring = GrowableRing::from([1u64, 2, 3]);
    ring.pop_front();
    ring.push_back(4);
    let three = ring.begin() + 1;

    let result = ring.insert_n(ring.begin() + 1, usize::MAX / 2, 0);
    assert!(matches!(result, Err(RingError::Alloc(_))));
    assert_eq!(ring, [2, 3, 4]);
    assert_eq!(ring.capacity(), 3);
    assert_eq!(ring.get(three), Some(&3));

    ring.insert(three, 9).unwrap();
    assert_eq!(ring, [2, 9, 3, 4]);
}

#[test]
fn try_reserve_on_a_growable_ring_is_exact() {
    let mut ring = GrowableRing::from([1, 2]);
    ring.try_reserve(3).unwrap();
    assert_eq!(ring.capacity(), 5);
    assert!(matches!(ring.try_reserve(usize::MAX / 2), Err(RingError::Alloc(_))));
    assert_eq!(ring, [1, 2]);
    assert_eq!(ring.capacity(), 5);
}

#[test]
fn front_back_and_erase() {
    let mut ring = GrowableRing::from(['A', 'B', 'C', 'D']);
    assert_eq!(ring.front(), Some(&'A'));
    assert_eq!(ring.back(), Some(&'D'));

    ring.erase_range(ring.begin() + 1, ring.begin() + 3).unwrap();
    assert_eq!(ring, GrowableRing::from(['A', 'D']));
}

#[test]
fn index_wraps_around_the_sequence() {
    let ring = GrowableRing::from(['A', 'B', 'C', 'D']);
    assert_eq!(ring[2], 'C');
    assert_eq!(ring[4], 'A');
    assert_eq!(ring[9], 'B');
}

#[test]
fn assign_reuses_or_grows_capacity() {
    let mut ring = GrowableRing::from([3i32, 4, 5, 6, 7]);
    ring.assign([4, 4, 4, 4]);
    assert_eq!(ring.len(), 4);
    assert_eq!(ring.capacity(), 5);
    assert_eq!(ring, GrowableRing::from([4, 4, 4, 4]));

    ring.assign([10, 11, 12, 15, 16, 17]);
    assert_eq!(ring.capacity(), 6);
    assert_eq!(ring.len(), 6);
}

#[test]
fn extend_is_amortized_by_doubling() {
    let mut ring = GrowableRing::with_capacity(3);
    ring.extend(0..100);
    assert_eq!(ring.len(), 100);
    assert_eq!(ring.capacity(), 192);
    assert!(ring.iter().copied().eq(0..100));
}
