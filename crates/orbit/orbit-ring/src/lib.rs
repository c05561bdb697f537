//! Fixed-slot ring buffer with list-like mutation.
//!
//! [`RingBuffer`] maps an order-preserving sequence onto circular storage and
//! offers push/pop at both ends, positional insert/erase through [`Cursor`]s,
//! assign and resize. What happens when the ring is full is decided by its
//! [`OverflowPolicy`]:
//! - [`BoundedRing`] evicts: pushing onto a full ring overwrites the element
//!   at the far end.
//! - [`GrowableRing`] reallocates to double the capacity and keeps everything.
//!
//! Rings are single-threaded containers with no internal synchronization.

mod buffer;
mod bulk;
mod cursor;
mod error;
mod iter;
mod policy;
mod storage;

pub use buffer::{BoundedRing, GrowableRing, RingBuffer, swap};
pub use cursor::{Cursor, RevCursor};
pub use error::RingError;
pub use iter::{IntoIter, Iter, IterMut};
pub use policy::{Grow, OverflowPolicy, Overwrite};
