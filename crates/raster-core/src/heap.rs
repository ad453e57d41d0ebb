//! Array-backed binary heap priority queue
//!
//! Unlike `std::collections::BinaryHeap`, the ordering comes from a float
//! key extracted by a caller-supplied closure, the direction is chosen at
//! run time, and callers can restore heap order at an arbitrary index after
//! editing an entry in place. The heap stores the values it is given; use
//! references or `Rc`/`Arc` to queue shared items.
//!
//! Keys are compared with plain `<`, so a NaN key never moves past its
//! neighbors.
//!
//! # Examples
//!
//! ```
//! use raster_core::{Heap, SortOrder};
//!
//! let mut heap = Heap::new(SortOrder::Increasing, |v: &(f32, char)| v.0);
//! heap.push((3.0, 'c')).unwrap();
//! heap.push((1.0, 'a')).unwrap();
//! heap.push((2.0, 'b')).unwrap();
//! assert_eq!(heap.pop().map(|v| v.1), Some('a'));
//! assert_eq!(heap.count(), 2);
//! ```

use crate::error::{Error, Result};

const INITIAL_CAPACITY: usize = 20;

/// Heap direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest key at the root (min-heap)
    #[default]
    Increasing,
    /// Largest key at the root (max-heap)
    Decreasing,
}

/// A rejected [`Heap::push`]
///
/// Hands the item back to the caller along with the cause.
#[derive(Debug, thiserror::Error)]
#[error("heap push failed: {error}")]
pub struct PushError<T> {
    /// The item that was not inserted
    pub item: T,
    #[source]
    pub error: Error,
}

impl<T> PushError<T> {
    /// Take back the item that was not inserted.
    pub fn into_item(self) -> T {
        self.item
    }
}

impl<T> From<PushError<T>> for Error {
    fn from(e: PushError<T>) -> Self {
        e.error
    }
}

/// Priority queue keyed by `key(&T)`
pub struct Heap<T, F>
where
    F: Fn(&T) -> f32,
{
    items: Vec<T>,
    order: SortOrder,
    key: F,
}

impl<T, F> Heap<T, F>
where
    F: Fn(&T) -> f32,
{
    /// Create an empty heap with the default initial capacity.
    ///
    /// Allocation is deferred to the first push.
    pub fn new(order: SortOrder, key: F) -> Self {
        Self {
            items: Vec::new(),
            order,
            key,
        }
    }

    /// Create an empty heap holding `capacity` items before growing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot be allocated.
    pub fn with_capacity(capacity: usize, order: SortOrder, key: F) -> Result<Self> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity.max(1))
            .map_err(|_| Error::AllocationFailed)?;
        Ok(Self { items, order, key })
    }

    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Number of items in the heap.
    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items the heap can hold before it must grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Item at array position `index` (0 is the root).
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable access to the item at `index`.
    ///
    /// If the key changes, call [`swap_up`](Self::swap_up) or
    /// [`swap_down`](Self::swap_down) on the same index afterwards.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Items in array order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Add an item.
    ///
    /// The capacity doubles when full.
    ///
    /// # Errors
    ///
    /// Returns a [`PushError`] holding the item and
    /// [`Error::AllocationFailed`] if growing fails; the heap is left
    /// unchanged.
    pub fn push(&mut self, item: T) -> std::result::Result<(), PushError<T>> {
        if let Err(error) = self.grow_if_full() {
            return Err(PushError { item, error });
        }
        let n = self.items.len();
        self.items.push(item);
        self.sift_up(n);
        Ok(())
    }

    fn grow_if_full(&mut self) -> Result<()> {
        let n = self.items.len();
        if n == self.items.capacity() {
            let extra = n.max(INITIAL_CAPACITY);
            self.items
                .try_reserve_exact(extra)
                .map_err(|_| Error::AllocationFailed)?;
            log::debug!("heap grown to capacity {}", self.items.capacity());
        }
        Ok(())
    }

    /// Remove and return the root item.
    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let root = self.items.swap_remove(0);
        let n = self.items.len();
        self.sift_down(0, n);
        Some(root)
    }

    /// Root item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Move the item at `index` toward the root until heap order holds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= count()`.
    pub fn swap_up(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.sift_up(index);
        Ok(())
    }

    /// Move the item at `index` away from the root until heap order holds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= count()`.
    pub fn swap_down(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let n = self.items.len();
        self.sift_down(index, n);
        Ok(())
    }

    /// Rebuild heap order over the whole array.
    pub fn sort(&mut self) {
        let n = self.items.len();
        for i in (0..n / 2).rev() {
            self.sift_down(i, n);
        }
    }

    /// Sort the array completely in the heap's direction.
    ///
    /// The result is also a valid heap.
    pub fn sort_strict_order(&mut self) {
        self.sort();
        let n = self.items.len();
        for end in (1..n).rev() {
            self.items.swap(0, end);
            self.sift_down(0, end);
        }
        self.items.reverse();
    }

    /// Consume the heap, returning the items in array order.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    /// True if item `a` belongs closer to the root than item `b`.
    #[inline]
    fn before(&self, a: usize, b: usize) -> bool {
        let ka = (self.key)(&self.items[a]);
        let kb = (self.key)(&self.items[b]);
        match self.order {
            SortOrder::Increasing => ka < kb,
            SortOrder::Decreasing => ka > kb,
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.before(i, parent) {
                break;
            }
            self.items.swap(i, parent);
            i = parent;
        }
    }

    /// Sift within the first `n` items.
    fn sift_down(&mut self, mut i: usize, n: usize) {
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let child = if right < n && self.before(right, left) {
                right
            } else {
                left
            };
            if !self.before(child, i) {
                break;
            }
            self.items.swap(i, child);
            i = child;
        }
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for Heap<T, F>
where
    F: Fn(&T) -> f32,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heap")
            .field("order", &self.order)
            .field("items", &self.items)
            .finish()
    }
}
