//! Array-backed binary heap ordered by a caller-supplied comparison.
//!
//! Unlike [`std::collections::BinaryHeap`], the ordering is a value rather
//! than an `Ord` impl, so one element type can be queued best-first under
//! different criteria. Ties are extracted in no particular order.

use std::cmp::Ordering;
use std::fmt;

const INITIAL_CAPACITY: usize = 4;

/// A binary max-heap with respect to its comparison function.
///
/// The element for which the comparison returns [`Ordering::Greater`] against
/// every other element is extracted first. Use [`PriorityQueue::new_min`] for
/// lowest-first ordering.
pub struct PriorityQueue<T, F = fn(&T, &T) -> Ordering> {
    data: Vec<T>,
    cmp: F,
}

impl<T: Ord> PriorityQueue<T> {
    /// Queue that extracts the greatest element first (natural ordering).
    pub fn new() -> Self {
        Self::with_comparison(T::cmp)
    }

    /// Queue that extracts the smallest element first.
    pub fn new_min() -> Self {
        Self::with_comparison(|a: &T, b: &T| b.cmp(a))
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Queue ordered by `cmp`; the greatest element is extracted first.
    pub fn with_comparison(cmp: F) -> Self {
        Self {
            data: Vec::with_capacity(INITIAL_CAPACITY),
            cmp,
        }
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// The element that [`extract_best`](Self::extract_best) would return.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Remove every element, keeping the storage.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Add an element. O(log n).
    ///
    /// The backing storage doubles when full.
    pub fn insert(&mut self, item: T) {
        if self.data.len() == self.data.capacity() {
            let grow = self.data.capacity().max(INITIAL_CAPACITY);
            self.data.reserve_exact(grow);
        }
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the best element. O(log n).
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn extract_best(&mut self) -> T {
        assert!(!self.data.is_empty(), "extract_best on an empty priority queue");
        let item = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        item
    }

    /// Remove and return the best element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            None
        } else {
            Some(self.extract_best())
        }
    }

    #[inline]
    fn greater(&self, a: usize, b: usize) -> bool {
        (self.cmp)(&self.data[a], &self.data[b]) == Ordering::Greater
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.greater(child, parent) {
                break;
            }
            self.data.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * parent + 1;
            let right = left + 1;
            let mut best = parent;
            if left < len && self.greater(left, best) {
                best = left;
            }
            if right < len && self.greater(right, best) {
                best = right;
            }
            if best == parent {
                break;
            }
            self.data.swap(parent, best);
            parent = best;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for PriorityQueue<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.data.len())
            .field("capacity", &self.data.capacity())
            .field("data", &self.data)
            .finish()
    }
}
