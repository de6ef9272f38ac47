//! Binary min-heap with in-place key decrease.
//!
//! Items are ordered by an `f64` key. Unlike `std::collections::BinaryHeap`,
//! an item already in the queue can have its key lowered with
//! [`update`](PriorityQueue::update), which keeps at most one entry per item
//! instead of leaving stale duplicates behind.

/// An entry in the queue.
#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    key: f64,
}

/// A min-heap keyed by `f64`.
///
/// Ties are not broken by any secondary key: among equal keys, whichever
/// entry the sift operations leave higher in the heap is popped first.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: Vec<Entry<T>>,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    /// Insert `item` with priority `key`.
    pub fn push(&mut self, item: T, key: f64) {
        self.heap.push(Entry { item, key });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the entry with the smallest key.
    pub fn pop(&mut self) -> Option<(T, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap.swap_remove(0);
        if self.heap.len() > 1 {
            self.sift_down(0);
        }
        Some((top.item, top.key))
    }

    /// The entry with the smallest key, without removing it.
    pub fn peek(&self) -> Option<(&T, f64)> {
        self.heap.first().map(|e| (&e.item, e.key))
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Entries in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.heap.iter().map(|e| (&e.item, e.key))
    }

    /// Whether every entry's key is no smaller than its parent's.
    pub fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2].key <= self.heap[i].key)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[parent].key <= self.heap[i].key {
                break;
            }
            self.heap.swap(parent, i);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let mut child = left;
            let right = left + 1;
            if right < len && self.heap[left].key > self.heap[right].key {
                child = right;
            }
            if self.heap[i].key <= self.heap[child].key {
                break;
            }
            self.heap.swap(i, child);
            i = child;
        }
    }
}

impl<T: PartialEq> PriorityQueue<T> {
    /// Lower the key of `item` to `key` and restore heap order.
    ///
    /// Locating the item is a linear scan. Only decreases are supported:
    /// the entry is only ever moved towards the root. Returns `false` if
    /// `item` is not in the queue.
    pub fn update(&mut self, item: &T, key: f64) -> bool {
        let Some(i) = self.heap.iter().position(|e| e.item == *item) else {
            return false;
        };
        debug_assert!(key <= self.heap[i].key, "update must not raise a key");
        self.heap[i].key = key;
        self.sift_up(i);
        true
    }

    /// Whether `item` is in the queue.
    pub fn contains(&self, item: &T) -> bool {
        self.heap.iter().any(|e| e.item == *item)
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
