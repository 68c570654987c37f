use std::fmt;

use super::MinPriorityQueue;
use crate::errors::EmptyDequeError;

/// A min-heap of `(priority, value)` pairs, kept as a complete binary tree in
/// a `Vec`.
///
/// The children of slot `i` live at `2i + 1` and `2i + 2`. Equal priorities
/// come out in whatever order the heap shape dictates.
#[derive(Clone)]
pub struct PriorityDeque<P, V> {
    heap: Vec<(P, V)>,
}

impl<P, V> PriorityDeque<P, V> {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Peek at a minimum-priority pair.
    pub fn min(&self) -> Option<(&P, &V)> {
        self.heap.first().map(|(p, v)| (p, v))
    }
}

impl<P: Ord, V> PriorityDeque<P, V> {
    pub fn insert(&mut self, priority: P, value: V) {
        self.heap.push((priority, value));
        self.sift_up(self.heap.len() - 1);
    }

    pub fn remove_min(&mut self) -> Result<V, EmptyDequeError> {
        self.remove_min_entry().map(|(_, value)| value)
    }

    pub fn remove_min_entry(&mut self) -> Result<(P, V), EmptyDequeError> {
        if self.heap.is_empty() {
            return Err(EmptyDequeError);
        }

        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let min = self.heap.pop().ok_or(EmptyDequeError)?;
        self.sift_down(0);

        Ok(min)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].0 >= self.heap[parent].0 {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let l = 2 * i + 1;
            let r = l + 1;

            let mut smallest = i;
            if l < n && self.heap[l].0 < self.heap[smallest].0 {
                smallest = l;
            }
            if r < n && self.heap[r].0 < self.heap[smallest].0 {
                smallest = r;
            }

            if smallest == i {
                return;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }

    #[cfg(test)]
    fn is_valid_heap(&self) -> bool {
        let heap = &self.heap;
        (1..heap.len()).all(|i| heap[(i - 1) / 2].0 <= heap[i].0)
    }
}

impl<P: Ord, V> MinPriorityQueue<P, V> for PriorityDeque<P, V> {
    fn insert(&mut self, priority: P, value: V) {
        PriorityDeque::insert(self, priority, value)
    }

    fn remove_min(&mut self) -> Result<V, EmptyDequeError> {
        PriorityDeque::remove_min(self)
    }

    fn len(&self) -> usize {
        PriorityDeque::len(self)
    }
}

impl<P, V> Default for PriorityDeque<P, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Debug, V: fmt::Debug> fmt::Debug for PriorityDeque<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.heap.iter()).finish()
    }
}
