//! Containers backing the Huffman engine: a chained hash set, a map built on
//! top of it, and an array-backed min-heap.

mod map;
mod priority_deque;
mod set;

pub use map::{AssociativeMap, Entries, Entry};
pub use priority_deque::PriorityDeque;
pub use set::{AssociativeSet, Iter};

use crate::errors::EmptyDequeError;

/// A queue that always hands back its lowest-priority value next.
///
/// Tree construction is written against this rather than a concrete heap.
pub trait MinPriorityQueue<P, V> {
    fn insert(&mut self, priority: P, value: V);

    fn remove_min(&mut self) -> Result<V, EmptyDequeError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
