//! Stable min-priority queue.
//!
//! `BinaryHeap` is a max-heap and gives no order between equal keys, so every entry carries
//! an insertion counter: lower priority comes out first, and among equal priorities the
//! entry enqueued first comes out first.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct QueueEntry<T> {
    priority: f64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for QueueEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for QueueEntry<T> {}

impl<T> PartialOrd for QueueEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for QueueEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed on both keys: the max-heap top is the smallest (priority, seq)
        // NaN priorities sink to the bottom of the heap
        let by_priority = match (self.priority.is_nan(), other.priority.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => other
                .priority
                .partial_cmp(&self.priority)
                .unwrap_or(Ordering::Equal),
        };
        by_priority.then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone)]
pub struct StablePriorityQueue<T> {
    heap: BinaryHeap<QueueEntry<T>>,
    next_seq: u64,
}

impl<T> StablePriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn enqueue(&mut self, item: T, priority: f64) {
        self.heap.push(QueueEntry {
            priority,
            seq: self.next_seq,
            item,
        });
        self.next_seq += 1;
    }
    /// removes the entry with the lowest priority, the oldest one among ties
    pub fn dequeue(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }
    /// like `dequeue`, also returning the priority
    pub fn dequeue_with_priority(&mut self) -> Option<(T, f64)> {
        self.heap.pop().map(|entry| (entry.item, entry.priority))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for StablePriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
