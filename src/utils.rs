//! Utilities

use std::collections::VecDeque;

/// Fixed capacity FIFO that evicts its oldest item when full
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    capacity: usize,
    buff: VecDeque<T>,
}

impl<T> RingBuffer<T> {
    /// Constructor of RingBuffer
    pub fn new(capacity: usize) -> Self {
        let buff = VecDeque::with_capacity(capacity);
        Self { capacity, buff }
    }

    /// Append a new item to the buffer, returning the evicted item if any
    pub fn append(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        let evicted = if self.buff.len() == self.capacity {
            self.buff.pop_front()
        } else {
            None
        };
        self.buff.push_back(item);
        evicted
    }

    /// Number of items currently held
    pub fn len(&self) -> usize {
        self.buff.len()
    }

    /// Whether the buffer holds no item
    pub fn is_empty(&self) -> bool {
        self.buff.is_empty()
    }

    /// Convert to an iterator, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buff.iter()
    }
}
