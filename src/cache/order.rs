//! Access Order Module
//!
//! Tracks key recency for least-recently-used eviction. Shared by the result
//! cache's capacity bound and the arithmetic memo table.

use std::collections::VecDeque;

// == Access Order ==
/// Recency tracker: front = most recently used, back = least recently used.
#[derive(Debug, Default)]
pub struct AccessOrder {
    order: VecDeque<String>,
}

impl AccessOrder {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Promote ==
    /// Marks a key as most recently used, inserting it if new.
    pub fn promote(&mut self, key: &str) {
        self.forget(key);
        self.order.push_front(key.to_string());
    }

    // == Forget ==
    /// Drops a key from the tracker if present.
    pub fn forget(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop LRU ==
    /// Removes and returns the least recently used key, if any.
    pub fn pop_lru(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
