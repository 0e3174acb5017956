//! Recency Queue Module
//!
//! Keeps cache keys ordered by last access so the store knows which entry
//! to drop when it hits capacity.

use std::collections::VecDeque;

// == Recency Queue ==
/// Ordered index over the store's keys. The back of the deque holds the key
/// touched most recently; the front holds the next eviction candidate.
///
/// Lookups are linear, which is fine at the store's capacity bound.
#[derive(Debug, Default)]
pub struct RecencyQueue {
    recency: VecDeque<String>,
}

impl RecencyQueue {
    pub fn new() -> Self {
        Self {
            recency: VecDeque::new(),
        }
    }

    // == Recency updates ==

    /// Moves a key to the most-recent position, registering it on first sight.
    pub fn touch(&mut self, key: &str) {
        if let Some(idx) = self.position(key) {
            self.recency.remove(idx);
        }
        self.recency.push_back(key.to_string());
    }

    /// Forgets a key entirely. Unknown keys are ignored.
    pub fn forget(&mut self, key: &str) {
        if let Some(idx) = self.position(key) {
            self.recency.remove(idx);
        }
    }

    // == Eviction ==

    /// Takes the stalest key out of the queue, or `None` when empty.
    pub fn pop_stalest(&mut self) -> Option<String> {
        self.recency.pop_front()
    }

    /// Shows the stalest key without disturbing the order.
    #[allow(dead_code)]
    pub fn peek_stalest(&self) -> Option<&String> {
        self.recency.front()
    }

    // == Introspection ==

    pub fn len(&self) -> usize {
        self.recency.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.recency.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.recency.iter().position(|k| k == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"books:detail:{"isbn":"9788966262281"}"#;
    const SEARCH: &str = r#"books:search:{"keyword":"rust","page":1}"#;
    const REGION: &str = r#"libraries:region:{"region":"11"}"#;

    #[test]
    fn test_stalest_key_is_first_out() {
        let mut queue = RecencyQueue::new();
        queue.touch(DETAIL);
        queue.touch(SEARCH);
        queue.touch(REGION);

        assert_eq!(queue.pop_stalest().as_deref(), Some(DETAIL));
        assert_eq!(queue.pop_stalest().as_deref(), Some(SEARCH));
        assert_eq!(queue.pop_stalest().as_deref(), Some(REGION));
        assert_eq!(queue.pop_stalest(), None);
    }

    #[test]
    fn test_retouching_changes_eviction_order() {
        let mut queue = RecencyQueue::new();
        queue.touch(DETAIL);
        queue.touch(SEARCH);
        queue.touch(REGION);

        // A cache hit on the oldest key shields it from eviction.
        queue.touch(DETAIL);

        assert_eq!(queue.peek_stalest().map(String::as_str), Some(SEARCH));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_touch_never_duplicates_a_key() {
        let mut queue = RecencyQueue::new();
        for _ in 0..4 {
            queue.touch(SEARCH);
        }

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_stalest().as_deref(), Some(SEARCH));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_forget_skips_eviction() {
        let mut queue = RecencyQueue::new();
        queue.touch(DETAIL);
        queue.touch(SEARCH);

        // Overwritten entries leave the queue without counting as evictions.
        queue.forget(DETAIL);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_stalest().map(String::as_str), Some(SEARCH));
    }

    #[test]
    fn test_forget_of_unseen_key_changes_nothing() {
        let mut queue = RecencyQueue::new();
        queue.touch(REGION);

        queue.forget("books:popular:{}");

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_stalest().map(String::as_str), Some(REGION));
    }

    #[test]
    fn test_peek_is_nondestructive() {
        let mut queue = RecencyQueue::new();
        queue.touch(DETAIL);

        assert_eq!(queue.peek_stalest().map(String::as_str), Some(DETAIL));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_stalest().as_deref(), Some(DETAIL));
    }
}
