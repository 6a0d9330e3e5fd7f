//! Deadline-ordered queue of deferred tasks.
//!
//! Tasks are fire-and-forget: there is no cancellation. Consumers attach
//! their own validity guard to each task and drop stale ones when they fire.
//! Tasks with equal deadlines pop in the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A task waiting for its deadline
#[derive(Debug, Clone)]
pub struct Scheduled<T> {
    /// Absolute deadline in clock milliseconds
    pub deadline_ms: u64,
    seq: u64,
    /// The deferred work
    pub task: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline_ms == other.deadline_ms && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    // Reversed: BinaryHeap is a max-heap and we want the earliest first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline_ms
            .cmp(&self.deadline_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Queue of deferred tasks ordered by deadline, then scheduling order
#[derive(Debug, Clone)]
pub struct TaskQueue<T> {
    heap: BinaryHeap<Scheduled<T>>,
    next_seq: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `task` to run `delay_ms` after `now_ms`
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, task: T) -> u64 {
        let deadline_ms = now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled {
            deadline_ms,
            seq,
            task,
        });
        deadline_ms
    }

    /// Pop the earliest task whose deadline is at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<T> {
        if self.heap.peek()?.deadline_ms > now_ms {
            return None;
        }
        self.heap.pop().map(|s| s.task)
    }

    /// Earliest pending deadline
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|s| s.deadline_ms)
    }

    /// Number of pending tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue() {
        let mut queue: TaskQueue<u8> = TaskQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
        assert_eq!(queue.pop_due(u64::MAX), None);
    }

    #[test]
    fn test_pops_in_deadline_order() {
        let mut queue = TaskQueue::new();
        queue.schedule(0, 600, "next");
        queue.schedule(0, 300, "reveal");
        queue.schedule(0, 400, "explain");

        assert_eq!(queue.next_deadline(), Some(300));
        assert_eq!(queue.pop_due(1000), Some("reveal"));
        assert_eq!(queue.pop_due(1000), Some("explain"));
        assert_eq!(queue.pop_due(1000), Some("next"));
        assert_eq!(queue.pop_due(1000), None);
    }

    #[test]
    fn test_not_due_yet() {
        let mut queue = TaskQueue::new();
        queue.schedule(100, 300, 1);
        assert_eq!(queue.pop_due(399), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(400), Some(1));
    }

    #[test]
    fn test_equal_deadlines_keep_schedule_order() {
        let mut queue = TaskQueue::new();
        for i in 0..5 {
            queue.schedule(0, 400, i);
        }
        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(400)).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_schedule_returns_deadline() {
        let mut queue = TaskQueue::new();
        assert_eq!(queue.schedule(1_000, 250, ()), 1_250);
        assert_eq!(queue.schedule(u64::MAX, 1, ()), u64::MAX);
    }
}
