//! Deferred-task queue
//!
//! Tasks fire in (time, insertion) order. Cancellation is lazy: a cancelled
//! handle is remembered and its entry is dropped when it reaches the front.

use ahash::AHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::types::{EventId, Millis, PostId, Topic};

/// Handle returned by `Scheduler::schedule`, used to cancel the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Work the engine performs later
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Momentum lapsed; zero the combo
    ComboReset,
    /// Fill in a player post's engagement and pay out followers
    ResolveEngagement { post_id: PostId, topic: Option<Topic> },
    /// Land a viral follower bonus
    ViralBurst,
    /// Show an achievement
    Achievement { title: String, icon: String },
    ExpireGain(EventId),
    ExpireAchievement(EventId),
    /// Signal victory to the host
    Victory,
    /// Recurring: a simulated user publishes a post
    AutoPost,
    /// Recurring: pick new trending topics
    TrendRotation,
    /// Recurring: auto-engagement payout
    AutoEngagement,
}

#[derive(Debug)]
struct Entry {
    at: Millis,
    seq: u64,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the BinaryHeap pops the earliest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of pending tasks
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Entry>,
    cancelled: AHashSet<u64>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Millis, task: Task) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry { at, seq, task });
        TaskHandle(seq)
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let pending = self.queue.iter().any(|entry| entry.seq == handle.0);
        pending && self.cancelled.insert(handle.0)
    }

    /// Remove and return the earliest task due at or before `now`
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, Task)> {
        loop {
            let head = self.queue.peek()?;
            if head.at > now {
                return None;
            }
            let entry = self.queue.pop()?;
            if self.cancelled.remove(&entry.seq) {
                continue;
            }
            return Some((entry.at, entry.task));
        }
    }

    /// Fire time of the earliest live task
    pub fn next_due(&mut self) -> Option<Millis> {
        while let Some(head) = self.queue.peek() {
            if self.cancelled.contains(&head.seq) {
                let seq = head.seq;
                self.queue.pop();
                self.cancelled.remove(&seq);
            } else {
                return Some(head.at);
            }
        }
        None
    }

    /// Number of live tasks
    pub fn pending(&self) -> usize {
        self.queue.len() - self.cancelled.len()
    }
}
