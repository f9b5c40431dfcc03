//! Participant queue.
//!
//! A bounded FIFO of participants where each name appears at most once.
//! Insertion order is wait order. Membership checks scan linearly; the queue
//! is capped at a few hundred entries at most.

use crate::error::QueueError;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Capacity used when the config does not set one.
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Number of names shown by [`Queue::render`].
pub const PREVIEW_COUNT: usize = 3;

/// Number of participants removed by a pop without a count.
pub const DEFAULT_POP_COUNT: usize = 1;

/// Someone waiting in the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            joined_at: Utc::now(),
        }
    }
}

/// The waiting list.
#[derive(Debug)]
pub struct Queue {
    entries: VecDeque<Participant>,
    max_size: usize,
}

impl Default for Queue {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl Queue {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Participants in wait order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.entries.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|p| p.name == name)
    }

    /// Add `name` at the tail.
    ///
    /// A name already waiting is left where it is and gets a notice instead
    /// of a confirmation.
    pub fn join(&mut self, name: &str) -> Result<String, QueueError> {
        if self.entries.len() >= self.max_size {
            return Err(QueueError::Full {
                max: self.max_size,
            });
        }

        if self.contains(name) {
            info!(name = %name, "Already in queue, skipping");
            return Ok(format!("@{name} you are already in queue"));
        }

        self.entries.push_back(Participant::new(name));
        info!(name = %name, len = self.entries.len(), "Joined queue");
        Ok(format!("{name} has joined the queue"))
    }

    /// Remove the first entry named `name`.
    pub fn leave(&mut self, name: &str) -> String {
        match self.position(name) {
            Some(index) => {
                self.entries.remove(index);
                info!(name = %name, len = self.entries.len(), "Left queue");
                format!("{name} has left the queue")
            }
            None => format!("@{name} you are not in queue"),
        }
    }

    /// Remove up to `count` participants from the head and announce them.
    ///
    /// Requests beyond the current length take everyone. A count of zero is
    /// treated as [`DEFAULT_POP_COUNT`].
    pub fn pop_front(&mut self, count: usize) -> Result<String, QueueError> {
        if self.entries.is_empty() {
            return Err(QueueError::Empty);
        }

        let requested = if count == 0 { DEFAULT_POP_COUNT } else { count };
        let count = requested.min(self.entries.len());
        if count < requested {
            debug!(
                requested,
                available = count,
                "Pop larger than queue, popping entire queue"
            );
        }

        let now = Utc::now();
        let names: Vec<String> = self
            .entries
            .drain(..count)
            .map(|p| {
                let waited = now.signed_duration_since(p.joined_at).num_seconds();
                debug!(name = %p.name, waited_secs = waited, "Popped from queue");
                p.name
            })
            .collect();

        info!(popped = names.len(), remaining = self.entries.len(), "Popped players");
        Ok(format!("Next player(s): {}", names.join(", ")))
    }

    /// Short preview of the head of the queue.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "Queue is empty".to_string();
        }

        let total = self.entries.len();
        let shown = total.min(PREVIEW_COUNT);
        let mut out = String::from("Queue: ");

        for (i, participant) in self.entries.iter().take(shown).enumerate() {
            out.push_str(&participant.name);
            if i + 1 < total {
                if i + 1 == PREVIEW_COUNT {
                    out.push_str(" ...");
                } else {
                    out.push_str(", ");
                }
            }
        }

        let remaining = total - shown;
        if remaining > 0 {
            out.push_str(&format!(" ({remaining} more)"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(names: &[&str]) -> Queue {
        let mut queue = Queue::default();
        for name in names {
            queue.join(name).unwrap();
        }
        queue
    }

    fn names(queue: &Queue) -> Vec<&str> {
        queue.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn join_appends_in_order() {
        let mut queue = Queue::default();
        assert_eq!(queue.join("alice").unwrap(), "alice has joined the queue");
        assert_eq!(queue.join("bob").unwrap(), "bob has joined the queue");
        assert_eq!(names(&queue), ["alice", "bob"]);
    }

    #[test]
    fn duplicate_join_is_a_notice() {
        let mut queue = queue_of(&["alice", "bob"]);
        assert_eq!(
            queue.join("alice").unwrap(),
            "@alice you are already in queue"
        );
        assert_eq!(names(&queue), ["alice", "bob"]);
    }

    #[test]
    fn join_then_leave_restores_state() {
        let mut queue = queue_of(&["alice", "bob"]);
        queue.join("carol").unwrap();
        assert_eq!(queue.leave("carol"), "carol has left the queue");
        assert_eq!(names(&queue), ["alice", "bob"]);
    }

    #[test]
    fn join_fails_when_full() {
        let mut queue = Queue::new(2);
        queue.join("a").unwrap();
        queue.join("b").unwrap();

        assert_eq!(queue.join("c"), Err(QueueError::Full { max: 2 }));
        assert_eq!(names(&queue), ["a", "b"]);
    }

    #[test]
    fn full_check_precedes_duplicate_check() {
        let mut queue = Queue::new(1);
        queue.join("a").unwrap();
        assert_eq!(queue.join("a"), Err(QueueError::Full { max: 1 }));
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut queue = Queue::new(DEFAULT_MAX_SIZE);
        for i in 0..DEFAULT_MAX_SIZE {
            queue.join(&format!("player{i}")).unwrap();
        }
        assert_eq!(queue.len(), DEFAULT_MAX_SIZE);
        assert!(queue.join("latecomer").is_err());
        assert_eq!(queue.len(), DEFAULT_MAX_SIZE);
        assert!(!queue.contains("latecomer"));
    }

    #[test]
    fn leave_missing_name_is_a_notice() {
        let mut queue = queue_of(&["alice"]);
        assert_eq!(queue.leave("X"), "@X you are not in queue");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn leave_removes_from_middle() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.leave("b");
        assert_eq!(names(&queue), ["a", "c"]);
    }

    #[test]
    fn pop_takes_from_head() {
        let mut queue = queue_of(&["a", "b", "c"]);
        assert_eq!(queue.pop_front(2).unwrap(), "Next player(s): a, b");
        assert_eq!(names(&queue), ["c"]);
    }

    #[test]
    fn pop_single() {
        let mut queue = queue_of(&["a", "b"]);
        assert_eq!(queue.pop_front(1).unwrap(), "Next player(s): a");
    }

    #[test]
    fn pop_zero_takes_one() {
        let mut queue = queue_of(&["a", "b"]);
        assert_eq!(queue.pop_front(0).unwrap(), "Next player(s): a");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn pop_over_request_takes_everyone() {
        let mut queue = queue_of(&["a", "b"]);
        assert_eq!(queue.pop_front(10).unwrap(), "Next player(s): a, b");
        assert!(queue.is_empty());
    }

    #[test]
    fn pop_empty_fails_without_mutation() {
        let mut queue = Queue::new(5);
        assert_eq!(queue.pop_front(1), Err(QueueError::Empty));
        assert!(queue.is_empty());
        assert_eq!(queue.max_size(), 5);
    }

    #[test]
    fn popped_names_can_rejoin() {
        let mut queue = queue_of(&["a"]);
        queue.pop_front(1).unwrap();
        assert_eq!(queue.join("a").unwrap(), "a has joined the queue");
    }

    #[test]
    fn render_empty() {
        assert_eq!(Queue::default().render(), "Queue is empty");
    }

    #[test]
    fn render_short_queues() {
        assert_eq!(queue_of(&["A"]).render(), "Queue: A");
        assert_eq!(queue_of(&["A", "B"]).render(), "Queue: A, B");
        assert_eq!(queue_of(&["A", "B", "C"]).render(), "Queue: A, B, C");
    }

    #[test]
    fn render_long_queue_elides_tail() {
        assert_eq!(
            queue_of(&["A", "B", "C", "D"]).render(),
            "Queue: A, B, C ... (1 more)"
        );
        assert_eq!(
            queue_of(&["A", "B", "C", "D", "E"]).render(),
            "Queue: A, B, C ... (2 more)"
        );
    }
}
