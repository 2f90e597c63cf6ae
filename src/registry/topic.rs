//! Per-topic queue and waiter state
//!
//! This module defines the state stored for each topic in the registry: a
//! FIFO queue of messages and a slot for at most one parked consumer.

use std::collections::VecDeque;

use tokio::sync::oneshot;

use super::message::Message;

/// State for a single topic
///
/// Invariant: the queue is non-empty and the waiter slot is occupied never
/// both at once. A push serves the waiter before it may queue, and a pull
/// drains the queue before it may park.
pub struct TopicEntry {
    /// Queued messages, insertion order = delivery order
    queue: VecDeque<Message>,

    /// At most one parked consumer, resolved by a later push or dropped
    /// (abandoned) by a flush
    waiter: Option<oneshot::Sender<Message>>,
}

impl TopicEntry {
    pub(super) fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            waiter: None,
        }
    }

    /// Number of queued messages
    pub fn depth(&self) -> usize {
        self.queue.len()
    }

    /// Whether a consumer handle occupies the waiter slot
    pub fn has_waiter(&self) -> bool {
        self.waiter.is_some()
    }

    /// Snapshot of this topic's state
    pub fn stats(&self) -> TopicStats {
        TopicStats {
            queued: self.queue.len(),
            has_waiter: self.waiter.is_some(),
        }
    }

    /// Whether a parked consumer is still listening
    ///
    /// A waiter whose receiving end has been dropped (the consumer went
    /// away while parked) no longer blocks a new consumer from parking.
    pub(super) fn has_live_waiter(&self) -> bool {
        self.waiter.as_ref().is_some_and(|w| !w.is_closed())
    }

    /// Take the parked consumer handle out of the waiter slot
    pub(super) fn take_waiter(&mut self) -> Option<oneshot::Sender<Message>> {
        self.waiter.take()
    }

    /// Park a consumer and return the handle it awaits
    ///
    /// The caller must have drained the queue first and verified no live
    /// waiter occupies the slot.
    pub(super) fn park(&mut self) -> oneshot::Receiver<Message> {
        let (tx, rx) = oneshot::channel();
        self.waiter = Some(tx);
        rx
    }

    /// Pop the head of the queue
    pub(super) fn pop(&mut self) -> Option<Message> {
        self.queue.pop_front()
    }

    /// Append a message to the tail of the queue
    pub(super) fn enqueue(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Discard all queued messages and abandon any parked consumer
    ///
    /// Dropping the waiter's sender closes the consumer's receiver without
    /// delivering anything. Returns the number of discarded messages; an
    /// abandoned waiter is not counted.
    pub(super) fn drain(&mut self) -> usize {
        let discarded = self.queue.len();
        self.queue.clear();
        self.waiter = None;
        discarded
    }
}

/// Statistics for a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicStats {
    /// Number of queued messages
    pub queued: usize,
    /// Whether a consumer occupies the waiter slot
    pub has_waiter: bool,
}
