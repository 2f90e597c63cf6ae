//! Topic registry implementation
//!
//! The central registry that owns all topics and runs the push/pull/flush
//! protocol on them.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex, RwLock};

use super::error::RegistryError;
use super::message::Message;
use super::topic::{TopicEntry, TopicStats};

/// Result of pushing a message into a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The message was handed directly to a parked consumer
    Delivered,
    /// The message was appended to the topic's queue
    Queued,
}

/// Result of pulling from a topic
#[derive(Debug)]
pub enum PullOutcome {
    /// The head of the queue, delivered immediately
    Delivered(Message),
    /// The queue was empty; await the receiver until a producer arrives.
    /// The receiver closes without a value if the topic is flushed first.
    Parked(oneshot::Receiver<Message>),
}

/// Central registry for all topics
///
/// Thread-safe: the name table is behind an `RwLock` and each topic behind
/// its own `Mutex`, so push, pull, and flush are atomic per topic while
/// different topics proceed in parallel. A parked pull holds no lock while
/// suspended.
pub struct TopicRegistry {
    /// Map of topic name to topic entry
    topics: RwLock<HashMap<String, Arc<Mutex<TopicEntry>>>>,
}

impl TopicRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
        }
    }

    /// Return the topic for `name`, creating it if absent
    ///
    /// Name matching is exact byte-for-byte equality; no normalization.
    /// Creation happens under the table's write lock, so concurrent calls
    /// with the same new name produce exactly one topic.
    pub async fn lookup_or_create(&self, name: &str) -> Arc<Mutex<TopicEntry>> {
        if let Some(entry) = self.topics.read().await.get(name) {
            return Arc::clone(entry);
        }

        let mut topics = self.topics.write().await;
        // A racing create may have inserted between the read and the write
        // lock; the entry API resolves both cases to a single topic.
        let entry = topics
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(topic = %name, "topic created");
                Arc::new(Mutex::new(TopicEntry::new()))
            });
        Arc::clone(entry)
    }

    /// Push a message into a topic
    ///
    /// A parked consumer is served before the queue: if one is waiting, the
    /// message resolves its pull directly and never touches the queue.
    pub async fn push(&self, name: &str, message: Message) -> PushOutcome {
        let entry = self.lookup_or_create(name).await;
        let mut topic = entry.lock().await;

        if let Some(waiter) = topic.take_waiter() {
            match waiter.send(message) {
                Ok(()) => {
                    tracing::debug!(topic = %name, "message handed to parked consumer");
                    return PushOutcome::Delivered;
                }
                Err(message) => {
                    // The parked consumer went away without being resolved;
                    // keep the message instead of losing it.
                    tracing::warn!(topic = %name, "parked consumer gone, queueing message");
                    topic.enqueue(message);
                    return PushOutcome::Queued;
                }
            }
        }

        tracing::debug!(topic = %name, bytes = message.len(), "message queued");
        topic.enqueue(message);
        PushOutcome::Queued
    }

    /// Pull a message from a topic
    ///
    /// Delivers the head of the queue if one is queued. On an empty topic
    /// the caller is parked, unless another consumer is already parked
    /// there, which is rejected rather than orphaning the first waiter.
    pub async fn pull(&self, name: &str) -> Result<PullOutcome, RegistryError> {
        let entry = self.lookup_or_create(name).await;
        let mut topic = entry.lock().await;

        if let Some(message) = topic.pop() {
            tracing::debug!(topic = %name, bytes = message.len(), "popped message from queue");
            return Ok(PullOutcome::Delivered(message));
        }

        if topic.has_live_waiter() {
            return Err(RegistryError::ConsumerAlreadyWaiting(name.to_string()));
        }

        tracing::debug!(topic = %name, "queue empty, parking consumer");
        Ok(PullOutcome::Parked(topic.park()))
    }

    /// Flush a single topic by exact name
    ///
    /// Discards every queued message and abandons a parked consumer without
    /// resolving it. An absent topic is a no-op; flush never creates one.
    /// Returns the number of discarded messages.
    pub async fn flush(&self, name: &str) -> usize {
        let entry = match self.topics.read().await.get(name) {
            Some(entry) => Arc::clone(entry),
            None => return 0,
        };

        let discarded = entry.lock().await.drain();
        tracing::info!(topic = %name, discarded, "flushed topic");
        discarded
    }

    /// Flush every topic currently in the registry exactly once
    pub async fn flush_all(&self) {
        let entries: Vec<(String, Arc<Mutex<TopicEntry>>)> = self
            .topics
            .read()
            .await
            .iter()
            .map(|(name, entry)| (name.clone(), Arc::clone(entry)))
            .collect();

        for (name, entry) in entries {
            let discarded = entry.lock().await.drain();
            tracing::info!(topic = %name, discarded, "flushed topic");
        }
    }

    /// Get topic statistics
    pub async fn stats(&self, name: &str) -> Option<TopicStats> {
        let entry = match self.topics.read().await.get(name) {
            Some(entry) => Arc::clone(entry),
            None => return None,
        };

        let topic = entry.lock().await;
        Some(topic.stats())
    }

    /// Total number of topics
    pub async fn topic_count(&self) -> usize {
        self.topics.read().await.len()
    }
}

impl Default for TopicRegistry {
    fn default() -> Self {
        Self::new()
    }
}
