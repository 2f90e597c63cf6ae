//! Topic registry and producer/consumer rendezvous
//!
//! The registry manages named topics and decides, for every push and pull,
//! whether the two sides meet directly or go through the topic's queue.
//! A consumer that pulls from an empty topic is parked on a
//! `tokio::sync::oneshot` channel until a producer or a flush arrives.
//!
//! # Architecture
//!
//! ```text
//!                       Arc<TopicRegistry>
//!                 ┌───────────────────────────────┐
//!                 │ topics: HashMap<String,       │
//!                 │   TopicEntry {                │
//!                 │     queue: VecDeque<Message>, │
//!                 │     waiter: oneshot::Tx,      │
//!                 │   }                           │
//!                 │ >                             │
//!                 └──────────────┬────────────────┘
//!                                │
//!              ┌─────────────────┼─────────────────┐
//!              │                 │                 │
//!              ▼                 ▼                 ▼
//!         [Producer]        [Consumer]         [Purge]
//!         push(name)        pull(name)         flush(name)
//!              │                 │
//!              └──► waiter? ──► oneshot ──► parked pull resolves
//!                      │
//!                      └─ none ──► queue (FIFO)
//! ```
//!
//! # Rendezvous rules
//!
//! A push serves the parked waiter before it may queue; a pull drains the
//! queue before it may park. Together these keep a message from ever sitting
//! unseen behind a waiter, and keep the queue and the waiter slot from being
//! occupied at the same time.

pub mod error;
pub mod message;
pub mod store;
pub mod topic;

pub use error::RegistryError;
pub use message::Message;
pub use store::{PullOutcome, PushOutcome, TopicRegistry};
pub use topic::{TopicEntry, TopicStats};
