//! Minimal HTTP message broker with long-polling consumers
//!
//! Producers `POST /producer/{topic}` to push opaque payloads into named
//! topics; consumers `GET /consumer/{topic}` to pull them out in FIFO order.
//! A consumer that arrives when a topic is empty is parked (long-polled)
//! until a producer arrives or the topic is purged. `/purge/{topic}` drains
//! a topic's queue and abandons any parked consumer.
//!
//! The rendezvous core lives in [`registry`]; the HTTP surface and server
//! lifecycle live in [`server`].
//!
//! # Example
//!
//! ```no_run
//! use httpmq_rs::{BrokerServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> httpmq_rs::Result<()> {
//!     let server = BrokerServer::new(ServerConfig::default());
//!     server.run().await
//! }
//! ```

pub mod error;
pub mod registry;
pub mod server;

pub use error::{Error, Result};
pub use registry::{Message, PullOutcome, PushOutcome, RegistryError, TopicRegistry};
pub use server::{BrokerServer, ServerConfig};
