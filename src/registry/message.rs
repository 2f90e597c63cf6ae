//! Message payload types
//!
//! This module defines the payload unit that producers push and consumers
//! pull. A message is immutable once created and cheap to clone.

use bytes::Bytes;

/// An opaque payload tagged with an optional MIME type
///
/// The body is reference-counted via `Bytes`, so handing a message from a
/// producer to a parked consumer or into a topic queue never copies the
/// payload itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Payload bytes (zero-copy via reference counting)
    pub body: Bytes,
    /// MIME type label attached by the producer, if any
    pub content_type: Option<String>,
}

impl Message {
    /// Create a new message
    pub fn new(body: Bytes, content_type: Option<String>) -> Self {
        Self { body, content_type }
    }

    /// Create a `text/plain` message
    pub fn text(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            content_type: Some("text/plain".to_string()),
        }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
