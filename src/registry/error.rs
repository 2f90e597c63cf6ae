//! Registry error types
//!
//! Error types for topic registry operations.

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A consumer is already parked on the topic
    ConsumerAlreadyWaiting(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::ConsumerAlreadyWaiting(topic) => {
                write!(f, "topic '{}' already has a waiting consumer", topic)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
