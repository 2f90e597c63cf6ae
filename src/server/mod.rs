//! HTTP server and transport adapter
//!
//! Maps the broker's three operations onto an HTTP surface and owns the
//! listen/serve lifecycle. All protocol decisions live in
//! [`crate::registry`]; this layer only translates requests and responses.

pub mod config;
pub mod http;

pub use config::ServerConfig;
pub use http::BrokerServer;
