//! HTTP transport adapter
//!
//! Route table:
//!
//! | Route | Core call | Response |
//! |---|---|---|
//! | `POST /producer/{topic}` | push | `200 OK`, empty body |
//! | `GET /consumer/{topic}` | pull | `200 OK` with the message, deferred while parked; `204` if the wait is abandoned by a purge; `409` if another consumer is already parked |
//! | `GET`/`POST /purge/{topic}` | flush | `200 OK`, decimal discarded count |
//! | anything else | none | `400 Bad Request` |

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use tokio::net::TcpListener;

use crate::error::Result;
use crate::registry::{Message, PullOutcome, RegistryError, TopicRegistry};
use crate::server::config::ServerConfig;

/// HTTP message broker server
///
/// Owns the topic registry and serves the broker's HTTP surface. The
/// registry is shared, so a bootstrap can keep a handle to it for
/// out-of-band operations such as a signal-triggered flush-all.
pub struct BrokerServer {
    config: ServerConfig,
    registry: Arc<TopicRegistry>,
}

#[derive(Clone)]
struct AppState {
    registry: Arc<TopicRegistry>,
    default_content_type: String,
}

impl BrokerServer {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            registry: Arc::new(TopicRegistry::new()),
        }
    }

    /// Get a reference to the topic registry
    pub fn registry(&self) -> &Arc<TopicRegistry> {
        &self.registry
    }

    /// Build the broker's router
    ///
    /// Exposed so tests and embedders can serve the broker on a listener
    /// of their own.
    pub fn router(&self) -> Router {
        let state = AppState {
            registry: Arc::clone(&self.registry),
            default_content_type: self.config.default_content_type.clone(),
        };

        Router::new()
            .route("/producer/{topic}", post(handle_push))
            .route("/consumer/{topic}", get(handle_pull))
            .route("/purge/{topic}", get(handle_purge).post(handle_purge))
            .fallback(handle_unknown)
            .with_state(state)
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "HTTP broker listening");

        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "HTTP broker listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

async fn handle_push(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = match headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    {
        Some(value) => value.to_string(),
        None => {
            tracing::warn!(topic = %topic, "producer push without Content-Type");
            return (StatusCode::BAD_REQUEST, "missing Content-Type header\n").into_response();
        }
    };

    let message = Message::new(body, Some(content_type));
    state.registry.push(&topic, message).await;

    // Delivered directly or queued, the producer sees the same answer
    StatusCode::OK.into_response()
}

async fn handle_pull(State(state): State<AppState>, Path(topic): Path<String>) -> Response {
    match state.registry.pull(&topic).await {
        Ok(PullOutcome::Delivered(message)) => {
            message_response(message, &state.default_content_type)
        }
        Ok(PullOutcome::Parked(receiver)) => match receiver.await {
            Ok(message) => message_response(message, &state.default_content_type),
            // The topic was purged while we waited; nobody will resolve us.
            Err(_) => StatusCode::NO_CONTENT.into_response(),
        },
        Err(err @ RegistryError::ConsumerAlreadyWaiting(_)) => {
            tracing::warn!(topic = %topic, "rejecting second consumer");
            (StatusCode::CONFLICT, format!("{}\n", err)).into_response()
        }
    }
}

async fn handle_purge(State(state): State<AppState>, Path(topic): Path<String>) -> Response {
    let discarded = state.registry.flush(&topic).await;

    (
        [(header::CONTENT_TYPE, "text/plain")],
        discarded.to_string(),
    )
        .into_response()
}

async fn handle_unknown(uri: Uri) -> Response {
    tracing::warn!(uri = %uri, "unrecognized request URI");
    (StatusCode::BAD_REQUEST, "unrecognized request URI\n").into_response()
}

fn message_response(message: Message, fallback_content_type: &str) -> Response {
    let content_type = message
        .content_type
        .unwrap_or_else(|| fallback_content_type.to_string());

    ([(header::CONTENT_TYPE, content_type)], message.body).into_response()
}
