//! Server module exposing the chat relay over HTTP.
//!
//! Provides a small REST server with a liveness endpoint and a single relay
//! endpoint that forwards a chat message to the text-generation service and
//! returns its reply.

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::error::BotError;
use crate::providers::TextProvider;
use handlers::{handle_chat, handle_status};

pub use types::{ChatReply, ChatRequest, ErrorBody, StatusBody};

/// Relay server forwarding chat messages to a text provider.
pub struct RelayServer {
    llm: Arc<dyn TextProvider>,
}

/// Internal server state shared between request handlers
#[derive(Clone)]
struct RelayState {
    llm: Arc<dyn TextProvider>,
}

impl RelayServer {
    /// Creates a new relay around the given text provider.
    pub fn new(llm: Arc<dyn TextProvider>) -> Self {
        Self { llm }
    }

    /// Builds the router; kept separate from `run` so tests can drive it
    /// without binding a socket.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handle_status))
            .route("/chat", post(handle_chat))
            .layer(CorsLayer::permissive())
            .with_state(RelayState {
                llm: self.llm.clone(),
            })
    }

    /// Starts the server and listens for requests on the specified address
    ///
    /// # Arguments
    /// * `addr` - Address to bind to (e.g. "0.0.0.0:5000")
    pub async fn run(self, addr: &str) -> Result<(), BotError> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| BotError::InvalidRequest(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| BotError::InvalidRequest(e.to_string()))?;

        Ok(())
    }
}
