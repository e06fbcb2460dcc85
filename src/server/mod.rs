//! HTTP API served by `chattr-server`.
//!
//! | Method | Path                | Body / response                                  |
//! |--------|---------------------|--------------------------------------------------|
//! | GET    | `/health`           | `{status, version, llmConfigured}`               |
//! | GET    | `/api/languages`    | `{languages, default}`                           |
//! | GET    | `/api/characters`   | `{characters, default}`                          |
//! | POST   | `/api/translate`    | [`TranslateRequest`] → `{result}`                |
//! | POST   | `/api/conversation` | [`ConversationRequest`] → [`ConversationReply`]  |
//!
//! Errors are `{message, fallback?}` with status 400 or 500.
//!
//! [`TranslateRequest`]: crate::conversation::TranslateRequest
//! [`ConversationRequest`]: crate::conversation::ConversationRequest
//! [`ConversationReply`]: crate::conversation::ConversationReply

pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::conversation::ChatService;

pub use error::{ApiError, ErrorBody};
pub use handlers::HealthResponse;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ChatService>,
}

impl AppState {
    pub fn new(service: ChatService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/languages", get(handlers::languages))
        .route("/api/characters", get(handlers::characters))
        .route("/api/translate", post(handlers::translate))
        .route("/api/conversation", post(handlers::conversation))
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until the listener fails.
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("HTTP API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
