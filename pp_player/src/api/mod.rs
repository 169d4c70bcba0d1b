//! HTTP API of the player.
//!
//! # Modules
//!
//! - [`bot`]: The tournament host's bot protocol
//! - [`request_id`]: Request correlation middleware
//!
//! # Endpoints Overview
//!
//! - `POST /` - Bot protocol (form-encoded `action` + `game_state`)
//! - `GET /health` - Liveness probe
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use pp_player::api::{create_router, AppState};
//! use poker_player::Player;
//! use std::sync::Arc;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let state = AppState {
//!     player: Arc::new(Player::default()),
//! };
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:1337").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively: the host may call from any origin.

pub mod bot;
pub mod request_id;

use axum::{
    Router,
    routing::{get, post},
};
use poker_player::Player;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; the player itself is shared, so every table the
/// host runs feeds the same profile store.
#[derive(Clone)]
pub struct AppState {
    pub player: Arc<Player>,
}

/// Create the API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(bot::handle))
        .route("/health", get(health_check))
        .layer(axum::middleware::from_fn(request_id::tag_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
async fn health_check() -> &'static str {
    bot::ACK
}
