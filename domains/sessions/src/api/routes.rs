//! Route definitions for Sessions domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::sessions;
use super::middleware::SessionsState;

/// Create all Sessions domain API routes
pub fn routes() -> Router<SessionsState> {
    Router::new()
        .route("/login", post(sessions::login))
        .route("/authenticate", get(sessions::authenticate))
        .route("/logout", post(sessions::logout))
}
