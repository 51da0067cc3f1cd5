//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error.
///
/// Everything except `Transport` asks the client to log in again.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("No session cookie present")]
    MissingSession,

    #[error("Access token is malformed or has no expiry claim")]
    MalformedToken,

    #[error("Refresh token missing")]
    MissingRefreshToken,

    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),

    #[error("Authorization code exchange rejected: {0}")]
    Authorization(String),

    #[error("Token endpoint unavailable: {0}")]
    Transport(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingSession => "MISSING_SESSION",
            AuthError::MalformedToken => "MALFORMED_TOKEN",
            AuthError::MissingRefreshToken => "MISSING_REFRESH_TOKEN",
            AuthError::TokenRefresh(_) => "TOKEN_REFRESH_FAILED",
            AuthError::Authorization(_) => "AUTHORIZATION_FAILED",
            AuthError::Transport(_) => "TOKEN_ENDPOINT_UNAVAILABLE",
        }
    }

    /// Message safe to show the client; upstream bodies stay in the logs.
    fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingSession => "Access token missing",
            AuthError::MalformedToken => "Token invalid or expired",
            AuthError::MissingRefreshToken => "Refresh token missing",
            AuthError::TokenRefresh(_) => "Token refresh failed",
            AuthError::Authorization(_) => "Unauthorized",
            AuthError::Transport(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Token endpoint failure");
        } else {
            tracing::info!(error = %self, "Request not authenticated");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.public_message(),
            }
        }));

        (status, body).into_response()
    }
}
