//! Jobs domain errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jobsheet_auth::AuthError;
use jobsheet_jobber::JobberError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum JobsError {
    #[error("Jobber rejected the access token")]
    Unauthorized,

    #[error("Upstream protocol error: {0}")]
    UpstreamProtocol(String),

    #[error("Pagination did not finish within {max_pages} pages")]
    PaginationLimitExceeded { max_pages: u32 },

    #[error("Jobber unavailable: {0}")]
    Transport(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Request(#[from] jobsheet_common::Error),
}

impl From<JobberError> for JobsError {
    fn from(error: JobberError) -> Self {
        match error {
            JobberError::Unauthorized => JobsError::Unauthorized,
            JobberError::UpstreamProtocol(message) => JobsError::UpstreamProtocol(message),
            JobberError::Request(message) | JobberError::Configuration(message) => {
                JobsError::Transport(message)
            }
        }
    }
}

impl JobsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            JobsError::Unauthorized => StatusCode::UNAUTHORIZED,
            JobsError::UpstreamProtocol(_)
            | JobsError::PaginationLimitExceeded { .. }
            | JobsError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            JobsError::Auth(e) => e.status_code(),
            JobsError::Request(e) => e.status_code(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            JobsError::Unauthorized => "UNAUTHORIZED",
            JobsError::UpstreamProtocol(_) => "UPSTREAM_PROTOCOL_ERROR",
            JobsError::PaginationLimitExceeded { .. } => "PAGINATION_LIMIT_EXCEEDED",
            JobsError::Transport(_) => "UPSTREAM_UNAVAILABLE",
            JobsError::Auth(e) => e.error_code(),
            JobsError::Request(e) => e.error_code(),
        }
    }
}

impl IntoResponse for JobsError {
    fn into_response(self) -> Response {
        match self {
            JobsError::Auth(e) => e.into_response(),
            JobsError::Request(e) => e.into_response(),
            upstream => upstream.upstream_response(),
        }
    }
}

impl JobsError {
    /// Upstream failures keep their detail in the logs only.
    fn upstream_response(&self) -> Response {
        let message = if matches!(self, JobsError::Unauthorized) {
            tracing::info!("Jobber rejected the session's access token");
            "Unauthorized"
        } else {
            tracing::error!(error = %self, "Failed to fetch jobs");
            "Internal server error"
        };

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        }));

        (self.status_code(), body).into_response()
    }
}
