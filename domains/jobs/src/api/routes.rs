//! Route definitions for Jobs domain API

use axum::{routing::post, Router};

use super::handlers::jobs;
use super::middleware::JobsState;

/// Create all Jobs domain API routes
pub fn routes() -> Router<JobsState> {
    Router::new().route("/jobs", post(jobs::fetch_jobs))
}
