//! Jobs domain state

use std::sync::Arc;

use jobsheet_auth::{CredentialStore, TokenManager};
use jobsheet_jobber::JobsApi;

/// Application state for the Jobs domain
#[derive(Clone)]
pub struct JobsState {
    pub tokens: TokenManager,
    pub store: CredentialStore,
    pub jobs: Arc<dyn JobsApi>,
    /// Upper bound on GraphQL pages per request
    pub max_pages: u32,
}
