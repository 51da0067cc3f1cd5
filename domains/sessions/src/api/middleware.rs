//! Sessions domain state

use jobsheet_auth::{CredentialStore, TokenManager};

/// Application state for the Sessions domain
#[derive(Clone, Debug)]
pub struct SessionsState {
    pub tokens: TokenManager,
    pub store: CredentialStore,
}
