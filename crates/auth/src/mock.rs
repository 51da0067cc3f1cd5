//! Mock Token Endpoint Implementation
//!
//! Programmable mock for testing the token lifecycle:
//! - `MockTokenEndpoint`: scripted responses with grant recording
//! - `MockTokenOutcome`: issue a fresh token, return a fixed grant, reject, or fail
//!
//! Also backs the `mock` token provider for local development.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::claims::AccessClaims;
use crate::endpoint::{TokenEndpoint, TokenEndpointError};
use crate::types::{GrantRequest, TokenGrant};

/// Lifetime of tokens minted by `MockTokenOutcome::Issue`
pub const MOCK_TOKEN_LIFETIME_SECS: i64 = 3600;

/// What the mock answers to the next grant
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MockTokenOutcome {
    /// Mint a decodable access token and a new refresh token
    #[default]
    Issue,
    /// Return this body verbatim
    Grant(TokenGrant),
    /// Non-2xx response
    Reject { status: u16, body: String },
    /// Transport failure
    Fail(String),
}

/// Mint an access token whose `exp` claim is `lifetime_secs` from now.
pub fn mint_access_token(lifetime_secs: i64) -> String {
    let claims = AccessClaims {
        exp: Utc::now().timestamp() + lifetime_secs,
    };
    // HS256 with a static key; nothing verifies the signature.
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"mock-token-endpoint"),
    )
    .unwrap_or_default()
}

#[derive(Debug, Default)]
struct MockState {
    scripted: VecDeque<MockTokenOutcome>,
    fallback: MockTokenOutcome,
    history: Vec<GrantRequest>,
    issued: u64,
}

/// Mock token endpoint with programmable behavior
#[derive(Debug, Clone, Default)]
pub struct MockTokenEndpoint {
    state: Arc<Mutex<MockState>>,
}

impl MockTokenEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Queue an outcome for the next unanswered grant
    pub fn push_outcome(&self, outcome: MockTokenOutcome) {
        self.state().scripted.push_back(outcome);
    }

    /// Outcome used once the scripted queue is empty
    pub fn set_fallback(&self, outcome: MockTokenOutcome) {
        self.state().fallback = outcome;
    }

    /// Grants received so far, in order
    pub fn recorded_grants(&self) -> Vec<GrantRequest> {
        self.state().history.clone()
    }

    /// Reset to default behavior and clear history
    pub fn reset(&self) {
        *self.state() = MockState::default();
    }
}

#[async_trait::async_trait]
impl TokenEndpoint for MockTokenEndpoint {
    async fn request_token(&self, grant: GrantRequest) -> Result<TokenGrant, TokenEndpointError> {
        tracing::info!(grant_type = grant.grant_type(), "Mock token endpoint: received grant");

        let mut state = self.state();
        state.history.push(grant);
        let outcome = match state.scripted.pop_front() {
            Some(outcome) => outcome,
            None => state.fallback.clone(),
        };

        match outcome {
            MockTokenOutcome::Issue => {
                state.issued += 1;
                Ok(TokenGrant {
                    access_token: Some(mint_access_token(MOCK_TOKEN_LIFETIME_SECS)),
                    refresh_token: Some(format!("mock-refresh-{}", state.issued)),
                    expires_in: Some(MOCK_TOKEN_LIFETIME_SECS),
                })
            }
            MockTokenOutcome::Grant(grant) => Ok(grant),
            MockTokenOutcome::Reject { status, body } => {
                Err(TokenEndpointError::Rejected { status, body })
            }
            MockTokenOutcome::Fail(message) => Err(TokenEndpointError::Request(message)),
        }
    }
}
