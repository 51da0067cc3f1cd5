//! Token endpoint abstraction
//!
//! Both OAuth grants (authorization code and refresh token) share the same
//! HTTP mechanics; implementations only differ in where the grant goes.

use thiserror::Error;

use crate::client::OAuthClient;
use crate::config::OAuthConfig;
use crate::mock::MockTokenEndpoint;
use crate::types::{GrantRequest, TokenGrant};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenEndpointError {
    #[error("Token endpoint configuration error: {0}")]
    Configuration(String),

    #[error("Token endpoint request error: {0}")]
    Request(String),

    #[error("Token endpoint rejected grant with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Token endpoint response error: {0}")]
    Response(String),
}

/// OAuth token endpoint
#[async_trait::async_trait]
pub trait TokenEndpoint: Send + Sync {
    /// Send one grant and return the decoded response body.
    ///
    /// A 2xx body without `access_token` is returned as-is; judging it is
    /// the caller's job.
    async fn request_token(&self, grant: GrantRequest) -> Result<TokenGrant, TokenEndpointError>;
}

/// Factory for creating TokenEndpoint implementations
pub struct TokenEndpointFactory;

impl TokenEndpointFactory {
    pub fn create(config: &OAuthConfig) -> Result<Box<dyn TokenEndpoint>, TokenEndpointError> {
        match config.provider.as_str() {
            "jobber" => {
                tracing::info!(token_url = %config.token_url, "Creating Jobber token endpoint client");
                Ok(Box::new(OAuthClient::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock token endpoint");
                Ok(Box::new(MockTokenEndpoint::new()))
            }
            provider => Err(TokenEndpointError::Configuration(format!(
                "Unknown token provider: {}. Supported providers: jobber, mock",
                provider
            ))),
        }
    }
}
