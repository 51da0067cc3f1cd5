//! Jobber OAuth token endpoint client
//!
//! POSTs form-encoded grants to the token URL with the client credentials.

use std::time::Duration;

use crate::config::OAuthConfig;
use crate::endpoint::{TokenEndpoint, TokenEndpointError};
use crate::types::{GrantRequest, TokenGrant};

/// Real HTTP client for the OAuth token endpoint
pub struct OAuthClient {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl OAuthClient {
    pub fn new(config: &OAuthConfig) -> Result<Self, TokenEndpointError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| TokenEndpointError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    fn form_fields<'a>(&'a self, grant: &'a GrantRequest) -> Vec<(&'static str, &'a str)> {
        let mut fields = vec![
            ("grant_type", grant.grant_type()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        match grant {
            GrantRequest::AuthorizationCode { code, redirect_uri } => {
                fields.push(("code", code.as_str()));
                fields.push(("redirect_uri", redirect_uri.as_str()));
            }
            GrantRequest::RefreshToken { refresh_token } => {
                fields.push(("refresh_token", refresh_token.as_str()));
            }
        }
        fields
    }
}

#[async_trait::async_trait]
impl TokenEndpoint for OAuthClient {
    async fn request_token(&self, grant: GrantRequest) -> Result<TokenGrant, TokenEndpointError> {
        let grant_type = grant.grant_type();

        let response = self
            .http
            .post(&self.token_url)
            .form(&self.form_fields(&grant))
            .send()
            .await
            .map_err(|e| TokenEndpointError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            tracing::warn!(grant_type, status = %status, "Token endpoint rejected grant");
            return Err(TokenEndpointError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let grant: TokenGrant = response
            .json()
            .await
            .map_err(|e| TokenEndpointError::Response(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(
            grant_type,
            has_refresh_token = grant.refresh_token.is_some(),
            expires_in = ?grant.expires_in,
            "Token endpoint responded"
        );
        Ok(grant)
    }
}
