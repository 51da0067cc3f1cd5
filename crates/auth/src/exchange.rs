//! Authorization code exchange

use chrono::{DateTime, Utc};

use crate::endpoint::TokenEndpointError;
use crate::error::AuthError;
use crate::manager::TokenManager;
use crate::types::{GrantRequest, TokenPair};

impl TokenManager {
    /// Exchange a one-time authorization code for the session's first token pair.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, AuthError> {
        self.exchange_code_at(code, Utc::now()).await
    }

    pub async fn exchange_code_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        let grant = GrantRequest::AuthorizationCode {
            code: code.to_string(),
            redirect_uri: self.config.redirect_uri.clone(),
        };

        let response = self
            .endpoint
            .request_token(grant)
            .await
            .map_err(|e| match e {
                TokenEndpointError::Rejected { .. } => AuthError::Authorization(e.to_string()),
                other => AuthError::Transport(other.to_string()),
            })?;

        let pair = self.pair_from_grant(response, now).ok_or_else(|| {
            tracing::warn!("Authorization code exchange returned no access token");
            AuthError::Authorization("response did not include an access token".to_string())
        })?;

        tracing::info!(
            access_expiry = %pair.access_expiry,
            has_refresh_token = pair.refresh_token.is_some(),
            "Authorization code exchanged"
        );
        Ok(pair)
    }
}
