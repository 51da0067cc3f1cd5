//! Token manager
//!
//! Owns the token endpoint and the OAuth configuration. The code exchange
//! (`exchange.rs`) and the refresh guard (`guard.rs`) are implemented on it.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::config::OAuthConfig;
use crate::endpoint::TokenEndpoint;
use crate::jwt::decode_access_expiry;
use crate::types::{TokenGrant, TokenPair};

/// Shared, immutable token lifecycle service.
///
/// Holds no tokens itself; every call receives the session's credentials
/// and returns the pair the caller should persist.
#[derive(Clone)]
pub struct TokenManager {
    pub(crate) endpoint: Arc<dyn TokenEndpoint>,
    pub(crate) config: OAuthConfig,
}

impl TokenManager {
    pub fn new(endpoint: Arc<dyn TokenEndpoint>, config: OAuthConfig) -> Self {
        Self { endpoint, config }
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Build a token pair from a grant response.
    ///
    /// Returns `None` when the response carries no access token. The expiry
    /// comes from the token's own `exp` claim; tokens without a readable claim
    /// fall back to `expires_in`, then to the default lifetime.
    pub(crate) fn pair_from_grant(&self, grant: TokenGrant, now: DateTime<Utc>) -> Option<TokenPair> {
        let access_token = grant.access_token.filter(|t| !t.is_empty())?;

        let access_expiry = decode_access_expiry(&access_token).unwrap_or_else(|_| {
            let lifetime = grant
                .expires_in
                .unwrap_or(self.config.default_lifetime_secs);
            now + Duration::seconds(lifetime)
        });

        Some(TokenPair {
            access_token,
            refresh_token: grant.refresh_token.filter(|t| !t.is_empty()),
            access_expiry,
        })
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("config", &self.config)
            .finish()
    }
}
