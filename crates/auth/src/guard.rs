//! Token refresh guard
//!
//! Runs synchronously right before every protected remote call. There is no
//! background refresh: a session that is never used is never refreshed.

use chrono::{DateTime, Duration, Utc};

use crate::error::AuthError;
use crate::jwt::decode_access_expiry;
use crate::manager::TokenManager;
use crate::types::{GrantRequest, SessionCredentials, TokenPair};

/// Result of the pre-call check
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Access token has enough lifetime left; nothing changed
    Fresh(TokenPair),
    /// Access token was replaced. `refresh_rotated` is true when the issuer
    /// also returned a new refresh token.
    Refreshed {
        pair: TokenPair,
        refresh_rotated: bool,
    },
}

impl GuardOutcome {
    pub fn pair(&self) -> &TokenPair {
        match self {
            GuardOutcome::Fresh(pair) => pair,
            GuardOutcome::Refreshed { pair, .. } => pair,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.pair().access_token
    }

    pub fn was_refreshed(&self) -> bool {
        matches!(self, GuardOutcome::Refreshed { .. })
    }
}

impl TokenManager {
    /// True when the access token has less than the refresh threshold left.
    ///
    /// Exactly the threshold does not trigger a refresh.
    pub fn needs_refresh(&self, pair: &TokenPair, now: DateTime<Utc>) -> bool {
        pair.remaining_lifetime(now) < Duration::seconds(self.config.refresh_threshold_secs)
    }

    /// Make sure the session's access token is usable for the next call.
    pub async fn ensure_fresh(
        &self,
        credentials: SessionCredentials,
    ) -> Result<GuardOutcome, AuthError> {
        self.ensure_fresh_at(credentials, Utc::now()).await
    }

    pub async fn ensure_fresh_at(
        &self,
        credentials: SessionCredentials,
        now: DateTime<Utc>,
    ) -> Result<GuardOutcome, AuthError> {
        let SessionCredentials {
            access_token,
            refresh_token,
        } = credentials;

        // An absent access token has expired along with its cookie.
        let (current_refresh, remaining_secs) = match access_token {
            Some(access_token) => {
                let access_expiry = decode_access_expiry(&access_token)?;
                let current = TokenPair {
                    access_token,
                    refresh_token,
                    access_expiry,
                };
                if !self.needs_refresh(&current, now) {
                    return Ok(GuardOutcome::Fresh(current));
                }
                let remaining_secs = current.remaining_lifetime(now).num_seconds();
                (current.refresh_token, Some(remaining_secs))
            }
            None => (refresh_token, None),
        };

        self.refresh(current_refresh, remaining_secs, now).await
    }

    async fn refresh(
        &self,
        current_refresh: Option<String>,
        remaining_secs: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<GuardOutcome, AuthError> {
        let refresh_token = current_refresh
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;

        tracing::debug!(?remaining_secs, "Access token missing or near expiry, refreshing");

        let response = self
            .endpoint
            .request_token(GrantRequest::RefreshToken { refresh_token })
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Token refresh failed");
                AuthError::TokenRefresh(e.to_string())
            })?;

        let issued = self.pair_from_grant(response, now).ok_or_else(|| {
            tracing::warn!("Token refresh returned no access token");
            AuthError::TokenRefresh("response did not include an access token".to_string())
        })?;

        // Issuers that do not rotate refresh tokens omit them; keep the current one.
        let refresh_rotated = issued.refresh_token.is_some();
        let pair = TokenPair {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token.or(current_refresh),
            access_expiry: issued.access_expiry,
        };

        tracing::info!(refresh_rotated, access_expiry = %pair.access_expiry, "Token refreshed");

        Ok(GuardOutcome::Refreshed {
            pair,
            refresh_rotated,
        })
    }
}
