//! OAuth client configuration

use jobsheet_common::Config;

/// Default access token lifetime when the issuer declares none
pub const DEFAULT_ACCESS_LIFETIME_SECS: i64 = 3600;

/// OAuth client configuration
#[derive(Clone)]
pub struct OAuthConfig {
    /// Token endpoint provider (jobber, mock)
    pub provider: String,
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    /// Pinned to the URI used during the interactive login step
    pub redirect_uri: String,
    pub refresh_threshold_secs: i64,
    pub default_lifetime_secs: i64,
    pub http_timeout_secs: u64,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("provider", &self.provider)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("token_url", &self.token_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("refresh_threshold_secs", &self.refresh_threshold_secs)
            .field("default_lifetime_secs", &self.default_lifetime_secs)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

impl From<&Config> for OAuthConfig {
    fn from(config: &Config) -> Self {
        Self {
            provider: config.token_provider.clone(),
            client_id: config.jobber_client_id.clone(),
            client_secret: config.jobber_client_secret.clone(),
            token_url: config.jobber_token_url.clone(),
            redirect_uri: config.jobber_redirect_uri.clone(),
            refresh_threshold_secs: config.token_refresh_threshold_secs,
            default_lifetime_secs: DEFAULT_ACCESS_LIFETIME_SECS,
            http_timeout_secs: config.http_timeout_secs,
        }
    }
}
