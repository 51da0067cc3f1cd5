//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use std::env;
use std::str::FromStr;

use crate::{Error, Result};

const DEFAULT_TOKEN_URL: &str = "https://api.getjobber.com/api/oauth/token";
const DEFAULT_GRAPHQL_URL: &str = "https://api.getjobber.com/api/graphql";
const DEFAULT_GRAPHQL_VERSION: &str = "2025-01-20";

#[derive(Clone)]
pub struct Config {
    /// OAuth client registered with Jobber
    pub jobber_client_id: String,
    pub jobber_client_secret: String,
    /// Must match the redirect URI used when the authorization code was issued
    pub jobber_redirect_uri: String,

    /// Remote endpoints
    pub jobber_token_url: String,
    pub jobber_graphql_url: String,
    pub jobber_graphql_version: String,

    /// Upper bound on GraphQL pages fetched for a single request
    pub jobber_max_pages: u32,
    /// Refresh the access token when it has less than this many seconds left
    pub token_refresh_threshold_secs: i64,
    /// Timeout applied to each outbound HTTP request
    pub http_timeout_secs: u64,
    pub cookie_secure: bool,

    /// Service providers (jobber, mock)
    pub token_provider: String,
    pub jobs_provider: String,

    /// Runtime configuration
    pub cors_allowed_origins: Option<String>,
    pub rust_log: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("jobber_client_id", &self.jobber_client_id)
            .field("jobber_client_secret", &"[REDACTED]")
            .field("jobber_redirect_uri", &self.jobber_redirect_uri)
            .field("jobber_token_url", &self.jobber_token_url)
            .field("jobber_graphql_url", &self.jobber_graphql_url)
            .field("jobber_graphql_version", &self.jobber_graphql_version)
            .field("jobber_max_pages", &self.jobber_max_pages)
            .field(
                "token_refresh_threshold_secs",
                &self.token_refresh_threshold_secs,
            )
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("cookie_secure", &self.cookie_secure)
            .field("token_provider", &self.token_provider)
            .field("jobs_provider", &self.jobs_provider)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Configuration(format!("{} is required", key)))
        };
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let token_provider = or_default("TOKEN_PROVIDER", "jobber");
        let jobs_provider = or_default("JOBS_PROVIDER", "jobber");

        // The mock providers never talk to Jobber, so credentials are optional.
        let credential = |key: &str, placeholder: &str| {
            if token_provider == "mock" {
                Ok(or_default(key, placeholder))
            } else {
                required(key)
            }
        };

        let config = Self {
            jobber_client_id: credential("JOBBER_CLIENT_ID", "mock-client-id")?,
            jobber_client_secret: credential("JOBBER_CLIENT_SECRET", "mock-client-secret")?,
            jobber_redirect_uri: credential("JOBBER_REDIRECT_URI", "http://localhost:3000/")?,

            jobber_token_url: or_default("JOBBER_TOKEN_URL", DEFAULT_TOKEN_URL),
            jobber_graphql_url: or_default("JOBBER_GRAPHQL_URL", DEFAULT_GRAPHQL_URL),
            jobber_graphql_version: or_default("JOBBER_GRAPHQL_VERSION", DEFAULT_GRAPHQL_VERSION),

            jobber_max_pages: parse_or(&lookup, "JOBBER_MAX_PAGES", 500)?,
            token_refresh_threshold_secs: parse_or(&lookup, "TOKEN_REFRESH_THRESHOLD_SECS", 300)?,
            http_timeout_secs: parse_or(&lookup, "HTTP_TIMEOUT_SECS", 30)?,
            cookie_secure: parse_or(&lookup, "COOKIE_SECURE", true)?,

            token_provider,
            jobs_provider,

            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").filter(|v| !v.is_empty()),
            rust_log: or_default("RUST_LOG", "jobsheet=debug,tower_http=info"),
            port: parse_or(&lookup, "PORT", 3000)?,
        };

        if config.jobber_max_pages == 0 {
            return Err(Error::Configuration(
                "JOBBER_MAX_PAGES must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Configuration(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}
