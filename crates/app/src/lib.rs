//! Jobsheet application composition root
//!
//! Builds the token and jobs services from configuration and composes the
//! domain routers into a single application.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use jobsheet_auth::{CredentialStore, OAuthConfig, TokenEndpoint, TokenEndpointFactory, TokenManager};
use jobsheet_common::Config;
use jobsheet_jobber::{JobberConfig, JobsApi, JobsApiFactory};
use jobsheet_jobs::JobsState;
use jobsheet_sessions::SessionsState;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

/// Largest accepted request body; both JSON bodies are a few dozen bytes
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the main application router from configuration
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let token_endpoint = TokenEndpointFactory::create(&OAuthConfig::from(config))?;
    let jobs_api = JobsApiFactory::create(&JobberConfig::from(config))?;

    Ok(build_router(
        config,
        Arc::from(token_endpoint),
        Arc::from(jobs_api),
    ))
}

/// Compose the domain routers around already-built services
pub fn build_router(
    config: &Config,
    token_endpoint: Arc<dyn TokenEndpoint>,
    jobs_api: Arc<dyn JobsApi>,
) -> Router {
    let tokens = TokenManager::new(token_endpoint, OAuthConfig::from(config));
    let store = CredentialStore::new(config.cookie_secure);

    let sessions_state = SessionsState {
        tokens: tokens.clone(),
        store,
    };

    let jobs_state = JobsState {
        tokens,
        store,
        jobs: jobs_api,
        max_pages: config.jobber_max_pages,
    };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(jobsheet_sessions::routes().with_state(sessions_state))
        .merge(jobsheet_jobs::routes().with_state(jobs_state))
}

/// CORS for a browser front end on another origin. Credentials are allowed
/// so the session cookies travel; origins are a comma-separated list.
pub fn build_cors_layer(allowed_origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Wrap the router with the body limit, then request tracing and CORS.
///
/// The limit goes on the router by itself: CORS needs a `Default` response
/// body, which the limit layer's body type does not provide.
pub fn with_http_layers(app: Router, cors_origins: &str) -> Router {
    app.layer(body_limit_layer()).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(build_cors_layer(cors_origins))
            .into_inner(),
    )
}

/// Log filter from `RUST_LOG`, or the configured default when it is unset
pub fn log_filter(config: &Config) -> EnvFilter {
    EnvFilter::new(&config.rust_log)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
