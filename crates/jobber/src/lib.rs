//! Jobber GraphQL API client
//!
//! Fetches one page of the `jobs` connection at a time:
//! - `JobberClient` talks to the real GraphQL endpoint
//! - `MockJobsApi` serves scripted pages for tests and local development
//! - `JobsApiFactory` picks one from the configured provider

mod client;
pub mod mock;
mod models;
mod query;

pub use client::JobberClient;
pub use models::{Address, Client, JobRecord, Property};
pub use query::{interpret_response, GraphqlRequest, JobsPage, JobsQuery, JOBS_PAGE_SIZE};

use jobsheet_common::Config;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JobberError {
    #[error("Jobber configuration error: {0}")]
    Configuration(String),

    #[error("Jobber request error: {0}")]
    Request(String),

    #[error("Jobber rejected the access token")]
    Unauthorized,

    #[error("Jobber protocol error: {0}")]
    UpstreamProtocol(String),
}

/// Jobber GraphQL client configuration
#[derive(Debug, Clone)]
pub struct JobberConfig {
    /// Jobs API provider (jobber, mock)
    pub provider: String,
    pub graphql_url: String,
    /// Sent as `X-JOBBER-GRAPHQL-VERSION`
    pub api_version: String,
    pub http_timeout_secs: u64,
}

impl From<&Config> for JobberConfig {
    fn from(config: &Config) -> Self {
        Self {
            provider: config.jobs_provider.clone(),
            graphql_url: config.jobber_graphql_url.clone(),
            api_version: config.jobber_graphql_version.clone(),
            http_timeout_secs: config.http_timeout_secs,
        }
    }
}

/// Source of job pages
#[async_trait::async_trait]
pub trait JobsApi: Send + Sync {
    /// Fetch the page after `after` (the first page when `None`).
    async fn fetch_jobs_page(
        &self,
        access_token: &str,
        query: &JobsQuery,
        after: Option<&str>,
    ) -> Result<JobsPage, JobberError>;
}

/// Factory for creating JobsApi implementations
pub struct JobsApiFactory;

impl JobsApiFactory {
    pub fn create(config: &JobberConfig) -> Result<Box<dyn JobsApi>, JobberError> {
        match config.provider.as_str() {
            "jobber" => {
                tracing::info!(graphql_url = %config.graphql_url, "Creating Jobber GraphQL client");
                Ok(Box::new(JobberClient::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock jobs API with sample data");
                Ok(Box::new(mock::MockJobsApi::with_sample_data()))
            }
            provider => Err(JobberError::Configuration(format!(
                "Unknown jobs provider: {}. Supported providers: jobber, mock",
                provider
            ))),
        }
    }
}
