//! Jobber GraphQL HTTP client
//!
//! POSTs the jobs query to the GraphQL endpoint with the session's bearer
//! token and the pinned API version header.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;

use crate::query::{interpret_response, GraphqlRequest, JobsPage, JobsQuery};
use crate::{JobberConfig, JobberError, JobsApi};

pub const VERSION_HEADER: &str = "X-JOBBER-GRAPHQL-VERSION";

/// Real HTTP client for the Jobber GraphQL API
pub struct JobberClient {
    http: reqwest::Client,
    graphql_url: String,
    api_version: String,
}

impl JobberClient {
    pub fn new(config: &JobberConfig) -> Result<Self, JobberError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| JobberError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            graphql_url: config.graphql_url.clone(),
            api_version: config.api_version.clone(),
        })
    }
}

#[async_trait::async_trait]
impl JobsApi for JobberClient {
    async fn fetch_jobs_page(
        &self,
        access_token: &str,
        query: &JobsQuery,
        after: Option<&str>,
    ) -> Result<JobsPage, JobberError> {
        let response = self
            .http
            .post(&self.graphql_url)
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(VERSION_HEADER, &self.api_version)
            .json(&GraphqlRequest::jobs_page(query, after))
            .send()
            .await
            .map_err(|e| JobberError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| JobberError::Request(format!("Failed to read response body: {}", e)))?;

        let page = interpret_response(status, &body).inspect_err(|e| {
            tracing::warn!(status, error = %e, "Jobs page request failed");
        })?;

        tracing::debug!(
            nodes = page.nodes.len(),
            has_next_page = page.has_next_page,
            total_count = ?page.total_count,
            "Jobs page fetched"
        );
        Ok(page)
    }
}
