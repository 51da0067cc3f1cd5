//! Mock Jobs API Implementation
//!
//! Serves scripted pages and records every request for test assertions.
//! With sample data it also backs the `mock` jobs provider for local
//! development.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::models::{Address, Client, JobRecord, Property};
use crate::query::{JobsPage, JobsQuery};
use crate::{JobberError, JobsApi};

/// What the mock answers to the next page request
#[derive(Debug, Clone, PartialEq)]
pub enum MockJobsOutcome {
    Page(JobsPage),
    Unauthorized,
    Protocol(String),
    Fail(String),
}

impl Default for MockJobsOutcome {
    fn default() -> Self {
        MockJobsOutcome::Page(page(Vec::new(), None))
    }
}

/// A page request as received by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct JobsRequest {
    pub access_token: String,
    pub query: JobsQuery,
    pub after: Option<String>,
}

/// Build a page; `next_cursor` set means another page follows.
pub fn page(nodes: Vec<JobRecord>, next_cursor: Option<&str>) -> JobsPage {
    JobsPage {
        total_count: Some(nodes.len() as i64),
        nodes,
        has_next_page: next_cursor.is_some(),
        end_cursor: next_cursor.map(str::to_string),
    }
}

/// A residential job at "1 Main St, Apt 4" completed one day ago.
pub fn sample_job(id: &str) -> JobRecord {
    let completed: DateTime<FixedOffset> = (Utc::now() - Duration::days(1)).fixed_offset();

    JobRecord {
        id: id.to_string(),
        job_number: Some(1),
        title: Some("Lawn care".to_string()),
        job_status: Some("requires_invoicing".to_string()),
        job_type: Some("ONE_OFF".to_string()),
        total: Some(120.0),
        invoiced_total: Some(0.0),
        uninvoiced_total: Some(120.0),
        completed_at: Some(completed),
        created_at: Some(completed - Duration::days(7)),
        start_at: None,
        end_at: None,
        updated_at: Some(completed),
        client: Client {
            id: format!("client-{}", id),
            name: Some("Jane Doe".to_string()),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            company_name: None,
            title: None,
            is_company: Some(false),
            updated_at: None,
            billing_address: Address {
                street1: "9 Elm St".to_string(),
                street2: None,
                street: None,
                city: Some("Springfield".to_string()),
                province: Some("IL".to_string()),
                postal_code: Some("62701".to_string()),
                country: Some("United States".to_string()),
                name: None,
            },
        },
        property: Property {
            address: Address {
                street1: "1 Main St".to_string(),
                street2: Some("Apt 4".to_string()),
                street: None,
                city: Some("Springfield".to_string()),
                province: Some("IL".to_string()),
                postal_code: Some("62704".to_string()),
                country: Some("United States".to_string()),
                name: None,
            },
        },
    }
}

#[derive(Debug, Default)]
struct MockState {
    scripted: VecDeque<MockJobsOutcome>,
    fallback: MockJobsOutcome,
    history: Vec<JobsRequest>,
}

/// Mock jobs API with programmable pages
#[derive(Debug, Clone, Default)]
pub struct MockJobsApi {
    state: Arc<Mutex<MockState>>,
}

impl MockJobsApi {
    /// Every request answers with an empty final page until scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request answers with the same single page of sample jobs.
    pub fn with_sample_data() -> Self {
        let mock = Self::new();
        mock.set_fallback(MockJobsOutcome::Page(page(
            vec![sample_job("job-1"), sample_job("job-2"), sample_job("job-3")],
            None,
        )));
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Queue an outcome for the next unanswered request
    pub fn push_outcome(&self, outcome: MockJobsOutcome) {
        self.state().scripted.push_back(outcome);
    }

    /// Queue one page per entry, chained with cursors `cursor-1`, `cursor-2`, ...
    pub fn push_pages(&self, pages: Vec<Vec<JobRecord>>) {
        let count = pages.len();
        for (index, nodes) in pages.into_iter().enumerate() {
            let cursor = format!("cursor-{}", index + 1);
            let next = (index + 1 < count).then_some(cursor.as_str());
            self.push_outcome(MockJobsOutcome::Page(page(nodes, next)));
        }
    }

    /// Outcome used once the scripted queue is empty
    pub fn set_fallback(&self, outcome: MockJobsOutcome) {
        self.state().fallback = outcome;
    }

    /// Requests received so far, in order
    pub fn recorded_requests(&self) -> Vec<JobsRequest> {
        self.state().history.clone()
    }

    /// Reset to default behavior and clear history
    pub fn reset(&self) {
        *self.state() = MockState::default();
    }
}

#[async_trait::async_trait]
impl JobsApi for MockJobsApi {
    async fn fetch_jobs_page(
        &self,
        access_token: &str,
        query: &JobsQuery,
        after: Option<&str>,
    ) -> Result<JobsPage, JobberError> {
        tracing::debug!(after = ?after, "Mock jobs API: page requested");

        let mut state = self.state();
        state.history.push(JobsRequest {
            access_token: access_token.to_string(),
            query: *query,
            after: after.map(str::to_string),
        });
        let outcome = match state.scripted.pop_front() {
            Some(outcome) => outcome,
            None => state.fallback.clone(),
        };

        match outcome {
            MockJobsOutcome::Page(page) => Ok(page),
            MockJobsOutcome::Unauthorized => Err(JobberError::Unauthorized),
            MockJobsOutcome::Protocol(message) => Err(JobberError::UpstreamProtocol(message)),
            MockJobsOutcome::Fail(message) => Err(JobberError::Request(message)),
        }
    }
}
